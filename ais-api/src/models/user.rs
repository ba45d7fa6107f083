use std::fmt;

use serde::{Deserialize, Serialize};

/// Access level of a console user. Labels are the backend's enum values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "Администратор")]
    Administrator,
    #[serde(rename = "Оператор")]
    Operator,
    #[default]
    #[serde(rename = "Пользователь")]
    Viewer,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Administrator, UserRole::Operator, UserRole::Viewer];

    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Administrator => "Администратор",
            UserRole::Operator => "Оператор",
            UserRole::Viewer => "Пользователь",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}
