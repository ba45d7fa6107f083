use std::fmt;

use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicationStatus {
    #[serde(rename = "Превышенное")]
    Exceeded,
    #[serde(rename = "Возможно превышение")]
    PossiblyExceeded,
    #[serde(rename = "Нормальное")]
    Normal,
}

impl IndicationStatus {
    pub const ALL: [IndicationStatus; 3] = [
        IndicationStatus::Exceeded,
        IndicationStatus::PossiblyExceeded,
        IndicationStatus::Normal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IndicationStatus::Exceeded => "Превышенное",
            IndicationStatus::PossiblyExceeded => "Возможно превышение",
            IndicationStatus::Normal => "Нормальное",
        }
    }
}

impl fmt::Display for IndicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Indication {
    /// Reporting sensor
    pub sensor_id: Id,
    /// Backend timestamp, ISO-8601 without offset
    pub time: String,
    /// Measured value
    pub value: f64,
    /// Classification against the room limitation
    pub status: IndicationStatus,
}
