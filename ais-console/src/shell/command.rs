use std::str::FromStr;

use ais_api::Id;

use crate::entity::descriptor::EntityKind;

pub const HELP: &str = "\
login <login> <password>   start a session
logout                     end the session
entities                   list entity sections
show <entity>              print a section
filter <entity> [id]       set the parent filter (no load)
refresh <entity>           load a section with its filter
create <entity>            open the create form
edit <entity> <row>        open the edit form for a row
delete <entity> <row>      ask to delete a row
set <field> [value]        fill a field of the open form
form                       print the open form
submit                     submit the open form
cancel                     close the open form
overview <sensor id>       readings and limits of a sensor
help                       this text
quit                       leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { login: String, password: String },
    Logout,
    Entities,
    Show(EntityKind),
    Filter(EntityKind, String),
    Refresh(EntityKind),
    Create(EntityKind),
    /// Row numbers are 1-based, as printed.
    Edit(EntityKind, usize),
    Delete(EntityKind, usize),
    Set { field: String, value: String },
    Form,
    Submit,
    Cancel,
    Overview(Id),
    Help,
    Quit,
}

impl Command {
    /// Commands accepted without a session.
    pub fn is_public(&self) -> bool {
        matches!(self, Command::Login { .. } | Command::Help | Command::Quit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown command: {0}. Type `help` for the list")]
    Unknown(String),

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Not a number: {0}")]
    InvalidNumber(String),
}

/// Splits off the first whitespace-delimited word.
fn next_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(at) => (&input[..at], input[at..].trim_start()),
        None => (input, ""),
    }
}

fn entity(word: &str, usage: &'static str) -> Result<EntityKind, ParseError> {
    if word.is_empty() {
        return Err(ParseError::Usage(usage));
    }
    word.parse().map_err(ParseError::UnknownEntity)
}

fn number<T: FromStr>(word: &str, usage: &'static str) -> Result<T, ParseError> {
    if word.is_empty() {
        return Err(ParseError::Usage(usage));
    }
    word.parse().map_err(|_| ParseError::InvalidNumber(word.to_string()))
}

fn row(word: &str, usage: &'static str) -> Result<usize, ParseError> {
    match number(word, usage)? {
        0 => Err(ParseError::InvalidNumber(word.to_string())),
        n => Ok(n),
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (name, rest) = next_word(line);
        let (first, tail) = next_word(rest);

        let command = match name {
            "login" => {
                let usage = "login <login> <password>";
                let (password, _) = next_word(tail);
                if first.is_empty() || password.is_empty() {
                    return Err(ParseError::Usage(usage));
                }
                Command::Login {
                    login: first.to_string(),
                    password: password.to_string(),
                }
            }
            "logout" => Command::Logout,
            "entities" => Command::Entities,
            "show" => Command::Show(entity(first, "show <entity>")?),
            "filter" => Command::Filter(entity(first, "filter <entity> [id]")?, tail.trim().to_string()),
            "refresh" => Command::Refresh(entity(first, "refresh <entity>")?),
            "create" => Command::Create(entity(first, "create <entity>")?),
            "edit" => {
                let usage = "edit <entity> <row>";
                Command::Edit(entity(first, usage)?, row(next_word(tail).0, usage)?)
            }
            "delete" => {
                let usage = "delete <entity> <row>";
                Command::Delete(entity(first, usage)?, row(next_word(tail).0, usage)?)
            }
            "set" => {
                if first.is_empty() {
                    return Err(ParseError::Usage("set <field> [value]"));
                }
                Command::Set {
                    field: first.to_string(),
                    value: tail.trim_end().to_string(),
                }
            }
            "form" => Command::Form,
            "submit" => Command::Submit,
            "cancel" => Command::Cancel,
            "overview" => Command::Overview(number(first, "overview <sensor id>")?),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}
