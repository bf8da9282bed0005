use crate::dial::{POINT_COUNT, Step};
use crate::panel::PanelInput;
use directories::BaseDirs;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

const SOCKET_NAME: &str = "timewheel.sock";

/// Line protocol spoken over the control socket, one command per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Step(Step),
    /// Zero-based on the inside, one-based on the wire.
    Select(usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("Section must be a number from 1 to 6, got '{0}'")]
    BadIndex(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some(word), None, None) => word
                .parse::<Step>()
                .map(Command::Step)
                .map_err(|_| CommandError::Unknown(s.trim().to_owned())),
            (Some(word), Some(arg), None) if word.eq_ignore_ascii_case("select") => {
                arg.parse::<usize>()
                    .ok()
                    .filter(|n| (1..=POINT_COUNT).contains(n))
                    .map(|n| Command::Select(n - 1))
                    .ok_or_else(|| CommandError::BadIndex(arg.to_owned()))
            }
            _ => Err(CommandError::Unknown(s.trim().to_owned())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step(step) => write!(f, "{step}"),
            Self::Select(index) => write!(f, "select {}", index + 1),
        }
    }
}

impl From<Command> for PanelInput {
    fn from(command: Command) -> Self {
        match command {
            Command::Step(step) => PanelInput::Advance(step),
            Command::Select(index) => PanelInput::Select(index),
        }
    }
}

pub fn socket_path() -> PathBuf {
    BaseDirs::new()
        .and_then(|dirs| dirs.runtime_dir().map(|d| d.join(SOCKET_NAME)))
        .unwrap_or_else(|| std::env::temp_dir().join(SOCKET_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        let cases = vec![
            ("next", Command::Step(Step::Next)),
            ("  PREV ", Command::Step(Step::Previous)),
            ("previous", Command::Step(Step::Previous)),
            ("select 1", Command::Select(0)),
            ("Select   6", Command::Select(5)),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<Command>(), Ok(expected), "{line}");
        }
    }

    #[test]
    fn test_command_rejects_garbage() {
        assert_eq!(
            "spin".parse::<Command>(),
            Err(CommandError::Unknown("spin".to_owned()))
        );
        assert_eq!(
            "select 7".parse::<Command>(),
            Err(CommandError::BadIndex("7".to_owned()))
        );
        assert_eq!(
            "select 0".parse::<Command>(),
            Err(CommandError::BadIndex("0".to_owned()))
        );
        assert!("".parse::<Command>().is_err());
        assert!("select 1 2".parse::<Command>().is_err());
    }

    #[test]
    fn test_command_wire_format() {
        for command in [
            Command::Step(Step::Next),
            Command::Step(Step::Previous),
            Command::Select(3),
        ] {
            assert_eq!(command.to_string().parse::<Command>(), Ok(command));
        }
        assert_eq!(Command::Select(3).to_string(), "select 4");
    }

    #[test]
    fn test_commands_map_to_dial_controls() {
        assert_eq!(
            PanelInput::from(Command::Step(Step::Next)),
            PanelInput::Advance(Step::Next)
        );
        assert_eq!(PanelInput::from(Command::Select(2)), PanelInput::Select(2));
    }
}
