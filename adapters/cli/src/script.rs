//! Line-oriented replay scripts.
//!
//! Each non-empty line names one inbound message. `#` starts a comment.
//!
//! ```text
//! tick               # Timeout
//! dir U              # Direction change (U, D, L or R)
//! food 3 4           # Unsolicited food placement
//! food-resp 3 4      # Answer to a food request
//! pause              # Pause toggle
//! raw 0x70           # Any payload-free message by id
//! ```

use snake_core::{Coord, Direction, Message, MessageId};
use thiserror::Error;

const COMMENT: char = '#';

/// Reasons a replay script may be rejected.
#[derive(Debug, PartialEq, Eq, Error)]
pub(crate) enum ScriptError {
    /// The first word of a line is not a known command.
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },
    /// A command received the wrong number of arguments.
    #[error("line {line}: '{command}' expects {expected} argument(s)")]
    ArgumentCount {
        line: usize,
        command: &'static str,
        expected: usize,
    },
    /// An argument could not be parsed.
    #[error("line {line}: invalid {what} '{token}'")]
    InvalidArgument {
        line: usize,
        what: &'static str,
        token: String,
    },
    /// A raw message id names a kind that carries a payload.
    #[error("line {line}: message id {id} cannot be sent without a payload")]
    PayloadRequired { line: usize, id: MessageId },
    /// A raw message id names no protocol message at all.
    #[error("line {line}: message id {id} is not part of the protocol")]
    UnknownMessageId { line: usize, id: MessageId },
}

/// One scripted message together with its source line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Step {
    /// One-based line number in the script.
    pub(crate) line: usize,
    /// Message delivered to the engine.
    pub(crate) message: Message,
}

/// Parses a whole script into replay steps.
pub(crate) fn parse(source: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let content = raw.split(COMMENT).next().unwrap_or_default();
        let words: Vec<&str> = content.split_whitespace().collect();
        let Some((&command, arguments)) = words.split_first() else {
            continue;
        };
        let message = parse_command(line, command, arguments)?;
        steps.push(Step { line, message });
    }
    Ok(steps)
}

fn parse_command(line: usize, command: &str, arguments: &[&str]) -> Result<Message, ScriptError> {
    match command {
        "tick" => {
            expect_arguments(line, "tick", arguments, 0)?;
            Ok(Message::Timeout)
        }
        "pause" => {
            expect_arguments(line, "pause", arguments, 0)?;
            Ok(Message::Pause)
        }
        "dir" => {
            expect_arguments(line, "dir", arguments, 1)?;
            let token = arguments[0];
            let mut chars = token.chars();
            let direction = match (chars.next(), chars.next()) {
                (Some(value), None) => Direction::from_char(value.to_ascii_uppercase()),
                _ => None,
            };
            direction
                .map(|direction| Message::Direction { direction })
                .ok_or_else(|| ScriptError::InvalidArgument {
                    line,
                    what: "direction",
                    token: token.to_owned(),
                })
        }
        "food" => {
            expect_arguments(line, "food", arguments, 2)?;
            let position = parse_coord(line, arguments)?;
            Ok(Message::FoodPlaced { position })
        }
        "food-resp" => {
            expect_arguments(line, "food-resp", arguments, 2)?;
            let position = parse_coord(line, arguments)?;
            Ok(Message::FoodPlacementConfirmed { position })
        }
        "raw" => {
            expect_arguments(line, "raw", arguments, 1)?;
            let id = parse_message_id(line, arguments[0])?;
            if !id.is_known() {
                return Err(ScriptError::UnknownMessageId { line, id });
            }
            Message::without_payload(id).ok_or(ScriptError::PayloadRequired { line, id })
        }
        other => Err(ScriptError::UnknownCommand {
            line,
            command: other.to_owned(),
        }),
    }
}

fn expect_arguments(
    line: usize,
    command: &'static str,
    arguments: &[&str],
    expected: usize,
) -> Result<(), ScriptError> {
    if arguments.len() == expected {
        Ok(())
    } else {
        Err(ScriptError::ArgumentCount {
            line,
            command,
            expected,
        })
    }
}

fn parse_coord(line: usize, arguments: &[&str]) -> Result<Coord, ScriptError> {
    let parse = |token: &str| {
        token
            .parse::<i32>()
            .map_err(|_| ScriptError::InvalidArgument {
                line,
                what: "coordinate",
                token: token.to_owned(),
            })
    };
    Ok(Coord::new(parse(arguments[0])?, parse(arguments[1])?))
}

fn parse_message_id(line: usize, token: &str) -> Result<MessageId, ScriptError> {
    let parsed = match token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => token.parse::<u32>(),
    };
    parsed
        .map(MessageId::new)
        .map_err(|_| ScriptError::InvalidArgument {
            line,
            what: "message id",
            token: token.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command() {
        let steps = parse(
            "tick\n\
             dir u\n\
             food 3 4\n\
             food-resp -1 2\n\
             pause\n\
             raw 0x71\n\
             raw 32\n",
        )
        .expect("script is valid");

        let messages: Vec<Message> = steps.iter().map(|step| step.message).collect();
        assert_eq!(
            messages,
            vec![
                Message::Timeout,
                Message::Direction {
                    direction: Direction::Up,
                },
                Message::FoodPlaced {
                    position: Coord::new(3, 4),
                },
                Message::FoodPlacementConfirmed {
                    position: Coord::new(-1, 2),
                },
                Message::Pause,
                Message::Loss,
                Message::Timeout,
            ],
        );
    }

    #[test]
    fn skips_comments_and_blank_lines_but_keeps_line_numbers() {
        let steps = parse("# header\n\n   \ntick # advance\n").expect("script is valid");
        assert_eq!(
            steps,
            vec![Step {
                line: 4,
                message: Message::Timeout,
            }],
        );
    }

    #[test]
    fn rejects_unknown_commands() {
        assert_eq!(
            parse("tick\njump"),
            Err(ScriptError::UnknownCommand {
                line: 2,
                command: "jump".to_owned(),
            }),
        );
    }

    #[test]
    fn rejects_wrong_argument_counts() {
        assert_eq!(
            parse("food 1"),
            Err(ScriptError::ArgumentCount {
                line: 1,
                command: "food",
                expected: 2,
            }),
        );
        assert_eq!(
            parse("tick now"),
            Err(ScriptError::ArgumentCount {
                line: 1,
                command: "tick",
                expected: 0,
            }),
        );
    }

    #[test]
    fn rejects_bad_arguments() {
        assert_eq!(
            parse("dir north"),
            Err(ScriptError::InvalidArgument {
                line: 1,
                what: "direction",
                token: "north".to_owned(),
            }),
        );
        assert_eq!(
            parse("food-resp 1 y"),
            Err(ScriptError::InvalidArgument {
                line: 1,
                what: "coordinate",
                token: "y".to_owned(),
            }),
        );
        assert_eq!(
            parse("raw 0xzz"),
            Err(ScriptError::InvalidArgument {
                line: 1,
                what: "message id",
                token: "0xzz".to_owned(),
            }),
        );
    }

    #[test]
    fn raw_requires_a_payload_free_kind() {
        assert_eq!(
            parse("raw 0x30"),
            Err(ScriptError::PayloadRequired {
                line: 1,
                id: MessageId::DISPLAY,
            }),
        );
    }

    #[test]
    fn raw_rejects_ids_outside_the_protocol() {
        assert_eq!(
            parse("tick\nraw 0xff"),
            Err(ScriptError::UnknownMessageId {
                line: 2,
                id: MessageId::new(0xff),
            }),
        );
        assert_eq!(
            ScriptError::UnknownMessageId {
                line: 2,
                id: MessageId::new(0xff),
            }
            .to_string(),
            "line 2: message id 0xff is not part of the protocol",
        );
    }
}
