use std::ffi::OsString;
use std::fmt;
use std::os::unix::ffi::OsStrExt;

use i2cctl_decode::{decode, parse_byte, parse_count};
use log::warn;

use crate::error::UsageError;

/// One requested bus operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Get { register: u8 },
    Set { register: u8, value: u8 },
    Write { payload: Vec<u8> },
    Read { count: usize },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get { register } => write!(f, "get value for command (0x{register:x})"),
            Self::Set { register, value } => {
                write!(f, "set value (0x{value:x}) for command (0x{register:x})")
            }
            Self::Write { payload } => write!(f, "write {} bytes", payload.len()),
            Self::Read { count } => write!(f, "read {count} bytes"),
        }
    }
}

/// Largest `read` the i2c-dev driver serves in one transfer.
pub const MAX_READ_COUNT: usize = 8192;

const KEYWORDS: [&[u8]; 4] = [b"get", b"set", b"write", b"read"];

pub fn is_keyword(token: &[u8]) -> bool {
    KEYWORDS.contains(&token)
}

/// Turns the tokens from the first action keyword onwards into the ordered
/// list of actions.
///
/// `write` takes every remaining token, joined back together with single
/// spaces before escape decoding, so `write Hi \x21` sends `Hi !`. Tokens
/// that are not part of an action are skipped with a warning. A `read`
/// count above [`MAX_READ_COUNT`] is rejected.
pub fn parse_actions(tokens: &[OsString]) -> Result<Vec<Action>, UsageError> {
    let mut actions = Vec::new();
    let mut rest = tokens.iter();

    while let Some(token) = rest.next() {
        match token.as_bytes() {
            b"get" => {
                let register = rest.next().ok_or_else(|| missing_value("get"))?;
                actions.push(Action::Get {
                    register: parse_byte(register.as_bytes()),
                });
            }
            b"set" => {
                let (Some(register), Some(value)) = (rest.next(), rest.next()) else {
                    return Err(UsageError::MissingValues("set".into()));
                };
                actions.push(Action::Set {
                    register: parse_byte(register.as_bytes()),
                    value: parse_byte(value.as_bytes()),
                });
            }
            b"write" => {
                let data: Vec<&[u8]> = rest.by_ref().map(|t| t.as_bytes()).collect();
                if data.is_empty() {
                    return Err(missing_value("write"));
                }
                actions.push(Action::Write {
                    payload: decode(&data.join(&b' ')),
                });
            }
            b"read" => {
                let count = match rest.as_slice().first() {
                    Some(next) if !is_keyword(next.as_bytes()) => {
                        rest.next();
                        parse_count(next.as_bytes())
                            .filter(|&count| count <= MAX_READ_COUNT)
                            .ok_or_else(|| {
                                UsageError::InvalidCount(next.to_string_lossy().into_owned())
                            })?
                    }
                    _ => 1,
                };
                actions.push(Action::Read { count });
            }
            _ => warn!(
                "Ignoring unrecognized action ({}).",
                token.to_string_lossy()
            ),
        }
    }

    Ok(actions)
}

fn missing_value(keyword: &str) -> UsageError {
    UsageError::MissingValue(keyword.into())
}
