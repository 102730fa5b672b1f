use std::ffi::OsString;
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

use i2cctl_decode::parse_byte;
use log::warn;

use crate::action::{self, Action};
use crate::error::UsageError;
use crate::format::ResultFormat;

pub const DEFAULT_DEVICE: &str = "/dev/i2c";

/// Settings collected from the option tokens in front of the first action.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub device: PathBuf,
    pub address: u8,
    pub format: ResultFormat,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: PathBuf::from(DEFAULT_DEVICE),
            address: 0,
            format: ResultFormat::default(),
            verbose: false,
        }
    }
}

/// What one command line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Help,
    Run(Command),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub config: Config,
    pub actions: Vec<Action>,
}

impl Invocation {
    /// Parses the arguments that follow the program name.
    pub fn parse<I, T>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let mut config = Config::default();
        let mut rest = args.iter();

        while let Some(arg) = rest.as_slice().first() {
            let bytes = arg.as_bytes();
            if action::is_keyword(bytes) {
                break;
            }
            rest.next();

            match bytes {
                b"--" => {
                    if let Some(path) = rest.next() {
                        config.device = PathBuf::from(path);
                    }
                }
                b"-v" | b"--verbose" => config.verbose = true,
                b"-h" | b"--help" => return Ok(Self::Help),
                b"-f" | b"--format" => {
                    let value = rest.next().ok_or_else(|| missing(arg))?;
                    config.format = ResultFormat::parse(value.as_bytes());
                }
                b"-d" | b"--device" => {
                    let value = rest.next().ok_or_else(|| missing(arg))?;
                    config.device = PathBuf::from(value);
                }
                [b'@', address @ ..] => config.address = parse_byte(address),
                b"-a" | b"--slave-address" | b"--address" => {
                    let value = rest.next().ok_or_else(|| missing(arg))?;
                    config.address = parse_byte(value.as_bytes());
                }
                [b'-', b'-', path @ ..] => {
                    config.device = PathBuf::from(std::ffi::OsStr::from_bytes(path));
                }
                _ => {
                    let path = PathBuf::from(arg);
                    if path.exists() {
                        config.device = path;
                    } else {
                        warn!(
                            "Did not parse argument as device, file does not exist ({}).",
                            arg.to_string_lossy()
                        );
                    }
                }
            }
        }

        let actions = action::parse_actions(rest.as_slice())?;
        Ok(Self::Run(Command { config, actions }))
    }
}

fn missing(arg: &OsString) -> UsageError {
    UsageError::MissingValue(arg.to_string_lossy().into_owned())
}
