use std::path::PathBuf;

use thiserror::Error;

use crate::action::Action;

/// Failure of a single bus primitive.
#[derive(Debug, Error)]
pub enum BusError {
    #[error("open {path} failed: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("binding slave address 0x{address:x} failed: {source}")]
    Bind {
        address: u8,
        #[source]
        source: nix::Error,
    },
    #[error("read failed: {0}")]
    Read(#[source] std::io::Error),
    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),
    #[error("close failed: {0}")]
    Close(#[source] nix::Error),
}

/// Malformed command line. Raised before the bus is opened.
#[derive(Debug, Error, PartialEq)]
pub enum UsageError {
    #[error("Invalid usage. Expected a value for argument ({0}).")]
    MissingValue(String),
    #[error("Invalid usage. Expected two values for argument ({0}).")]
    MissingValues(String),
    #[error(
        "Invalid usage. Expected a byte count of at most {max} for argument (read), got ({0}).",
        max = crate::action::MAX_READ_COUNT
    )]
    InvalidCount(String),
}

#[derive(Debug, Error)]
pub enum TransferError {
    #[error(transparent)]
    Bus(#[from] BusError),
    #[error("short read, got {actual} of {expected} bytes")]
    ShortRead { expected: usize, actual: usize },
}

#[derive(Debug, Error)]
pub enum CtlError {
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error("Could not open I2C device ({device}) for slave address (0x{address:x}).")]
    Open {
        device: String,
        address: u8,
        #[source]
        source: BusError,
    },
    #[error("Could not {action} for slave address (0x{address:x}) using I2C device ({device}).")]
    Transfer {
        action: Action,
        device: String,
        address: u8,
        #[source]
        source: TransferError,
    },
    #[error("Could not write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CtlError {
    /// The error followed by its immediate cause, on one line.
    pub fn report(&self) -> String {
        match std::error::Error::source(self) {
            Some(cause) => format!("{self} ({cause})"),
            None => self.to_string(),
        }
    }
}
