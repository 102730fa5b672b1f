//! Core functionalities: bus transport, argument handling, action dispatch.

pub mod action;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod help;
#[cfg(target_os = "linux")]
pub mod linux_i2c;
pub mod transport;

pub use action::Action;
pub use config::{Command, Config, Invocation};
pub use dispatch::execute;
pub use error::{BusError, CtlError, TransferError, UsageError};
pub use format::ResultFormat;
pub use help::USAGE;
#[cfg(target_os = "linux")]
pub use linux_i2c::LinuxI2c;
pub use transport::{I2cBus, Session};
