use std::io::Write;
use std::path::Path;

use log::{error, info};

use crate::action::Action;
use crate::config::{Command, Config};
use crate::error::{BusError, CtlError, TransferError};
use crate::transport::{I2cBus, Session};

/// Opens the bus with `open` and runs every action of `command` in order.
///
/// Output of `get` and `read` goes to `out`. The first failing action stops
/// the run; its error is logged while the bus is still open and then
/// returned. The bus is closed exactly once before this returns, whatever
/// the outcome.
pub fn execute<B, F, W>(command: &Command, open: F, out: &mut W) -> Result<(), CtlError>
where
    B: I2cBus,
    F: FnOnce(&Path, u8) -> Result<B, BusError>,
    W: Write,
{
    let config = &command.config;
    info!("I2C device = {}", config.device.display());
    info!("I2C slave address = {}", config.address);

    let bus = open(&config.device, config.address)
        .map_err(|source| CtlError::Open {
            device: config.device.display().to_string(),
            address: config.address,
            source,
        })
        .map_err(reported)?;
    info!("I2C device opened.");

    let mut dispatcher = Dispatcher {
        config,
        session: Session::new(bus),
        out,
    };
    // the session outlives the report, so the close note comes last
    command
        .actions
        .iter()
        .try_for_each(|action| dispatcher.run(action))
        .map_err(reported)
}

fn reported(err: CtlError) -> CtlError {
    error!("{}", err.report());
    err
}

struct Dispatcher<'a, B: I2cBus, W: Write> {
    config: &'a Config,
    session: Session<B>,
    out: &'a mut W,
}

impl<B: I2cBus, W: Write> Dispatcher<'_, B, W> {
    fn run(&mut self, action: &Action) -> Result<(), CtlError> {
        match action {
            Action::Get { register } => {
                info!("I2C get: 0x{register:x}");
                let value = self
                    .session
                    .get_register(*register)
                    .map_err(|e| self.transfer_error(action, e))?;
                self.out.write_all(&self.config.format.render(value))?;
            }
            Action::Set { register, value } => {
                info!("I2C set: 0x{register:x} = 0x{value:x}");
                let written = self
                    .session
                    .set_register(*register, *value)
                    .map_err(|e| self.transfer_error(action, e.into()))?;
                info!("I2C set success ({written}).");
            }
            Action::Write { payload } => {
                info!("I2C write: {} bytes ({})", payload.len(), hex::encode(payload));
                let written = self
                    .session
                    .write(payload)
                    .map_err(|e| self.transfer_error(action, e.into()))?;
                info!("I2C write success ({written}).");
            }
            Action::Read { count } => {
                info!("I2C read: {count} bytes");
                let mut buf = vec![0u8; *count];
                let actual = self
                    .session
                    .read(&mut buf)
                    .map_err(|e| self.transfer_error(action, e.into()))?;
                if actual < *count {
                    return Err(self.transfer_error(
                        action,
                        TransferError::ShortRead {
                            expected: *count,
                            actual,
                        },
                    ));
                }
                info!("I2C read success ({actual}).");

                // printed as a C string: up to the first zero byte
                let text = buf.split(|&b| b == 0).next().unwrap_or_default();
                self.out.write_all(text)?;
                self.out.write_all(b"\n")?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn transfer_error(&self, action: &Action, source: TransferError) -> CtlError {
        CtlError::Transfer {
            action: action.clone(),
            device: self.config.device.display().to_string(),
            address: self.config.address,
            source,
        }
    }
}
