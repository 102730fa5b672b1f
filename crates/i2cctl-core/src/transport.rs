use std::ops::{Deref, DerefMut};

use log::{info, warn};

use crate::error::{BusError, TransferError};

/// A bus handle already bound to one slave address.
///
/// `read` and `write` map to a single transfer each and report how many
/// bytes actually moved; deciding whether a short transfer is fatal is left
/// to the caller.
pub trait I2cBus {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BusError>;

    fn write(&mut self, data: &[u8]) -> Result<usize, BusError>;

    /// Releases the handle. Calling it again is a no-op.
    fn close(&mut self) -> Result<(), BusError>;

    /// Selects `register` and reads one byte back from it.
    fn get_register(&mut self, register: u8) -> Result<u8, TransferError> {
        self.write(&[register])?;
        let mut buf = [0u8; 1];
        match self.read(&mut buf)? {
            1 => Ok(buf[0]),
            actual => Err(TransferError::ShortRead {
                expected: 1,
                actual,
            }),
        }
    }

    /// Writes `value` to `register` in one transfer.
    fn set_register(&mut self, register: u8, value: u8) -> Result<usize, BusError> {
        self.write(&[register, value])
    }
}

/// Owns an open bus for the rest of the invocation and closes it exactly
/// once when dropped.
pub struct Session<B: I2cBus> {
    bus: B,
}

impl<B: I2cBus> Session<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }
}

impl<B: I2cBus> Deref for Session<B> {
    type Target = B;

    fn deref(&self) -> &B {
        &self.bus
    }
}

impl<B: I2cBus> DerefMut for Session<B> {
    fn deref_mut(&mut self) -> &mut B {
        &mut self.bus
    }
}

impl<B: I2cBus> Drop for Session<B> {
    fn drop(&mut self) {
        match self.bus.close() {
            Ok(()) => info!("I2C device closed."),
            Err(e) => warn!("Could not close I2C device ({e})."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        written: Vec<Vec<u8>>,
        reply: Vec<u8>,
    }

    impl I2cBus for Recorder {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, BusError> {
            let n = buf.len().min(self.reply.len());
            buf[..n].copy_from_slice(&self.reply[..n]);
            Ok(n)
        }

        fn write(&mut self, data: &[u8]) -> Result<usize, BusError> {
            self.written.push(data.to_vec());
            Ok(data.len())
        }

        fn close(&mut self) -> Result<(), BusError> {
            Ok(())
        }
    }

    #[test]
    fn get_register_selects_then_reads() {
        let mut bus = Recorder {
            reply: vec![0x3a],
            ..Default::default()
        };
        assert_eq!(bus.get_register(0x44).unwrap(), 0x3a);
        assert_eq!(bus.written, vec![vec![0x44]]);
    }

    #[test]
    fn get_register_without_reply_is_short_read() {
        let mut bus = Recorder::default();
        let err = bus.get_register(0x44).unwrap_err();
        assert!(matches!(
            err,
            TransferError::ShortRead {
                expected: 1,
                actual: 0,
            }
        ));
    }

    #[test]
    fn set_register_is_one_two_byte_write() {
        let mut bus = Recorder::default();
        assert_eq!(bus.set_register(0x44, 0x3a).unwrap(), 2);
        assert_eq!(bus.written, vec![vec![0x44, 0x3a]]);
    }

    #[test]
    fn session_closes_once_on_drop() {
        struct Counted<'a>(&'a mut usize);

        impl I2cBus for Counted<'_> {
            fn read(&mut self, _buf: &mut [u8]) -> Result<usize, BusError> {
                Ok(0)
            }
            fn write(&mut self, data: &[u8]) -> Result<usize, BusError> {
                Ok(data.len())
            }
            fn close(&mut self) -> Result<(), BusError> {
                *self.0 += 1;
                Ok(())
            }
        }

        let mut closes = 0;
        {
            let mut session = Session::new(Counted(&mut closes));
            session.write(&[1, 2, 3]).unwrap();
        }
        assert_eq!(closes, 1);
    }
}
