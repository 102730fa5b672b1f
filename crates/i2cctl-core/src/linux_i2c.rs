//! Userspace I2C through the Linux `i2c-dev` interface.
//!
//! See <https://www.kernel.org/doc/Documentation/i2c/dev-interface>.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::os::fd::{AsRawFd, IntoRawFd};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use log::debug;

use crate::error::BusError;
use crate::transport::I2cBus;

/// `I2C_SLAVE` from `linux/i2c-dev.h`.
const I2C_SLAVE: u16 = 0x0703;

nix::ioctl_write_int_bad!(i2c_set_slave_address, I2C_SLAVE);

/// An `/dev/i2c-N` character device bound to one slave address.
pub struct LinuxI2c {
    file: Option<File>,
    address: u8,
}

impl LinuxI2c {
    /// Opens `path` read/write and non-blocking, then binds `address`.
    ///
    /// The descriptor is released again if the bind fails.
    pub fn open(path: &Path, address: u8) -> Result<Self, BusError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(nix::libc::O_NONBLOCK)
            .open(path)
            .map_err(|source| BusError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        // SAFETY: the descriptor is owned by `file` and stays open for the call.
        unsafe { i2c_set_slave_address(file.as_raw_fd(), address.into()) }
            .map_err(|source| BusError::Bind { address, source })?;

        let bus = Self {
            file: Some(file),
            address,
        };
        debug!("bound {} to slave 0x{:02x}", path.display(), bus.address());
        Ok(bus)
    }

    /// The slave address this handle is bound to.
    pub fn address(&self) -> u8 {
        self.address
    }

    fn file(&mut self) -> std::io::Result<&mut File> {
        self.file
            .as_mut()
            .ok_or_else(|| std::io::Error::from_raw_os_error(nix::libc::EBADF))
    }
}

impl I2cBus for LinuxI2c {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BusError> {
        self.file()
            .and_then(|file| file.read(buf))
            .map_err(BusError::Read)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, BusError> {
        self.file()
            .and_then(|file| file.write(data))
            .map_err(BusError::Write)
    }

    fn close(&mut self) -> Result<(), BusError> {
        match self.file.take() {
            Some(file) => nix::unistd::close(file.into_raw_fd()).map_err(BusError::Close),
            None => Ok(()),
        }
    }
}
