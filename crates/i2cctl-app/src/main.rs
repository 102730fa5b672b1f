mod logging;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use i2cctl_core::{Invocation, LinuxI2c, USAGE};
use log::error;

fn main() -> Result<ExitCode> {
    logging::init()?;

    let command = match Invocation::parse(std::env::args_os().skip(1)) {
        Ok(Invocation::Run(command)) => command,
        Ok(Invocation::Help) => {
            print!("{USAGE}");
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => {
            error!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };
    logging::set_verbose(command.config.verbose);

    // execute logs its own failures before the bus is released
    let mut stdout = io::stdout();
    match i2cctl_core::execute(&command, LinuxI2c::open, &mut stdout) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
