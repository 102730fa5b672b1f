use std::io::Write;

use anyhow::Result;
use log::{Level, LevelFilter};

/// Routes log records to stdout as `info: ...`, `warning: ...` and
/// `error: ...` lines. Only warnings and errors pass until [`set_verbose`]
/// is called.
pub fn init() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .target(env_logger::Target::Stdout)
        .format(|buf, record| writeln!(buf, "{}: {}", label(record.level()), record.args()))
        .try_init()?;
    log::set_max_level(LevelFilter::Warn);
    Ok(())
}

pub fn set_verbose(verbose: bool) {
    if verbose {
        log::set_max_level(LevelFilter::Info);
    }
}

fn label(level: Level) -> &'static str {
    match level {
        Level::Error => "error",
        Level::Warn => "warning",
        Level::Info => "info",
        Level::Debug => "debug",
        Level::Trace => "trace",
    }
}
