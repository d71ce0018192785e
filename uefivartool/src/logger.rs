// SPDX-License-Identifier: MIT OR Apache-2.0

//! Minimal `log` backend writing to stderr.
//!
//! Every line of a message is prefixed with its level, so multi-line
//! messages stay readable next to the tool's regular output on stdout.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::{self, Write};

/// Global logger object
static LOGGER: Logger = Logger;

/// Set up logging. `verbosity` is the number of `-v` flags given.
pub fn init(verbosity: u8) -> Result<(), log::SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level_filter(verbosity));
    Ok(())
}

const fn level_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[derive(Debug)]
struct Logger;

impl Log for Logger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        // The max level set in `init` already filters records.
        true
    }

    fn log(&self, record: &Record) {
        let mut stderr = io::stderr().lock();
        // Ignore all errors. Since we're in the logger implementation we
        // can't log the error.
        let _ = write_decorated(&mut stderr, record.level(), &record.args().to_string());
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Write `message`, prefixing each line with the log level.
fn write_decorated(writer: &mut impl Write, level: Level, message: &str) -> io::Result<()> {
    for line in message.lines() {
        writeln!(writer, "[{level:>5}]: {line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_decorated() {
        let mut out = Vec::new();
        write_decorated(&mut out, Level::Warn, "first\nsecond").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[ WARN]: first\n[ WARN]: second\n"
        );
    }

    #[test]
    fn test_level_filter() {
        assert_eq!(level_filter(0), LevelFilter::Warn);
        assert_eq!(level_filter(2), LevelFilter::Debug);
        assert_eq!(level_filter(7), LevelFilter::Trace);
    }
}
