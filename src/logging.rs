//! Log output setup.
//!
//! Lines are kept in the `K8S | <Label>: <message>` shape operators grep
//! their job logs for, prefixed with a timestamp.
use log::{Level, LevelFilter};

use std::io::Write;

/// Initializes the global logger for the process.
pub fn init() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} K8S | {}: {}",
                buf.timestamp_seconds(),
                label(record.level()),
                record.args()
            )
        })
        .init();
}

/// Human label written in front of each line.
fn label(level: Level) -> &'static str {
    match level {
        Level::Error => "Error",
        Level::Warn => "Warning",
        Level::Info => "Info",
        Level::Debug => "Debug",
        Level::Trace => "Trace",
    }
}
