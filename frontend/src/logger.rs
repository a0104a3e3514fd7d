//! Minimal stderr logger for the `log` facade.

use log::{Level, LevelFilter, Log, Metadata, Record};
use zeddy_core::FATAL_TARGET;

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", format_record(record.level(), record.target(), record.args()));
        }
    }

    fn flush(&self) {}
}

fn format_record(level: Level, target: &str, args: &std::fmt::Arguments) -> String {
    let label = if target == FATAL_TARGET {
        "FATAL"
    } else {
        level.as_str()
    };
    format!("[{label}] {target}: {args}")
}

/// Install the logger. Calling it twice is harmless.
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_target_prints_fatal() {
        let line = format_record(
            Level::Error,
            FATAL_TARGET,
            &format_args!("Cannot decode instruction 01 at 0000"),
        );
        assert_eq!(
            line,
            "[FATAL] zeddy::fatal: Cannot decode instruction 01 at 0000"
        );
    }

    #[test]
    fn other_targets_print_level() {
        let line = format_record(Level::Warn, "zeddy_machines::rom_loader", &format_args!("odd"));
        assert_eq!(line, "[WARN] zeddy_machines::rom_loader: odd");
    }
}
