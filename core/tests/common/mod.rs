#![allow(dead_code)]

use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record};
use zeddy_core::cpu::Z80;

/// CPU with `program` loaded at 0x0000 and registers reset.
pub fn cpu_with_rom(program: &[u8]) -> Z80 {
    let mut cpu = Z80::new();
    cpu.load_rom(program).expect("test program fits in ROM");
    cpu.reset();
    cpu
}

/// Execute `count` instructions, returning the T-states they took.
pub fn run(cpu: &mut Z80, count: usize) -> u64 {
    let start = cpu.clock();
    for _ in 0..count {
        cpu.execute_instruction().expect("instruction executes");
    }
    cpu.clock() - start
}

/// Execute one instruction and return its T-state cost.
pub fn step(cpu: &mut Z80) -> u64 {
    run(cpu, 1)
}

#[derive(Debug, Clone)]
pub struct Captured {
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// Global logger that keeps every record for later inspection.
pub struct CaptureLogger {
    records: Mutex<Vec<Captured>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push(Captured {
                level: record.level(),
                target: record.target().to_string(),
                message: record.args().to_string(),
            });
        }
    }

    fn flush(&self) {}
}

impl CaptureLogger {
    /// Records whose message contains `needle`.
    pub fn matching(&self, needle: &str) -> Vec<Captured> {
        self.records
            .lock()
            .map(|r| r.iter().filter(|c| c.message.contains(needle)).cloned().collect())
            .unwrap_or_default()
    }
}

/// Install the capture logger (once per test binary) and return it.
pub fn capture_logs() -> &'static CaptureLogger {
    static LOGGER: OnceLock<CaptureLogger> = OnceLock::new();
    let logger = LOGGER.get_or_init(|| CaptureLogger {
        records: Mutex::new(Vec::new()),
    });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
    logger
}
