use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::io::IoDevice;

/// Output latch behind port 0xFE.
///
/// Bits 0-2 select the border colour, bit 3 drives MIC and bit 4 the EAR /
/// beeper line. Clones share the same latch, so the CPU's IO map and the
/// screen renderer see one value.
#[derive(Clone, Debug, Default)]
pub struct VideoBorder {
    latch: Arc<AtomicU8>,
}

impl VideoBorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Border colour index (0-7).
    pub fn colour(&self) -> u8 {
        self.latch() & 0x07
    }

    /// Last full byte written to the port.
    pub fn latch(&self) -> u8 {
        self.latch.load(Ordering::Relaxed)
    }
}

impl IoDevice for VideoBorder {
    // Keyboard half-rows share this port on real hardware; they are not
    // wired here, so reads float.
    fn read(&mut self, _port: u8) -> Option<u8> {
        None
    }

    fn write(&mut self, _port: u8, value: u8) {
        self.latch.store(value, Ordering::Relaxed);
    }
}
