//! IO port space: the same first-hit range routing as memory, keyed by the
//! low byte of the port address.

use crate::core::map::AddressMap;

/// A device answering IN/OUT on a range of 8-bit ports.
pub trait IoDevice: Send {
    /// Returns `None` when the device does not drive the data bus for `port`.
    fn read(&mut self, port: u8) -> Option<u8>;
    fn write(&mut self, port: u8, value: u8);
}

pub type IoMap = AddressMap<dyn IoDevice, u8>;

impl AddressMap<dyn IoDevice, u8> {
    /// Register `device` for the single port `port`.
    pub fn map_port(&mut self, device: impl IoDevice + 'static, port: u8) {
        self.push(Box::new(device), port, port);
    }

    pub fn read(&mut self, port: u8) -> Option<u8> {
        self.first_hit_mut(port)?.device_mut().read(port)
    }

    pub fn write(&mut self, port: u8, value: u8) {
        if let Some(mapping) = self.first_hit_mut(port) {
            mapping.device_mut().write(port, value);
        }
    }
}
