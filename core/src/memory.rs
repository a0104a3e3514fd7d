//! Flat byte storage plus the ROM and RAM windows the memory map routes to.

use std::ops::Range;

use crate::core::map::AddressMap;

/// Contiguous little-endian byte storage covering `0..=max_address`.
///
/// Accesses that would touch a byte past `max_address` are not an error:
/// reads return `None` and writes are dropped.
pub struct MemorySpace {
    bytes: Vec<u8>,
}

impl MemorySpace {
    pub fn new(max_address: usize) -> Self {
        Self {
            bytes: vec![0; max_address + 1],
        }
    }

    pub fn max_address(&self) -> usize {
        self.bytes.len() - 1
    }

    fn span(&self, address: usize, len: usize) -> Option<Range<usize>> {
        let end = address.checked_add(len)?;
        (len > 0 && end <= self.bytes.len()).then_some(address..end)
    }

    /// Fill `out` from `address`. Returns false (and leaves `out` untouched)
    /// when the access does not fit.
    pub fn read_bytes(&self, address: usize, out: &mut [u8]) -> bool {
        match self.span(address, out.len()) {
            Some(span) => {
                out.copy_from_slice(&self.bytes[span]);
                true
            }
            None => false,
        }
    }

    /// Store `data` at `address`. Returns false (writing nothing) when the
    /// access does not fit.
    pub fn write_bytes(&mut self, address: usize, data: &[u8]) -> bool {
        match self.span(address, data.len()) {
            Some(span) => {
                self.bytes[span].copy_from_slice(data);
                true
            }
            None => false,
        }
    }

    fn read_le<const N: usize>(&self, address: usize) -> Option<[u8; N]> {
        let mut buf = [0u8; N];
        self.read_bytes(address, &mut buf).then_some(buf)
    }

    pub fn read8(&self, address: usize) -> Option<u8> {
        self.read_le::<1>(address).map(|b| b[0])
    }

    pub fn read16(&self, address: usize) -> Option<u16> {
        self.read_le(address).map(u16::from_le_bytes)
    }

    pub fn read32(&self, address: usize) -> Option<u32> {
        self.read_le(address).map(u32::from_le_bytes)
    }

    pub fn read64(&self, address: usize) -> Option<u64> {
        self.read_le(address).map(u64::from_le_bytes)
    }

    pub fn write8(&mut self, address: usize, value: u8) {
        self.write_bytes(address, &[value]);
    }

    pub fn write16(&mut self, address: usize, value: u16) {
        self.write_bytes(address, &value.to_le_bytes());
    }

    pub fn write32(&mut self, address: usize, value: u32) {
        self.write_bytes(address, &value.to_le_bytes());
    }

    pub fn write64(&mut self, address: usize, value: u64) {
        self.write_bytes(address, &value.to_le_bytes());
    }

    /// Bulk-copy `data` starting at `offset`, bypassing any device view.
    /// Bytes that would land past the end of the space are not copied.
    /// Returns the number of bytes copied.
    pub fn load(&mut self, offset: usize, data: &[u8]) -> usize {
        let Some(room) = self.bytes.len().checked_sub(offset) else {
            return 0;
        };
        let count = data.len().min(room);
        self.bytes[offset..offset + count].copy_from_slice(&data[..count]);
        count
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

/// A device claiming part of the CPU address space.
///
/// Devices are views: they own no bytes themselves and are handed the
/// [`MemorySpace`] on every access. `address` is relative to the start of the
/// mapping the device was registered under.
pub trait MemoryDevice: Send {
    fn read_bytes(&self, space: &MemorySpace, address: u16, out: &mut [u8]) -> bool;
    fn write_bytes(&self, space: &mut MemorySpace, address: u16, data: &[u8]);
    fn start_address(&self) -> u16;
    fn end_address(&self) -> u16;
}

/// Read-only window onto a [`MemorySpace`]. Writes are silently ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rom {
    offset: u16,
    size: usize,
}

impl Rom {
    pub fn new(offset: u16, size: usize) -> Self {
        debug_assert!(size > 0 && offset as usize + size <= 0x1_0000);
        Self { offset, size }
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl MemoryDevice for Rom {
    fn read_bytes(&self, space: &MemorySpace, address: u16, out: &mut [u8]) -> bool {
        space.read_bytes(self.offset as usize + address as usize, out)
    }

    fn write_bytes(&self, _space: &mut MemorySpace, _address: u16, _data: &[u8]) {}

    fn start_address(&self) -> u16 {
        self.offset
    }

    fn end_address(&self) -> u16 {
        (self.offset as usize + self.size - 1) as u16
    }
}

/// Read/write window onto a [`MemorySpace`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ram {
    offset: u16,
    size: usize,
}

impl Ram {
    pub fn new(offset: u16, size: usize) -> Self {
        debug_assert!(size > 0 && offset as usize + size <= 0x1_0000);
        Self { offset, size }
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl MemoryDevice for Ram {
    fn read_bytes(&self, space: &MemorySpace, address: u16, out: &mut [u8]) -> bool {
        space.read_bytes(self.offset as usize + address as usize, out)
    }

    fn write_bytes(&self, space: &mut MemorySpace, address: u16, data: &[u8]) {
        space.write_bytes(self.offset as usize + address as usize, data);
    }

    fn start_address(&self) -> u16 {
        self.offset
    }

    fn end_address(&self) -> u16 {
        (self.offset as usize + self.size - 1) as u16
    }
}

/// Routes CPU memory accesses to the first device whose range contains the
/// address. Multi-byte accesses are routed by their first byte.
pub type MemoryMap = AddressMap<dyn MemoryDevice, u16>;

impl AddressMap<dyn MemoryDevice, u16> {
    /// Register a device over its own `start_address()..=end_address()`.
    pub fn map(&mut self, device: impl MemoryDevice + 'static) {
        let (start, end) = (device.start_address(), device.end_address());
        self.push(Box::new(device), start, end);
    }

    fn read_le<const N: usize>(&self, space: &MemorySpace, address: u16) -> Option<[u8; N]> {
        let mapping = self.first_hit(address)?;
        let mut buf = [0u8; N];
        mapping
            .device()
            .read_bytes(space, address - mapping.start(), &mut buf)
            .then_some(buf)
    }

    fn write_le(&self, space: &mut MemorySpace, address: u16, data: &[u8]) {
        if let Some(mapping) = self.first_hit(address) {
            mapping
                .device()
                .write_bytes(space, address - mapping.start(), data);
        }
    }

    pub fn read8(&self, space: &MemorySpace, address: u16) -> Option<u8> {
        self.read_le::<1>(space, address).map(|b| b[0])
    }

    pub fn read16(&self, space: &MemorySpace, address: u16) -> Option<u16> {
        self.read_le(space, address).map(u16::from_le_bytes)
    }

    pub fn read32(&self, space: &MemorySpace, address: u16) -> Option<u32> {
        self.read_le(space, address).map(u32::from_le_bytes)
    }

    pub fn read64(&self, space: &MemorySpace, address: u16) -> Option<u64> {
        self.read_le(space, address).map(u64::from_le_bytes)
    }

    pub fn write8(&self, space: &mut MemorySpace, address: u16, value: u8) {
        self.write_le(space, address, &[value]);
    }

    pub fn write16(&self, space: &mut MemorySpace, address: u16, value: u16) {
        self.write_le(space, address, &value.to_le_bytes());
    }

    pub fn write32(&self, space: &mut MemorySpace, address: u16, value: u32) {
        self.write_le(space, address, &value.to_le_bytes());
    }

    pub fn write64(&self, space: &mut MemorySpace, address: u16, value: u64) {
        self.write_le(space, address, &value.to_le_bytes());
    }
}
