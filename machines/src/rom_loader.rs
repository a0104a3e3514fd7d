//! ROM image loading for the Spectrum.
//!
//! An image is read whole from disk (or handed over as bytes) and identified
//! by its CRC-32. Unknown images are accepted: modified and third-party ROMs
//! are common, so a checksum mismatch is only worth a warning.

use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

// ---------------------------------------------------------------------------
// CRC-32
// ---------------------------------------------------------------------------

/// CRC-32 lookup table (reflected polynomial 0xEDB88320).
/// Same algorithm as ZIP and PNG.
const CRC32_TABLE: [u32; 256] = {
    let mut table = [0u32; 256];
    let mut i = 0u32;
    while i < 256 {
        let mut crc = i;
        let mut j = 0;
        while j < 8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ 0xEDB8_8320;
            } else {
                crc >>= 1;
            }
            j += 1;
        }
        table[i as usize] = crc;
        i += 1;
    }
    table
};

/// CRC-32 checksum of a byte slice.
pub fn crc32(data: &[u8]) -> u32 {
    let crc = data.iter().fold(0xFFFF_FFFF_u32, |crc, &byte| {
        (crc >> 8) ^ CRC32_TABLE[((crc ^ byte as u32) & 0xFF) as usize]
    });
    crc ^ 0xFFFF_FFFF
}

/// CRC-32 of the stock Sinclair 48K ROM (`48.rom`, 16 KiB).
pub const STOCK_48K_CRC32: u32 = 0xDDEE_531F;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum RomLoadError {
    /// The file could not be opened or read.
    #[error("cannot read ROM {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file (or archive entry) holds no bytes.
    #[error("ROM image {name} is empty")]
    Empty { name: String },
}

// ---------------------------------------------------------------------------
// RomImage
// ---------------------------------------------------------------------------

/// A ROM image and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomImage {
    name: String,
    data: Vec<u8>,
}

impl RomImage {
    /// Read a whole file.
    pub fn from_file(path: &Path) -> Result<Self, RomLoadError> {
        let data = std::fs::read(path).map_err(|source| RomLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(path.display().to_string(), data)
    }

    /// Wrap bytes already in memory (archive entries, tests).
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Result<Self, RomLoadError> {
        let name = name.into();
        if data.is_empty() {
            return Err(RomLoadError::Empty { name });
        }

        let image = Self { name, data };
        if image.is_stock_48k() {
            info!("{}: stock 48K ROM", image.name);
        } else {
            warn!(
                "{}: unrecognised ROM (CRC32 0x{:08X}, {} bytes)",
                image.name,
                image.crc32(),
                image.data.len()
            );
        }
        Ok(image)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn crc32(&self) -> u32 {
        crc32(&self.data)
    }

    pub fn is_stock_48k(&self) -> bool {
        self.crc32() == STOCK_48K_CRC32
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- CRC32 ---------------------------------------------------------------

    #[test]
    fn crc32_empty() {
        assert_eq!(crc32(&[]), 0x0000_0000);
    }

    #[test]
    fn crc32_canonical_123456789() {
        // Well-known test vector: CRC32("123456789") = 0xCBF43926
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn crc32_single_zero_byte() {
        assert_eq!(crc32(&[0x00]), 0xD202_EF8D);
    }

    // -- RomImage ------------------------------------------------------------

    #[test]
    fn from_bytes_keeps_name_and_data() {
        let image = RomImage::from_bytes("test.rom", vec![0xF3, 0xAF]).unwrap();
        assert_eq!(image.name(), "test.rom");
        assert_eq!(image.data(), &[0xF3, 0xAF]);
        assert_eq!(image.len(), 2);
        assert_eq!(image.crc32(), crc32(&[0xF3, 0xAF]));
        assert!(!image.is_stock_48k());
    }

    #[test]
    fn from_bytes_rejects_empty() {
        let result = RomImage::from_bytes("empty.rom", Vec::new());
        assert!(matches!(result, Err(RomLoadError::Empty { .. })));
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let path = std::env::temp_dir().join("zeddy_no_such_rom.rom");
        let err = RomImage::from_file(&path).unwrap_err();
        assert!(matches!(err, RomLoadError::Io { .. }));
        assert!(err.to_string().contains("zeddy_no_such_rom.rom"));
    }

    #[test]
    fn from_file_reads_whole_file() {
        let path = std::env::temp_dir().join(format!("zeddy_rom_{}.rom", std::process::id()));
        std::fs::write(&path, [0x3E, 0x7F, 0x76]).unwrap();
        let image = RomImage::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(image.data(), &[0x3E, 0x7F, 0x76]);
        assert!(image.name().ends_with(".rom"));
    }
}
