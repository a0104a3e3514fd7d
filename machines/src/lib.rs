pub mod rom_loader;
pub mod spectrum;

pub use rom_loader::{RomImage, RomLoadError};
pub use spectrum::Spectrum48;
