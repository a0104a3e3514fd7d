//! ROM path resolution: a plain ROM file, a ZIP archive holding one, or a
//! directory containing one of the well-known ROM names.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use zeddy_machines::rom_loader::{RomImage, RomLoadError};

/// File names tried, in order, inside archives and directories.
const KNOWN_NAMES: [&str; 2] = ["spec48.rom", "48.rom"];

/// Resolve `path` to a ROM image.
///
/// Resolution order:
/// 1. `*.zip` → the first known name in the archive, else its first `*.rom`.
/// 2. A directory → the first known name inside it.
/// 3. Anything else → read as a raw ROM file.
pub fn load_rom(path: &Path) -> Result<RomImage> {
    if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
    {
        return load_from_zip(path);
    }

    if path.is_dir() {
        let Some(file) = KNOWN_NAMES.iter().map(|n| path.join(n)).find(|p| p.is_file()) else {
            bail!(
                "no ROM in {} (looked for {})",
                path.display(),
                KNOWN_NAMES.join(", ")
            );
        };
        return Ok(RomImage::from_file(&file)?);
    }

    Ok(RomImage::from_file(path)?)
}

fn is_rom_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("rom"))
}

fn file_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

fn load_from_zip(path: &Path) -> Result<RomImage> {
    let file = File::open(path).map_err(|source| RomLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))
        .with_context(|| format!("invalid ZIP: {}", path.display()))?;

    let names: Vec<String> = archive
        .file_names()
        .filter(|n| !n.ends_with('/'))
        .map(str::to_string)
        .collect();

    let chosen = KNOWN_NAMES
        .iter()
        .find_map(|known| names.iter().find(|n| file_name(n).eq_ignore_ascii_case(known)))
        .or_else(|| names.iter().find(|n| is_rom_name(n)))
        .with_context(|| format!("no .rom entry in {}", path.display()))?;

    let mut entry = archive
        .by_name(chosen)
        .with_context(|| format!("ZIP entry error: {chosen}"))?;
    let mut data = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut data)
        .with_context(|| format!("reading {chosen} from {}", path.display()))?;

    Ok(RomImage::from_bytes(format!("{}:{chosen}", path.display()), data)?)
}
