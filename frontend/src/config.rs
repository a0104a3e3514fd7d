//! Command line and config file handling.
//!
//! Precedence: command line, then `zeddy.toml`, then built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use serde::Deserialize;

const DEFAULT_ROM: &str = "spec48.rom";
const DEFAULT_SCALE: u32 = 3;
const CONFIG_FILE: &str = "zeddy.toml";

#[derive(Parser, Debug, Default)]
#[command(name = "zeddy", version, about = "ZX Spectrum 48K emulator with a stepping debugger")]
pub struct Cli {
    /// ROM image: a raw file, a ZIP archive or a directory holding spec48.rom
    #[arg(value_name = "ROM")]
    pub rom: Option<PathBuf>,

    /// Window scale factor
    #[arg(long, value_name = "N")]
    pub scale: Option<u32>,

    /// Start running whole frames instead of single-stepping
    #[arg(long, default_value_t = false)]
    pub run: bool,

    /// Log every executed instruction (implies trace level)
    #[arg(long, default_value_t = false)]
    pub trace: bool,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LevelFilter>,

    /// Config file (default: <config dir>/zeddy/zeddy.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub rom: Option<PathBuf>,
    pub display: DisplayConfig,
    pub debug: DebugConfig,
}

#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub scale: Option<u32>,
}

#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DebugConfig {
    pub start_in_step_mode: Option<bool>,
    pub trace_instructions: Option<bool>,
    pub log_level: Option<String>,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load `path`. A missing file at the default location is not an error;
    /// an explicitly named one is.
    pub fn load(path: &Path, explicit: bool) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text).with_context(|| format!("parsing {}", path.display())),
            Err(e) if !explicit && e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("zeddy").join(CONFIG_FILE))
}

/// Effective settings after merging all sources.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub rom: PathBuf,
    pub scale: u32,
    pub step_mode: bool,
    pub trace: bool,
    pub log_level: LevelFilter,
}

impl Settings {
    pub fn merge(cli: Cli, file: FileConfig) -> Result<Self> {
        let trace = cli.trace || file.debug.trace_instructions.unwrap_or(false);

        let file_level = file
            .debug
            .log_level
            .as_deref()
            .map(|s| {
                s.parse::<LevelFilter>()
                    .with_context(|| format!("invalid log_level {s:?}"))
            })
            .transpose()?;
        let mut log_level = cli.log_level.or(file_level).unwrap_or(LevelFilter::Info);
        if trace {
            log_level = LevelFilter::Trace;
        }

        let scale = cli
            .scale
            .or(file.display.scale)
            .unwrap_or(DEFAULT_SCALE)
            .max(1);

        Ok(Self {
            rom: cli
                .rom
                .or(file.rom)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ROM)),
            scale,
            step_mode: !cli.run && file.debug.start_in_step_mode.unwrap_or(true),
            trace,
            log_level,
        })
    }

    /// Parse the command line, read the config file and merge.
    pub fn load() -> Result<Self> {
        let cli = Cli::parse();
        let file = match (&cli.config, default_config_path()) {
            (Some(path), _) => FileConfig::load(path, true)?,
            (None, Some(path)) => FileConfig::load(&path, false)?,
            (None, None) => FileConfig::default(),
        };
        Self::merge(cli, file)
    }
}
