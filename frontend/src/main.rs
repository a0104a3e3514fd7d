use anyhow::{Context, Result};
use log::info;
use zeddy_machines::Spectrum48;

mod config;
mod emulator;
mod input;
mod logger;
mod rom_path;
mod video;

fn main() -> Result<()> {
    let settings = config::Settings::load()?;
    logger::init(settings.log_level);

    let rom = rom_path::load_rom(&settings.rom)
        .with_context(|| format!("cannot load ROM {}", settings.rom.display()))?;

    let mut machine = Spectrum48::new();
    machine
        .load_rom_image(&rom)
        .with_context(|| format!("cannot map {}", rom.name()))?;
    machine.reset();
    info!(
        "Z80 @ {} Hz, trace {}",
        machine.cpu_clock_freq(),
        if settings.trace { "on" } else { "off" }
    );

    emulator::run(
        machine,
        &emulator::Options {
            scale: settings.scale,
            step_mode: settings.step_mode,
        },
    )
}
