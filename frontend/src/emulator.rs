//! Debug loop.
//!
//! The machine lives on a worker thread. The main thread owns SDL: it turns
//! events into [`Command`]s for the worker and presents the frames it sends
//! back. In step mode the worker executes one instruction per command; in
//! run mode it executes whole frames until told to quit. After a CPU error
//! the worker stops executing and only waits for `Quit`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};
use std::thread;

use anyhow::{Context, Result, anyhow};
use log::{debug, error, info};
use zeddy_core::core::frame::FrameBuffer;
use zeddy_core::core::machine::Machine;
use zeddy_core::cpu::CpuError;
use zeddy_machines::Spectrum48;

use crate::input::{self, Command};
use crate::video::Video;

pub struct Options {
    pub scale: u32,
    pub step_mode: bool,
}

pub fn run(machine: Spectrum48, options: &Options) -> Result<()> {
    let sdl_context = sdl2::init().map_err(anyhow::Error::msg)?;
    let sdl_video = sdl_context.video().map_err(anyhow::Error::msg)?;

    let (width, height) = machine.display_size();
    let mut video = Video::new(&sdl_video, "zeddy", width, height, options.scale)
        .context("creating window")?;
    let mut event_pump = sdl_context.event_pump().map_err(anyhow::Error::msg)?;

    let stop = Arc::new(AtomicBool::new(false));
    let (command_tx, command_rx) = mpsc::channel();
    let (frame_tx, frame_rx) = mpsc::sync_channel(1);

    let worker = {
        let stop = Arc::clone(&stop);
        let step_mode = options.step_mode;
        thread::Builder::new()
            .name("z80".into())
            .spawn(move || Worker::new(machine, command_rx, frame_tx, stop).run(step_mode))
            .context("spawning emulation thread")?
    };

    info!(
        "{} mode; any key steps, Escape quits",
        if options.step_mode { "step" } else { "run" }
    );

    let mut frame = None;
    'main: loop {
        for event in event_pump.poll_iter() {
            match input::command_for(&event) {
                Some(Command::Quit) => break 'main,
                Some(command) => {
                    // The worker is gone after a panic; keep the window up
                    let _ = command_tx.send(command);
                }
                None => {}
            }
        }

        // Present the newest frame; repeat the last one while idle
        while let Ok(next) = frame_rx.try_recv() {
            frame = Some(next);
        }
        if let Some(frame) = &frame {
            video.present(frame)?;
        } else {
            thread::sleep(std::time::Duration::from_millis(10));
        }
    }

    stop.store(true, Ordering::Relaxed);
    let _ = command_tx.send(Command::Quit);
    drop(frame_rx);
    worker
        .join()
        .map_err(|_| anyhow!("emulation thread panicked"))
}

struct Worker {
    machine: Spectrum48,
    commands: Receiver<Command>,
    frames: SyncSender<FrameBuffer>,
    stop: Arc<AtomicBool>,
}

impl Worker {
    fn new(
        machine: Spectrum48,
        commands: Receiver<Command>,
        frames: SyncSender<FrameBuffer>,
        stop: Arc<AtomicBool>,
    ) -> Self {
        Self {
            machine,
            commands,
            frames,
            stop,
        }
    }

    fn run(mut self, step_mode: bool) {
        if !self.publish_frame() {
            return;
        }

        let result = if step_mode {
            self.step_loop()
        } else {
            self.run_loop()
        };

        match result {
            Ok(()) => {}
            Err(e) => {
                error!("execution stopped: {e}");
                error!("{}", self.machine.dump_registers());
                self.wait_for_quit();
            }
        }
    }

    /// One instruction per `Step` command.
    fn step_loop(&mut self) -> Result<(), CpuError> {
        while let Ok(command) = self.commands.recv() {
            match command {
                Command::Quit => break,
                Command::Step => {
                    let pc = self.machine.cpu().regs.pc;
                    let mnemonic = self.machine.disassemble(pc);
                    self.machine.process_instruction()?;
                    debug!("{pc:04X}  {mnemonic}");
                    debug!("{}", self.machine.dump_registers());
                    if !self.publish_frame() {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    /// Whole frames until `Quit` or the stop flag.
    fn run_loop(&mut self) -> Result<(), CpuError> {
        loop {
            match self.commands.try_recv() {
                Ok(Command::Quit) | Err(TryRecvError::Disconnected) => break,
                Ok(Command::Step) | Err(TryRecvError::Empty) => {}
            }
            if self.stop.load(Ordering::Relaxed) {
                break;
            }
            self.machine.run_frame(&self.stop)?;
            if !self.publish_frame() {
                break;
            }
        }
        info!(
            "stopped after {:.3}s emulated ({} T-states)",
            self.machine.elapsed_seconds(),
            self.machine.cpu_clock()
        );
        Ok(())
    }

    fn wait_for_quit(&self) {
        while let Ok(command) = self.commands.recv() {
            if command == Command::Quit {
                break;
            }
        }
    }

    /// Render and hand a frame to the main thread. Blocks while the previous
    /// frame is still queued. Returns false once the main thread is gone.
    fn publish_frame(&self) -> bool {
        let (width, height) = self.machine.display_size();
        let mut frame = FrameBuffer::new(width, height);
        self.machine.render_frame(&mut frame);
        self.frames.send(frame).is_ok()
    }
}
