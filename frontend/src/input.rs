use sdl2::event::Event;
use sdl2::keyboard::Scancode;

/// What a host event asks the debugger to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Step,
}

/// Translate one SDL event. Escape and window close quit; any other fresh
/// key press single-steps.
pub fn command_for(event: &Event) -> Option<Command> {
    match event {
        Event::Quit { .. } => Some(Command::Quit),
        Event::KeyDown {
            scancode: Some(Scancode::Escape),
            ..
        } => Some(Command::Quit),
        Event::KeyDown { repeat: false, .. } => Some(Command::Step),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdl2::keyboard::Mod;

    fn key_down(scancode: Scancode, repeat: bool) -> Event {
        Event::KeyDown {
            timestamp: 0,
            window_id: 0,
            keycode: None,
            scancode: Some(scancode),
            keymod: Mod::NOMOD,
            repeat,
        }
    }

    #[test]
    fn escape_and_close_quit() {
        assert_eq!(command_for(&Event::Quit { timestamp: 0 }), Some(Command::Quit));
        assert_eq!(command_for(&key_down(Scancode::Escape, false)), Some(Command::Quit));
    }

    #[test]
    fn other_keys_step() {
        assert_eq!(command_for(&key_down(Scancode::Space, false)), Some(Command::Step));
        assert_eq!(command_for(&key_down(Scancode::A, false)), Some(Command::Step));
    }

    #[test]
    fn auto_repeat_is_ignored() {
        assert_eq!(command_for(&key_down(Scancode::Space, true)), None);
    }
}
