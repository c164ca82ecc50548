use crossterm::event::KeyCode;

use crate::config::key::{Key, KeyBinding};
use crate::config::keybindings::{GlobalKeybindings, OverlayKeybindings, ShowcaseKeybindings};

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('q')),
                Key::with_ctrl(KeyCode::Char('c')),
            ]),
            suspend: Key::with_ctrl(KeyCode::Char('z')).into(),
        }
    }
}

impl Default for OverlayKeybindings {
    fn default() -> Self {
        Self {
            toggle: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('p')),
                Key::new(KeyCode::Enter),
            ]),
            close: Key::new(KeyCode::Esc).into(),
        }
    }
}

impl Default for ShowcaseKeybindings {
    fn default() -> Self {
        Self {
            open_modal: Key::new(KeyCode::Char('m')).into(),
            cycle_side: Key::new(KeyCode::Char('s')).into(),
            cycle_size: Key::new(KeyCode::Char('z')).into(),
            toggle_centered: Key::new(KeyCode::Char('c')).into(),
        }
    }
}
