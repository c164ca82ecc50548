use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::config::actions::{GlobalAction, OverlayAction, ShowcaseAction};
use crate::config::key::KeyBinding;
use crate::config::keybindings::KeybindingsConfig;

/// Maps key events to configured actions.
#[derive(Debug, Clone, Default)]
pub struct KeyResolver {
    pub keybindings: Arc<KeybindingsConfig>,
}

impl KeyResolver {
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    fn global(&self, action: GlobalAction) -> &KeyBinding {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => &kb.quit,
            GlobalAction::Suspend => &kb.suspend,
        }
    }

    fn overlay(&self, action: OverlayAction) -> &KeyBinding {
        let kb = &self.keybindings.overlay;
        match action {
            OverlayAction::Toggle => &kb.toggle,
            OverlayAction::Close => &kb.close,
        }
    }

    fn showcase(&self, action: ShowcaseAction) -> &KeyBinding {
        let kb = &self.keybindings.showcase;
        match action {
            ShowcaseAction::OpenModal => &kb.open_modal,
            ShowcaseAction::CycleSide => &kb.cycle_side,
            ShowcaseAction::CycleSize => &kb.cycle_size,
            ShowcaseAction::ToggleCentered => &kb.toggle_centered,
        }
    }

    pub fn matches_global(&self, event: &KeyEvent, action: GlobalAction) -> bool {
        self.global(action).matches(event)
    }

    pub fn matches_overlay(&self, event: &KeyEvent, action: OverlayAction) -> bool {
        self.overlay(action).matches(event)
    }

    pub fn display_overlay(&self, action: OverlayAction) -> String {
        self.overlay(action).display()
    }

    pub fn matches_showcase(&self, event: &KeyEvent, action: ShowcaseAction) -> bool {
        self.showcase(action).matches(event)
    }

    pub fn display_showcase(&self, action: ShowcaseAction) -> String {
        self.showcase(action).display()
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_bindings() {
        let resolver = KeyResolver::default();
        assert!(resolver.matches_overlay(&press(KeyCode::Esc), OverlayAction::Close));
        assert!(resolver.matches_overlay(&press(KeyCode::Char('p')), OverlayAction::Toggle));
        assert!(resolver.matches_global(&press(KeyCode::Char('q')), GlobalAction::Quit));
        assert!(!resolver.matches_showcase(&press(KeyCode::Esc), ShowcaseAction::OpenModal));
        assert_eq!(resolver.display_overlay(OverlayAction::Toggle), "p/Enter");
    }
}
