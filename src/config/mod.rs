pub mod actions;
mod defaults;
pub mod key;
pub mod keybindings;
pub mod loader;
pub mod resolver;

use std::time::Duration;

pub use actions::*;
use keybindings::KeybindingsConfig;
pub use loader::{load, load_from, save, save_to};
pub use resolver::KeyResolver;
use serde::{Deserialize, Serialize};

use crate::overlay::{AnchorSide, Easing, ModalSize, Transition};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Catppuccin Mocha".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub duration_ms: u64,
    pub easing: Easing,
    /// Skip interpolation; overlays still unmount through the completion
    /// signal on the next tick.
    pub reduced_motion: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 200,
            easing: Easing::default(),
            reduced_motion: false,
        }
    }
}

impl AnimationConfig {
    pub const fn transition(&self) -> Transition {
        if self.reduced_motion {
            Transition::instant()
        } else {
            Transition::new(Duration::from_millis(self.duration_ms), self.easing)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// Free-form side name; unknown names keep the fallback motion.
    pub side: Option<String>,
    pub arrow_width: Option<u16>,
    pub arrow_height: Option<u16>,
    pub modal: bool,
    pub default_open: bool,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            side: Some(AnchorSide::Bottom.name().to_string()),
            arrow_width: Some(1),
            arrow_height: Some(1),
            modal: false,
            default_open: false,
        }
    }
}

impl PopupConfig {
    pub fn anchor_side(&self) -> Option<AnchorSide> {
        self.side.as_deref().and_then(AnchorSide::from_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    pub size: ModalSize,
    pub centered: bool,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            size: ModalSize::default(),
            centered: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub popup: PopupConfig,
    #[serde(default)]
    pub modal: ModalConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [animation]
            duration_ms = 350

            [popup]
            side = "diagonal"

            [keybindings.overlay]
            close = "x"
            "#,
        )
        .unwrap();

        assert_eq!(config.animation.duration_ms, 350);
        assert_eq!(config.animation.easing, Easing::EaseOut);
        assert_eq!(config.popup.anchor_side(), None);
        assert_eq!(config.popup.arrow_width, Some(1));
        assert!(config.modal.centered);
        assert_eq!(config.keybindings.overlay.close.display(), "x");
        assert_eq!(config.keybindings.overlay.toggle.display(), "p/Enter");
    }

    #[test]
    fn test_reduced_motion_uses_instant_transition() {
        let animation = AnimationConfig {
            reduced_motion: true,
            ..AnimationConfig::default()
        };
        assert_eq!(animation.transition(), Transition::instant());
        assert_eq!(
            AnimationConfig::default().transition().duration,
            Duration::from_millis(200)
        );
    }

    #[test]
    fn test_modal_size_names() {
        let config: ModalConfig = toml::from_str("size = \"full\"\ncentered = false").unwrap();
        assert_eq!(config.size, ModalSize::Full);
        assert!(!config.centered);
    }
}
