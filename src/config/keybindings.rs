use serde::{Deserialize, Serialize};

use crate::config::key::KeyBinding;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalKeybindings {
    pub quit: KeyBinding,
    pub suspend: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayKeybindings {
    pub toggle: KeyBinding,
    pub close: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseKeybindings {
    pub open_modal: KeyBinding,
    pub cycle_side: KeyBinding,
    pub cycle_size: KeyBinding,
    pub toggle_centered: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeybindingsConfig {
    pub global: GlobalKeybindings,
    pub overlay: OverlayKeybindings,
    pub showcase: ShowcaseKeybindings,
}
