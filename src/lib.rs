//! Animated modal and popup overlays for ratatui.
//!
//! Overlays are split into a root that owns the open flag and content that
//! reacts to it. Content stays mounted while its exit animation plays and is
//! removed once the animation reports completion. See [`overlay`] for the
//! state machines and [`ui`] for the ratatui components built on them.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod overlay;
pub mod theme;
pub mod tui;
pub mod ui;

pub use error::OverlayError;
pub use theme::Theme;
