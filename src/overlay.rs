//! Visibility and exit-animation state shared by every overlay.
//!
//! - [`visibility`] owns the open flag and hands out reader/setter handles.
//! - [`gate`] decides whether content is mounted and keeps it alive while
//!   the exit animation runs.
//! - [`motion`] picks the side-aware hidden/visible variants.
//! - [`animation`] interpolates between variants over time.
//! - [`style`] maps size and centering to structural fragments.

pub mod animation;
pub mod gate;
pub mod motion;
pub mod style;
pub mod visibility;

pub use animation::{AnimationStatus, DEFAULT_DURATION, Easing, MotionAnimator, Transition};
pub use gate::{ExitAnimationGate, GateEvent, GateState, MotionRequest};
pub use motion::{AnchorSide, MotionVariant, select_hidden, select_hidden_by_name, select_visible};
pub use style::{Fragments, ModalSize, ModalStyles, OverlayConfig, StyleFragment, compose};
pub use visibility::{OpenSetter, VisibilityController, VisibilityReader};
