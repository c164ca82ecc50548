//! Errors surfaced by overlay parts.

use thiserror::Error;

/// Failures raised when an overlay part is used incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    /// A content part tried to read the open flag before it was bound to the
    /// root that owns it.
    #[error("{component} was used outside of an overlay root; bind it to a visibility reader first")]
    UninitializedContext { component: &'static str },
}

pub type Result<T> = std::result::Result<T, OverlayError>;
