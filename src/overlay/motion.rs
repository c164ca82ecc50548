//! Side-aware motion variants.
//!
//! Overlay content animates between two named states: `visible` and
//! `hidden`. The hidden state is offset a few cells away from the anchor so
//! that entrance and exit appear to originate from the edge the content is
//! attached to.

use std::fmt;

/// Cells the hidden variant is displaced from the resting position.
pub const HIDDEN_OFFSET: f32 = 5.0;

/// Edge of the anchor the content is rendered against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl AnchorSide {
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Parse a side name. Names match exactly; anything else, including
    /// `"TOP"` or `" top"`, returns `None`, which the variant selector
    /// treats as the fallback row.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "top" => Some(Self::Top),
            "right" => Some(Self::Right),
            "bottom" => Some(Self::Bottom),
            "left" => Some(Self::Left),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }

    /// Next side clockwise.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Top => Self::Right,
            Self::Right => Self::Bottom,
            Self::Bottom => Self::Left,
            Self::Left => Self::Top,
        }
    }
}

impl fmt::Display for AnchorSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opacity and 2-D offset of overlay content at one point of an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionVariant {
    pub opacity: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl MotionVariant {
    #[must_use]
    pub const fn new(opacity: f32, offset_x: f32, offset_y: f32) -> Self {
        Self {
            opacity,
            offset_x,
            offset_y,
        }
    }

    /// Linear interpolation toward `to`; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        if t <= 0.0 {
            return self;
        }
        if t >= 1.0 {
            return to;
        }
        Self {
            opacity: (to.opacity - self.opacity).mul_add(t, self.opacity).clamp(0.0, 1.0),
            offset_x: (to.offset_x - self.offset_x).mul_add(t, self.offset_x),
            offset_y: (to.offset_y - self.offset_y).mul_add(t, self.offset_y),
        }
    }

    /// Offset rounded to whole terminal cells.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn cell_offset(self) -> (i32, i32) {
        (self.offset_x.round() as i32, self.offset_y.round() as i32)
    }
}

/// Resting state, identical for every side.
#[must_use]
pub const fn select_visible() -> MotionVariant {
    MotionVariant::new(1.0, 0.0, 0.0)
}

/// Hidden state for content attached to `side`.
///
/// Anything other than top, right or bottom, including a missing side, uses
/// the left row.
#[must_use]
pub const fn select_hidden(side: Option<AnchorSide>) -> MotionVariant {
    match side {
        Some(AnchorSide::Top) => MotionVariant::new(0.0, 0.0, HIDDEN_OFFSET),
        Some(AnchorSide::Right) => MotionVariant::new(0.0, -HIDDEN_OFFSET, 0.0),
        Some(AnchorSide::Bottom) => MotionVariant::new(0.0, 0.0, -HIDDEN_OFFSET),
        Some(AnchorSide::Left) | None => MotionVariant::new(0.0, HIDDEN_OFFSET, 0.0),
    }
}

/// Hidden state for a raw side name as it appears in configuration.
#[must_use]
pub fn select_hidden_by_name(name: &str) -> MotionVariant {
    select_hidden(AnchorSide::from_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_table() {
        assert_eq!(
            select_hidden(Some(AnchorSide::Top)),
            MotionVariant::new(0.0, 0.0, 5.0)
        );
        assert_eq!(
            select_hidden(Some(AnchorSide::Right)),
            MotionVariant::new(0.0, -5.0, 0.0)
        );
        assert_eq!(
            select_hidden(Some(AnchorSide::Bottom)),
            MotionVariant::new(0.0, 0.0, -5.0)
        );
        assert_eq!(
            select_hidden(Some(AnchorSide::Left)),
            MotionVariant::new(0.0, 5.0, 0.0)
        );
    }

    #[test]
    fn test_unspecified_and_unknown_sides_use_left_row() {
        let left = select_hidden(Some(AnchorSide::Left));
        assert_eq!(select_hidden(None), left);
        assert_eq!(select_hidden_by_name("diagonal"), left);
        assert_eq!(select_hidden_by_name(""), left);
    }

    #[test]
    fn test_side_names_are_case_and_space_sensitive() {
        let left = select_hidden(Some(AnchorSide::Left));
        assert_eq!(select_hidden_by_name("TOP"), left);
        assert_eq!(select_hidden_by_name(" right "), left);
        assert_eq!(select_hidden_by_name("Bottom"), left);
        assert_eq!(select_hidden_by_name("top"), select_hidden(Some(AnchorSide::Top)));
        assert_eq!(AnchorSide::from_name("right"), Some(AnchorSide::Right));
        assert_eq!(AnchorSide::from_name("Right"), None);
    }

    #[test]
    fn test_visible_is_side_independent() {
        assert_eq!(select_visible(), MotionVariant::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_lerp_midpoint() {
        let from = select_hidden(Some(AnchorSide::Top));
        let mid = from.lerp(select_visible(), 0.5);
        assert!((mid.opacity - 0.5).abs() < f32::EPSILON);
        assert!((mid.offset_y - 2.5).abs() < f32::EPSILON);
        assert_eq!(from.lerp(select_visible(), 2.0), select_visible());
    }

    #[test]
    fn test_cell_offset_rounds() {
        assert_eq!(MotionVariant::new(0.3, -2.6, 1.4).cell_offset(), (-3, 1));
    }

    #[test]
    fn test_side_names() {
        for side in AnchorSide::ALL {
            assert_eq!(AnchorSide::from_name(side.name()), Some(side));
        }
        assert_eq!(AnchorSide::Left.next(), AnchorSide::Top);
    }
}
