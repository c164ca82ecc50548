//! Structural style fragments for overlays.
//!
//! Composition is a pure lookup on [`OverlayConfig`]; the resulting
//! [`ModalStyles`] also knows how to turn its fragments into terminal
//! geometry.

use std::fmt;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::widgets::{BorderType, Padding};
use serde::{Deserialize, Serialize};

/// Rows reserved above the content box by the inset fragments.
pub const INSET_ROWS: u16 = 2;

/// Width of a modal content box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalSize {
    Small,
    #[default]
    Medium,
    Large,
    Full,
}

impl ModalSize {
    pub const ALL: [Self; 4] = [Self::Small, Self::Medium, Self::Large, Self::Full];

    /// Column budget for the content box; `None` means the whole frame.
    #[must_use]
    pub const fn columns(self) -> Option<u16> {
        match self {
            Self::Small => Some(40),
            Self::Medium => Some(60),
            Self::Large => Some(90),
            Self::Full => None,
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Small => Self::Medium,
            Self::Medium => Self::Large,
            Self::Large => Self::Full,
            Self::Full => Self::Small,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for ModalSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Consumer configuration for one overlay, fixed for a render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayConfig {
    pub size: ModalSize,
    pub centered: bool,
    pub default_open: bool,
    pub modal: bool,
}

/// Named structural piece of an overlay's look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleFragment {
    Container,
    Scrim,
    Content,
    MotionBox,
    ChildrenContainer,
    Title,
    Body,
    Footer,
    /// Space above a top-aligned content box.
    TopInset,
    /// Space above and below a centered content box.
    VerticalInset,
    JustifyCenter,
    Rounded,
}

impl StyleFragment {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Scrim => "scrim",
            Self::Content => "content",
            Self::MotionBox => "motion-box",
            Self::ChildrenContainer => "children-container",
            Self::Title => "title",
            Self::Body => "body",
            Self::Footer => "footer",
            Self::TopInset => "top-inset",
            Self::VerticalInset => "vertical-inset",
            Self::JustifyCenter => "justify-center",
            Self::Rounded => "rounded",
        }
    }

    /// Inner padding a section fragment applies to its block.
    #[must_use]
    pub const fn padding(self) -> Padding {
        match self {
            Self::Title | Self::Footer => Padding::horizontal(2),
            Self::Body => Padding::uniform(1),
            _ => Padding::ZERO,
        }
    }
}

/// Ordered set of fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments(Vec<StyleFragment>);

impl Fragments {
    /// Merge unconditional fragments with those whose flag is set.
    /// Order is preserved and duplicates are dropped.
    #[must_use]
    pub fn merge(base: &[StyleFragment], conditional: &[(StyleFragment, bool)]) -> Self {
        let mut merged = Self::default();
        let enabled = conditional
            .iter()
            .filter(|(_, enabled)| *enabled)
            .map(|(fragment, _)| fragment);
        for fragment in base.iter().chain(enabled) {
            if !merged.contains(*fragment) {
                merged.0.push(*fragment);
            }
        }
        merged
    }

    #[must_use]
    pub fn contains(&self, fragment: StyleFragment) -> bool {
        self.0.contains(&fragment)
    }

    pub fn iter(&self) -> impl Iterator<Item = StyleFragment> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for Fragments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(StyleFragment::name).collect();
        f.write_str(&names.join(" "))
    }
}

/// Fragments for every part of a modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalStyles {
    pub size: ModalSize,
    pub container: Fragments,
    pub scrim: Fragments,
    pub content: Fragments,
    pub motion_box: Fragments,
    pub children_container: Fragments,
    pub title: Fragments,
    pub body: Fragments,
    pub footer: Fragments,
}

/// Map an overlay configuration to its style fragments.
#[must_use]
pub fn compose(config: &OverlayConfig) -> ModalStyles {
    use StyleFragment as F;

    let full = config.size == ModalSize::Full;
    ModalStyles {
        size: config.size,
        container: Fragments::merge(&[F::Container], &[]),
        scrim: Fragments::merge(&[F::Scrim], &[]),
        content: Fragments::merge(
            &[F::Content],
            &[
                (F::TopInset, !config.centered && !full),
                (F::VerticalInset, config.centered && !full),
                (F::JustifyCenter, config.centered),
            ],
        ),
        motion_box: Fragments::merge(&[F::MotionBox], &[(F::Rounded, !full)]),
        children_container: Fragments::merge(&[F::ChildrenContainer], &[]),
        title: Fragments::merge(&[F::Title], &[]),
        body: Fragments::merge(&[F::Body], &[]),
        footer: Fragments::merge(&[F::Footer], &[]),
    }
}

impl ModalStyles {
    /// Resting rect of the motion box inside `area` for content that wants
    /// `content_height` rows (borders included).
    #[must_use]
    pub fn motion_box_area(&self, area: Rect, content_height: u16) -> Rect {
        let Some(columns) = self.size.columns() else {
            return area;
        };

        let mut region = area;
        if self.content.contains(StyleFragment::TopInset) {
            region = shrink_top(region, INSET_ROWS);
        }
        if self.content.contains(StyleFragment::VerticalInset) {
            region = shrink_top(region, INSET_ROWS);
            region.height = region.height.saturating_sub(INSET_ROWS);
        }

        let [row] = Layout::horizontal([Constraint::Length(columns)])
            .flex(Flex::Center)
            .areas(region);
        let vertical = if self.content.contains(StyleFragment::JustifyCenter) {
            Flex::Center
        } else {
            Flex::Start
        };
        let [boxed] = Layout::vertical([Constraint::Length(content_height)])
            .flex(vertical)
            .areas(row);
        boxed
    }

    /// Border shape of the motion box.
    #[must_use]
    pub fn border_type(&self) -> BorderType {
        if self.motion_box.contains(StyleFragment::Rounded) {
            BorderType::Rounded
        } else {
            BorderType::Plain
        }
    }
}

const fn shrink_top(area: Rect, rows: u16) -> Rect {
    let rows = if rows < area.height { rows } else { area.height };
    Rect::new(area.x, area.y + rows, area.width, area.height - rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(size: ModalSize, centered: bool) -> OverlayConfig {
        OverlayConfig {
            size,
            centered,
            ..OverlayConfig::default()
        }
    }

    #[test]
    fn test_full_size_suppresses_both_insets() {
        let styles = compose(&config(ModalSize::Full, true));
        assert!(!styles.content.contains(StyleFragment::TopInset));
        assert!(!styles.content.contains(StyleFragment::VerticalInset));
        assert!(!styles.motion_box.contains(StyleFragment::Rounded));
    }

    #[test]
    fn test_centered_adds_vertical_inset() {
        let styles = compose(&config(ModalSize::Medium, true));
        assert_eq!(
            styles.content.to_string(),
            "content vertical-inset justify-center"
        );
    }

    #[test]
    fn test_top_aligned_adds_top_inset() {
        let styles = compose(&config(ModalSize::Small, false));
        assert_eq!(styles.content.to_string(), "content top-inset");
        assert_eq!(styles.motion_box.to_string(), "motion-box rounded");
    }

    #[test]
    fn test_merge_drops_duplicates_and_disabled() {
        let merged = Fragments::merge(
            &[StyleFragment::Body, StyleFragment::Body],
            &[(StyleFragment::Rounded, false), (StyleFragment::Body, true)],
        );
        assert_eq!(merged.to_string(), "body");
    }

    #[test]
    fn test_motion_box_area_top_aligned() {
        let styles = compose(&config(ModalSize::Small, false));
        let area = styles.motion_box_area(Rect::new(0, 0, 100, 30), 8);
        assert_eq!(area, Rect::new(30, INSET_ROWS, 40, 8));
    }

    #[test]
    fn test_motion_box_area_centered() {
        let styles = compose(&config(ModalSize::Medium, true));
        let area = styles.motion_box_area(Rect::new(0, 0, 100, 30), 10);
        assert_eq!(area, Rect::new(20, 10, 60, 10));
    }

    #[test]
    fn test_motion_box_area_full_fills_frame() {
        let styles = compose(&config(ModalSize::Full, false));
        let frame = Rect::new(0, 0, 80, 24);
        assert_eq!(styles.motion_box_area(frame, 5), frame);
        assert_eq!(styles.border_type(), BorderType::Plain);
    }
}
