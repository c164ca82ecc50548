//! Tween engine for overlay motion.
//!
//! A [`MotionAnimator`] interpolates between two [`MotionVariant`]s over a
//! [`Transition`]. Time is always passed in, never read from the clock, so
//! the owner decides when frames happen.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::motion::MotionVariant;

/// Default length of entrance and exit animations.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(200);

/// Easing function for transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0f32).mul_add(t, 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Duration and easing of one animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub duration: Duration,
    pub easing: Easing,
}

impl Transition {
    #[must_use]
    pub const fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Transition that completes on the first poll.
    #[must_use]
    pub const fn instant() -> Self {
        Self::new(Duration::ZERO, Easing::Linear)
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION, Easing::default())
    }
}

/// Result of polling an animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    /// Still interpolating.
    Running,
    /// Reached its target on this poll. Reported once per animation.
    Completed,
    /// Already at rest; nothing to report.
    Idle,
}

/// A single in-flight (or settled) tween.
#[derive(Debug, Clone)]
pub struct MotionAnimator {
    from: MotionVariant,
    to: MotionVariant,
    start: Instant,
    transition: Transition,
    completion_reported: bool,
}

impl MotionAnimator {
    /// Start animating from `from` to `to` at `now`.
    #[must_use]
    pub const fn start(
        from: MotionVariant,
        to: MotionVariant,
        transition: Transition,
        now: Instant,
    ) -> Self {
        Self {
            from,
            to,
            start: now,
            transition,
            completion_reported: false,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> MotionVariant {
        self.from
    }

    #[must_use]
    pub const fn target(&self) -> MotionVariant {
        self.to
    }

    /// Raw progress in `[0, 1]` at `now`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.transition.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.transition.duration.as_secs_f32()).min(1.0)
    }

    /// Interpolated values at `now`.
    #[must_use]
    pub fn value_at(&self, now: Instant) -> MotionVariant {
        let eased = self.transition.easing.apply(self.progress(now));
        self.from.lerp(self.to, eased)
    }

    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Redirect toward `to`, starting from the values shown at `now`.
    ///
    /// The previous target is dropped; nothing is queued.
    pub fn retarget(&mut self, to: MotionVariant, transition: Transition, now: Instant) {
        self.from = self.value_at(now);
        self.to = to;
        self.start = now;
        self.transition = transition;
        self.completion_reported = false;
    }

    /// Report whether the animation finished since the last poll.
    pub fn poll(&mut self, now: Instant) -> AnimationStatus {
        if self.completion_reported {
            AnimationStatus::Idle
        } else if self.is_finished(now) {
            self.completion_reported = true;
            AnimationStatus::Completed
        } else {
            AnimationStatus::Running
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::motion::{AnchorSide, select_hidden, select_visible};

    const EASINGS: [Easing; 4] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ];

    #[test]
    fn test_easing_boundaries() {
        for easing in EASINGS {
            assert!(easing.apply(0.0).abs() < f32::EPSILON, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < f32::EPSILON, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in EASINGS {
            let mut prev = 0.0;
            for i in 1..=10 {
                let t = i as f32 / 10.0;
                let val = easing.apply(t);
                assert!(val >= prev, "{easing:?} not monotonic at t={t}");
                prev = val;
            }
        }
    }

    #[test]
    fn test_easing_deserializes_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            easing: Easing,
        }
        let parsed: Wrapper = toml::from_str("easing = \"ease-in-out\"").unwrap();
        assert_eq!(parsed.easing, Easing::EaseInOut);
    }

    #[test]
    fn test_progress_and_completion() {
        let now = Instant::now();
        let transition = Transition::new(Duration::from_millis(200), Easing::Linear);
        let mut animator = MotionAnimator::start(
            select_hidden(Some(AnchorSide::Bottom)),
            select_visible(),
            transition,
            now,
        );

        let halfway = now + Duration::from_millis(100);
        assert!((animator.progress(halfway) - 0.5).abs() < 1e-3);
        assert_eq!(animator.poll(halfway), AnimationStatus::Running);

        let done = now + Duration::from_millis(200);
        assert_eq!(animator.value_at(done), select_visible());
        assert_eq!(animator.poll(done), AnimationStatus::Completed);
        assert_eq!(animator.poll(done), AnimationStatus::Idle);
    }

    #[test]
    fn test_retarget_starts_from_current_values() {
        let now = Instant::now();
        let transition = Transition::new(Duration::from_millis(200), Easing::Linear);
        let mut animator =
            MotionAnimator::start(select_visible(), select_hidden(None), transition, now);

        let midway = now + Duration::from_millis(100);
        let shown = animator.value_at(midway);
        animator.retarget(select_visible(), transition, midway);

        assert_eq!(animator.origin(), shown);
        assert_eq!(animator.target(), select_visible());
        assert!((animator.value_at(midway).opacity - 0.5).abs() < 1e-3);
        assert_eq!(animator.poll(midway), AnimationStatus::Running);
    }

    #[test]
    fn test_instant_transition_completes_on_first_poll() {
        let now = Instant::now();
        let mut animator = MotionAnimator::start(
            select_visible(),
            select_hidden(None),
            Transition::instant(),
            now,
        );
        assert_eq!(animator.poll(now), AnimationStatus::Completed);
    }
}
