//! Mount/unmount decisions for overlay content.
//!
//! State machine: Unmounted → Visible → Exiting → Unmounted
//!
//! Closing never unmounts directly. The content stays mounted in
//! [`GateState::Exiting`] until the exit animation reports completion;
//! reopening while exiting reverses the animation in place.

use std::fmt;
use std::time::Instant;

use tracing::{debug, trace};

use super::animation::{AnimationStatus, MotionAnimator, Transition};
use super::motion::{MotionVariant, select_visible};

/// Lifecycle of one overlay's content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GateState {
    /// Content does not exist.
    #[default]
    Unmounted,
    /// Content is mounted and heading toward `visible`.
    Visible,
    /// Content is mounted and heading toward `hidden`; unmounts when the
    /// animation completes.
    Exiting,
}

impl GateState {
    #[must_use]
    pub const fn is_mounted(self) -> bool {
        !matches!(self, Self::Unmounted)
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unmounted => "unmounted",
            Self::Visible => "visible",
            Self::Exiting => "exiting",
        })
    }
}

/// Animation the gate asked the engine to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionRequest {
    pub from: MotionVariant,
    pub to: MotionVariant,
    pub transition: Transition,
}

/// Side effect produced by a gate transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateEvent {
    Mounted,
    Animate(MotionRequest),
    Unmounted,
}

/// Keeps overlay content mounted until its exit animation finishes.
#[derive(Debug, Clone)]
pub struct ExitAnimationGate {
    state: GateState,
    hidden: MotionVariant,
    transition: Transition,
    animator: Option<MotionAnimator>,
}

impl ExitAnimationGate {
    #[must_use]
    pub const fn new(hidden: MotionVariant, transition: Transition) -> Self {
        Self {
            state: GateState::Unmounted,
            hidden,
            transition,
            animator: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> GateState {
        self.state
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.state.is_mounted()
    }

    #[must_use]
    pub const fn hidden(&self) -> MotionVariant {
        self.hidden
    }

    /// Change the hidden variant used by later requests. An animation already
    /// in flight keeps its target.
    pub const fn set_hidden(&mut self, hidden: MotionVariant) {
        self.hidden = hidden;
    }

    pub const fn set_transition(&mut self, transition: Transition) {
        self.transition = transition;
    }

    /// React to the latest open flag.
    pub fn observe(&mut self, open: bool, now: Instant) -> Vec<GateEvent> {
        match (self.state, open) {
            (GateState::Unmounted, true) => {
                let animator =
                    MotionAnimator::start(self.hidden, select_visible(), self.transition, now);
                let request = self.request_for(&animator);
                self.animator = Some(animator);
                self.enter(GateState::Visible);
                vec![GateEvent::Mounted, GateEvent::Animate(request)]
            }
            (GateState::Visible, false) => {
                let request = self.retarget(self.hidden, now);
                self.enter(GateState::Exiting);
                vec![GateEvent::Animate(request)]
            }
            (GateState::Exiting, true) => {
                let request = self.retarget(select_visible(), now);
                self.enter(GateState::Visible);
                vec![GateEvent::Animate(request)]
            }
            (GateState::Unmounted, false)
            | (GateState::Visible, true)
            | (GateState::Exiting, false) => Vec::new(),
        }
    }

    /// Poll the running animation; unmounts when the exit animation reports
    /// completion.
    pub fn tick(&mut self, now: Instant) -> Option<GateEvent> {
        let status = self.animator.as_mut()?.poll(now);
        trace!(state = %self.state, ?status, "Polled overlay animation");
        match (self.state, status) {
            (GateState::Exiting, AnimationStatus::Completed) => self.unmount(),
            _ => None,
        }
    }

    /// Completion signal from an external animation engine.
    ///
    /// Ignored unless the gate is exiting.
    pub fn complete_exit(&mut self) -> Option<GateEvent> {
        if self.state == GateState::Exiting {
            self.unmount()
        } else {
            None
        }
    }

    /// Hard teardown: unmount immediately without animating.
    pub fn teardown(&mut self) -> Option<GateEvent> {
        if self.state.is_mounted() {
            self.unmount()
        } else {
            None
        }
    }

    /// Values to draw at `now`, or `None` while unmounted.
    #[must_use]
    pub fn motion_at(&self, now: Instant) -> Option<MotionVariant> {
        if !self.state.is_mounted() {
            return None;
        }
        self.animator.as_ref().map(|animator| animator.value_at(now))
    }

    /// Whether drawing at `now` would differ from a later frame.
    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.animator
            .as_ref()
            .is_some_and(|animator| !animator.is_finished(now))
    }

    fn retarget(&mut self, to: MotionVariant, now: Instant) -> MotionRequest {
        let transition = self.transition;
        let animator = self
            .animator
            .get_or_insert_with(|| MotionAnimator::start(to, to, transition, now));
        animator.retarget(to, transition, now);
        MotionRequest {
            from: animator.origin(),
            to,
            transition,
        }
    }

    fn request_for(&self, animator: &MotionAnimator) -> MotionRequest {
        MotionRequest {
            from: animator.origin(),
            to: animator.target(),
            transition: self.transition,
        }
    }

    fn unmount(&mut self) -> Option<GateEvent> {
        self.animator = None;
        self.enter(GateState::Unmounted);
        Some(GateEvent::Unmounted)
    }

    fn enter(&mut self, next: GateState) {
        debug!(from = %self.state, to = %next, "Overlay gate transition");
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::overlay::animation::Easing;
    use crate::overlay::motion::{AnchorSide, select_hidden};

    const DURATION: Duration = Duration::from_millis(200);

    fn gate(side: AnchorSide) -> ExitAnimationGate {
        ExitAnimationGate::new(
            select_hidden(Some(side)),
            Transition::new(DURATION, Easing::Linear),
        )
    }

    fn animate(from: MotionVariant, to: MotionVariant) -> GateEvent {
        GateEvent::Animate(MotionRequest {
            from,
            to,
            transition: Transition::new(DURATION, Easing::Linear),
        })
    }

    #[test]
    fn test_open_from_unmounted_mounts_and_animates_in() {
        let mut gate = gate(AnchorSide::Bottom);
        let now = Instant::now();
        let events = gate.observe(true, now);

        assert_eq!(gate.state(), GateState::Visible);
        assert!(gate.is_mounted());
        assert_eq!(
            events,
            vec![
                GateEvent::Mounted,
                animate(select_hidden(Some(AnchorSide::Bottom)), select_visible()),
            ]
        );
        assert_eq!(gate.motion_at(now), Some(select_hidden(Some(AnchorSide::Bottom))));
    }

    #[test]
    fn test_top_open_close_unmounts_only_after_completion() {
        let mut gate = gate(AnchorSide::Top);
        let hidden = MotionVariant::new(0.0, 0.0, 5.0);
        let start = Instant::now();

        let opened = gate.observe(true, start);
        assert_eq!(opened[1], animate(hidden, select_visible()));

        let settled = start + DURATION;
        assert_eq!(gate.tick(settled), None);
        assert_eq!(gate.state(), GateState::Visible);

        let closed = gate.observe(false, settled);
        assert_eq!(closed, vec![animate(select_visible(), hidden)]);
        assert_eq!(gate.state(), GateState::Exiting);

        // The logical state is closed, but the content is still drawn.
        let midway = settled + DURATION / 2;
        assert_eq!(gate.tick(midway), None);
        assert_eq!(gate.state(), GateState::Exiting);
        assert!(gate.motion_at(midway).is_some());

        assert_eq!(gate.tick(settled + DURATION), Some(GateEvent::Unmounted));
        assert_eq!(gate.state(), GateState::Unmounted);
        assert_eq!(gate.motion_at(settled + DURATION), None);
    }

    #[test]
    fn test_right_open_close_open_never_unmounts() {
        let mut gate = gate(AnchorSide::Right);
        let start = Instant::now();
        let mut seen = Vec::new();

        seen.extend(gate.observe(true, start));
        seen.extend(gate.tick(start + Duration::from_millis(50)));
        seen.extend(gate.observe(false, start + Duration::from_millis(80)));
        seen.extend(gate.tick(start + Duration::from_millis(120)));
        seen.extend(gate.observe(true, start + Duration::from_millis(150)));
        for step in 0..20 {
            seen.extend(gate.tick(start + Duration::from_millis(150 + step * 20)));
        }

        assert!(!seen.contains(&GateEvent::Unmounted));
        assert_eq!(gate.state(), GateState::Visible);
        assert_eq!(
            gate.motion_at(start + Duration::from_secs(1)),
            Some(select_visible())
        );
    }

    #[test]
    fn test_reopen_reverses_from_current_values() {
        let mut gate = gate(AnchorSide::Left);
        let start = Instant::now();
        gate.observe(true, start);
        gate.observe(false, start + DURATION);

        let midway = start + DURATION + DURATION / 2;
        let shown = gate.motion_at(midway).unwrap();
        let events = gate.observe(true, midway);

        assert_eq!(events, vec![animate(shown, select_visible())]);
        assert!(shown.opacity > 0.0 && shown.opacity < 1.0);
    }

    #[test]
    fn test_rapid_toggles_keep_only_latest_target() {
        let mut gate = gate(AnchorSide::Bottom);
        let start = Instant::now();
        gate.observe(true, start);
        gate.observe(false, start + Duration::from_millis(10));
        gate.observe(true, start + Duration::from_millis(20));
        gate.observe(false, start + Duration::from_millis(30));

        assert_eq!(gate.state(), GateState::Exiting);
        let end = start + Duration::from_millis(30) + DURATION;
        assert_eq!(gate.tick(end), Some(GateEvent::Unmounted));
        assert_eq!(gate.tick(end), None);
    }

    #[test]
    fn test_redundant_flags_are_ignored() {
        let mut gate = gate(AnchorSide::Top);
        let now = Instant::now();
        assert!(gate.observe(false, now).is_empty());
        assert_eq!(gate.state(), GateState::Unmounted);

        gate.observe(true, now);
        assert!(gate.observe(true, now).is_empty());
        gate.observe(false, now);
        assert!(gate.observe(false, now).is_empty());
        assert_eq!(gate.state(), GateState::Exiting);
    }

    #[test]
    fn test_entrance_completion_does_not_unmount() {
        let mut gate = gate(AnchorSide::Top);
        let start = Instant::now();
        gate.observe(true, start);
        assert_eq!(gate.tick(start + DURATION * 2), None);
        assert_eq!(gate.complete_exit(), None);
        assert_eq!(gate.state(), GateState::Visible);
    }

    #[test]
    fn test_external_completion_signal_unmounts_exiting_content() {
        let mut gate = gate(AnchorSide::Top);
        let start = Instant::now();
        gate.observe(true, start);
        gate.observe(false, start);
        assert_eq!(gate.complete_exit(), Some(GateEvent::Unmounted));
        assert_eq!(gate.state(), GateState::Unmounted);
    }

    #[test]
    fn test_teardown_skips_exit_animation() {
        let mut gate = gate(AnchorSide::Bottom);
        let start = Instant::now();
        assert_eq!(gate.teardown(), None);

        gate.observe(true, start);
        assert_eq!(gate.teardown(), Some(GateEvent::Unmounted));
        assert_eq!(gate.state(), GateState::Unmounted);

        gate.observe(true, start);
        gate.observe(false, start);
        assert_eq!(gate.teardown(), Some(GateEvent::Unmounted));
        assert!(!gate.is_animating(start));
    }

    #[test]
    fn test_state_is_always_one_of_three() {
        let mut gate = gate(AnchorSide::Right);
        let start = Instant::now();
        let flags = [true, false, false, true, true, false, true, false];
        for (i, open) in flags.into_iter().enumerate() {
            let now = start + Duration::from_millis(70 * i as u64);
            gate.observe(open, now);
            gate.tick(now);
            assert!(matches!(
                gate.state(),
                GateState::Unmounted | GateState::Visible | GateState::Exiting
            ));
            assert_eq!(gate.is_mounted(), gate.motion_at(now).is_some());
        }
    }
}
