//! Popover-style popup anchored to a trigger.
//!
//! A [`Popup`] root owns the open flag and wires its parts together:
//!
//! - [`PopupTrigger`] toggles the popup and doubles as the default anchor.
//! - [`PopupClose`] closes it.
//! - [`PopupContent`] is drawn next to the anchor and animates in and out
//!   from the side it is attached to.
//!
//! Parts never share the controller. The trigger and close parts hold an
//! [`OpenSetter`]; the content holds a [`VisibilityReader`].

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph};
use tracing::debug;

use crate::Theme;
use crate::config::{KeyResolver, OverlayAction};
use crate::error::{self, OverlayError};
use crate::overlay::{
    AnchorSide, ExitAnimationGate, GateEvent, GateState, OpenSetter, OverlayConfig, Transition,
    VisibilityController, VisibilityReader, select_hidden,
};
use crate::ui::{Component, EventResult, Result, paint};

/// Output of a popup root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupEvent {
    /// The open flag changed. Emitted once per gesture, after the content
    /// has already reacted.
    OpenChanged(bool),
}

/// Small pointer drawn between the content and its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrow {
    pub width: u16,
    pub height: u16,
}

impl Arrow {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    const fn glyph(side: AnchorSide) -> &'static str {
        match side {
            AnchorSide::Top => "▼",
            AnchorSide::Right => "◀",
            AnchorSide::Bottom => "▲",
            AnchorSide::Left => "▶",
        }
    }
}

/// Button that toggles the popup.
#[derive(Debug)]
pub struct PopupTrigger {
    label: String,
    setter: OpenSetter,
    reader: VisibilityReader,
    resolver: Arc<KeyResolver>,
    area: Option<Rect>,
}

impl PopupTrigger {
    pub const fn new(
        label: String,
        setter: OpenSetter,
        reader: VisibilityReader,
        resolver: Arc<KeyResolver>,
    ) -> Self {
        Self {
            label,
            setter,
            reader,
            resolver,
            area: None,
        }
    }

    /// Where the trigger was last drawn.
    pub const fn area(&self) -> Option<Rect> {
        self.area
    }
}

impl Component for PopupTrigger {
    type Output = ();

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if self.resolver.matches_overlay(&key, OverlayAction::Toggle) {
            self.setter.request(!self.reader.current());
            return Ok(EventResult::Consumed);
        }
        Ok(EventResult::Ignored)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let label = format!(
            " {} [{}] ",
            self.label,
            self.resolver.display_overlay(OverlayAction::Toggle)
        );
        let width = u16::try_from(label.chars().count() + 2).unwrap_or(u16::MAX);
        let button = Rect::new(area.x, area.y, width.min(area.width), 3.min(area.height));

        let accent = if self.reader.current() {
            theme.title()
        } else {
            theme.border()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(theme.surface()));
        let paragraph = Paragraph::new(Line::from(Span::styled(
            label,
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )))
        .block(block);

        frame.render_widget(paragraph, button);
        self.area = Some(button);
    }
}

/// Control that closes the popup.
#[derive(Debug)]
pub struct PopupClose {
    setter: OpenSetter,
    resolver: Arc<KeyResolver>,
}

impl PopupClose {
    pub const fn new(setter: OpenSetter, resolver: Arc<KeyResolver>) -> Self {
        Self { setter, resolver }
    }
}

impl Component for PopupClose {
    type Output = ();

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if self.resolver.matches_overlay(&key, OverlayAction::Close) {
            self.setter.close();
            return Ok(EventResult::Consumed);
        }
        Ok(EventResult::Ignored)
    }

    fn render(&mut self, _frame: &mut Frame, _area: Rect, _theme: &Theme) {}
}

/// Body of the popup. Stays mounted while its exit animation plays.
#[derive(Debug)]
pub struct PopupContent {
    reader: Option<VisibilityReader>,
    gate: ExitAnimationGate,
    side: Option<AnchorSide>,
    arrow: Option<Arrow>,
    body: Text<'static>,
    now: Instant,
}

impl PopupContent {
    pub fn new(body: impl Into<Text<'static>>) -> Self {
        Self {
            reader: None,
            gate: ExitAnimationGate::new(select_hidden(None), Transition::default()),
            side: None,
            arrow: None,
            body: body.into(),
            now: Instant::now(),
        }
    }

    /// Side of the anchor to attach to. Without one, the content is placed
    /// below the anchor but animates with the fallback motion.
    #[must_use]
    pub const fn with_side(mut self, side: Option<AnchorSide>) -> Self {
        self.side = side;
        self
    }

    #[must_use]
    pub const fn with_arrow(mut self, arrow: Arrow) -> Self {
        self.arrow = Some(arrow);
        self
    }

    #[must_use]
    pub const fn with_transition(mut self, transition: Transition) -> Self {
        self.gate.set_transition(transition);
        self
    }

    /// Connect to the root that owns the open flag.
    pub fn bind(&mut self, reader: VisibilityReader) {
        self.reader = Some(reader);
    }

    pub const fn set_side(&mut self, side: Option<AnchorSide>) {
        self.side = side;
    }

    pub const fn side(&self) -> Option<AnchorSide> {
        self.side
    }

    pub const fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    /// Open flag of the bound root.
    pub fn is_open(&self) -> error::Result<bool> {
        self.reader
            .as_ref()
            .map(VisibilityReader::current)
            .ok_or(OverlayError::UninitializedContext {
                component: "PopupContent",
            })
    }

    /// Feed the latest flag to the gate.
    pub fn sync(&mut self, now: Instant) -> error::Result<Vec<GateEvent>> {
        let reader = self.reader.as_mut().ok_or(OverlayError::UninitializedContext {
            component: "PopupContent",
        })?;
        let open = reader.observe();
        self.now = now;
        self.gate.set_hidden(select_hidden(self.side));
        Ok(self.gate.observe(open, now))
    }

    pub fn tick(&mut self, now: Instant) -> Option<GateEvent> {
        self.now = now;
        self.gate.tick(now)
    }

    pub fn teardown(&mut self) -> Option<GateEvent> {
        self.gate.teardown()
    }

    fn box_size(&self) -> (u16, u16) {
        let width = u16::try_from(self.body.width()).unwrap_or(u16::MAX);
        let height = u16::try_from(self.body.height()).unwrap_or(u16::MAX);
        (width.saturating_add(4), height.saturating_add(2))
    }

    /// Resting rects of the content box and its arrow around `anchor`.
    fn place(&self, anchor: Rect, bounds: Rect) -> (Rect, Option<Rect>) {
        let (width, height) = self.box_size();
        let (arrow_w, arrow_h) = self.arrow.map_or((0, 0), |a| (a.width, a.height));
        let (w, h, aw, ah) = (
            i32::from(width),
            i32::from(height),
            i32::from(arrow_w),
            i32::from(arrow_h),
        );
        let (ax, ay) = (i32::from(anchor.x), i32::from(anchor.y));
        let (right, bottom) = (i32::from(anchor.right()), i32::from(anchor.bottom()));
        let center_x = ax + i32::from(anchor.width) / 2;
        let center_y = ay + i32::from(anchor.height) / 2;

        let ((bx, by), (px, py)) = match self.side.unwrap_or(AnchorSide::Bottom) {
            AnchorSide::Top => ((center_x - w / 2, ay - ah - h), (center_x - aw / 2, ay - ah)),
            AnchorSide::Bottom => ((center_x - w / 2, bottom + ah), (center_x - aw / 2, bottom)),
            AnchorSide::Left => ((ax - aw - w, center_y - h / 2), (ax - aw, center_y - ah / 2)),
            AnchorSide::Right => ((right + aw, center_y - h / 2), (right, center_y - ah / 2)),
        };

        let boxed = rect_at(bx, by, width, height).clamp(bounds);
        let arrow = self
            .arrow
            .map(|_| rect_at(px, py, arrow_w, arrow_h).intersection(bounds))
            .filter(|area| !area.is_empty());
        (boxed, arrow)
    }

    fn render_at(&self, frame: &mut Frame, anchor: Rect, bounds: Rect, theme: &Theme) {
        let Some(motion) = self.gate.motion_at(self.now) else {
            return;
        };
        let (rest, arrow_rest) = self.place(anchor, bounds);
        let area = paint::displaced(rest, motion, bounds);
        if area.is_empty() {
            return;
        }

        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border()))
            .padding(Padding::horizontal(1))
            .style(Style::default().bg(theme.surface()));
        let paragraph = Paragraph::new(self.body.clone())
            .style(Style::default().fg(theme.text))
            .block(block);
        frame.render_widget(paragraph, area);
        paint::fade(frame.buffer_mut(), area, motion.opacity, theme.backdrop());

        if let Some(arrow_rest) = arrow_rest {
            let arrow_area = paint::displaced(arrow_rest, motion, bounds);
            let glyph = Arrow::glyph(self.side.unwrap_or(AnchorSide::Bottom));
            let row = glyph.repeat(usize::from(arrow_area.width));
            let lines: Vec<Line> = (0..arrow_area.height)
                .map(|_| Line::from(row.clone()))
                .collect();
            frame.render_widget(
                Paragraph::new(lines).style(Style::default().fg(theme.border())),
                arrow_area,
            );
            paint::fade(frame.buffer_mut(), arrow_area, motion.opacity, theme.backdrop());
        }
    }
}

#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn rect_at(x: i32, y: i32, width: u16, height: u16) -> Rect {
    let clamp = |v: i32| v.clamp(0, i32::from(u16::MAX)) as u16;
    Rect::new(clamp(x), clamp(y), width, height)
}

/// Root of a popup: owns the open flag and the parts that react to it.
#[derive(Debug)]
pub struct Popup {
    controller: VisibilityController,
    trigger: PopupTrigger,
    close: PopupClose,
    content: PopupContent,
    anchor: Option<Rect>,
    modal: bool,
    /// Changes not yet handed to the caller.
    pending: Vec<PopupEvent>,
}

impl Popup {
    /// Build a popup. `open` makes the flag caller-controlled at start;
    /// otherwise `config.default_open` seeds it.
    pub fn new(
        label: impl Into<String>,
        mut content: PopupContent,
        config: &OverlayConfig,
        open: Option<bool>,
        resolver: Arc<KeyResolver>,
    ) -> error::Result<Self> {
        let controller = VisibilityController::initialize(Some(config.default_open), open);
        content.bind(controller.subscribe());
        // A popup that starts open mounts straight away.
        if controller.current() {
            content.sync(Instant::now())?;
        }
        Ok(Self {
            trigger: PopupTrigger::new(
                label.into(),
                controller.setter(),
                controller.subscribe(),
                Arc::clone(&resolver),
            ),
            close: PopupClose::new(controller.setter(), resolver),
            controller,
            content,
            anchor: None,
            modal: config.modal,
            pending: Vec::new(),
        })
    }

    /// Anchor the content to `area` instead of the trigger.
    pub const fn set_anchor(&mut self, area: Option<Rect>) {
        self.anchor = area;
    }

    pub fn is_open(&self) -> bool {
        self.controller.current()
    }

    pub const fn gate_state(&self) -> GateState {
        self.content.gate_state()
    }

    pub const fn content_mut(&mut self) -> &mut PopupContent {
        &mut self.content
    }

    /// Handle for parts outside the popup that may open or close it.
    pub fn setter(&self) -> OpenSetter {
        self.controller.setter()
    }

    /// Open the popup, returning every change applied, including requests
    /// other setters queued earlier.
    pub fn open(&mut self, now: Instant) -> Result<Vec<PopupEvent>> {
        self.controller.setter().open();
        self.apply_requests(now)
    }

    pub fn close(&mut self, now: Instant) -> Result<Vec<PopupEvent>> {
        self.controller.setter().close();
        self.apply_requests(now)
    }

    /// Take changes raised on ticks or left over from a key press that
    /// applied more than one request.
    pub fn drain_events(&mut self) -> Vec<PopupEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Remove the content immediately, skipping the exit animation.
    pub fn teardown(&mut self) {
        self.controller.set_open(false);
        if self.content.teardown().is_some() {
            debug!("Popup torn down");
        }
    }

    /// Apply queued requests in order, one event per change. The content
    /// observes each change before the change is reported.
    fn apply_requests(&mut self, now: Instant) -> Result<Vec<PopupEvent>> {
        let mut events = Vec::new();
        while let Some(open) = self.controller.next_request() {
            if self.controller.set_open(open) {
                self.content.sync(now)?;
                events.push(PopupEvent::OpenChanged(open));
            }
        }
        Ok(events)
    }
}

impl Component for Popup {
    type Output = PopupEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        let now = Instant::now();
        let mut handled = false;
        if self.controller.current() {
            handled |= self.close.handle_key(key)?.is_consumed();
        }
        if !handled {
            handled |= self.trigger.handle_key(key)?.is_consumed();
        }

        let mut events = self.apply_requests(now)?.into_iter();
        if let Some(first) = events.next() {
            self.pending.extend(events);
            return Ok(first.into());
        }
        if handled || (self.modal && self.controller.current()) {
            Ok(EventResult::Consumed)
        } else {
            Ok(EventResult::Ignored)
        }
    }

    fn handle_tick(&mut self, now: Instant) {
        match self.apply_requests(now) {
            Ok(events) => self.pending.extend(events),
            Err(error) => debug!(%error, "Failed to apply popup requests"),
        }
        if self.content.tick(now) == Some(GateEvent::Unmounted) {
            debug!("Popup content unmounted");
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.trigger.render(frame, area, theme);
        let Some(anchor) = self.anchor.or_else(|| self.trigger.area()) else {
            return;
        };
        let bounds = frame.area();
        self.content.render_at(frame, anchor, bounds, theme);
    }
}
