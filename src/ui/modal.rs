//! Dialog that blocks the screen below while open.

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tracing::{debug, trace};

use crate::Theme;
use crate::config::{KeyResolver, OverlayAction};
use crate::overlay::{
    AnchorSide, ExitAnimationGate, GateEvent, GateState, ModalStyles, OpenSetter, OverlayConfig,
    StyleFragment, Transition, VisibilityController, VisibilityReader, compose, select_hidden,
};
use crate::ui::{Component, EventResult, Result, paint};

/// How dark the page gets behind a fully shown modal.
const SCRIM_STRENGTH: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    OpenChanged(bool),
}

/// Modal dialog with a title, a body and an optional footer.
///
/// The modal rises into place from below its resting position and sinks
/// back out when closed. While open it captures every key; once closing,
/// keys pass through so the caller can reopen it mid-exit.
#[derive(Debug)]
pub struct Modal {
    controller: VisibilityController,
    reader: VisibilityReader,
    setter: OpenSetter,
    gate: ExitAnimationGate,
    styles: ModalStyles,
    config: OverlayConfig,
    title: String,
    body: Text<'static>,
    footer: Option<Line<'static>>,
    resolver: Arc<KeyResolver>,
    now: Instant,
    pending: Vec<ModalEvent>,
}

impl Modal {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<Text<'static>>,
        config: OverlayConfig,
        transition: Transition,
        resolver: Arc<KeyResolver>,
    ) -> Self {
        let controller = VisibilityController::initialize(Some(config.default_open), None);
        let mut modal = Self {
            reader: controller.subscribe(),
            setter: controller.setter(),
            controller,
            gate: ExitAnimationGate::new(select_hidden(Some(AnchorSide::Top)), transition),
            styles: compose(&config),
            config,
            title: title.into(),
            body: body.into(),
            footer: None,
            resolver,
            now: Instant::now(),
            pending: Vec::new(),
        };
        modal.sync(modal.now);
        modal
    }

    #[must_use]
    pub fn with_footer(mut self, footer: impl Into<Line<'static>>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn is_open(&self) -> bool {
        self.controller.current()
    }

    pub const fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    pub const fn config(&self) -> OverlayConfig {
        self.config
    }

    pub const fn styles(&self) -> &ModalStyles {
        &self.styles
    }

    /// Change size or centering; takes effect on the next frame.
    pub fn reconfigure(&mut self, config: OverlayConfig) {
        self.config = config;
        self.styles = compose(&config);
        debug!(size = %config.size, centered = config.centered, content = %self.styles.content, "Modal restyled");
    }

    pub fn setter(&self) -> OpenSetter {
        self.setter.clone()
    }

    pub fn open(&mut self, now: Instant) -> Vec<ModalEvent> {
        self.setter.open();
        self.apply_requests(now)
    }

    pub fn close(&mut self, now: Instant) -> Vec<ModalEvent> {
        self.setter.close();
        self.apply_requests(now)
    }

    /// Take changes raised on ticks or left over from a key press.
    pub fn drain_events(&mut self) -> Vec<ModalEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn teardown(&mut self) {
        self.controller.set_open(false);
        self.reader.observe();
        self.gate.teardown();
    }

    fn sync(&mut self, now: Instant) {
        let open = self.reader.observe();
        self.now = now;
        for event in self.gate.observe(open, now) {
            trace!(?event, "Modal gate event");
        }
    }

    fn apply_requests(&mut self, now: Instant) -> Vec<ModalEvent> {
        let mut events = Vec::new();
        while let Some(open) = self.controller.next_request() {
            if self.controller.set_open(open) {
                self.sync(now);
                events.push(ModalEvent::OpenChanged(open));
            }
        }
        events
    }

    /// Rows wanted by the dialog, borders included.
    fn content_height(&self) -> u16 {
        let body_padding = StyleFragment::Body.padding();
        let body = u16::try_from(self.body.height())
            .unwrap_or(u16::MAX)
            .saturating_add(body_padding.top + body_padding.bottom);
        let footer = u16::from(self.footer.is_some());
        body.saturating_add(footer).saturating_add(3)
    }

    fn render_sections(&self, frame: &mut Frame, inner: Rect, theme: &Theme) {
        let footer_rows = u16::from(self.footer.is_some());
        let [title_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(footer_rows),
        ])
        .areas(inner);

        let title = Paragraph::new(Line::from(Span::styled(
            self.title.clone(),
            Style::default()
                .fg(theme.title())
                .add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().padding(StyleFragment::Title.padding()));
        frame.render_widget(title, title_area);

        let body = Paragraph::new(self.body.clone())
            .style(Style::default().fg(theme.text))
            .wrap(Wrap { trim: false })
            .block(Block::default().padding(StyleFragment::Body.padding()));
        frame.render_widget(body, body_area);

        if let Some(footer) = &self.footer {
            let footer = Paragraph::new(footer.clone())
                .style(Style::default().fg(theme.subtext0))
                .block(Block::default().padding(StyleFragment::Footer.padding()));
            frame.render_widget(footer, footer_area);
        }
    }
}

impl Component for Modal {
    type Output = ModalEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if !self.controller.current() {
            return Ok(EventResult::Ignored);
        }
        if self.resolver.matches_overlay(&key, OverlayAction::Close) {
            self.setter.close();
        }
        let mut events = self.apply_requests(Instant::now()).into_iter();
        match events.next() {
            Some(first) => {
                self.pending.extend(events);
                Ok(first.into())
            }
            // Capture all input while open.
            None => Ok(EventResult::Consumed),
        }
    }

    fn handle_tick(&mut self, now: Instant) {
        let events = self.apply_requests(now);
        self.pending.extend(events);
        self.now = now;
        if self.gate.tick(now) == Some(GateEvent::Unmounted) {
            debug!("Modal unmounted");
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(motion) = self.gate.motion_at(self.now) else {
            return;
        };

        paint::dim(
            frame.buffer_mut(),
            area,
            SCRIM_STRENGTH * motion.opacity,
            theme.scrim(),
        );

        let rest = self.styles.motion_box_area(area, self.content_height());
        let boxed = paint::displaced(rest, motion, area);
        if boxed.is_empty() {
            return;
        }

        frame.render_widget(Clear, boxed);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(self.styles.border_type())
            .border_style(Style::default().fg(theme.border()))
            .style(Style::default().bg(theme.surface()));
        let inner = block.inner(boxed);
        frame.render_widget(block, boxed);
        self.render_sections(frame, inner, theme);

        paint::fade(frame.buffer_mut(), boxed, motion.opacity, theme.scrim());
    }
}
