//! Showcase application: one popup trigger and one modal on a plain page.

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing::{debug, info};

use crate::Theme;
use crate::config::{AppConfig, GlobalAction, KeyResolver, OverlayAction, ShowcaseAction};
use crate::overlay::{AnchorSide, OverlayConfig};
use crate::tui::{Event, Tui};
use crate::ui::{Arrow, Component, EventResult, Modal, ModalEvent, Popup, PopupContent, PopupEvent};

const FRAME_RATE: f64 = 60.0;
const TICK_RATE: f64 = 60.0;

pub struct App {
    popup: Popup,
    modal: Modal,
    side: Option<AnchorSide>,
    resolver: Arc<KeyResolver>,
    theme: Theme,
    last_change: Option<String>,
    should_quit: bool,
    should_suspend: bool,
}

impl App {
    pub fn new(
        config: &AppConfig,
        resolver: Arc<KeyResolver>,
        theme: Theme,
    ) -> color_eyre::Result<Self> {
        let transition = config.animation.transition();
        let side = config.popup.anchor_side();

        let mut content = PopupContent::new(vec![
            Line::from("Popups slide in from the side"),
            Line::from("they are attached to."),
        ])
        .with_side(side)
        .with_transition(transition);
        if let (Some(width), Some(height)) = (config.popup.arrow_width, config.popup.arrow_height) {
            content = content.with_arrow(Arrow::new(width, height));
        }
        let popup = Popup::new(
            "Popup",
            content,
            &OverlayConfig {
                modal: config.popup.modal,
                default_open: config.popup.default_open,
                ..OverlayConfig::default()
            },
            None,
            Arc::clone(&resolver),
        )?;

        let modal = Modal::new(
            "Overlay showcase",
            vec![
                Line::from("The page behind is dimmed while this dialog is open."),
                Line::from("Closing plays the exit animation before the dialog unmounts."),
            ],
            OverlayConfig {
                size: config.modal.size,
                centered: config.modal.centered,
                modal: true,
                ..OverlayConfig::default()
            },
            transition,
            Arc::clone(&resolver),
        )
        .with_footer(Line::from(vec![
            Span::raw("Press "),
            Span::raw(resolver.display_overlay(OverlayAction::Close)),
            Span::raw(" to close"),
        ]));

        Ok(Self {
            popup,
            modal,
            side,
            resolver,
            theme,
            last_change: None,
            should_quit: false,
            should_suspend: false,
        })
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new(FRAME_RATE, TICK_RATE)?;
        tui.enter()?;

        loop {
            let Some(event) = tui.next_event().await else {
                break;
            };
            self.handle_event(&mut tui, event)?;

            if self.should_suspend {
                tui.suspend()?;
                tui.resume()?;
                self.should_suspend = false;
            } else if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        Ok(())
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) -> color_eyre::Result<()> {
        match event {
            Event::Quit => self.should_quit = true,
            Event::Tick => self.handle_tick(Instant::now()),
            Event::Render => {
                tui.draw(|frame| self.draw(frame))?;
            }
            Event::Resize(width, height) => {
                tui.resize(Rect::new(0, 0, width, height))?;
                tui.draw(|frame| self.draw(frame))?;
            }
            Event::Key(key) => self.handle_key(key)?,
            Event::Error(error) => debug!(%error, "Terminal event error"),
        }
        Ok(())
    }

    pub fn handle_tick(&mut self, now: Instant) {
        self.popup.handle_tick(now);
        self.modal.handle_tick(now);
        self.drain_overlay_events();
    }

    /// Record changes the overlays raised outside a direct return value.
    fn drain_overlay_events(&mut self) {
        for PopupEvent::OpenChanged(open) in self.popup.drain_events() {
            self.record(format!("popup open = {open}"));
        }
        for ModalEvent::OpenChanged(open) in self.modal.drain_events() {
            self.record(format!("modal open = {open}"));
        }
    }

    /// Route a key to the modal first, then global bindings, the popup and
    /// finally the showcase controls.
    pub fn handle_key(&mut self, key: KeyEvent) -> color_eyre::Result<()> {
        self.route_key(key)?;
        self.drain_overlay_events();
        Ok(())
    }

    fn route_key(&mut self, key: KeyEvent) -> color_eyre::Result<()> {
        match self.modal.handle_key(key)? {
            EventResult::Event(ModalEvent::OpenChanged(open)) => {
                self.record(format!("modal open = {open}"));
                return Ok(());
            }
            EventResult::Consumed => return Ok(()),
            EventResult::Ignored => {}
        }

        if self.resolver.matches_global(&key, GlobalAction::Quit) {
            self.should_quit = true;
            return Ok(());
        }
        if self.resolver.matches_global(&key, GlobalAction::Suspend) {
            self.should_suspend = true;
            return Ok(());
        }

        match self.popup.handle_key(key)? {
            EventResult::Event(PopupEvent::OpenChanged(open)) => {
                self.record(format!("popup open = {open}"));
                return Ok(());
            }
            EventResult::Consumed => return Ok(()),
            EventResult::Ignored => {}
        }

        let now = Instant::now();
        if self.resolver.matches_showcase(&key, ShowcaseAction::OpenModal) {
            for ModalEvent::OpenChanged(open) in self.modal.open(now) {
                self.record(format!("modal open = {open}"));
            }
        } else if self.resolver.matches_showcase(&key, ShowcaseAction::CycleSide) {
            self.side = match self.side {
                None => Some(AnchorSide::Top),
                Some(AnchorSide::Left) => None,
                Some(side) => Some(side.next()),
            };
            self.popup.content_mut().set_side(self.side);
            info!(side = ?self.side, "Popup side changed");
        } else if self.resolver.matches_showcase(&key, ShowcaseAction::CycleSize) {
            let config = self.modal.config();
            self.modal.reconfigure(OverlayConfig {
                size: config.size.next(),
                ..config
            });
        } else if self.resolver.matches_showcase(&key, ShowcaseAction::ToggleCentered) {
            let config = self.modal.config();
            self.modal.reconfigure(OverlayConfig {
                centered: !config.centered,
                ..config
            });
        }
        Ok(())
    }

    fn record(&mut self, change: String) {
        info!(%change, "Overlay open state changed");
        self.last_change = Some(change);
    }

    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let theme = self.theme;
        let area = frame.area();
        frame.render_widget(
            Block::default().style(Style::default().bg(theme.backdrop()).fg(theme.text)),
            area,
        );

        let [header, stage, status] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(Paragraph::new(self.help_line()), header);

        let [trigger] = Layout::horizontal([Constraint::Length(24)])
            .flex(Flex::Center)
            .areas(stage);
        let [trigger] = Layout::vertical([Constraint::Length(3)])
            .flex(Flex::Center)
            .areas(trigger);
        self.popup.render(frame, trigger, &theme);

        frame.render_widget(Paragraph::new(self.status_line()), status);

        self.modal.render(frame, area, &theme);
    }

    fn help_line(&self) -> Line<'static> {
        let key = Style::default()
            .fg(self.theme.key_hint())
            .add_modifier(Modifier::BOLD);
        let hint = |binding: String, label: &'static str| {
            [Span::styled(binding, key), Span::raw(format!(" {label}  "))]
        };
        let spans: Vec<Span<'static>> = [
            hint(self.resolver.display_overlay(OverlayAction::Toggle), "popup"),
            hint(self.resolver.display_showcase(ShowcaseAction::OpenModal), "modal"),
            hint(self.resolver.display_showcase(ShowcaseAction::CycleSide), "side"),
            hint(self.resolver.display_showcase(ShowcaseAction::CycleSize), "size"),
            hint(self.resolver.display_showcase(ShowcaseAction::ToggleCentered), "center"),
        ]
        .into_iter()
        .flatten()
        .collect();
        Line::from(spans)
    }

    fn status_line(&self) -> Line<'static> {
        let side = self.side.map_or("unset", AnchorSide::name);
        let config = self.modal.config();
        let text = format!(
            " popup: {} ({side})  modal: {} {} {}  {}",
            self.popup.gate_state(),
            self.modal.gate_state(),
            config.size,
            if config.centered { "centered" } else { "top" },
            self.last_change.as_deref().unwrap_or(""),
        );
        Line::from(Span::styled(text, Style::default().fg(self.theme.subtext0)))
    }
}
