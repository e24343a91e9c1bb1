//! Application core: event loop, action dispatch, effect spawning.
//!
//! Screens turn keys into `ListIntent` / `DetailIntent` actions. The app
//! applies them to the owning screen and spawns every returned effect on
//! the controller; each effect's completion comes back through the same
//! action channel as another intent.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use vouchly_core::{DetailEffect, DetailIntent, Dialog, HttpController, ListEffect, ListIntent};

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::campaigns::CampaignsScreen;
use crate::screens::vouchers::VouchersScreen;
use crate::theme;
use crate::tui::Tui;

/// How long a success/info toast stays up. Errors stay until dismissed.
const TOAST_TTL: Duration = Duration::from_secs(4);

pub struct App {
    controller: HttpController,
    voucher_page_size: u32,
    campaigns: CampaignsScreen,
    /// Present while a campaign's vouchers are open.
    vouchers: Option<VouchersScreen>,
    notification: Option<(Notification, Instant)>,
    help_visible: bool,
    running: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(controller: HttpController, campaign_page_size: u32, voucher_page_size: u32) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            voucher_page_size,
            campaigns: CampaignsScreen::new(campaign_page_size),
            vouchers: None,
            notification: None,
            help_visible: false,
            running: true,
            action_tx,
            action_rx,
        }
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");
        self.action_tx.send(Action::List(ListIntent::Refresh))?;

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                } else {
                    self.process_action(action)?;
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    // ── Input ────────────────────────────────────────────────────────

    fn active_screen(&self) -> &dyn Component {
        match &self.vouchers {
            Some(screen) => screen,
            None => &self.campaigns,
        }
    }

    fn active_screen_mut(&mut self) -> &mut dyn Component {
        match &mut self.vouchers {
            Some(screen) => screen,
            None => &mut self.campaigns,
        }
    }

    /// The error toast currently shown, if any.
    fn active_error(&self) -> Option<&str> {
        self.vouchers
            .as_ref()
            .and_then(|v| v.state().error.as_deref())
            .or(self.campaigns.state().error.as_deref())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let (KeyModifiers::CONTROL, KeyCode::Char('c')) = (key.modifiers, key.code) {
            return Ok(Some(Action::Quit));
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        if !self.active_screen().captures_text() {
            match key.code {
                KeyCode::Char('q') => return Ok(Some(Action::Quit)),
                KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
                KeyCode::Char('x') if self.active_error().is_some() => {
                    let voucher_error = self
                        .vouchers
                        .as_ref()
                        .is_some_and(|v| v.state().error.is_some());
                    return Ok(Some(if voucher_error {
                        Action::Detail(DetailIntent::DismissError)
                    } else {
                        Action::List(ListIntent::DismissError)
                    }));
                }
                _ => {}
            }
        }

        self.active_screen_mut().handle_key_event(key)
    }

    // ── Actions ──────────────────────────────────────────────────────

    fn process_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,
            Action::Render => {}
            Action::Resize(w, h) => debug!(w, h, "terminal resized"),
            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, shown)| shown.elapsed() >= TOAST_TTL)
                {
                    self.notification = None;
                }
                self.campaigns.update(&Action::Tick)?;
                if let Some(screen) = self.vouchers.as_mut() {
                    screen.update(&Action::Tick)?;
                }
            }
            Action::ToggleHelp => self.help_visible = !self.help_visible,
            Action::Notify(notification) => {
                self.notification = Some((notification, Instant::now()));
            }
            Action::List(intent) => self.apply_list(intent)?,
            Action::Detail(intent) => self.apply_detail(intent)?,
        }
        Ok(())
    }

    fn apply_list(&mut self, intent: ListIntent) -> Result<()> {
        if let Some(err) = intent.failure() {
            warn!(error = %err, "campaign operation failed");
        }
        match &intent {
            ListIntent::Created(Ok(campaign)) => self.action_tx.send(Action::Notify(
                Notification::success(format!("Created campaign \"{}\"", campaign.name)),
            ))?,
            ListIntent::Deleted { result: Ok(()), .. } => self
                .action_tx
                .send(Action::Notify(Notification::success("Campaign deleted")))?,
            _ => {}
        }

        for effect in self.campaigns.apply(intent) {
            self.spawn_list(effect);
        }
        self.sync_vouchers_screen()
    }

    fn apply_detail(&mut self, intent: DetailIntent) -> Result<()> {
        let Some(screen) = self.vouchers.as_mut() else {
            debug!("dropping voucher action with no campaign open");
            return Ok(());
        };
        if let Some(err) = intent.failure() {
            warn!(error = %err, "voucher operation failed");
        }
        let current = screen.state().view();
        match &intent {
            DetailIntent::Generated {
                view, result: Ok(()), ..
            } if *view == current => self
                .action_tx
                .send(Action::Notify(Notification::success("Vouchers generated")))?,
            DetailIntent::Downloaded {
                view, result: Ok(path), ..
            } if *view == current => {
                self.action_tx.send(Action::Notify(Notification::success(format!(
                    "Saved {}",
                    path.display()
                ))))?;
            }
            _ => {}
        }

        let effects = screen.apply(intent);
        for effect in effects {
            if let DetailEffect::Generate { count, .. } = &effect {
                self.action_tx.send(Action::Notify(Notification::info(format!(
                    "Generating {count} vouchers…"
                ))))?;
            }
            self.spawn_detail(effect);
        }
        Ok(())
    }

    /// Open or close the vouchers screen to match the list's dialog.
    fn sync_vouchers_screen(&mut self) -> Result<()> {
        match self.campaigns.state().dialog.clone() {
            Dialog::View(campaign) => {
                let current = self.vouchers.as_ref().map(|v| v.state().campaign_id());
                if current != Some(campaign.id) {
                    debug!(campaign = %campaign.id, "opening vouchers");
                    self.vouchers = Some(VouchersScreen::new(campaign, self.voucher_page_size));
                    self.action_tx
                        .send(Action::Detail(DetailIntent::LoadPage(1)))?;
                }
            }
            _ => self.vouchers = None,
        }
        Ok(())
    }

    fn spawn_list(&self, effect: ListEffect) {
        let controller = self.controller.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let intent = controller.run_list(effect).await;
            let _ = tx.send(Action::List(intent));
        });
    }

    fn spawn_detail(&self, effect: DetailEffect) {
        let controller = self.controller.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let intent = controller.run_detail(effect).await;
            let _ = tx.send(Action::Detail(intent));
        });
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let [content_area, status_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

        self.active_screen().render(frame, content_area);
        self.render_status_bar(frame, status_area);

        if let Some(message) = self.active_error() {
            render_toast(frame, content_area, message, ToastKind::Error);
        } else if let Some((notification, _)) = &self.notification {
            let kind = match notification.level {
                NotificationLevel::Success => ToastKind::Success,
                NotificationLevel::Info => ToastKind::Info,
            };
            render_toast(frame, content_area, &notification.message, kind);
        }

        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(" vouchly ", theme::title_style())];
        if self.active_error().is_some() {
            spans.push(Span::styled("│ x ", theme::key_hint_key()));
            spans.push(Span::styled("dismiss error  ", theme::key_hint()));
        }
        spans.push(Span::styled("│ ? ", theme::key_hint_key()));
        spans.push(Span::styled("help  ", theme::key_hint()));
        spans.push(Span::styled("q ", theme::key_hint_key()));
        spans.push(Span::styled("quit", theme::key_hint()));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[derive(Clone, Copy)]
enum ToastKind {
    Error,
    Success,
    Info,
}

/// Bottom-right toast over the content area.
fn render_toast(frame: &mut Frame, area: Rect, message: &str, kind: ToastKind) {
    let (title, color) = match kind {
        ToastKind::Error => (" Error · x to dismiss ", theme::ERROR_RED),
        ToastKind::Success => (" Done ", theme::SUCCESS_GREEN),
        ToastKind::Info => (" Info ", theme::NEON_CYAN),
    };
    let width = 50.min(area.width);
    let height = 4.min(area.height);
    let toast = Rect::new(
        area.x + area.width - width,
        area.y + area.height.saturating_sub(height + 2),
        width,
        height,
    );
    frame.render_widget(Clear, toast);
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(theme::modal());
    frame.render_widget(
        Paragraph::new(message)
            .style(theme::table_row())
            .wrap(Wrap { trim: true })
            .block(block),
        toast,
    );
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_area = crate::screens::centered_rect(56, 22, area);
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(theme::modal());

    let section = |title: &'static str| {
        Line::from(Span::styled(
            format!("  {title}"),
            Style::default()
                .fg(theme::ELECTRIC_PURPLE)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let binding = |keys: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<12}"), theme::key_hint_key()),
            Span::styled(desc, theme::key_hint()),
        ])
    };

    let lines = vec![
        Line::from(""),
        section("Campaigns"),
        binding("←→↑↓ hjkl", "Select campaign"),
        binding("Enter", "View vouchers"),
        binding("n", "New campaign"),
        binding("d", "Delete campaign"),
        binding("[ / ]", "Previous / next page"),
        binding("r", "Refresh"),
        Line::from(""),
        section("Vouchers"),
        binding("← / →", "Previous / next page"),
        binding("g", "Generate vouchers"),
        binding("D", "Download CSV"),
        binding("r", "Refresh"),
        binding("Esc", "Back to campaigns"),
        Line::from(""),
        section("Global"),
        binding("x", "Dismiss error"),
        binding("?", "Toggle help"),
        binding("q / Ctrl+C", "Quit"),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), help_area);
}
