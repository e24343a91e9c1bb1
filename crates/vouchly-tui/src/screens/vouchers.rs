//! Vouchers screen: one campaign's voucher table with generate/download.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
};
use tui_input::Input;

use vouchly_core::{Campaign, DetailIntent, DetailState, Voucher, VoucherStatus};

use crate::action::Action;
use crate::component::Component;
use crate::input::handle_input_key;
use crate::theme;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub struct VouchersScreen {
    state: DetailState,
    /// The generate-count prompt while it is open.
    count_input: Option<Input>,
    table_state: TableState,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl VouchersScreen {
    pub fn new(campaign: Campaign, limit: u32) -> Self {
        Self {
            state: DetailState::new(campaign, limit),
            count_input: None,
            table_state: TableState::default(),
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn apply(&mut self, intent: DetailIntent) -> Vec<vouchly_core::DetailEffect> {
        let effects = self.state.apply(intent);
        let len = self.state.vouchers.len();
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            None => self.table_state.select(Some(0)),
            Some(_) => {}
        }
        effects
    }

    fn busy_label(&self) -> Option<&'static str> {
        if self.state.generating {
            Some("Generating…")
        } else if self.state.downloading {
            Some("Downloading…")
        } else if self.state.loading {
            Some("Loading…")
        } else {
            None
        }
    }

    fn handle_count_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.count_input = None;
                None
            }
            KeyCode::Enter => {
                let raw = self.count_input.take()?;
                // Non-numeric input counts as 0 and fails the range check.
                let count: u64 = raw.value().trim().parse().unwrap_or(0);
                self.state.apply(DetailIntent::SetGenerateCount(
                    u32::try_from(count).unwrap_or(u32::MAX),
                ));
                Some(Action::Detail(DetailIntent::Generate { count }))
            }
            _ => {
                if let Some(input) = self.count_input.as_mut() {
                    handle_input_key(input, key);
                }
                None
            }
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        if self.state.vouchers.is_empty() {
            let text = if self.state.loading {
                "Loading vouchers…"
            } else {
                "No vouchers yet. Press g to generate some."
            };
            frame.render_widget(
                Paragraph::new(Span::styled(format!("  {text}"), theme::key_hint())),
                area,
            );
            return;
        }

        let header = Row::new(["Code", "Status", "Created At", "Used At"].map(Cell::from))
            .style(theme::table_header());
        let rows = self.state.vouchers.iter().map(voucher_row);
        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(11),
                Constraint::Length(18),
                Constraint::Length(18),
            ],
        )
        .header(header)
        .row_highlight_style(theme::table_selected());

        frame.render_stateful_widget(table, area, &mut self.table_state.clone());
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let [status_area, hint_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

        let mut status = Vec::new();
        if let Some((first, last)) = self.state.display_range() {
            status.push(Span::styled(
                format!(
                    "  Showing {first} to {last} of {} vouchers · Page {} of {}",
                    self.state.total_vouchers, self.state.page, self.state.total_pages
                ),
                theme::key_hint(),
            ));
        }
        if let Some(path) = &self.state.last_export {
            status.push(Span::styled(
                format!("  Saved {}", path.display()),
                Style::default().fg(theme::SUCCESS_GREEN),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(status)), status_area);

        let hint = |key: &'static str, label: &'static str, enabled: bool| {
            let key_style = if enabled {
                theme::key_hint_key()
            } else {
                theme::key_hint_disabled()
            };
            let label_style = if enabled {
                theme::key_hint()
            } else {
                theme::key_hint_disabled()
            };
            [Span::styled(key, key_style), Span::styled(label, label_style)]
        };

        let busy = self.state.busy();
        let mut spans = vec![Span::raw("  ")];
        spans.extend(hint("←/→ ", "page  ", true));
        spans.extend(hint("g ", "generate  ", self.state.can_generate()));
        spans.extend(hint("D ", "download  ", self.state.can_download()));
        spans.extend(hint("r ", "refresh  ", !busy));
        spans.extend(hint("Esc ", "back", true));
        frame.render_widget(Paragraph::new(Line::from(spans)), hint_area);
    }

    fn render_count_prompt(&self, frame: &mut Frame, area: Rect, input: &Input) {
        let modal = super::centered_rect(64, 6, area);
        frame.render_widget(Clear, modal);
        let block = Block::default()
            .title(" Generate Vouchers ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(theme::modal());
        let inner = block.inner(modal);
        frame.render_widget(block, modal);

        let [field, sample, hint] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(Rect {
                y: inner.y + 1,
                height: inner.height.saturating_sub(1),
                ..inner
            });
        let label = "  Count: ";
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(label, theme::key_hint()),
                Span::styled(input.value(), Style::default().fg(theme::ELECTRIC_YELLOW)),
            ])),
            field,
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("  Each voucher will have a unique code like: ", theme::key_hint()),
                Span::styled(
                    format!("{}-XXXXXX", self.state.campaign.prefix),
                    Style::default().fg(theme::NEON_CYAN),
                ),
            ])),
            sample,
        );
        frame.render_widget(
            Paragraph::new(Span::styled("  1 to 100,000 · Enter generate · Esc cancel", theme::key_hint())),
            hint,
        );

        let offset = u16::try_from(label.len() + input.visual_cursor()).unwrap_or(u16::MAX);
        frame.set_cursor_position((field.x.saturating_add(offset), field.y));
    }
}

fn voucher_row(voucher: &Voucher) -> Row<'_> {
    let status_style = match voucher.status() {
        VoucherStatus::Available => Style::default().fg(theme::SUCCESS_GREEN),
        VoucherStatus::Used => Style::default().fg(theme::CORAL),
    };
    Row::new(vec![
        Cell::from(voucher.code.as_str()).style(Style::default().fg(theme::NEON_CYAN)),
        Cell::from(voucher.status().to_string()).style(status_style),
        Cell::from(voucher.created_at.format(TIMESTAMP_FORMAT).to_string()),
        Cell::from(
            voucher
                .used_at
                .map_or_else(|| "-".to_owned(), |t| t.format(TIMESTAMP_FORMAT).to_string()),
        ),
    ])
    .style(theme::table_row())
}

// ── Component impl ───────────────────────────────────────────────────

impl Component for VouchersScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.count_input.is_some() {
            return Ok(self.handle_count_key(key));
        }

        let action = match key.code {
            KeyCode::Esc => Some(Action::List(vouchly_core::ListIntent::CloseDialog)),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::Detail(DetailIntent::SetPage(
                self.state.page.saturating_sub(1),
            ))),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::Detail(DetailIntent::SetPage(
                self.state.page.saturating_add(1),
            ))),
            KeyCode::Char('r') => Some(Action::Detail(DetailIntent::Refresh)),
            KeyCode::Char('g') if self.state.can_generate() => {
                self.count_input = Some(Input::new(self.state.generate_count.to_string()));
                None
            }
            KeyCode::Char('D') => Some(Action::Detail(DetailIntent::Download)),
            KeyCode::Down | KeyCode::Char('j') => {
                self.table_state.select_next();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.table_state.select_previous();
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::Tick = action {
            if self.state.busy() {
                self.throbber_state.calc_next();
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" {} ", self.state.header()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [info_area, table_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .areas(inner);

        let campaign = &self.state.campaign;
        let info = vec![
            Span::styled("  Value ", theme::key_hint()),
            Span::styled(
                campaign.amount_label(),
                Style::default()
                    .fg(theme::SUCCESS_GREEN)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("   Prefix ", theme::key_hint()),
            Span::styled(campaign.prefix.as_str(), Style::default().fg(theme::CORAL)),
            Span::styled("   Valid ", theme::key_hint()),
            Span::styled(campaign.validity_label(), theme::table_row()),
        ];
        frame.render_widget(Paragraph::new(Line::from(info)), info_area);

        if let Some(label) = self.busy_label() {
            let [_, throbber_area] =
                Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(info_area);
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(format!(" {label}"))
                .style(Style::default().fg(theme::NEON_CYAN))
                .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
            frame.render_stateful_widget(throbber, throbber_area, &mut self.throbber_state.clone());
        }

        self.render_table(frame, table_area);
        self.render_footer(frame, footer_area);

        if let Some(input) = &self.count_input {
            self.render_count_prompt(frame, area, input);
        }
    }

    fn captures_text(&self) -> bool {
        self.count_input.is_some()
    }
}
