//! Campaigns screen: card grid over the paginated campaign list.
//!
//! The screen owns the list view-state and the create form. It never
//! talks to the API itself; every key turns into a `ListIntent` that the
//! app applies and whose effects it spawns.

use std::cell::Cell;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use vouchly_core::list::EMPTY_MESSAGE;
use vouchly_core::{Campaign, Dialog, ListEffect, ListIntent, ListState};

use super::form::{CampaignForm, FormOutcome};
use crate::action::Action;
use crate::component::Component;
use crate::theme;

const CARD_WIDTH: u16 = 34;
const CARD_HEIGHT: u16 = 6;

pub struct CampaignsScreen {
    state: ListState,
    selected: usize,
    form: CampaignForm,
    throbber_state: throbber_widgets_tui::ThrobberState,
    /// Cards per row at the last render, for ↑/↓ navigation.
    columns: Cell<usize>,
    /// Topmost card row drawn, kept in step with the selection.
    first_row: Cell<usize>,
}

impl CampaignsScreen {
    pub fn new(limit: u32) -> Self {
        Self {
            state: ListState::new(limit),
            selected: 0,
            form: CampaignForm::default(),
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            columns: Cell::new(1),
            first_row: Cell::new(0),
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn selected_campaign(&self) -> Option<&Campaign> {
        self.state.campaigns.get(self.selected)
    }

    /// Apply an intent to the list state, returning the effects to spawn.
    pub fn apply(&mut self, intent: ListIntent) -> Vec<ListEffect> {
        let deleted = matches!(intent, ListIntent::Deleted { result: Ok(()), .. });
        if matches!(intent, ListIntent::OpenCreate) {
            self.form = CampaignForm::default();
        }

        let effects = self.state.apply(intent);

        if deleted {
            self.selected = 0;
        }
        self.selected = self
            .selected
            .min(self.state.campaigns.len().saturating_sub(1));
        effects
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.state.campaigns.len();
        if len == 0 {
            return;
        }
        self.selected = self
            .selected
            .saturating_add_signed(delta)
            .min(len - 1);
    }

    fn columns(&self) -> isize {
        isize::try_from(self.columns.get().max(1)).unwrap_or(1)
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_cards(&self, frame: &mut Frame, area: Rect) {
        if self.state.loading && self.state.campaigns.is_empty() {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label("  Loading campaigns…")
                .style(Style::default().fg(theme::NEON_CYAN))
                .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
            let [_, row, _] = Layout::vertical([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .areas(area);
            frame.render_stateful_widget(throbber, row, &mut self.throbber_state.clone());
            return;
        }

        if self.state.is_empty() {
            let [_, row, _] = Layout::vertical([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .areas(area);
            frame.render_widget(
                Paragraph::new(EMPTY_MESSAGE)
                    .style(theme::table_row())
                    .alignment(Alignment::Center),
                row,
            );
            return;
        }

        let columns = usize::from((area.width / CARD_WIDTH).max(1));
        self.columns.set(columns);

        let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
        let selected_row = self.selected / columns;
        let mut first_row = self.first_row.get();
        if selected_row < first_row {
            first_row = selected_row;
        } else if selected_row >= first_row + visible_rows {
            first_row = selected_row + 1 - visible_rows;
        }
        self.first_row.set(first_row);

        let rows = self.state.campaigns.chunks(columns);
        let mut y = area.y;
        for (row_idx, row) in rows.enumerate().skip(first_row).take(visible_rows) {
            let mut x = area.x;
            for (col_idx, campaign) in row.iter().enumerate() {
                let index = row_idx * columns + col_idx;
                let card = Rect::new(x, y, CARD_WIDTH, CARD_HEIGHT).intersection(area);
                render_card(frame, card, campaign, index == self.selected);
                x += CARD_WIDTH;
            }
            y += CARD_HEIGHT;
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let [range_area, hint_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

        if let Some((first, last)) = self.state.display_range() {
            let text = format!(
                "  Showing {first} to {last} of {} campaigns · Page {} of {}",
                self.state.total,
                self.state.page,
                self.state.total_pages()
            );
            frame.render_widget(Paragraph::new(Span::styled(text, theme::key_hint())), range_area);
        }

        let hints = Line::from(vec![
            Span::styled("  n ", theme::key_hint_key()),
            Span::styled("new  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("vouchers  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("delete  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("refresh  ", theme::key_hint()),
            Span::styled("[/] ", theme::key_hint_key()),
            Span::styled("page", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), hint_area);
    }

    fn render_delete_confirm(&self, frame: &mut Frame, area: Rect, campaign: &Campaign) {
        let modal = super::centered_rect(56, 7, area);
        frame.render_widget(Clear, modal);
        let block = Block::default()
            .title(" Delete Campaign ")
            .title_style(Style::default().fg(theme::ERROR_RED).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::ERROR_RED))
            .style(theme::modal());

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  Delete \"{}\" and all of its vouchers?", campaign.name),
                theme::table_row(),
            )),
            Line::from(""),
            Line::from(if self.state.submitting {
                vec![Span::styled("  Deleting…", theme::key_hint())]
            } else {
                vec![
                    Span::styled("  y ", theme::key_hint_key()),
                    Span::styled("delete  ", theme::key_hint()),
                    Span::styled("n/Esc ", theme::key_hint_key()),
                    Span::styled("cancel", theme::key_hint()),
                ]
            }),
        ];
        frame.render_widget(Paragraph::new(text).block(block), modal);
    }
}

fn render_card(frame: &mut Frame, area: Rect, campaign: &Campaign, selected: bool) {
    let block = Block::default()
        .title(format!(" {} ", campaign.name))
        .title_style(if selected {
            theme::table_selected()
        } else {
            theme::title_style()
        })
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if selected {
            theme::border_focused()
        } else {
            theme::border_default()
        });

    let lines = vec![
        Line::from(vec![
            Span::styled("Value   ", theme::key_hint()),
            Span::styled(
                campaign.amount_label(),
                Style::default()
                    .fg(theme::SUCCESS_GREEN)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Prefix  ", theme::key_hint()),
            Span::styled(campaign.prefix.as_str(), Style::default().fg(theme::CORAL)),
        ]),
        Line::from(vec![
            Span::styled("Valid   ", theme::key_hint()),
            Span::styled(campaign.validity_label(), theme::table_row()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Component impl ───────────────────────────────────────────────────

impl Component for CampaignsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let intent = match &self.state.dialog {
            Dialog::Create => match self.form.handle_key(key) {
                FormOutcome::Pending => None,
                FormOutcome::Cancel => Some(ListIntent::CloseDialog),
                FormOutcome::Submit(campaign) => Some(ListIntent::RequestCreate(campaign)),
            },
            Dialog::Delete(campaign) => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => Some(ListIntent::RequestDelete(campaign.id)),
                KeyCode::Char('n') | KeyCode::Esc => Some(ListIntent::CloseDialog),
                _ => None,
            },
            // The vouchers screen owns the keyboard while a campaign is open.
            Dialog::View(_) => None,
            Dialog::None => match key.code {
                KeyCode::Char('n') => Some(ListIntent::OpenCreate),
                KeyCode::Char('r') => Some(ListIntent::Refresh),
                KeyCode::Char('[') if self.state.page > 1 => {
                    Some(ListIntent::SetPage(self.state.page - 1))
                }
                KeyCode::Char(']') if self.state.page < self.state.total_pages() => {
                    Some(ListIntent::SetPage(self.state.page + 1))
                }
                KeyCode::Enter => self.selected_campaign().cloned().map(ListIntent::OpenView),
                KeyCode::Char('d') | KeyCode::Delete => {
                    self.selected_campaign().cloned().map(ListIntent::OpenDelete)
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    self.move_selection(-1);
                    None
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    self.move_selection(1);
                    None
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_selection(-self.columns());
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_selection(self.columns());
                    None
                }
                _ => None,
            },
        };
        Ok(intent.map(Action::List))
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::Tick = action {
            if self.state.loading {
                self.throbber_state.calc_next();
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Campaigns ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [cards_area, footer_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(2)]).areas(inner);
        self.render_cards(frame, cards_area);
        self.render_footer(frame, footer_area);

        match &self.state.dialog {
            Dialog::Create => self.form.render(frame, area, self.state.submitting),
            Dialog::Delete(campaign) => self.render_delete_confirm(frame, area, campaign),
            Dialog::None | Dialog::View(_) => {}
        }
    }

    fn captures_text(&self) -> bool {
        self.state.dialog == Dialog::Create
    }
}
