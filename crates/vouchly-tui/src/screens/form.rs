//! Create-campaign form shown as a modal over the campaign list.
//!
//! Tab / Shift+Tab move between fields, ←/→ cycle the currency, Enter
//! validates and submits, Esc cancels. Field errors appear under each
//! field after a failed submit and stay until the next attempt.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use strum::IntoEnumIterator;
use tui_input::Input;

use vouchly_core::{CampaignDraft, Currency, FieldErrors, FormField, ValidatedCampaign};

use crate::input::handle_input_key;
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Name,
    Prefix,
    Amount,
    Currency,
    ValidFrom,
    ValidTo,
}

impl Slot {
    const ALL: [Slot; 6] = [
        Self::Name,
        Self::Prefix,
        Self::Amount,
        Self::Currency,
        Self::ValidFrom,
        Self::ValidTo,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Prefix => "Prefix",
            Self::Amount => "Amount",
            Self::Currency => "Currency",
            Self::ValidFrom => "Valid from",
            Self::ValidTo => "Valid to",
        }
    }

    fn field(self) -> Option<FormField> {
        match self {
            Self::Name => Some(FormField::Name),
            Self::Prefix => Some(FormField::Prefix),
            Self::Amount => Some(FormField::Amount),
            Self::Currency => None,
            Self::ValidFrom => Some(FormField::ValidFrom),
            Self::ValidTo => Some(FormField::ValidTo),
        }
    }
}

/// What a key press did to the form.
#[derive(Debug, PartialEq)]
pub enum FormOutcome {
    Pending,
    Submit(ValidatedCampaign),
    Cancel,
}

pub struct CampaignForm {
    name: Input,
    prefix: Input,
    amount: Input,
    currency: Currency,
    valid_from: Input,
    valid_to: Input,
    active: Slot,
    errors: FieldErrors,
}

impl Default for CampaignForm {
    fn default() -> Self {
        let draft = CampaignDraft::default();
        let date = |d: Option<NaiveDate>| Input::new(d.map(|d| d.to_string()).unwrap_or_default());
        Self {
            name: Input::new(draft.name),
            prefix: Input::new(draft.prefix),
            amount: Input::new(draft.amount.to_string()),
            currency: draft.currency,
            valid_from: date(draft.valid_from),
            valid_to: date(draft.valid_to),
            active: Slot::Name,
            errors: FieldErrors::default(),
        }
    }
}

impl CampaignForm {
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Current field values as a draft. Unparseable amounts count as 0 and
    /// unparseable dates as missing.
    pub fn draft(&self) -> CampaignDraft {
        let date = |input: &Input| NaiveDate::parse_from_str(input.value().trim(), "%Y-%m-%d").ok();
        CampaignDraft {
            name: self.name.value().to_owned(),
            prefix: self.prefix.value().to_owned(),
            amount: self.amount.value().trim().parse().unwrap_or(0.0),
            currency: self.currency,
            valid_from: date(&self.valid_from),
            valid_to: date(&self.valid_to),
        }
    }

    fn input_mut(&mut self, slot: Slot) -> Option<&mut Input> {
        match slot {
            Slot::Name => Some(&mut self.name),
            Slot::Prefix => Some(&mut self.prefix),
            Slot::Amount => Some(&mut self.amount),
            Slot::Currency => None,
            Slot::ValidFrom => Some(&mut self.valid_from),
            Slot::ValidTo => Some(&mut self.valid_to),
        }
    }

    fn input(&self, slot: Slot) -> Option<&Input> {
        match slot {
            Slot::Name => Some(&self.name),
            Slot::Prefix => Some(&self.prefix),
            Slot::Amount => Some(&self.amount),
            Slot::Currency => None,
            Slot::ValidFrom => Some(&self.valid_from),
            Slot::ValidTo => Some(&self.valid_to),
        }
    }

    fn step(&mut self, forward: bool) {
        let len = Slot::ALL.len();
        let pos = Slot::ALL.iter().position(|&s| s == self.active).unwrap_or(0);
        let next = if forward { (pos + 1) % len } else { (pos + len - 1) % len };
        self.active = Slot::ALL.get(next).copied().unwrap_or(Slot::Name);
    }

    fn cycle_currency(&mut self, forward: bool) {
        let all: Vec<Currency> = Currency::iter().collect();
        let pos = all.iter().position(|&c| c == self.currency).unwrap_or(0);
        let next = if forward {
            (pos + 1) % all.len()
        } else {
            (pos + all.len() - 1) % all.len()
        };
        if let Some(&c) = all.get(next) {
            self.currency = c;
        }
    }

    fn submit(&mut self) -> FormOutcome {
        match self.draft().validated() {
            Ok(campaign) => {
                self.errors = FieldErrors::default();
                FormOutcome::Submit(campaign)
            }
            Err(errors) => {
                // Jump to the first offending field.
                if let Some(slot) = Slot::ALL
                    .iter()
                    .find(|s| s.field().is_some_and(|f| errors.get(f).is_some()))
                {
                    self.active = *slot;
                }
                self.errors = errors;
                FormOutcome::Pending
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) => FormOutcome::Cancel,
            (_, KeyCode::Enter) => self.submit(),
            (KeyModifiers::NONE, KeyCode::Tab | KeyCode::Down) => {
                self.step(true);
                FormOutcome::Pending
            }
            (_, KeyCode::BackTab | KeyCode::Up) => {
                self.step(false);
                FormOutcome::Pending
            }
            (_, KeyCode::Left | KeyCode::Right) if self.active == Slot::Currency => {
                self.cycle_currency(key.code == KeyCode::Right);
                FormOutcome::Pending
            }
            _ => {
                let active = self.active;
                if let Some(input) = self.input_mut(active) {
                    handle_input_key(input, key);
                }
                FormOutcome::Pending
            }
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, submitting: bool) {
        let modal = super::centered_rect(64, 20, area);
        frame.render_widget(Clear, modal);

        let block = Block::default()
            .title(" New Campaign ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(theme::modal());
        let inner = block.inner(modal);
        frame.render_widget(block, modal);

        let mut constraints: Vec<Constraint> = Slot::ALL.iter().map(|_| Constraint::Length(2)).collect();
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1));
        let rows = Layout::vertical(constraints).split(inner);

        for (slot, row) in Slot::ALL.iter().zip(rows.iter()) {
            self.render_slot(frame, *slot, *row);
        }

        let hints = if submitting {
            Line::from(Span::styled("  Creating campaign…", theme::key_hint()))
        } else {
            Line::from(vec![
                Span::styled("  Tab ", theme::key_hint_key()),
                Span::styled("next  ", theme::key_hint()),
                Span::styled("◂/▸ ", theme::key_hint_key()),
                Span::styled("currency  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("create  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ])
        };
        if let Some(hint_area) = rows.last() {
            frame.render_widget(Paragraph::new(hints), *hint_area);
        }
    }

    fn render_slot(&self, frame: &mut Frame, slot: Slot, area: Rect) {
        const LABEL_WIDTH: u16 = 14;
        let active = slot == self.active;
        let label_style = if active {
            theme::key_hint_key()
        } else {
            theme::table_row()
        };
        let value_style = if active {
            Style::default()
                .fg(theme::ELECTRIC_PURPLE)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::table_row()
        };

        let [line_area, error_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);
        let [label_area, value_area] =
            Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Min(1)]).areas(line_area);

        let marker = if active { "▸ " } else { "  " };
        frame.render_widget(
            Paragraph::new(Span::styled(format!("{marker}{}", slot.label()), label_style)),
            label_area,
        );

        if let Some(input) = self.input(slot) {
            let width = usize::from(value_area.width.max(1));
            let scroll = input.visual_scroll(width);
            frame.render_widget(
                Paragraph::new(Span::styled(input.value(), value_style))
                    .scroll((0, u16::try_from(scroll).unwrap_or(0))),
                value_area,
            );
            if active {
                let offset = input.visual_cursor().saturating_sub(scroll);
                let x = value_area.x + u16::try_from(offset).unwrap_or(0);
                frame.set_cursor_position((x, value_area.y));
            }
        } else {
            frame.render_widget(
                Paragraph::new(Span::styled(format!("◂ {} ▸", self.currency), value_style)),
                value_area,
            );
        }

        if let Some(message) = slot.field().and_then(|f| self.errors.get(f)) {
            frame.render_widget(
                Paragraph::new(Span::styled(format!("{:w$}{message}", "", w = usize::from(LABEL_WIDTH)), theme::field_error())),
                error_area,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn press(form: &mut CampaignForm, code: KeyCode) -> FormOutcome {
        form.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn clear_and_type(form: &mut CampaignForm, text: &str) {
        form.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        for c in text.chars() {
            press(form, KeyCode::Char(c));
        }
    }

    #[test]
    fn defaults_submit_cleanly() {
        let mut form = CampaignForm::default();
        let FormOutcome::Submit(campaign) = press(&mut form, KeyCode::Enter) else {
            panic!("default form should validate");
        };
        assert_eq!(campaign.name(), "Campaign 1");
        assert_eq!(campaign.prefix(), "DISCOUNT");
        assert_eq!(campaign.currency(), Currency::Eur);
    }

    #[test]
    fn empty_name_blocks_submit_with_field_error() {
        let mut form = CampaignForm::default();
        clear_and_type(&mut form, "");
        assert_eq!(press(&mut form, KeyCode::Enter), FormOutcome::Pending);
        assert_eq!(form.errors().len(), 1);
        assert_eq!(
            form.errors().get(FormField::Name),
            Some("Campaign name is required")
        );
    }

    #[test]
    fn garbage_amount_counts_as_zero() {
        let mut form = CampaignForm::default();
        press(&mut form, KeyCode::Tab);
        press(&mut form, KeyCode::Tab);
        clear_and_type(&mut form, "abc");
        assert!(form.draft().amount.abs() < f64::EPSILON);
        assert_eq!(press(&mut form, KeyCode::Enter), FormOutcome::Pending);
        assert_eq!(
            form.errors().get(FormField::Amount),
            Some("Amount must be greater than 0")
        );
        // Focus jumped back to the failing field.
        assert_eq!(form.active, Slot::Amount);
    }

    #[test]
    fn currency_cycles_with_arrows() {
        let mut form = CampaignForm::default();
        for _ in 0..3 {
            press(&mut form, KeyCode::Tab);
        }
        assert_eq!(form.active, Slot::Currency);
        press(&mut form, KeyCode::Right);
        assert_eq!(form.currency, Currency::Gbp);
        press(&mut form, KeyCode::Left);
        press(&mut form, KeyCode::Left);
        assert_eq!(form.currency, Currency::Usd);
    }

    #[test]
    fn reversed_dates_flag_valid_to() {
        let mut form = CampaignForm::default();
        for _ in 0..4 {
            press(&mut form, KeyCode::Tab);
        }
        clear_and_type(&mut form, "2026-01-01");
        press(&mut form, KeyCode::Tab);
        clear_and_type(&mut form, "2025-01-01");
        assert_eq!(press(&mut form, KeyCode::Enter), FormOutcome::Pending);
        assert_eq!(form.errors().len(), 1);
        assert_eq!(
            form.errors().get(FormField::ValidTo),
            Some("Valid to date must be after valid from date")
        );
    }

    #[test]
    fn esc_cancels() {
        let mut form = CampaignForm::default();
        assert_eq!(press(&mut form, KeyCode::Esc), FormOutcome::Cancel);
    }
}
