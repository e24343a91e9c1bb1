// ── Campaign form validation ──
//
// Pure checks over a `CampaignDraft`. A `ValidatedCampaign` can only be
// obtained from `CampaignDraft::validated`, so nothing reaches the create
// endpoint without passing through here first.

use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;
use strum::{Display, EnumIter};

use crate::error::CoreError;
use crate::model::Currency;

pub const MAX_PREFIX_CHARS: usize = 50;
pub const MIN_GENERATE_COUNT: u32 = 1;
pub const MAX_GENERATE_COUNT: u32 = 100_000;

/// Form fields that can carry an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FormField {
    Name,
    Prefix,
    Amount,
    ValidFrom,
    ValidTo,
}

/// Per-field error messages, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<FormField, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn insert(&mut self, field: FormField, message: &str) {
        self.0.insert(field, message.to_owned());
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (_, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(message)?;
        }
        Ok(())
    }
}

// ── Draft ────────────────────────────────────────────────────────────

/// The editable contents of the create-campaign form.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignDraft {
    pub name: String,
    pub prefix: String,
    pub amount: f64,
    pub currency: Currency,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
}

impl Default for CampaignDraft {
    fn default() -> Self {
        Self {
            name: "Campaign 1".into(),
            prefix: "DISCOUNT".into(),
            amount: 100.0,
            currency: Currency::Eur,
            valid_from: NaiveDate::from_ymd_opt(2025, 1, 1),
            valid_to: NaiveDate::from_ymd_opt(2026, 1, 1),
        }
    }
}

impl CampaignDraft {
    /// Check every field. The draft is valid iff the result is empty.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        if self.name.trim().is_empty() {
            errors.insert(FormField::Name, "Campaign name is required");
        }

        if self.prefix.trim().is_empty() {
            errors.insert(FormField::Prefix, "Prefix is required");
        } else if self.prefix.chars().count() > MAX_PREFIX_CHARS {
            errors.insert(FormField::Prefix, "Prefix must not exceed 50 characters");
        }

        // NaN fails `> 0.0`, infinity is caught explicitly.
        if !(self.amount.is_finite() && self.amount > 0.0) {
            errors.insert(FormField::Amount, "Amount must be greater than 0");
        }

        if self.valid_from.is_none() {
            errors.insert(FormField::ValidFrom, "Valid from date is required");
        }

        match (self.valid_from, self.valid_to) {
            (_, None) => errors.insert(FormField::ValidTo, "Valid to date is required"),
            (Some(from), Some(to)) if from >= to => {
                errors.insert(FormField::ValidTo, "Valid to date must be after valid from date");
            }
            _ => {}
        }

        errors
    }

    /// Consume the draft, yielding a campaign that is safe to submit.
    pub fn validated(self) -> Result<ValidatedCampaign, FieldErrors> {
        let errors = self.validate();
        match (self.valid_from, self.valid_to) {
            (Some(valid_from), Some(valid_to)) if errors.is_empty() => Ok(ValidatedCampaign {
                name: self.name,
                prefix: self.prefix,
                amount: self.amount,
                currency: self.currency,
                valid_from,
                valid_to,
            }),
            _ => Err(errors),
        }
    }
}

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCampaign {
    name: String,
    prefix: String,
    amount: f64,
    currency: Currency,
    valid_from: NaiveDate,
    valid_to: NaiveDate,
}

impl ValidatedCampaign {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn valid_from(&self) -> NaiveDate {
        self.valid_from
    }

    pub fn valid_to(&self) -> NaiveDate {
        self.valid_to
    }
}

impl TryFrom<CampaignDraft> for ValidatedCampaign {
    type Error = CoreError;

    fn try_from(draft: CampaignDraft) -> Result<Self, Self::Error> {
        draft
            .validated()
            .map_err(|errors| CoreError::ValidationFailed { errors })
    }
}

// ── Generate count ───────────────────────────────────────────────────

/// Local guard for bulk generation; out-of-range counts never reach the API.
pub fn check_generate_count(count: u64) -> Result<u32, CoreError> {
    u32::try_from(count)
        .ok()
        .filter(|c| (MIN_GENERATE_COUNT..=MAX_GENERATE_COUNT).contains(c))
        .ok_or(CoreError::CountOutOfRange { count })
}
