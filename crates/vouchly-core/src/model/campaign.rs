// ── Campaign domain types ──

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::pagination;

/// Server-assigned campaign identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(i64);

impl CampaignId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CampaignId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<i64> for CampaignId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

/// Currencies offered when creating a campaign.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Currency {
    Sek,
    Usd,
    #[default]
    Eur,
    Gbp,
    Cad,
    Aud,
}

/// A voucher campaign as returned by the server.
///
/// Campaigns are read-only once created; the only mutation is deletion,
/// which the server cascades to every voucher of the campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    /// Voucher code prefix (`<prefix>-XXXXXX`).
    pub prefix: String,
    pub amount: f64,
    /// ISO 4217 code as stored by the server.
    pub currency: String,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    /// `"25 EUR"`, the way campaign cards show the value.
    pub fn amount_label(&self) -> String {
        format!("{} {}", self.amount, self.currency)
    }

    /// `"2025-01-01 - 2026-01-01"`.
    pub fn validity_label(&self) -> String {
        format!("{} - {}", self.valid_from, self.valid_to)
    }
}

/// One page of the campaign listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignPage {
    pub campaigns: Vec<Campaign>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl CampaignPage {
    pub fn pages(&self) -> u32 {
        pagination::page_count(self.total, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn currency_codes_round_trip_through_strum() {
        let codes: Vec<String> = Currency::iter().map(|c| c.to_string()).collect();
        assert_eq!(codes, ["SEK", "USD", "EUR", "GBP", "CAD", "AUD"]);
        assert_eq!("gbp".parse::<Currency>().ok(), Some(Currency::Gbp));
        assert_eq!(Currency::default(), Currency::Eur);
    }

    #[test]
    fn campaign_id_parses_with_whitespace() {
        assert_eq!(" 42 ".parse::<CampaignId>().ok(), Some(CampaignId::new(42)));
        assert!("abc".parse::<CampaignId>().is_err());
    }
}
