// ── Voucher domain types ──

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

use super::campaign::CampaignId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoucherId(i64);

impl VoucherId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for VoucherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum VoucherStatus {
    Available,
    Used,
}

/// A single voucher. `is_used` only ever moves from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    pub id: VoucherId,
    pub campaign_id: CampaignId,
    pub code: String,
    pub is_used: bool,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Voucher {
    pub fn status(&self) -> VoucherStatus {
        if self.is_used {
            VoucherStatus::Used
        } else {
            VoucherStatus::Available
        }
    }
}

/// One page of a campaign's vouchers, with the server's pagination meta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoucherPage {
    pub vouchers: Vec<Voucher>,
    pub total: u64,
    pub page: u32,
    pub pages: u32,
    pub limit: u32,
}
