// Wire types for the campaign API.
//
// These mirror the JSON exactly (camelCase keys, numeric ids, date
// strings as sent). Domain conversion happens in `vouchly-core`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Campaigns ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    pub prefix: String,
    pub amount: f64,
    pub currency: String,
    /// `YYYY-MM-DD` or a full RFC 3339 timestamp, depending on the backend.
    pub valid_from: String,
    pub valid_to: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    pub name: String,
    pub prefix: String,
    pub amount: f64,
    pub currency: String,
    pub valid_from: String,
    pub valid_to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignListResponse {
    pub data: Vec<Campaign>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

// ── Vouchers ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    pub id: i64,
    pub campaign_id: i64,
    pub code: String,
    pub is_used: bool,
    #[serde(default)]
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateVouchersRequest {
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u32,
    pub pages: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoucherListResponse {
    pub data: Vec<Voucher>,
    pub pagination: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_uses_camel_case_keys() {
        let req = CreateCampaignRequest {
            name: "Summer".into(),
            prefix: "SUMMER".into(),
            amount: 25.5,
            currency: "EUR".into(),
            valid_from: "2025-06-01".into(),
            valid_to: "2025-09-01".into(),
        };

        insta::assert_json_snapshot!(req, @r#"
        {
          "name": "Summer",
          "prefix": "SUMMER",
          "amount": 25.5,
          "currency": "EUR",
          "validFrom": "2025-06-01",
          "validTo": "2025-09-01"
        }
        "#);
    }

    #[test]
    fn voucher_without_used_at_deserializes_as_unused() {
        let raw = r#"{
            "id": 1,
            "campaignId": 4,
            "code": "SUMMER-AB12CD",
            "isUsed": false,
            "createdAt": "2025-06-01T10:00:00.000Z",
            "updatedAt": "2025-06-01T10:00:00.000Z"
        }"#;
        let v: Voucher = serde_json::from_str(raw).expect("valid voucher JSON");
        assert_eq!(v.campaign_id, 4);
        assert!(!v.is_used);
        assert!(v.used_at.is_none());
    }
}
