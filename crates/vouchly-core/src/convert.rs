// ── API-to-domain type conversions ──
//
// Bridges raw `vouchly_api::types` into `vouchly_core::model`. Campaign
// validity dates arrive either as `YYYY-MM-DD` or as a full RFC 3339
// timestamp depending on the backend; both are accepted.

use chrono::{DateTime, NaiveDate};

use vouchly_api::types;

use crate::error::CoreError;
use crate::model::{Campaign, CampaignId, CampaignPage, Voucher, VoucherId, VoucherPage};
use crate::validate::ValidatedCampaign;

// ── Helpers ────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a server-side validity date.
pub(crate) fn parse_api_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn required_date(field: &str, raw: &str) -> Result<NaiveDate, CoreError> {
    parse_api_date(raw).ok_or_else(|| CoreError::InvalidResponse {
        message: format!("{field} is not a date: {raw:?}"),
    })
}

// ━━ Campaigns ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

impl TryFrom<types::Campaign> for Campaign {
    type Error = CoreError;

    fn try_from(c: types::Campaign) -> Result<Self, Self::Error> {
        Ok(Campaign {
            id: CampaignId::new(c.id),
            valid_from: required_date("validFrom", &c.valid_from)?,
            valid_to: required_date("validTo", &c.valid_to)?,
            name: c.name,
            prefix: c.prefix,
            amount: c.amount,
            currency: c.currency,
            created_at: c.created_at,
            updated_at: c.updated_at,
        })
    }
}

impl TryFrom<types::CampaignListResponse> for CampaignPage {
    type Error = CoreError;

    fn try_from(resp: types::CampaignListResponse) -> Result<Self, Self::Error> {
        Ok(CampaignPage {
            campaigns: resp
                .data
                .into_iter()
                .map(Campaign::try_from)
                .collect::<Result<_, _>>()?,
            total: resp.total,
            page: resp.page,
            limit: resp.limit,
        })
    }
}

impl From<&ValidatedCampaign> for types::CreateCampaignRequest {
    fn from(c: &ValidatedCampaign) -> Self {
        types::CreateCampaignRequest {
            name: c.name().to_owned(),
            prefix: c.prefix().to_owned(),
            amount: c.amount(),
            currency: c.currency().to_string(),
            valid_from: c.valid_from().format(DATE_FORMAT).to_string(),
            valid_to: c.valid_to().format(DATE_FORMAT).to_string(),
        }
    }
}

// ━━ Vouchers ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

impl From<types::Voucher> for Voucher {
    fn from(v: types::Voucher) -> Self {
        Voucher {
            id: VoucherId::new(v.id),
            campaign_id: CampaignId::new(v.campaign_id),
            code: v.code,
            is_used: v.is_used,
            used_at: v.used_at,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

impl From<types::VoucherListResponse> for VoucherPage {
    fn from(resp: types::VoucherListResponse) -> Self {
        VoucherPage {
            vouchers: resp.data.into_iter().map(Voucher::from).collect(),
            total: resp.pagination.total,
            page: resp.pagination.page,
            pages: resp.pagination.pages,
            limit: resp.pagination.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::CampaignDraft;

    fn wire_campaign(valid_from: &str, valid_to: &str) -> types::Campaign {
        types::Campaign {
            id: 9,
            name: "Spring".into(),
            prefix: "SPRING".into(),
            amount: 10.0,
            currency: "SEK".into(),
            valid_from: valid_from.into(),
            valid_to: valid_to.into(),
            created_at: "2025-02-01T09:00:00Z".parse().expect("timestamp"),
            updated_at: "2025-02-01T09:00:00Z".parse().expect("timestamp"),
        }
    }

    #[test]
    fn accepts_plain_and_rfc3339_dates() {
        let c = Campaign::try_from(wire_campaign("2025-03-01", "2025-05-31T00:00:00.000Z"))
            .expect("valid campaign");
        assert_eq!(c.id, CampaignId::new(9));
        assert_eq!(c.valid_from.to_string(), "2025-03-01");
        assert_eq!(c.valid_to.to_string(), "2025-05-31");
    }

    #[test]
    fn garbage_date_is_an_invalid_response() {
        let err = Campaign::try_from(wire_campaign("soon", "2025-05-31")).expect_err("bad date");
        assert!(matches!(err, CoreError::InvalidResponse { .. }));
        assert!(err.to_string().contains("validFrom"));
    }

    #[test]
    fn create_request_uses_plain_dates() {
        let validated = CampaignDraft::default().validated().expect("valid");
        let req = types::CreateCampaignRequest::from(&validated);
        insta::assert_debug_snapshot!(req, @r#"
        CreateCampaignRequest {
            name: "Campaign 1",
            prefix: "DISCOUNT",
            amount: 100.0,
            currency: "EUR",
            valid_from: "2025-01-01",
            valid_to: "2026-01-01",
        }
        "#);
    }

    #[test]
    fn voucher_page_keeps_server_meta() {
        let page = VoucherPage::from(types::VoucherListResponse {
            data: Vec::new(),
            pagination: types::PaginationMeta {
                total: 0,
                page: 1,
                pages: 0,
                limit: 20,
            },
        });
        assert_eq!(page.pages, 0);
        assert!(page.vouchers.is_empty());
    }
}
