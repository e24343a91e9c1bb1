// The closed set of routes under `/api`.
//
// Every request the client issues is one of these variants, so URL,
// method and query construction live in one exhaustive match.

use reqwest::Method;

/// Which family of route a request belongs to. Drives the error prefix
/// and whether the request carries a JSON content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// JSON request/response routes.
    Json,
    /// The binary CSV export route.
    Download,
}

impl Route {
    /// Prefix used in the user-facing status error.
    pub fn label(self) -> &'static str {
        match self {
            Self::Json => "API",
            Self::Download => "Download",
        }
    }
}

/// One endpoint of the campaign API, with its path parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ListCampaigns { page: u32, limit: u32 },
    GetCampaign { id: i64 },
    CreateCampaign,
    DeleteCampaign { id: i64 },
    ListVouchers { campaign_id: i64, page: u32, limit: u32 },
    GenerateVouchers { campaign_id: i64 },
    DownloadVouchers { campaign_id: i64 },
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Self::ListCampaigns { .. }
            | Self::GetCampaign { .. }
            | Self::ListVouchers { .. }
            | Self::DownloadVouchers { .. } => Method::GET,
            Self::CreateCampaign | Self::GenerateVouchers { .. } => Method::POST,
            Self::DeleteCampaign { .. } => Method::DELETE,
        }
    }

    /// Path relative to the `/api/` base, without a leading slash.
    pub fn path(&self) -> String {
        match self {
            Self::ListCampaigns { .. } | Self::CreateCampaign => "campaigns".into(),
            Self::GetCampaign { id } | Self::DeleteCampaign { id } => format!("campaigns/{id}"),
            Self::ListVouchers { campaign_id, .. } | Self::GenerateVouchers { campaign_id } => {
                format!("campaigns/{campaign_id}/vouchers")
            }
            Self::DownloadVouchers { campaign_id } => {
                format!("campaigns/{campaign_id}/vouchers/download")
            }
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::ListCampaigns { page, limit } | Self::ListVouchers { page, limit, .. } => {
                vec![("page", page.to_string()), ("limit", limit.to_string())]
            }
            _ => Vec::new(),
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Self::DownloadVouchers { .. } => Route::Download,
            _ => Route::Json,
        }
    }
}
