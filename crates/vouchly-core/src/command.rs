// ── Command API ──
//
// Every server round-trip the controllers ask for is one `Command`
// variant. `Controller::execute` routes each to the backend and answers
// with the matching `CommandResult`.

use std::path::PathBuf;

use crate::error::CoreError;
use crate::model::{Campaign, CampaignId, CampaignPage, VoucherPage};
use crate::validate::ValidatedCampaign;

/// All operations against the campaign API.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // ── Campaigns ────────────────────────────────────────────────────
    ListCampaigns {
        page: u32,
        limit: u32,
    },
    GetCampaign {
        id: CampaignId,
    },
    CreateCampaign(ValidatedCampaign),
    DeleteCampaign {
        id: CampaignId,
    },

    // ── Vouchers ─────────────────────────────────────────────────────
    ListVouchers {
        campaign_id: CampaignId,
        page: u32,
        limit: u32,
    },
    GenerateVouchers {
        campaign_id: CampaignId,
        count: u32,
    },
    /// Fetch the CSV export and hand it to the export sink as `file_name`.
    DownloadVouchers {
        campaign_id: CampaignId,
        file_name: String,
    },
}

impl Command {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListCampaigns { .. } => "list_campaigns",
            Self::GetCampaign { .. } => "get_campaign",
            Self::CreateCampaign(_) => "create_campaign",
            Self::DeleteCampaign { .. } => "delete_campaign",
            Self::ListVouchers { .. } => "list_vouchers",
            Self::GenerateVouchers { .. } => "generate_vouchers",
            Self::DownloadVouchers { .. } => "download_vouchers",
        }
    }
}

/// Result of a successfully executed command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Ok,
    Campaigns(CampaignPage),
    Campaign(Campaign),
    Vouchers(VoucherPage),
    /// Where the export sink stored the CSV.
    Exported(PathBuf),
}

impl CommandResult {
    fn mismatch(self, expected: &str) -> CoreError {
        CoreError::Internal(format!("expected {expected} result, got {self:?}"))
    }

    pub fn into_campaigns(self) -> Result<CampaignPage, CoreError> {
        match self {
            Self::Campaigns(page) => Ok(page),
            other => Err(other.mismatch("campaigns")),
        }
    }

    pub fn into_campaign(self) -> Result<Campaign, CoreError> {
        match self {
            Self::Campaign(campaign) => Ok(campaign),
            other => Err(other.mismatch("campaign")),
        }
    }

    pub fn into_vouchers(self) -> Result<VoucherPage, CoreError> {
        match self {
            Self::Vouchers(page) => Ok(page),
            other => Err(other.mismatch("vouchers")),
        }
    }

    pub fn into_export(self) -> Result<PathBuf, CoreError> {
        match self {
            Self::Exported(path) => Ok(path),
            other => Err(other.mismatch("export")),
        }
    }

    pub fn into_unit(self) -> Result<(), CoreError> {
        match self {
            Self::Ok => Ok(()),
            other => Err(other.mismatch("empty")),
        }
    }
}
