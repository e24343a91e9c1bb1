// ── Voucher detail view-state ──
//
// State machine for one campaign's voucher screen. `loading`,
// `generating` and `downloading` together gate every action; completions
// addressed to another view instance or to a superseded fetch are dropped.

use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::command::Command;
use crate::error::CoreError;
use crate::export::export_file_name;
use crate::model::{Campaign, CampaignId, Voucher, VoucherPage};
use crate::pagination;
use crate::validate::{MAX_GENERATE_COUNT, check_generate_count};

/// Identifies one `DetailState` instance for the life of the process.
///
/// Two states for the same campaign never share an id, so work started by
/// a discarded view cannot complete into its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(u64);

impl ViewId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone)]
pub enum DetailIntent {
    /// Fetch `page` unconditionally (initial load, reloads).
    LoadPage(u32),
    /// Navigate; ignored for the current page or out-of-range pages.
    SetPage(u32),
    Refresh,
    SetGenerateCount(u32),
    Generate { count: u64 },
    Download,
    DismissError,

    // ── Completions ──────────────────────────────────────────────────
    Loaded {
        view: ViewId,
        campaign_id: CampaignId,
        seq: u64,
        result: Result<VoucherPage, CoreError>,
    },
    Generated {
        view: ViewId,
        campaign_id: CampaignId,
        result: Result<(), CoreError>,
    },
    Downloaded {
        view: ViewId,
        campaign_id: CampaignId,
        result: Result<PathBuf, CoreError>,
    },
}

impl DetailIntent {
    pub fn failure(&self) -> Option<&CoreError> {
        match self {
            Self::Loaded { result: Err(e), .. }
            | Self::Generated { result: Err(e), .. }
            | Self::Downloaded { result: Err(e), .. } => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEffect {
    Fetch {
        view: ViewId,
        campaign_id: CampaignId,
        seq: u64,
        page: u32,
        limit: u32,
    },
    Generate {
        view: ViewId,
        campaign_id: CampaignId,
        count: u32,
    },
    Download {
        view: ViewId,
        campaign_id: CampaignId,
        file_name: String,
    },
}

impl DetailEffect {
    /// The view instance that requested this work.
    pub fn view(&self) -> ViewId {
        match self {
            Self::Fetch { view, .. } | Self::Generate { view, .. } | Self::Download { view, .. } => {
                *view
            }
        }
    }

    pub fn command(&self) -> Command {
        match self {
            Self::Fetch {
                campaign_id,
                page,
                limit,
                ..
            } => Command::ListVouchers {
                campaign_id: *campaign_id,
                page: *page,
                limit: *limit,
            },
            Self::Generate {
                campaign_id, count, ..
            } => Command::GenerateVouchers {
                campaign_id: *campaign_id,
                count: *count,
            },
            Self::Download {
                campaign_id,
                file_name,
                ..
            } => Command::DownloadVouchers {
                campaign_id: *campaign_id,
                file_name: file_name.clone(),
            },
        }
    }
}

// ── State ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    view: ViewId,
    pub campaign: Campaign,
    pub vouchers: Vec<Voucher>,
    pub page: u32,
    /// Always at least 1.
    pub total_pages: u32,
    pub total_vouchers: u64,
    pub limit: u32,
    pub loading: bool,
    pub generating: bool,
    pub downloading: bool,
    pub error: Option<String>,
    pub generate_count: u32,
    /// Where the most recent download was saved.
    pub last_export: Option<PathBuf>,
    fetch_seq: u64,
}

impl DetailState {
    pub fn new(campaign: Campaign, limit: u32) -> Self {
        Self {
            view: ViewId::next(),
            campaign,
            vouchers: Vec::new(),
            page: 1,
            total_pages: 1,
            total_vouchers: 0,
            limit: limit.max(1),
            loading: false,
            generating: false,
            downloading: false,
            error: None,
            generate_count: MAX_GENERATE_COUNT,
            last_export: None,
            fetch_seq: 0,
        }
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn campaign_id(&self) -> CampaignId {
        self.campaign.id
    }

    pub fn busy(&self) -> bool {
        self.loading || self.generating || self.downloading
    }

    pub fn can_generate(&self) -> bool {
        !self.busy()
    }

    pub fn can_download(&self) -> bool {
        !self.busy() && self.total_vouchers > 0
    }

    /// `"<name> - <total> vouchers"`.
    pub fn header(&self) -> String {
        format!("{} - {} vouchers", self.campaign.name, self.total_vouchers)
    }

    pub fn display_range(&self) -> Option<(u64, u64)> {
        pagination::display_range(self.page, self.limit, self.total_vouchers)
    }

    fn fetch(&mut self) -> DetailEffect {
        self.error = None;
        self.loading = true;
        self.fetch_seq += 1;
        DetailEffect::Fetch {
            view: self.view,
            campaign_id: self.campaign.id,
            seq: self.fetch_seq,
            page: self.page,
            limit: self.limit,
        }
    }

    /// Whether a completion was requested by this very state.
    fn owns(&self, view: ViewId, campaign_id: CampaignId) -> bool {
        view == self.view && campaign_id == self.campaign.id
    }

    pub fn apply(&mut self, intent: DetailIntent) -> Vec<DetailEffect> {
        match intent {
            DetailIntent::LoadPage(page) => {
                self.page = pagination::clamp_page(page, self.total_pages);
                vec![self.fetch()]
            }
            DetailIntent::SetPage(page) => {
                if page == self.page || page < 1 || page > self.total_pages {
                    return Vec::new();
                }
                self.apply(DetailIntent::LoadPage(page))
            }
            DetailIntent::Refresh => {
                if self.busy() {
                    return Vec::new();
                }
                vec![self.fetch()]
            }
            DetailIntent::SetGenerateCount(count) => {
                self.generate_count = count;
                Vec::new()
            }
            DetailIntent::Generate { count } => {
                if self.busy() {
                    return Vec::new();
                }
                match check_generate_count(count) {
                    Ok(count) => {
                        self.error = None;
                        self.generating = true;
                        vec![DetailEffect::Generate {
                            view: self.view,
                            campaign_id: self.campaign.id,
                            count,
                        }]
                    }
                    Err(e) => {
                        self.error = Some(e.to_string());
                        Vec::new()
                    }
                }
            }
            DetailIntent::Download => {
                if !self.can_download() {
                    return Vec::new();
                }
                self.error = None;
                self.downloading = true;
                vec![DetailEffect::Download {
                    view: self.view,
                    campaign_id: self.campaign.id,
                    file_name: export_file_name(&self.campaign),
                }]
            }
            DetailIntent::DismissError => {
                self.error = None;
                Vec::new()
            }

            // ── Completions ──────────────────────────────────────────
            DetailIntent::Loaded {
                view,
                campaign_id,
                seq,
                result,
            } => {
                if !self.owns(view, campaign_id) || seq != self.fetch_seq {
                    return Vec::new();
                }
                self.loading = false;
                match result {
                    Ok(page) => {
                        self.total_pages = page.pages.max(1);
                        self.total_vouchers = page.total;
                        self.vouchers = page.vouchers;
                        if self.page > self.total_pages {
                            self.page = self.total_pages;
                            return vec![self.fetch()];
                        }
                        Vec::new()
                    }
                    Err(e) => {
                        self.error = Some(e.to_string());
                        Vec::new()
                    }
                }
            }
            DetailIntent::Generated {
                view,
                campaign_id,
                result,
            } => {
                if !self.owns(view, campaign_id) {
                    return Vec::new();
                }
                self.generating = false;
                match result {
                    Ok(()) => vec![self.fetch()],
                    Err(e) => {
                        self.error = Some(e.to_string());
                        Vec::new()
                    }
                }
            }
            DetailIntent::Downloaded {
                view,
                campaign_id,
                result,
            } => {
                if !self.owns(view, campaign_id) {
                    return Vec::new();
                }
                self.downloading = false;
                match result {
                    Ok(path) => self.last_export = Some(path),
                    Err(e) => self.error = Some(e.to_string()),
                }
                Vec::new()
            }
        }
    }
}
