// ── Campaign list view-state ──
//
// Pure state machine behind the campaign screen. `apply` mutates the
// state for one intent and returns the server work to perform; the
// completion of that work comes back as another intent.

use crate::command::Command;
use crate::error::CoreError;
use crate::model::{Campaign, CampaignId, CampaignPage};
use crate::pagination;
use crate::validate::ValidatedCampaign;

pub const EMPTY_MESSAGE: &str = "No campaigns found. Create your first campaign to get started!";

/// The single modal that may be open over the list.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Dialog {
    #[default]
    None,
    Create,
    View(Campaign),
    Delete(Campaign),
}

impl Dialog {
    /// The campaign a View or Delete dialog is about.
    pub fn selected(&self) -> Option<&Campaign> {
        match self {
            Self::View(c) | Self::Delete(c) => Some(c),
            Self::None | Self::Create => None,
        }
    }
}

/// User intents and server completions for the list.
#[derive(Debug, Clone)]
pub enum ListIntent {
    Refresh,
    SetPage(u32),
    OpenCreate,
    OpenView(Campaign),
    OpenDelete(Campaign),
    CloseDialog,
    DismissError,
    RequestCreate(ValidatedCampaign),
    RequestDelete(CampaignId),

    // ── Completions ──────────────────────────────────────────────────
    Loaded {
        seq: u64,
        result: Result<CampaignPage, CoreError>,
    },
    Created(Result<Campaign, CoreError>),
    Deleted {
        id: CampaignId,
        result: Result<(), CoreError>,
    },
}

impl ListIntent {
    /// The error carried by a failed completion.
    pub fn failure(&self) -> Option<&CoreError> {
        match self {
            Self::Loaded { result: Err(e), .. }
            | Self::Created(Err(e))
            | Self::Deleted { result: Err(e), .. } => Some(e),
            _ => None,
        }
    }
}

/// Server work requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEffect {
    Fetch { seq: u64, page: u32, limit: u32 },
    Create(ValidatedCampaign),
    Delete { id: CampaignId },
}

impl ListEffect {
    pub fn command(&self) -> Command {
        match self {
            Self::Fetch { page, limit, .. } => Command::ListCampaigns {
                page: *page,
                limit: *limit,
            },
            Self::Create(campaign) => Command::CreateCampaign(campaign.clone()),
            Self::Delete { id } => Command::DeleteCampaign { id: *id },
        }
    }
}

// ── State ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    pub campaigns: Vec<Campaign>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub loading: bool,
    /// A create or delete is in flight.
    pub submitting: bool,
    pub error: Option<String>,
    pub dialog: Dialog,
    fetch_seq: u64,
}

impl ListState {
    pub fn new(limit: u32) -> Self {
        Self {
            campaigns: Vec::new(),
            page: 1,
            limit: limit.max(1),
            total: 0,
            loading: false,
            submitting: false,
            error: None,
            dialog: Dialog::None,
            fetch_seq: 0,
        }
    }

    pub fn total_pages(&self) -> u32 {
        pagination::page_count(self.total, self.limit).max(1)
    }

    /// Whether the empty-state message should be shown instead of cards.
    pub fn is_empty(&self) -> bool {
        !self.loading && self.campaigns.is_empty()
    }

    pub fn display_range(&self) -> Option<(u64, u64)> {
        pagination::display_range(self.page, self.limit, self.total)
    }

    fn fetch(&mut self) -> ListEffect {
        self.error = None;
        self.loading = true;
        self.fetch_seq += 1;
        ListEffect::Fetch {
            seq: self.fetch_seq,
            page: self.page,
            limit: self.limit,
        }
    }

    /// Apply one intent, returning the effects to run.
    pub fn apply(&mut self, intent: ListIntent) -> Vec<ListEffect> {
        match intent {
            ListIntent::Refresh => vec![self.fetch()],
            ListIntent::SetPage(page) => {
                if page == self.page || page < 1 || page > self.total_pages() {
                    return Vec::new();
                }
                self.page = page;
                vec![self.fetch()]
            }

            // ── Dialogs (no I/O) ─────────────────────────────────────
            ListIntent::OpenCreate => {
                self.dialog = Dialog::Create;
                Vec::new()
            }
            ListIntent::OpenView(campaign) => {
                self.dialog = Dialog::View(campaign);
                Vec::new()
            }
            ListIntent::OpenDelete(campaign) => {
                self.dialog = Dialog::Delete(campaign);
                Vec::new()
            }
            ListIntent::CloseDialog => {
                self.dialog = Dialog::None;
                Vec::new()
            }
            ListIntent::DismissError => {
                self.error = None;
                Vec::new()
            }

            // ── Mutations ────────────────────────────────────────────
            ListIntent::RequestCreate(campaign) => {
                if self.submitting {
                    return Vec::new();
                }
                self.error = None;
                self.submitting = true;
                vec![ListEffect::Create(campaign)]
            }
            ListIntent::RequestDelete(id) => {
                if self.submitting {
                    return Vec::new();
                }
                self.error = None;
                self.submitting = true;
                vec![ListEffect::Delete { id }]
            }

            // ── Completions ──────────────────────────────────────────
            ListIntent::Loaded { seq, result } => self.on_loaded(seq, result),
            ListIntent::Created(result) => {
                self.submitting = false;
                match result {
                    Ok(_) => {
                        if self.dialog == Dialog::Create {
                            self.dialog = Dialog::None;
                        }
                        vec![self.fetch()]
                    }
                    Err(e) => {
                        self.error = Some(e.to_string());
                        Vec::new()
                    }
                }
            }
            ListIntent::Deleted { id, result } => {
                self.submitting = false;
                match result {
                    Ok(()) => {
                        if self.dialog.selected().is_some_and(|c| c.id == id) {
                            self.dialog = Dialog::None;
                        }
                        vec![self.fetch()]
                    }
                    Err(e) => {
                        self.error = Some(e.to_string());
                        Vec::new()
                    }
                }
            }
        }
    }

    fn on_loaded(&mut self, seq: u64, result: Result<CampaignPage, CoreError>) -> Vec<ListEffect> {
        if seq != self.fetch_seq {
            return Vec::new();
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.total = page.total;
                self.campaigns = page.campaigns;
                // The last page emptied under us (e.g. after a delete).
                if self.campaigns.is_empty() && self.page > self.total_pages() {
                    self.page = self.total_pages();
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
}
