// ── Controller abstraction ──
//
// Executes typed commands against an injected backend and turns view
// effects into completion intents. Holds no mutable state of its own:
// the list/detail state lives with whoever drives it.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, info, warn};
use vouchly_api::ApiClient;

use crate::api::VoucherApi;
use crate::command::{Command, CommandResult};
use crate::config::ClientConfig;
use crate::detail::{DetailEffect, DetailIntent, DetailState};
use crate::error::CoreError;
use crate::export::{DirectorySink, ExportSink};
use crate::list::{ListEffect, ListIntent, ListState};
use crate::validate::check_generate_count;

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc`. Generic over the backend so view-state
/// scenarios run against in-memory fakes.
pub struct Controller<A, S = DirectorySink> {
    inner: Arc<ControllerInner<A, S>>,
}

struct ControllerInner<A, S> {
    api: A,
    sink: S,
}

/// The production pairing: HTTP backend, exports written to a directory.
pub type HttpController = Controller<ApiClient, DirectorySink>;

impl<A, S> Clone for Controller<A, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl HttpController {
    /// Build the HTTP client and directory sink described by `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, CoreError> {
        let api = ApiClient::new(config.api_url.as_str(), &config.transport())?;
        info!(base_url = %api.base_url(), "API client ready");
        Ok(Self::new(api, DirectorySink::new(&config.download_dir)))
    }
}

impl<A: VoucherApi, S: ExportSink> Controller<A, S> {
    pub fn new(api: A, sink: S) -> Self {
        Self {
            inner: Arc::new(ControllerInner { api, sink }),
        }
    }

    pub fn api(&self) -> &A {
        &self.inner.api
    }

    pub fn sink(&self) -> &S {
        &self.inner.sink
    }

    // ── Command execution ────────────────────────────────────────────

    /// Run one command against the backend.
    pub async fn execute(&self, command: Command) -> Result<CommandResult, CoreError> {
        let name = command.name();
        debug!(command = name, "executing");

        let result = self.dispatch(command).await;
        match &result {
            Ok(_) => debug!(command = name, "completed"),
            Err(e) => warn!(command = name, error = %e, "command failed"),
        }
        result
    }

    async fn dispatch(&self, command: Command) -> Result<CommandResult, CoreError> {
        let api = &self.inner.api;
        match command {
            Command::ListCampaigns { page, limit } => {
                Ok(CommandResult::Campaigns(api.list_campaigns(page, limit).await?))
            }
            Command::GetCampaign { id } => Ok(CommandResult::Campaign(api.get_campaign(id).await?)),
            Command::CreateCampaign(campaign) => {
                let created = api.create_campaign(&campaign).await?;
                info!(id = %created.id, name = %created.name, "campaign created");
                Ok(CommandResult::Campaign(created))
            }
            Command::DeleteCampaign { id } => {
                api.delete_campaign(id).await?;
                info!(%id, "campaign deleted");
                Ok(CommandResult::Ok)
            }
            Command::ListVouchers {
                campaign_id,
                page,
                limit,
            } => Ok(CommandResult::Vouchers(
                api.list_vouchers(campaign_id, page, limit).await?,
            )),
            Command::GenerateVouchers { campaign_id, count } => {
                let count = check_generate_count(u64::from(count))?;
                api.generate_vouchers(campaign_id, count).await?;
                info!(%campaign_id, count, "vouchers generated");
                Ok(CommandResult::Ok)
            }
            Command::DownloadVouchers {
                campaign_id,
                file_name,
            } => {
                let csv = api.download_vouchers(campaign_id).await?;
                let path = self.inner.sink.save(&file_name, csv).await?;
                Ok(CommandResult::Exported(path))
            }
        }
    }

    // ── View effects ─────────────────────────────────────────────────

    /// Execute a list effect and return its completion intent.
    pub async fn run_list(&self, effect: ListEffect) -> ListIntent {
        let result = self.execute(effect.command()).await;
        match effect {
            ListEffect::Fetch { seq, .. } => ListIntent::Loaded {
                seq,
                result: result.and_then(CommandResult::into_campaigns),
            },
            ListEffect::Create(_) => {
                ListIntent::Created(result.and_then(CommandResult::into_campaign))
            }
            ListEffect::Delete { id } => ListIntent::Deleted {
                id,
                result: result.and_then(CommandResult::into_unit),
            },
        }
    }

    /// Execute a detail effect and return its completion intent.
    pub async fn run_detail(&self, effect: DetailEffect) -> DetailIntent {
        let result = self.execute(effect.command()).await;
        match effect {
            DetailEffect::Fetch {
                view,
                campaign_id,
                seq,
                ..
            } => DetailIntent::Loaded {
                view,
                campaign_id,
                seq,
                result: result.and_then(CommandResult::into_vouchers),
            },
            DetailEffect::Generate {
                view, campaign_id, ..
            } => DetailIntent::Generated {
                view,
                campaign_id,
                result: result.and_then(CommandResult::into_unit),
            },
            DetailEffect::Download {
                view, campaign_id, ..
            } => DetailIntent::Downloaded {
                view,
                campaign_id,
                result: result.and_then(CommandResult::into_export),
            },
        }
    }

    /// Apply `intent` and keep running effects until the list is idle.
    ///
    /// The state ends up exactly as an interactive view would leave it;
    /// the first failed completion is also returned as an error.
    pub async fn drive_list(&self, state: &mut ListState, intent: ListIntent) -> Result<(), CoreError> {
        let mut first_error = None;
        let mut effects: VecDeque<ListEffect> = state.apply(intent).into();
        while let Some(effect) = effects.pop_front() {
            let completion = self.run_list(effect).await;
            if first_error.is_none() {
                first_error = completion.failure().cloned();
            }
            effects.extend(state.apply(completion));
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Detail counterpart of [`drive_list`](Self::drive_list).
    ///
    /// Guard rejections (e.g. an out-of-range count) surface through
    /// `state.error` without an effect and are not reported here.
    pub async fn drive_detail(
        &self,
        state: &mut DetailState,
        intent: DetailIntent,
    ) -> Result<(), CoreError> {
        let mut first_error = None;
        let mut effects: VecDeque<DetailEffect> = state.apply(intent).into();
        while let Some(effect) = effects.pop_front() {
            let completion = self.run_detail(effect).await;
            if first_error.is_none() {
                first_error = completion.failure().cloned();
            }
            effects.extend(state.apply(completion));
        }
        first_error.map_or(Ok(()), Err)
    }
}
