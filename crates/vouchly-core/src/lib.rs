//! Domain layer between `vouchly-api` and the UI front-ends (CLI / TUI).
//!
//! - **[`Controller`]**: executes typed [`Command`]s against an injected
//!   [`VoucherApi`] backend and turns view effects into completion intents.
//!   [`Controller::drive_list`] / [`Controller::drive_detail`] run a view
//!   state to quiescence for one-shot callers.
//!
//! - **View state** ([`list`], [`detail`]): pure state machines.
//!   `state.apply(intent)` mutates the state and returns the server work
//!   to perform; the result of that work comes back as another intent.
//!   Rendering never happens here.
//!
//! - **Validation** ([`validate`]): the campaign form rules. A
//!   [`ValidatedCampaign`] only exists after a passing validation.
//!
//! - **Domain model** ([`model`]): `Campaign`, `Voucher` and their pages,
//!   converted from the wire types in [`convert`].

pub mod api;
pub mod command;
pub mod config;
pub mod controller;
pub mod convert;
pub mod detail;
pub mod error;
pub mod export;
pub mod list;
pub mod model;
pub mod pagination;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use api::VoucherApi;
pub use command::{Command, CommandResult};
pub use config::{ClientConfig, TlsVerification};
pub use controller::{Controller, HttpController};
pub use detail::{DetailEffect, DetailIntent, DetailState, ViewId};
pub use error::CoreError;
pub use export::{DirectorySink, ExportSink, export_file_name};
pub use list::{Dialog, ListEffect, ListIntent, ListState};
pub use validate::{CampaignDraft, FieldErrors, FormField, ValidatedCampaign};

pub use model::{
    Campaign, CampaignId, CampaignPage, Currency, Voucher, VoucherId, VoucherPage, VoucherStatus,
};
