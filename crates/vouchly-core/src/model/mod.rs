// ── Domain model ──
//
// Canonical types handed to the CLI and TUI. Wire types from
// `vouchly-api` are converted into these in `crate::convert`.

pub mod campaign;
pub mod voucher;

pub use campaign::{Campaign, CampaignId, CampaignPage, Currency};
pub use voucher::{Voucher, VoucherId, VoucherPage, VoucherStatus};
