//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use vouchly_core::{Campaign, CampaignId, Command as CoreCommand, HttpController};

use crate::error::CliError;

/// Parse a positional campaign id.
pub fn parse_campaign_id(raw: &str) -> Result<CampaignId, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "campaign id".into(),
        reason: format!("expected a numeric id, got '{raw}'"),
    })
}

/// Fetch one campaign; a 404 surfaces as `CliError::NotFound`.
pub async fn fetch_campaign(controller: &HttpController, id: CampaignId) -> Result<Campaign, CliError> {
    Ok(controller
        .execute(CoreCommand::GetCampaign { id })
        .await?
        .into_campaign()?)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so `--yes` becomes mandatory.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

/// A stderr spinner, hidden when quiet or not attached to a terminal.
pub fn spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
        .template("{spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_owned());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// `"Showing 21 to 40 of 45 <noun>"`, or `None` for an empty listing.
pub fn range_line(range: Option<(u64, u64)>, total: u64, noun: &str) -> Option<String> {
    range.map(|(first, last)| format!("Showing {first} to {last} of {total} {noun}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campaign_ids_must_be_numeric() {
        assert_eq!(parse_campaign_id(" 42 ").expect("id"), CampaignId::new(42));
        let err = parse_campaign_id("abc").expect_err("not numeric");
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);
    }

    #[test]
    fn range_line_reads_naturally() {
        assert_eq!(
            range_line(Some((21, 40)), 45, "vouchers").as_deref(),
            Some("Showing 21 to 40 of 45 vouchers")
        );
        assert_eq!(range_line(None, 0, "vouchers"), None);
    }
}
