//! Campaign command handlers.

use chrono::NaiveDate;
use tabled::Tabled;

use vouchly_core::list::EMPTY_MESSAGE;
use vouchly_core::{
    Campaign, CampaignDraft, ClientConfig, Command as CoreCommand, CoreError, Currency,
    HttpController, ListIntent, ListState,
};

use crate::cli::{CampaignsArgs, CampaignsCommand, CreateCampaignArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CampaignRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Prefix")]
    prefix: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Valid")]
    valid: String,
    #[tabled(rename = "Created")]
    created: String,
}

fn row(c: &Campaign) -> CampaignRow {
    CampaignRow {
        id: c.id.to_string(),
        name: c.name.clone(),
        prefix: c.prefix.clone(),
        value: c.amount_label(),
        valid: c.validity_label(),
        created: c.created_at.format("%Y-%m-%d").to_string(),
    }
}

fn detail(c: &Campaign) -> String {
    [
        format!("ID:         {}", c.id),
        format!("Name:       {}", c.name),
        format!("Prefix:     {}", c.prefix),
        format!("Value:      {}", c.amount_label()),
        format!("Valid:      {}", c.validity_label()),
        format!("Created:    {}", c.created_at.format("%Y-%m-%d %H:%M")),
        format!("Updated:    {}", c.updated_at.format("%Y-%m-%d %H:%M")),
    ]
    .join("\n")
}

// ── Draft from flags ────────────────────────────────────────────────

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("expected YYYY-MM-DD, got '{raw}'"),
    })
}

/// Overlay the given flags onto the form defaults.
fn draft_from_args(args: CreateCampaignArgs) -> Result<CampaignDraft, CliError> {
    let mut draft = CampaignDraft::default();
    if let Some(name) = args.name {
        draft.name = name;
    }
    if let Some(prefix) = args.prefix {
        draft.prefix = prefix;
    }
    if let Some(amount) = args.amount {
        draft.amount = amount;
    }
    if let Some(ref raw) = args.currency {
        draft.currency = raw.parse::<Currency>().map_err(|_| CliError::Validation {
            field: "currency".into(),
            reason: format!("unsupported currency '{raw}' (SEK, USD, EUR, GBP, CAD, AUD)"),
        })?;
    }
    if let Some(ref raw) = args.valid_from {
        draft.valid_from = Some(parse_date("valid-from", raw)?);
    }
    if let Some(ref raw) = args.valid_to {
        draft.valid_to = Some(parse_date("valid-to", raw)?);
    }
    Ok(draft)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &HttpController,
    args: CampaignsArgs,
    client_config: &ClientConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        CampaignsCommand::List(page_args) => {
            let mut state = ListState::new(page_args.limit.unwrap_or(client_config.campaign_page_size));
            state.page = page_args.page;
            controller.drive_list(&mut state, ListIntent::Refresh).await?;

            if state.is_empty() && matches!(global.output, OutputFormat::Table) {
                output::print_output(EMPTY_MESSAGE, global.quiet);
                return Ok(());
            }

            let out = output::render_list(
                &global.output,
                &state.campaigns,
                row,
                |c| c.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);

            if let Some(line) = util::range_line(state.display_range(), state.total, "campaigns") {
                let footer = format!("{line} · Page {} of {}", state.page, state.total_pages());
                output::print_status(&global.output, &output::muted(&footer, color), global.quiet);
            }
            Ok(())
        }

        CampaignsCommand::Get { id } => {
            let campaign = util::fetch_campaign(controller, util::parse_campaign_id(&id)?).await?;
            let out = output::render_single(&global.output, &campaign, detail, |c| c.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CampaignsCommand::Create(create) => {
            let campaign = draft_from_args(create)?
                .validated()
                .map_err(|errors| CoreError::ValidationFailed { errors })?;

            let created = controller
                .execute(CoreCommand::CreateCampaign(campaign))
                .await?
                .into_campaign()?;

            output::print_status(
                &global.output,
                &output::success(&format!("Campaign '{}' created", created.name), color),
                global.quiet,
            );
            let out = output::render_single(&global.output, &created, detail, |c| c.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CampaignsCommand::Delete { id } => {
            let id = util::parse_campaign_id(&id)?;
            if !util::confirm(
                &format!("Delete campaign {id} and all of its vouchers?"),
                "campaigns delete",
                global.yes,
            )? {
                return Ok(());
            }
            controller
                .execute(CoreCommand::DeleteCampaign { id })
                .await?
                .into_unit()?;
            if !global.quiet {
                eprintln!("{}", output::success(&format!("Campaign {id} deleted"), color));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CreateCampaignArgs {
        CreateCampaignArgs {
            name: None,
            prefix: None,
            amount: None,
            currency: None,
            valid_from: None,
            valid_to: None,
        }
    }

    #[test]
    fn unset_flags_keep_form_defaults() {
        let draft = draft_from_args(args()).expect("draft");
        assert_eq!(draft, CampaignDraft::default());
    }

    #[test]
    fn flags_override_defaults() {
        let draft = draft_from_args(CreateCampaignArgs {
            name: Some("Summer".into()),
            currency: Some("sek".into()),
            valid_to: Some("2025-12-31".into()),
            ..args()
        })
        .expect("draft");
        assert_eq!(draft.name, "Summer");
        assert_eq!(draft.currency, Currency::Sek);
        assert_eq!(draft.valid_to, NaiveDate::from_ymd_opt(2025, 12, 31));
    }

    #[test]
    fn malformed_date_is_a_usage_error() {
        let err = draft_from_args(CreateCampaignArgs {
            valid_from: Some("01/02/2025".into()),
            ..args()
        })
        .expect_err("bad date");
        assert_eq!(
            err.to_string(),
            "Invalid value for valid-from: expected YYYY-MM-DD, got '01/02/2025'"
        );
    }

    #[test]
    fn detail_view_lists_every_field() {
        let campaign = Campaign {
            id: vouchly_core::CampaignId::new(4),
            name: "Summer".into(),
            prefix: "SUMMER".into(),
            amount: 25.0,
            currency: "EUR".into(),
            valid_from: NaiveDate::from_ymd_opt(2025, 6, 1).expect("date"),
            valid_to: NaiveDate::from_ymd_opt(2025, 9, 1).expect("date"),
            created_at: "2025-05-01T08:30:00Z".parse().expect("ts"),
            updated_at: "2025-05-02T09:00:00Z".parse().expect("ts"),
        };
        insta::assert_snapshot!(detail(&campaign), @r"
        ID:         4
        Name:       Summer
        Prefix:     SUMMER
        Value:      25 EUR
        Valid:      2025-06-01 - 2025-09-01
        Created:    2025-05-01 08:30
        Updated:    2025-05-02 09:00
        ");
    }

    #[test]
    fn unknown_currency_is_rejected() {
        let err = draft_from_args(CreateCampaignArgs {
            currency: Some("JPY".into()),
            ..args()
        })
        .expect_err("bad currency");
        assert!(err.to_string().contains("unsupported currency 'JPY'"));
    }
}
