//! Voucher command handlers.
//!
//! Every subcommand loads the campaign first, so an unknown id fails with
//! a not-found error before any voucher work starts.

use tabled::Tabled;

use vouchly_core::validate::check_generate_count;
use vouchly_core::{ClientConfig, DetailIntent, DetailState, HttpController, Voucher};

use crate::cli::{GlobalOpts, VouchersArgs, VouchersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct VoucherRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Created At")]
    created_at: String,
    #[tabled(rename = "Used At")]
    used_at: String,
}

fn row(v: &Voucher) -> VoucherRow {
    VoucherRow {
        code: v.code.clone(),
        status: v.status().to_string(),
        created_at: v.created_at.format("%Y-%m-%d %H:%M").to_string(),
        used_at: v
            .used_at
            .map_or_else(|| "-".into(), |t| t.format("%Y-%m-%d %H:%M").to_string()),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &HttpController,
    args: VouchersArgs,
    client_config: &ClientConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        VouchersCommand::List { campaign_id, page } => {
            let id = util::parse_campaign_id(&campaign_id)?;
            let campaign = util::fetch_campaign(controller, id).await?;

            let limit = page.limit.unwrap_or(client_config.voucher_page_size);
            let mut state = DetailState::new(campaign, limit);
            state.page = page.page;
            controller.drive_detail(&mut state, DetailIntent::Refresh).await?;

            output::print_status(&global.output, &state.header(), global.quiet);
            let out = output::render_list(&global.output, &state.vouchers, row, |v| v.code.clone())?;
            output::print_output(&out, global.quiet);

            if let Some(line) =
                util::range_line(state.display_range(), state.total_vouchers, "vouchers")
            {
                let footer = format!("{line} · Page {} of {}", state.page, state.total_pages);
                output::print_status(&global.output, &output::muted(&footer, color), global.quiet);
            }
            Ok(())
        }

        VouchersCommand::Generate { campaign_id, count } => {
            // Range check happens before any request goes out.
            let count = check_generate_count(count)?;
            let id = util::parse_campaign_id(&campaign_id)?;
            let campaign = util::fetch_campaign(controller, id).await?;

            let mut state = DetailState::new(campaign, client_config.voucher_page_size);
            let pb = util::spinner(
                &format!("Generating {count} vouchers for '{}'", state.campaign.name),
                global.quiet,
            );
            let result = controller
                .drive_detail(
                    &mut state,
                    DetailIntent::Generate {
                        count: u64::from(count),
                    },
                )
                .await;
            pb.finish_and_clear();
            result?;

            if !global.quiet {
                eprintln!(
                    "{}",
                    output::success(&format!("Generated {count} vouchers"), color)
                );
            }
            output::print_status(&global.output, &state.header(), global.quiet);
            Ok(())
        }

        VouchersCommand::Download { campaign_id, .. } => {
            let id = util::parse_campaign_id(&campaign_id)?;
            let campaign = util::fetch_campaign(controller, id).await?;

            let mut state = DetailState::new(campaign, client_config.voucher_page_size);
            controller.drive_detail(&mut state, DetailIntent::LoadPage(1)).await?;
            if !state.can_download() {
                return Err(CliError::NothingToExport { id: id.to_string() });
            }

            let pb = util::spinner("Downloading vouchers", global.quiet);
            let result = controller.drive_detail(&mut state, DetailIntent::Download).await;
            pb.finish_and_clear();
            result?;

            if let Some(path) = state.last_export {
                if !global.quiet {
                    eprintln!(
                        "{}",
                        output::success(
                            &format!("Saved {} vouchers to {}", state.total_vouchers, path.display()),
                            color
                        )
                    );
                }
                // stdout carries just the path for scripting
                output::print_output(&path.display().to_string(), global.quiet);
            }
            Ok(())
        }
    }
}
