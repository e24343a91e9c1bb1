//! Command dispatch: bridges CLI args -> core Commands -> output formatting.

pub mod campaigns;
pub mod config_cmd;
pub mod util;
pub mod vouchers;

use vouchly_core::{ClientConfig, HttpController};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    controller: &HttpController,
    client_config: &ClientConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Campaigns(args) => campaigns::handle(controller, args, client_config, global).await,
        Command::Vouchers(args) => vouchers::handle(controller, args, client_config, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Validation {
            field: "command".into(),
            reason: "handled before dispatch".into(),
        }),
    }
}
