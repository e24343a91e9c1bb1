//! CLI configuration: thin wrapper around `vouchly_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--api-url, --insecure, --timeout).

use std::time::Duration;

use vouchly_core::{ClientConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use vouchly_config::{
    Config, Profile, config_path, load_config_or_default, profile_to_client_config,
    resolve_profile, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| vouchly_config::DEFAULT_PROFILE.into())
}

/// Build a `ClientConfig` from the config file, profile, and CLI overrides.
///
/// Flag values take priority over profile values.
pub fn resolve_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let cfg = load_config_or_default();
    let (_, mut profile) = resolve_profile(&cfg, global.profile.as_deref())?;

    // 1. API origin (flag > env > profile)
    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }

    let mut client = profile_to_client_config(&profile, &cfg.defaults)?;

    // 2. TLS verification
    if global.insecure {
        client.tls = TlsVerification::DangerAcceptInvalid;
    }

    // 3. Timeout (0 disables)
    if let Some(secs) = global.timeout {
        client.timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }

    Ok(client)
}
