//! Config subcommand handlers.

use std::io::IsTerminal;

use dialoguer::Input;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Profile};
use crate::error::CliError;
use crate::output;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn parse_value<T: std::str::FromStr>(field: &str, value: &str, expected: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("must be {expected}"),
    })
}

/// Apply `key = value` to a profile.
fn set_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key.replace('-', "_").as_str() {
        "api_url" => {
            parse_value::<url::Url>("api_url", &value, "an absolute URL")?;
            profile.api_url = value;
        }
        "insecure" => profile.insecure = Some(parse_value("insecure", &value, "'true' or 'false'")?),
        "timeout" => profile.timeout = Some(parse_value("timeout", &value, "a number (seconds)")?),
        "ca_cert" => profile.ca_cert = Some(value.into()),
        "download_dir" => profile.download_dir = Some(value.into()),
        field @ ("campaign_page_size" | "voucher_page_size") => {
            let size: u32 = parse_value(field, &value, "a positive number")?;
            if size == 0 {
                return Err(CliError::Validation {
                    field: field.into(),
                    reason: "must be a positive number".into(),
                });
            }
            if field == "campaign_page_size" {
                profile.campaign_page_size = Some(size);
            } else {
                profile.voucher_page_size = Some(size);
            }
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: api_url, insecure, timeout, \
                     ca_cert, download_dir, campaign_page_size, voucher_page_size"
                ),
            });
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init { default } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = global
                .profile
                .clone()
                .unwrap_or_else(|| vouchly_config::DEFAULT_PROFILE.into());

            let api_url = match global.api_url.clone() {
                Some(url) => url,
                None if std::io::stdin().is_terminal() => Input::new()
                    .with_prompt("API origin")
                    .default(vouchly_core::config::DEFAULT_API_URL.to_owned())
                    .interact_text()
                    .map_err(prompt_err)?,
                None => {
                    return Err(CliError::Validation {
                        field: "api-url".into(),
                        reason: "pass --api-url when not running in a terminal".into(),
                    });
                }
            };

            let mut profile = cfg.profiles.get(&profile_name).cloned().unwrap_or_default();
            set_key(&mut profile, "api_url", api_url)?;
            if global.insecure {
                profile.insecure = Some(true);
            }
            if let Some(timeout) = global.timeout {
                profile.timeout = Some(timeout);
            }
            cfg.profiles.insert(profile_name.clone(), profile);

            if default || cfg.profiles.len() == 1 {
                cfg.default_profile = Some(profile_name.clone());
            }

            let path = config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Configuration written to {}", path.display());
                eprintln!("  Profile: {profile_name}");
                eprintln!("\n  Test it: vouchly campaigns list");
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|e| format!("<unrenderable: {e}>")),
                |_| config::config_path().display().to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            set_key(profile, &key, value)?;

            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Set {key} on profile '{profile_name}'");
            }
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg
                .default_profile
                .as_deref()
                .unwrap_or(vouchly_config::DEFAULT_PROFILE);
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: vouchly config init --api-url <URL>");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(vouchly_config::ConfigError::UnknownProfile { profile: name }.into());
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Default profile set to '{name}'");
            }
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_key_accepts_dashed_names() {
        let mut profile = Profile::default();
        set_key(&mut profile, "voucher-page-size", "50".into()).expect("set");
        assert_eq!(profile.voucher_page_size, Some(50));
    }

    #[test]
    fn set_key_rejects_zero_page_size_and_unknown_keys() {
        let mut profile = Profile::default();
        assert!(set_key(&mut profile, "campaign_page_size", "0".into()).is_err());
        let err = set_key(&mut profile, "colour", "red".into()).expect_err("unknown");
        assert!(err.to_string().contains("unknown config key 'colour'"));
    }

    #[test]
    fn set_key_validates_urls() {
        let mut profile = Profile::default();
        assert!(set_key(&mut profile, "api_url", "not a url".into()).is_err());
        set_key(&mut profile, "api_url", "https://vouchers.example.com".into()).expect("set");
        assert_eq!(profile.api_url, "https://vouchers.example.com");
    }
}
