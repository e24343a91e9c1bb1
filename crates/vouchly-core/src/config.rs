// ── Runtime client configuration ──
//
// Describes *where* the API lives and how to talk to it. Never touches
// disk: the CLI/TUI resolve a profile and hand a `ClientConfig` in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;
use vouchly_api::{TlsMode, TransportConfig};

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_CAMPAIGN_PAGE_SIZE: u32 = 20;
pub const DEFAULT_VOUCHER_PAGE_SIZE: u32 = 20;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed development backends).
    DangerAcceptInvalid,
}

/// Configuration for talking to one API backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API origin (e.g. `http://localhost:3000`); `/api` is appended.
    pub api_url: Url,
    pub tls: TlsVerification,
    /// Transport-level timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
    pub campaign_page_size: u32,
    pub voucher_page_size: u32,
    /// Directory CSV exports are written to.
    pub download_dir: PathBuf,
}

impl ClientConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            tls: TlsVerification::default(),
            timeout: None,
            campaign_page_size: DEFAULT_CAMPAIGN_PAGE_SIZE,
            voucher_page_size: DEFAULT_VOUCHER_PAGE_SIZE,
            download_dir: PathBuf::from("."),
        }
    }

    /// Transport settings for building the HTTP client.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
            ..TransportConfig::default()
        }
    }
}
