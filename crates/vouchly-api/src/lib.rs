// vouchly-api: Async Rust client for the voucher campaign HTTP API

pub mod client;
pub mod endpoint;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use endpoint::{Endpoint, Route};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
