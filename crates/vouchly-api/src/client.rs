// Async HTTP client for the voucher campaign API.
//
// Base path: {origin}/api/
// No auth, no retries, no client-side timeout. Every non-2xx answer
// becomes `Error::Status` carrying the status line.

use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::endpoint::{Endpoint, Route};
use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types;

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the campaign API.
///
/// Constructed explicitly from the API origin and handed to whoever needs
/// it; there is no process-wide instance.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for the given API origin (e.g. `http://localhost:3000`).
    ///
    /// `/api/` is appended unless the URL already ends in `/api`.
    pub fn new(api_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(api_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(api_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(api_url)?;
        Ok(Self { http, base_url })
    }

    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;

        // Strip trailing slash for uniform handling
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with("/api") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/"));
        }

        Ok(url)
    }

    /// The normalized `/api/` base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Request building ─────────────────────────────────────────────

    fn request(&self, endpoint: &Endpoint) -> Result<reqwest::RequestBuilder, Error> {
        let url = self.base_url.join(&endpoint.path())?;
        let query = endpoint.query();
        debug!("{} {url} params={query:?}", endpoint.method());

        let mut builder = self.http.request(endpoint.method(), url);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        builder = match endpoint.route() {
            Route::Json => builder.header(CONTENT_TYPE, "application/json"),
            Route::Download => builder.header(ACCEPT, "text/csv, application/octet-stream"),
        };
        Ok(builder)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, Error> {
        let resp = self.request(&endpoint)?.send().await?;
        Self::handle_response(resp, endpoint.route()).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<T, Error> {
        let resp = self.request(&endpoint)?.json(body).send().await?;
        Self::handle_response(resp, endpoint.route()).await
    }

    async fn post_no_response<B: Serialize + Sync>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<(), Error> {
        let resp = self.request(&endpoint)?.json(body).send().await?;
        Self::handle_empty(resp, endpoint.route())
    }

    async fn delete(&self, endpoint: Endpoint) -> Result<(), Error> {
        let resp = self.request(&endpoint)?.send().await?;
        Self::handle_empty(resp, endpoint.route())
    }

    async fn get_bytes(&self, endpoint: Endpoint) -> Result<Bytes, Error> {
        let resp = self.request(&endpoint)?.send().await?;
        let resp = Self::check_status(resp, endpoint.route())?;
        Ok(resp.bytes().await?)
    }

    // ── Response handling ────────────────────────────────────────────

    fn check_status(resp: reqwest::Response, route: Route) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        trace!(%status, "response received");
        if status.is_success() {
            Ok(resp)
        } else {
            Err(Error::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_owned(),
                route,
            })
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        resp: reqwest::Response,
        route: Route,
    ) -> Result<T, Error> {
        let resp = Self::check_status(resp, route)?;
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    fn handle_empty(resp: reqwest::Response, route: Route) -> Result<(), Error> {
        Self::check_status(resp, route).map(drop)
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Campaigns ────────────────────────────────────────────────────

    pub async fn list_campaigns(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<types::CampaignListResponse, Error> {
        self.get(Endpoint::ListCampaigns { page, limit }).await
    }

    pub async fn get_campaign(&self, id: i64) -> Result<types::Campaign, Error> {
        self.get(Endpoint::GetCampaign { id }).await
    }

    pub async fn create_campaign(
        &self,
        body: &types::CreateCampaignRequest,
    ) -> Result<types::Campaign, Error> {
        self.post(Endpoint::CreateCampaign, body).await
    }

    /// Delete a campaign. The server cascades the delete to its vouchers.
    pub async fn delete_campaign(&self, id: i64) -> Result<(), Error> {
        self.delete(Endpoint::DeleteCampaign { id }).await
    }

    // ── Vouchers ─────────────────────────────────────────────────────

    pub async fn list_vouchers(
        &self,
        campaign_id: i64,
        page: u32,
        limit: u32,
    ) -> Result<types::VoucherListResponse, Error> {
        self.get(Endpoint::ListVouchers {
            campaign_id,
            page,
            limit,
        })
        .await
    }

    pub async fn generate_vouchers(
        &self,
        campaign_id: i64,
        body: &types::GenerateVouchersRequest,
    ) -> Result<(), Error> {
        self.post_no_response(Endpoint::GenerateVouchers { campaign_id }, body)
            .await
    }

    /// Fetch the CSV export for a campaign as raw bytes.
    pub async fn download_vouchers(&self, campaign_id: i64) -> Result<Bytes, Error> {
        self.get_bytes(Endpoint::DownloadVouchers { campaign_id })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_api_segment() {
        let url = ApiClient::normalize_base_url("http://localhost:3000").expect("valid url");
        assert_eq!(url.as_str(), "http://localhost:3000/api/");

        let url = ApiClient::normalize_base_url("https://vouchers.example.com/admin/")
            .expect("valid url");
        assert_eq!(url.as_str(), "https://vouchers.example.com/admin/api/");
    }

    #[test]
    fn existing_api_segment_is_kept() {
        let url = ApiClient::normalize_base_url("http://localhost:3000/api").expect("valid url");
        assert_eq!(url.as_str(), "http://localhost:3000/api/");
    }

    #[test]
    fn garbage_url_is_rejected() {
        assert!(matches!(
            ApiClient::normalize_base_url("not a url"),
            Err(Error::InvalidUrl(_))
        ));
    }
}
