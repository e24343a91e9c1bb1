// ── Backend seam ──
//
// Everything the controllers need from the server, expressed in domain
// types. `ApiClient` is the production implementation; tests plug in
// in-memory fakes.

use std::future::Future;

use bytes::Bytes;
use vouchly_api::ApiClient;
use vouchly_api::types::{CreateCampaignRequest, GenerateVouchersRequest};

use crate::error::CoreError;
use crate::model::{Campaign, CampaignId, CampaignPage, VoucherPage};
use crate::validate::ValidatedCampaign;

/// The campaign/voucher backend.
pub trait VoucherApi: Send + Sync + 'static {
    fn list_campaigns(
        &self,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<CampaignPage, CoreError>> + Send;

    fn get_campaign(
        &self,
        id: CampaignId,
    ) -> impl Future<Output = Result<Campaign, CoreError>> + Send;

    fn create_campaign(
        &self,
        campaign: &ValidatedCampaign,
    ) -> impl Future<Output = Result<Campaign, CoreError>> + Send;

    /// Removes the campaign and, server-side, all of its vouchers.
    fn delete_campaign(&self, id: CampaignId) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn list_vouchers(
        &self,
        campaign_id: CampaignId,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<VoucherPage, CoreError>> + Send;

    /// `count` has already passed the local 1..=100000 guard.
    fn generate_vouchers(
        &self,
        campaign_id: CampaignId,
        count: u32,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Raw CSV export.
    fn download_vouchers(
        &self,
        campaign_id: CampaignId,
    ) -> impl Future<Output = Result<Bytes, CoreError>> + Send;
}

impl VoucherApi for ApiClient {
    async fn list_campaigns(&self, page: u32, limit: u32) -> Result<CampaignPage, CoreError> {
        ApiClient::list_campaigns(self, page, limit).await?.try_into()
    }

    async fn get_campaign(&self, id: CampaignId) -> Result<Campaign, CoreError> {
        ApiClient::get_campaign(self, id.get()).await?.try_into()
    }

    async fn create_campaign(&self, campaign: &ValidatedCampaign) -> Result<Campaign, CoreError> {
        let body = CreateCampaignRequest::from(campaign);
        ApiClient::create_campaign(self, &body).await?.try_into()
    }

    async fn delete_campaign(&self, id: CampaignId) -> Result<(), CoreError> {
        Ok(ApiClient::delete_campaign(self, id.get()).await?)
    }

    async fn list_vouchers(
        &self,
        campaign_id: CampaignId,
        page: u32,
        limit: u32,
    ) -> Result<VoucherPage, CoreError> {
        Ok(ApiClient::list_vouchers(self, campaign_id.get(), page, limit)
            .await?
            .into())
    }

    async fn generate_vouchers(&self, campaign_id: CampaignId, count: u32) -> Result<(), CoreError> {
        let body = GenerateVouchersRequest { count };
        Ok(ApiClient::generate_vouchers(self, campaign_id.get(), &body).await?)
    }

    async fn download_vouchers(&self, campaign_id: CampaignId) -> Result<Bytes, CoreError> {
        Ok(ApiClient::download_vouchers(self, campaign_id.get()).await?)
    }
}
