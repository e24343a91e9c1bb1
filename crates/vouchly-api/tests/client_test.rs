#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vouchly_api::types::{CreateCampaignRequest, GenerateVouchersRequest};
use vouchly_api::{ApiClient, Error, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::new(&server.uri(), &TransportConfig::default()).unwrap();
    (server, client)
}

fn campaign_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "prefix": "SUMMER",
        "amount": 25.0,
        "currency": "EUR",
        "validFrom": "2025-06-01T00:00:00.000Z",
        "validTo": "2025-09-01T00:00:00.000Z",
        "createdAt": "2025-05-20T08:30:00.000Z",
        "updatedAt": "2025-05-20T08:30:00.000Z"
    })
}

// ── Campaign tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_list_campaigns_sends_page_and_limit() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "20"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [campaign_json(1, "Summer"), campaign_json(2, "Winter")],
            "total": 2,
            "page": 1,
            "limit": 20
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.list_campaigns(1, 20).await.unwrap();
    assert_eq!(resp.total, 2);
    assert_eq!(resp.data.len(), 2);
    assert_eq!(resp.data[1].name, "Winter");
}

#[tokio::test]
async fn test_get_campaign_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/campaigns/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "gone"})))
        .mount(&server)
        .await;

    let err = client.get_campaign(99).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "API Error: 404 Not Found");
}

#[tokio::test]
async fn test_create_campaign_posts_camel_case_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/campaigns"))
        .and(body_json(json!({
            "name": "Summer",
            "prefix": "SUMMER",
            "amount": 25.0,
            "currency": "EUR",
            "validFrom": "2025-06-01",
            "validTo": "2025-09-01"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(campaign_json(5, "Summer")))
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .create_campaign(&CreateCampaignRequest {
            name: "Summer".into(),
            prefix: "SUMMER".into(),
            amount: 25.0,
            currency: "EUR".into(),
            valid_from: "2025-06-01".into(),
            valid_to: "2025-09-01".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 5);
}

#[tokio::test]
async fn test_delete_campaign_accepts_no_content() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/campaigns/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_campaign(3).await.unwrap();
}

#[tokio::test]
async fn test_server_error_is_a_status_error() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/campaigns/3"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.delete_campaign(3).await.unwrap_err();
    assert!(matches!(err, Error::Status { status: 500, .. }));
    assert_eq!(err.to_string(), "API Error: 500 Internal Server Error");
}

#[tokio::test]
async fn test_malformed_body_is_a_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/campaigns/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.get_campaign(1).await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization, got {other:?}"),
    }
}

// ── Voucher tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_list_vouchers_reads_pagination() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/campaigns/4/vouchers"))
        .and(query_param("page", "3"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": 41,
                "campaignId": 4,
                "code": "SUMMER-7F3KQ2",
                "isUsed": true,
                "usedAt": "2025-07-02T12:00:00.000Z",
                "createdAt": "2025-06-01T10:00:00.000Z",
                "updatedAt": "2025-07-02T12:00:00.000Z"
            }],
            "pagination": { "total": 45, "page": 3, "pages": 3, "limit": 20 }
        })))
        .mount(&server)
        .await;

    let resp = client.list_vouchers(4, 3, 20).await.unwrap();
    assert_eq!(resp.pagination.pages, 3);
    assert_eq!(resp.pagination.total, 45);
    assert!(resp.data[0].is_used);
    assert!(resp.data[0].used_at.is_some());
}

#[tokio::test]
async fn test_generate_vouchers_ignores_response_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/campaigns/4/vouchers"))
        .and(body_json(json!({ "count": 500 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "generated": 500 })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .generate_vouchers(4, &GenerateVouchersRequest { count: 500 })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_download_vouchers_returns_raw_bytes() {
    let (server, client) = setup().await;
    let csv = "code,status\nSUMMER-AAAAAA,unused\n";

    Mock::given(method("GET"))
        .and(path("/api/campaigns/4/vouchers/download"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/csv")
                .set_body_string(csv),
        )
        .mount(&server)
        .await;

    let bytes = client.download_vouchers(4).await.unwrap();
    assert_eq!(&bytes[..], csv.as_bytes());
}

#[tokio::test]
async fn test_download_failure_uses_download_prefix() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/campaigns/4/vouchers/download"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.download_vouchers(4).await.unwrap_err();
    assert_eq!(err.to_string(), "Download Error: 500 Internal Server Error");
}

// ── Transport tests ─────────────────────────────────────────────────

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    // Port 9 (discard) on loopback is not listening in test environments.
    let client = ApiClient::new("http://127.0.0.1:9", &TransportConfig::default()).unwrap();

    let err = client.list_campaigns(1, 20).await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_base_url_with_api_suffix_is_not_doubled() {
    let server = MockServer::start().await;
    let client = ApiClient::new(
        &format!("{}/api", server.uri()),
        &TransportConfig::default(),
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/campaigns/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(campaign_json(1, "Summer")))
        .expect(1)
        .mount(&server)
        .await;

    let campaign = client.get_campaign(1).await.unwrap();
    assert_eq!(campaign.name, "Summer");
}
