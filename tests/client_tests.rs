//! Client Integration Tests
//!
//! End-to-end submission tests against a mock endpoint. These run on the
//! real clock because wiremock does real network IO.

use std::time::Duration;

use tokio::time::Instant;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crpt_client::api::{ApiError, CrptClient, GoodsIntroductionDocument, Product};
use crpt_client::rate_limit::RateLimiter;

const ENDPOINT_PATH: &str = "/api/v3/lk/documents/create";

fn sample_document() -> GoodsIntroductionDocument {
    GoodsIntroductionDocument {
        description: "Goods produced in RF".to_string(),
        doc_id: "doc-001".to_string(),
        doc_status: "DRAFT".to_string(),
        doc_type: "LP_INTRODUCE_GOODS".to_string(),
        import_request: false,
        owner_inn: "1234567890".to_string(),
        participant_inn: "1234567890".to_string(),
        producer_inn: "1234567890".to_string(),
        production_date: "2024-01-23".to_string(),
        production_type: "OWN_PRODUCTION".to_string(),
        products: vec![Product {
            tnved_code: "6401".to_string(),
            uit_code: "010463003407001221".to_string(),
            ..Default::default()
        }],
        reg_date: "2024-01-23".to_string(),
        reg_number: "RU-2024-001".to_string(),
    }
}

fn test_client(server: &MockServer, limiter: RateLimiter) -> CrptClient {
    CrptClient::with_url(format!("{}{}", server.uri(), ENDPOINT_PATH), limiter)
}

#[tokio::test]
async fn submits_document_as_json() {
    let server = MockServer::start().await;
    let document = sample_document();

    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::to_value(&document).unwrap()))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"value":"accepted"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let limiter = RateLimiter::new(Duration::from_secs(1), 5).unwrap();
    let client = test_client(&server, limiter);

    let response = client
        .create_introduce_goods_document(&document)
        .await
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, r#"{"value":"accepted"}"#);
}

#[tokio::test]
async fn non_success_status_surfaces_as_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let limiter = RateLimiter::new(Duration::from_secs(1), 5).unwrap();
    let client = test_client(&server, limiter);

    let err = client
        .create_introduce_goods_document(&sample_document())
        .await
        .unwrap_err();
    match err {
        ApiError::Status { code, body } => {
            assert_eq!(code, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn submissions_beyond_limit_are_delayed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&server)
        .await;

    let period = Duration::from_millis(400);
    let limiter = RateLimiter::with_poll_interval(period, 2, Duration::from_millis(20)).unwrap();
    let client = test_client(&server, limiter);
    let document = sample_document();

    let start = Instant::now();
    for _ in 0..3 {
        client
            .create_introduce_goods_document(&document)
            .await
            .unwrap();
    }
    let elapsed = start.elapsed();

    // The third submission must wait for the first usage record to expire.
    assert!(
        elapsed >= period - Duration::from_millis(50),
        "three submissions finished in {elapsed:?}"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failed_submission_still_consumes_slot() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("rejected"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let period = Duration::from_millis(300);
    let limiter = RateLimiter::with_poll_interval(period, 1, Duration::from_millis(20)).unwrap();
    let client = test_client(&server, limiter);
    let document = sample_document();

    let start = Instant::now();
    let first = client.create_introduce_goods_document(&document).await;
    assert!(matches!(first, Err(ApiError::Status { code: 500, .. })));

    // The rejected attempt consumed the only slot, so the retry waits out
    // the window.
    client
        .create_introduce_goods_document(&document)
        .await
        .unwrap();
    let elapsed = start.elapsed();
    assert!(
        elapsed >= period - Duration::from_millis(50),
        "retry finished in {elapsed:?}"
    );
}
