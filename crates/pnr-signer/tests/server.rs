use std::sync::Arc;

use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use pnr_signer::{
    AppState, Authorization, Authorizer, DayIdPolicy, DigestSigner, DomainConfig,
    EthereumSecp256k1Signer, FixedClock, router,
};
use serde_json::{Value, json};
use tower::ServiceExt;

const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
const USER: &str = "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23";
// 2024-01-15T00:00:00Z
const NOW: u64 = 1_705_276_800;

fn state_with(domain: DomainConfig, signed: bool, allowed_origin: Option<&str>) -> AppState {
    let signer = signed.then(|| {
        let signer: Arc<dyn DigestSigner> = Arc::new(EthereumSecp256k1Signer::from_hex(KEY).unwrap());
        signer
    });
    AppState {
        authorizer: Arc::new(Authorizer::new(domain, signer)),
        clock: Arc::new(FixedClock(NOW)),
        allowed_origin: allowed_origin.map(|o| o.parse().unwrap()),
    }
}

fn test_state() -> AppState {
    state_with(DomainConfig::default(), true, None)
}

fn sign_request(body: Value) -> Request<axum::body::Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/pnr-sign")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn healthcheck_returns_200() {
    let app = router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthcheck")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"Ok");
}

#[tokio::test]
async fn sign_returns_authorization() {
    let app = router(test_state());

    let response = app.oneshot(sign_request(json!({ "user": USER }))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let auth: Authorization = serde_json::from_slice(&body).unwrap();
    assert_eq!(auth.day_id, 19_737);
    assert_eq!(auth.video_id_str, "PNR:2024-01-15");
    assert_eq!(auth.expires_at, NOW + 900);
    assert_eq!(
        auth.digest,
        "0x3f7d10f42791917e704e76f873dd389707a9ceb2b800f3e205429db7e6528303"
    );
    assert_eq!(auth.signer, USER);
    assert_eq!(auth.chain_id, 137);
}

#[tokio::test]
async fn sign_accepts_string_numbers() {
    let app = router(test_state());

    let response = app
        .oneshot(sign_request(json!({
            "user": USER,
            "expiresInSec": "9999",
            "dayId": "3",
            "videoId": 77,
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["expiresAt"], json!(NOW + 3_600));
    assert_eq!(body["dayId"], json!(3));
    assert_eq!(body["videoIdStr"], json!("77"));
}

#[tokio::test]
async fn bad_user_returns_400() {
    let app = router(test_state());

    let response = app.oneshot(sign_request(json!({ "user": "0x1234" }))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"], json!("BAD_USER"));
    assert!(body.get("sig").is_none());
}

#[tokio::test]
async fn malformed_json_returns_400() {
    let app = router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/pnr-sign")
                .body(axum::body::Body::from("{oops"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], json!("BAD_REQUEST"));
}

#[tokio::test]
async fn missing_operator_key_returns_500() {
    let app = router(state_with(DomainConfig::default(), false, None));

    let response = app.oneshot(sign_request(json!({ "user": USER }))).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert_eq!(body["error"], json!("MISSING_OPERATOR_PK"));
    assert!(body.get("sig").is_none());
}

#[tokio::test]
async fn reject_policy_refuses_foreign_day() {
    let domain = DomainConfig {
        day_id_policy: DayIdPolicy::Reject,
        ..DomainConfig::default()
    };
    let app = router(state_with(domain, true, None));

    let response = app
        .oneshot(sign_request(json!({ "user": USER, "dayId": 1 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], json!("BAD_DAY_ID"));
}

#[tokio::test]
async fn get_on_sign_returns_405() {
    let app = router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/pnr-sign")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json_body(response).await["error"], json!("METHOD_NOT_ALLOWED"));
}

#[tokio::test]
async fn preflight_allows_configured_origin() {
    let origin = "https://dreamplay-rhythm-board.netlify.app";
    let app = router(state_with(DomainConfig::default(), true, Some(origin)));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/pnr-sign")
                .header(header::ORIGIN, origin)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        origin
    );
}

#[tokio::test]
async fn foreign_origin_gets_no_cors_grant() {
    let app = router(state_with(
        DomainConfig::default(),
        true,
        Some("https://dreamplay-rhythm-board.netlify.app"),
    ));

    let mut request = sign_request(json!({ "user": USER }));
    request
        .headers_mut()
        .insert(header::ORIGIN, "https://evil.example".parse().unwrap());
    let response = app.oneshot(request).await.unwrap();

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn unconfigured_origin_is_mirrored() {
    let app = router(test_state());

    let mut request = sign_request(json!({ "user": USER }));
    request
        .headers_mut()
        .insert(header::ORIGIN, "https://player.example".parse().unwrap());
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://player.example"
    );
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nonexistent")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
