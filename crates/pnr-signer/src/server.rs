pub mod request;
pub mod response;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::authorize::{Authorization, Authorizer};
use crate::error::SignerError;
use crate::window::Clock;

use self::request::parse_signing_request;
use self::response::method_not_allowed;

#[derive(Clone)]
pub struct AppState {
    pub authorizer: Arc<Authorizer>,
    pub clock: Arc<dyn Clock>,
    /// Only this origin may call cross-site; `None` mirrors the caller's origin.
    pub allowed_origin: Option<HeaderValue>,
}

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(state.allowed_origin.clone());
    Router::new()
        .route("/healthcheck", get(|| async move { (StatusCode::OK, "Ok").into_response() }))
        .route("/pnr-sign", post(sign_handler).fallback(method_not_allowed))
        .layer(cors)
        .with_state(state)
}

pub async fn run(host: String, port: u16, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("binding {host}:{port}"))?;
    tracing::info!(address = %listener.local_addr()?, "listening");

    axum::serve(listener, router(state))
        .await
        .context("serving http")?;
    Ok(())
}

fn cors_layer(allowed_origin: Option<HeaderValue>) -> CorsLayer {
    let origin = match allowed_origin {
        Some(origin) => AllowOrigin::list([origin]),
        None => AllowOrigin::mirror_request(),
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

async fn sign_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Authorization>, SignerError> {
    let now = state.clock.now_unix();
    parse_signing_request(&body)
        .and_then(|request| state.authorizer.authorize(&request, now))
        .map(Json)
        .inspect_err(log_failure)
}

fn log_failure(error: &SignerError) {
    match error {
        SignerError::SigningUnavailable => {
            tracing::error!(code = error.code(), "signing requested without an operator key")
        }
        SignerError::InternalFailure(_) => {
            tracing::error!(code = error.code(), error = %error, "authorization failed")
        }
        _ => tracing::warn!(code = error.code(), error = %error, "rejected signing request"),
    }
}
