//! Converter endpoint called by the CI server.

use axum::body::Bytes;
use axum::extract::{OriginalUri, State};
use axum::http::{HeaderMap, Method};
use axum::routing::post;
use axum::{Json, Router};
use tracing::{info, warn};

use crate::AppState;
use crate::error::ApiError;
use crate::signature::verify_request;
use secretinject_config::{ConvertRequest, ConvertResponse};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(convert))
}

/// Convert the pipeline definition in a signed host request.
async fn convert(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ConvertResponse>, ApiError> {
    if let Err(e) = verify_request(&state.secret, &method, &uri, &headers, &body) {
        warn!(error = %e, "Rejected conversion request");
        return Err(e.into());
    }

    let req: ConvertRequest = serde_json::from_slice(&body)?;

    info!(
        repo = %req.repo.slug,
        build = req.build.number,
        event = %req.build.event,
        "Converting pipeline"
    );

    // Large pipelines are parsed off the async workers.
    let converter = state.converter.clone();
    let slug = req.repo.slug.clone();
    let result = tokio::task::spawn_blocking(move || converter.convert(&req)).await?;

    match result {
        Ok(res) => Ok(Json(res)),
        Err(e) => {
            warn!(repo = %slug, error = %e, "Cannot convert pipeline");
            Err(e.into())
        }
    }
}
