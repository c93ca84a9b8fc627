use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::core::lookup::CountryLookupService;
use crate::core::{CountryRecord, CountrySource, Storage};
use crate::utils::error::{ErrorSeverity, LookupError};

pub type SharedService<S, C> = Arc<CountryLookupService<S, C>>;

/// Builds the HTTP surface of the service.
///
/// - `POST /api/v1/countries/{code}`: 201 when fetched now, 200 when already stored
/// - `GET /api/v1/postal-code-validations/{code}`: 200, or 404 until the code is added
/// - `GET /health`
pub fn router<S, C>(service: SharedService<S, C>) -> Router
where
    S: Storage + 'static,
    C: CountrySource + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/countries/:country_code", post(add_country::<S, C>))
        .route(
            "/api/v1/postal-code-validations/:country_code",
            get(query_country::<S, C>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn add_country<S, C>(
    State(service): State<SharedService<S, C>>,
    Path(country_code): Path<String>,
) -> Result<(StatusCode, Json<CountryRecord>), LookupError>
where
    S: Storage + 'static,
    C: CountrySource + 'static,
{
    tracing::debug!(
        "Received a request to add country with country code: '{}'",
        country_code
    );

    let added = service
        .add(&country_code)
        .await
        .inspect_err(log_rejection)?;

    let status = if added.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(added.record)))
}

async fn query_country<S, C>(
    State(service): State<SharedService<S, C>>,
    Path(country_code): Path<String>,
) -> Result<Json<CountryRecord>, LookupError>
where
    S: Storage + 'static,
    C: CountrySource + 'static,
{
    tracing::debug!(
        "Received a request to query country with country code: '{}'",
        country_code
    );

    match service.query(&country_code).await.inspect_err(log_rejection)? {
        Some(record) => Ok(Json(record)),
        None => Err(LookupError::NotFound {
            code: country_code.trim().to_ascii_uppercase(),
        }),
    }
}

fn log_rejection(error: &LookupError) {
    match error.severity() {
        ErrorSeverity::Critical => tracing::error!("Request failed: {}", error),
        _ => tracing::debug!("Request rejected: {}", error),
    }
}
