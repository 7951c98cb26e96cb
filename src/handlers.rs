use crate::config::Config;
use crate::errors::AppError;
use crate::lookup::{normalize, validate_dni};
use crate::models::LookupResponse;
use crate::sir_client::SirClient;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{StatusCode, Uri},
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Client for the upstream lookup site.
    pub sir_client: SirClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let sir_client = SirClient::from_config(&config)?;
        Ok(Self { config, sir_client })
    }
}

/// Health check endpoint.
///
/// Never touches the upstream.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "estado": true,
            "mensaje": "API RENIEC activa",
            "uso": "/api/sir/{8_digitos}"
        })),
    )
}

/// GET /api/sir/:dni
///
/// Validates the DNI, makes one upstream call and returns the normalized
/// record. A segment axum cannot decode (e.g. invalid UTF-8) is an invalid
/// DNI like any other.
///
/// # Returns
///
/// * `Result<Json<LookupResponse>, AppError>` - The record or a classified error.
pub async fn lookup_dni(
    State(state): State<Arc<AppState>>,
    dni: Result<Path<String>, PathRejection>,
) -> Result<Json<LookupResponse>, AppError> {
    let Path(dni) = dni.map_err(|rejection| {
        tracing::debug!("Rejected DNI path segment: {}", rejection.body_text());
        AppError::InvalidInput(rejection.body_text())
    })?;
    tracing::info!("GET /api/sir/{}", dni);

    let dni = validate_dni(Some(dni.as_str()))?;
    let envelope = state.sir_client.consult_dni(&dni).await?;
    let record = normalize(envelope)?;

    tracing::info!("DNI {} found: {}", dni, record.full_name);
    Ok(Json(LookupResponse::found(record)))
}

/// GET /api/sir with no identifier segment.
pub async fn missing_dni() -> AppError {
    AppError::MissingIdentifier
}

/// Catch-all for unknown routes.
pub async fn route_not_found(uri: Uri) -> (StatusCode, Json<serde_json::Value>) {
    tracing::debug!("No route for {}", uri);
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "estado": false,
            "mensaje": "Ruta no encontrada. Uso correcto: /api/sir/{dni}"
        })),
    )
}
