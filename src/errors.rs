use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
///
/// Every variant is terminal for the request that produced it; none of them
/// takes the process down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// No identifier was supplied in the path.
    MissingIdentifier,
    /// The identifier is not exactly 8 ASCII digits.
    InvalidInput(String),
    /// The upstream answered but holds no record for the identifier.
    NotFound,
    /// The upstream did not answer within the configured timeout.
    UpstreamTimeout,
    /// DNS failure or refused connection.
    UpstreamUnreachable(String),
    /// The upstream body is not valid JSON.
    UpstreamMalformedResponse(String),
    /// Anything else. The message is echoed back as `detalle`.
    InternalError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingIdentifier | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::UpstreamUnreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::UpstreamMalformedResponse(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Caller-facing message placed in `mensaje`.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::MissingIdentifier => "DNI no proporcionado.",
            AppError::InvalidInput(_) => {
                "DNI inválido. Debe contener exactamente 8 dígitos numéricos."
            }
            AppError::NotFound => "DNI no encontrado en la base de datos.",
            AppError::UpstreamTimeout => "Tiempo de espera agotado. Intente nuevamente.",
            AppError::UpstreamUnreachable(_) => {
                "No se pudo conectar al servidor de consulta. Intente más tarde."
            }
            AppError::UpstreamMalformedResponse(_) => "Respuesta inválida del servidor externo.",
            AppError::InternalError(_) => "Error interno del servidor.",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingIdentifier => write!(f, "Bad request: missing DNI"),
            AppError::InvalidInput(raw) => write!(f, "Bad request: invalid DNI '{}'", raw),
            AppError::NotFound => write!(f, "Not found: DNI has no upstream record"),
            AppError::UpstreamTimeout => write!(f, "Upstream timeout"),
            AppError::UpstreamUnreachable(msg) => write!(f, "Upstream unreachable: {}", msg),
            AppError::UpstreamMalformedResponse(msg) => {
                write!(f, "Malformed upstream response: {}", msg)
            }
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Maps each variant to its status code and `{estado, mensaje}` body.
    /// Only `InternalError` carries `detalle`.
    fn into_response(self) -> Response {
        let status = self.status();
        let mensaje = self.public_message();

        let body = match &self {
            AppError::MissingIdentifier | AppError::InvalidInput(_) | AppError::NotFound => {
                tracing::debug!("{}", self);
                json!({ "estado": false, "mensaje": mensaje })
            }
            AppError::UpstreamTimeout
            | AppError::UpstreamUnreachable(_)
            | AppError::UpstreamMalformedResponse(_) => {
                tracing::warn!("{}", self);
                json!({ "estado": false, "mensaje": mensaje })
            }
            AppError::InternalError(msg) => {
                tracing::error!("[ERROR] {}", msg);
                json!({ "estado": false, "mensaje": mensaje, "detalle": msg })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    /// Classifies a transport failure. Checked in order: timeout, connect,
    /// body decode, then everything else.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::UpstreamTimeout
        } else if err.is_connect() {
            AppError::UpstreamUnreachable(err.to_string())
        } else if err.is_decode() {
            AppError::UpstreamMalformedResponse(err.to_string())
        } else {
            AppError::InternalError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::UpstreamMalformedResponse(err.to_string())
    }
}
