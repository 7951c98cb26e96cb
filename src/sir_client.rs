use crate::config::{Config, HeaderProfile};
use crate::errors::AppError;
use crate::lookup::Dni;
use crate::models::SirEnvelope;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const SITE_ORIGIN: &str = "https://buscardniperu.com";
const SITE_REFERER: &str = "https://buscardniperu.com/";

/// Client for the SIR lookup site's AJAX endpoint.
///
/// The upstream is an unofficial scraping target, so everything that depends
/// on its request format lives here.
#[derive(Clone)]
pub struct SirClient {
    client: reqwest::Client,
    url: String,
    profile: HeaderProfile,
}

impl SirClient {
    /// Creates a new `SirClient`.
    ///
    /// # Arguments
    ///
    /// * `url` - Full URL of the upstream AJAX endpoint.
    /// * `timeout` - Applies to the whole exchange, body read included.
    /// * `profile` - Which browser headers to send.
    pub fn new(url: String, timeout: Duration, profile: HeaderProfile) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to create SIR client: {}", e)))?;

        Ok(Self {
            client,
            url,
            profile,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(
            config.sir_url.clone(),
            config.sir_timeout(),
            config.header_profile,
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Browser-like headers for the configured profile.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        headers.insert(header::ORIGIN, HeaderValue::from_static(SITE_ORIGIN));
        headers.insert(header::REFERER, HeaderValue::from_static(SITE_REFERER));
        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));

        if self.profile == HeaderProfile::Full {
            headers.insert(
                header::ACCEPT,
                HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
            );
            headers.insert(
                header::ACCEPT_LANGUAGE,
                HeaderValue::from_static("es-PE,es;q=0.9"),
            );
        }

        headers
    }

    /// Looks up a DNI upstream.
    ///
    /// Makes exactly one attempt. The envelope is returned as-is; deciding
    /// whether it holds a record is up to `lookup::normalize`.
    ///
    /// # Returns
    ///
    /// * `Result<SirEnvelope, AppError>` - The parsed body, or a classified failure.
    pub async fn consult_dni(&self, dni: &Dni) -> Result<SirEnvelope, AppError> {
        tracing::info!("Consulting SIR for DNI {}", dni);

        let form = [
            ("dni", dni.as_str()),
            ("action", "consulta_dni_api"),
            ("tipo", "dni"),
            ("pagina", "1"),
        ];

        let response = self
            .client
            .post(&self.url)
            .headers(self.headers())
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::InternalError(format!(
                "Error HTTP: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            )
            .trim_end()
            .to_string()));
        }

        let body = response.text().await?;
        let parsed: Value = serde_json::from_str(&body)?;
        if !parsed.is_object() {
            tracing::warn!("SIR body for DNI {} is not a JSON object: {}", dni, parsed);
        }
        let envelope = SirEnvelope::from_value(parsed);

        tracing::debug!("SIR answered for DNI {}", dni);
        Ok(envelope)
    }
}
