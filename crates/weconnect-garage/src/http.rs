// Async HTTP client for a car-connectivity bridge.
//
// Endpoints: GET  {base}/garage
//            POST {base}/vehicles/{vin}/commands
// Auth: optional `Authorization: Bearer …` header

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::command::CommandRequest;
use crate::error::GarageError;
use crate::source::GarageSource;
use crate::types::GarageSnapshot;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ── Error response shape from the bridge ─────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// HTTP garage source speaking JSON to a car-connectivity bridge.
pub struct HttpGarage {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpGarage {
    /// Build a client against a bridge base URL, with an optional bearer
    /// token injected as a default header on every request.
    pub fn new(base_url: &str, token: Option<&SecretString>) -> Result<Self, GarageError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| GarageError::Authentication {
                    message: format!("invalid bearer token header value: {e}"),
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(DEFAULT_TIMEOUT)
            .build()?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, GarageError> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the base URL and guarantee a trailing slash so relative
    /// joins don't drop the last path segment.
    fn normalize_base_url(raw: &str) -> Result<Url, GarageError> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    fn url(&self, path: &str) -> Result<Url, GarageError> {
        Ok(self.base_url.join(path)?)
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, GarageError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                GarageError::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), GarageError> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: StatusCode, resp: reqwest::Response) -> GarageError {
        let url = resp.url().clone();
        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                }
            });

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                GarageError::Authentication { message }
            }
            StatusCode::NOT_FOUND => GarageError::UnknownVehicle {
                vin: vin_from_url(&url),
            },
            _ => GarageError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

/// Recover the VIN from a `vehicles/{vin}/commands` URL for the
/// not-found error; falls back to the full path.
fn vin_from_url(url: &Url) -> String {
    let segments: Vec<&str> = url
        .path_segments()
        .map(Iterator::collect)
        .unwrap_or_default();
    segments
        .iter()
        .position(|s| *s == "vehicles")
        .and_then(|i| segments.get(i + 1))
        .map_or_else(|| url.path().to_owned(), |vin| (*vin).to_owned())
}

#[async_trait]
impl GarageSource for HttpGarage {
    async fn fetch_garage(&self) -> Result<GarageSnapshot, GarageError> {
        let url = self.url("garage")?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn send_command(&self, vin: &str, request: CommandRequest) -> Result<(), GarageError> {
        let url = self.url(&format!("vehicles/{vin}/commands"))?;
        debug!("POST {url} command={}", request.command_id());

        let resp = self.http.post(url).json(&request).send().await?;
        self.handle_empty(resp).await
    }

    async fn shutdown(&self) {
        // reqwest clients release their pools on drop.
    }
}
