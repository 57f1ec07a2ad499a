//! HTTP backend for the deployed parking service.
//!
//! Wire envelopes: the list endpoint wraps spots in `{ "data": [...] }`
//! and every mutation returns `{ "spot": {...} }`.

use serde::Deserialize;
use serde_json::json;

use super::{BackendError, ParkingBackend, normalize_name};
use crate::core::models::ParkingSpot;

pub struct HttpBackend {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    data: Vec<ParkingSpot>,
}

#[derive(Debug, Deserialize)]
struct SpotEnvelope {
    spot: ParkingSpot,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: reqwest::Client::new(),
        }
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        let mut builder = self.client.request(method, url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Map a non-2xx response to a backend error, preserving the
    /// server's message where it sends one.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| status.to_string());

        match status.as_u16() {
            404 => Err(BackendError::NotFound(message)),
            // Refused transitions come back as 400/409.
            400 | 409 => Err(BackendError::Rejected(message)),
            code => Err(BackendError::Api {
                status: code,
                message,
            }),
        }
    }

    async fn transition(
        &self,
        id: &str,
        action: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ParkingSpot, BackendError> {
        let url = format!("{}/{}/{}", self.base_url, id, action);
        tracing::debug!(%url, action, "Requesting spot transition");

        let mut builder = self.request(reqwest::Method::PUT, url);
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = Self::check(builder.send().await?).await?;
        let envelope: SpotEnvelope = response.json().await?;
        Ok(envelope.spot)
    }
}

#[async_trait::async_trait]
impl ParkingBackend for HttpBackend {
    async fn list(&self) -> Result<Vec<ParkingSpot>, BackendError> {
        let response = self
            .request(reqwest::Method::GET, self.base_url.clone())
            .send()
            .await?;

        let response = Self::check(response).await?;
        let envelope: ListEnvelope = response.json().await?;
        Ok(envelope.data)
    }

    async fn reserve(
        &self,
        id: &str,
        name: &str,
        minutes: u32,
    ) -> Result<ParkingSpot, BackendError> {
        let body = json!({
            "name": normalize_name(name),
            "minutes": minutes.max(1),
        });
        self.transition(id, "reserve", Some(body)).await
    }

    async fn occupy(&self, id: &str) -> Result<ParkingSpot, BackendError> {
        self.transition(id, "occupy", None).await
    }

    async fn free(&self, id: &str) -> Result<ParkingSpot, BackendError> {
        self.transition(id, "free", None).await
    }
}
