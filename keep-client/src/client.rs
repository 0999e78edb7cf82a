//! HTTP binding of the [`KeepClient`] trait against the Keep gateway.

use async_trait::async_trait;
use config::KeepConfig;
use errors::KeepClientError;
use kp_core::traits::KeepClient;
use kp_core::types::{Note, NoteDraft, NoteId, NotePatch};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use tracing::debug;

/// Client for the Keep gateway's JSON/HTTP API.
///
/// The gateway owns the proprietary account sync; this client only speaks
/// plain JSON to it. Every request carries the account credentials and is
/// bounded by the configured timeout. Failures surface immediately; there
/// are no retries at this layer.
pub struct HttpKeepClient {
    http: Client,
    base_url: String,
    email: String,
    master_token: String,
}

impl HttpKeepClient {
    pub fn new(config: &KeepConfig) -> Result<Self, KeepClientError> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| KeepClientError::Transport {
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            email: config.email.clone(),
            master_token: config.master_token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "Keep gateway request");
        self.http
            .request(method, url)
            .bearer_auth(&self.master_token)
            .header("X-Keep-Email", &self.email)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, KeepClientError> {
        let response = request.send().await.map_err(|e| KeepClientError::Transport {
            reason: e.to_string(),
        })?;
        Self::check_status(response).await
    }

    /// Non-success statuses become [`KeepClientError::Status`] with the body
    /// text preserved for diagnostics.
    async fn check_status(response: Response) -> Result<Response, KeepClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(KeepClientError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: Response,
    ) -> Result<T, KeepClientError> {
        response
            .json::<T>()
            .await
            .map_err(|e| KeepClientError::Decode {
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl KeepClient for HttpKeepClient {
    async fn list(&self) -> Result<Vec<Note>, KeepClientError> {
        let response = self.send(self.request(Method::GET, "/v1/notes")).await?;
        Self::decode(response).await
    }

    async fn search(&self, query: &str) -> Result<Vec<Note>, KeepClientError> {
        let request = self
            .request(Method::GET, "/v1/notes/search")
            .query(&[("query", query)]);
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    async fn get(&self, id: &NoteId) -> Result<Option<Note>, KeepClientError> {
        let request = self.request(Method::GET, &format!("/v1/notes/{id}"));
        let response = request.send().await.map_err(|e| KeepClientError::Transport {
            reason: e.to_string(),
        })?;

        // The gateway answers 404 for unknown ids; that is an absent note,
        // not a failure.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = Self::check_status(response).await?;
        Ok(Some(Self::decode(response).await?))
    }

    async fn create(&self, draft: NoteDraft) -> Result<Note, KeepClientError> {
        let request = self.request(Method::POST, "/v1/notes").json(&draft);
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    async fn update(&self, id: &NoteId, patch: NotePatch) -> Result<Note, KeepClientError> {
        let request = self
            .request(Method::PATCH, &format!("/v1/notes/{id}"))
            .json(&patch);
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: &NoteId) -> Result<(), KeepClientError> {
        self.send(self.request(Method::DELETE, &format!("/v1/notes/{id}")))
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), KeepClientError> {
        self.send(self.request(Method::GET, "/v1/health")).await?;
        Ok(())
    }
}
