//! HTTP gateway to the OpenAlex API.
//!
//! Owns the shared admission gate: every outbound call, including PDF byte
//! downloads, holds one semaphore permit for the full request and body
//! read. One attempt per call, no retry.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::Semaphore;

use crate::config::Config;
use crate::query::QuerySpec;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("OpenAlex API error ({status}): {body}")]
    Upstream { status: u16, body: String },
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Failed to save PDF file: {0}")]
    Storage(#[from] std::io::Error),
}

pub struct OpenAlexClient {
    http: reqwest::Client,
    base_url: String,
    email: Option<String>,
    gate: Arc<Semaphore>,
    log_requests: bool,
}

impl OpenAlexClient {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent())
            .timeout(Duration::from_secs_f64(config.timeout_secs))
            .build()
            .unwrap();
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            email: config.email.clone(),
            gate: Arc::new(Semaphore::new(config.max_concurrent_requests)),
            log_requests: config.log_api_requests,
        }
    }

    /// GET an API endpoint and decode the JSON body.
    ///
    /// `mailto` is appended when an email is configured (polite pool).
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<T, ApiError> {
        let _permit = self.gate.acquire().await.expect("gate never closed");
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));

        let mut req = self.http.get(&url);
        if !params.is_empty() {
            req = req.query(params);
        }
        if let Some(email) = &self.email {
            req = req.query(&[("mailto", email.as_str())]);
        }
        if self.log_requests {
            tracing::debug!("GET {}", url);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let err = ApiError::Upstream {
                status: status.as_u16(),
                body,
            };
            tracing::error!("{}", err);
            return Err(err);
        }
        if self.log_requests {
            tracing::debug!("Response status: {}", status);
        }
        Ok(resp.json::<T>().await?)
    }

    /// GET a list endpoint with a built query.
    pub async fn list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &QuerySpec,
    ) -> Result<T, ApiError> {
        self.fetch(endpoint, &query.to_params()).await
    }

    /// GET a single-entity endpoint; upstream 404 becomes `None`.
    pub async fn entity<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Option<T>, ApiError> {
        match self.fetch(endpoint, &[]).await {
            Ok(value) => Ok(Some(value)),
            Err(ApiError::Upstream { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Download a PDF to `path`, returning the number of bytes written.
    ///
    /// Shares the admission gate with API calls. A non-PDF content type is
    /// logged but does not block the write; local write failures are
    /// `Storage` errors.
    pub async fn download_pdf(&self, pdf_url: &str, path: &Path) -> Result<u64, ApiError> {
        let _permit = self.gate.acquire().await.expect("gate never closed");
        if self.log_requests {
            tracing::debug!("Downloading PDF from: {}", pdf_url);
        }

        let resp = self.http.get(pdf_url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_lowercase();
        if !content_type.contains("pdf") {
            tracing::warn!("Downloaded content may not be PDF: {}", content_type);
        }

        let bytes = resp.bytes().await?;
        tokio::fs::write(path, &bytes).await?;

        if self.log_requests {
            tracing::debug!("PDF saved to: {}", path.display());
        }
        Ok(bytes.len() as u64)
    }
}
