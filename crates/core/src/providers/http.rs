use async_trait::async_trait;
use reqwest::{Client, Response};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::DashboardBackend;
use crate::errors::CoreError;
use crate::models::settings::DashboardSettings;
use crate::models::wire::{ComparisonRequest, ComparisonResponse, IndivPerfResponse};

/// Longest slice of an error body carried into `CoreError::Api`.
const MAX_ERROR_BODY: usize = 200;

/// The dashboard REST API over HTTP.
///
/// - `POST {base}/comparison` with `{"comparison": "<ticker>"}`
/// - `GET {base}/indiv_performance`
///
/// No retries. The only timeout is the client's own, which surfaces as a
/// `Network` error like any other transport failure.
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(settings: &DashboardSettings) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            client: builder.build().unwrap_or_else(|_| Client::new()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Status check, then the raw body. Parsing is left to the caller so a
    /// bad body is reported as `MalformedResponse`, not as a network error.
    async fn read_body(response: Response) -> Result<String, CoreError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message: String = body.chars().take(MAX_ERROR_BODY).collect();
            return Err(CoreError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(body)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl DashboardBackend for HttpBackend {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn fetch_comparison(&self, benchmark: &str) -> Result<ComparisonResponse, CoreError> {
        let url = format!("{}/comparison", self.base_url);
        tracing::debug!(%url, benchmark, "requesting comparison data");

        let response = self
            .client
            .post(&url)
            .json(&ComparisonRequest {
                comparison: benchmark.to_string(),
            })
            .send()
            .await?;

        ComparisonResponse::from_body(&Self::read_body(response).await?)
    }

    async fn fetch_individual_performance(&self) -> Result<IndivPerfResponse, CoreError> {
        let url = format!("{}/indiv_performance", self.base_url);
        tracing::debug!(%url, "requesting individual performance");

        let response = self.client.get(&url).send().await?;

        IndivPerfResponse::from_body(&Self::read_body(response).await?)
    }
}
