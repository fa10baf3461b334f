//! Engine behind an HTTP endpoint
//!
//! POSTs the run parameters as JSON and returns the response body as-is.

use async_trait::async_trait;
use url::Url;

use super::Engine;
use crate::config::RunConfig;
use crate::error::{Result, RunnerError};

pub struct HttpEngine {
    /// HTTP client
    client: reqwest::Client,
    /// Run endpoint
    endpoint: Url,
}

impl HttpEngine {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|source| RunnerError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Engine for HttpEngine {
    fn name(&self) -> &str {
        "http"
    }

    async fn invoke(&self, config: &RunConfig) -> Result<String> {
        let params = config.to_params()?;

        tracing::debug!(
            engine = "http",
            endpoint = %self.endpoint,
            scenario = %config.scenario,
            "Sending run request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                engine = "http",
                status = %status,
                "Engine returned an error status"
            );
            return Err(RunnerError::engine(
                "http",
                format!("HTTP {}: {}", status, error_text.trim()),
            ));
        }

        Ok(response.text().await?)
    }
}
