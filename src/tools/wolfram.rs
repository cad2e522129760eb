//! Computational queries via the Wolfram|Alpha short-answers API.

use async_trait::async_trait;
use reqwest::Client;

use super::Tool;

/// Returned on any non-2xx status or transport failure.
pub const WOLFRAM_ERROR: &str = "Chyba při dotazu na Wolfram Alpha.";

/// Ask Wolfram|Alpha for a plaintext answer.
pub struct WolframQuery {
    client: Client,
    api_url: String,
    app_id: String,
}

impl WolframQuery {
    pub fn new(client: Client, api_url: &str, app_id: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            app_id: app_id.to_string(),
        }
    }
}

#[async_trait]
impl Tool for WolframQuery {
    fn name(&self) -> &str {
        "Wolfram"
    }

    fn description(&self) -> &str {
        "Answer a computational or factual question with Wolfram|Alpha."
    }

    async fn invoke(&self, argument: &str) -> String {
        let result = self
            .client
            .get(format!("{}/v1/result", self.api_url))
            .query(&[
                ("input", argument),
                ("appid", self.app_id.as_str()),
                ("format", "plaintext"),
            ])
            .send()
            .await;

        let response = match result {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::warn!(status = %response.status(), "Wolfram|Alpha returned non-success status");
                return WOLFRAM_ERROR.to_string();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Wolfram|Alpha request failed");
                return WOLFRAM_ERROR.to_string();
            }
        };

        match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read Wolfram|Alpha response body");
                WOLFRAM_ERROR.to_string()
            }
        }
    }
}
