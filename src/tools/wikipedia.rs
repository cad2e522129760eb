//! Knowledge lookup against the Wikipedia REST summary endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::Tool;

/// Returned when the page exists but carries no summary text.
pub const WIKIPEDIA_NOT_FOUND: &str = "Nenalezeno.";

/// Returned on any non-2xx status or transport failure.
pub const WIKIPEDIA_ERROR: &str = "Chyba při vyhledávání.";

/// Fetch a page summary from Wikipedia.
pub struct WikipediaSearch {
    client: Client,
    api_url: String,
}

impl WikipediaSearch {
    pub fn new(client: Client, api_url: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn summary_url(&self, query: &str) -> String {
        let title = query.replace(' ', "_");
        format!(
            "{}/page/summary/{}",
            self.api_url,
            urlencoding::encode(&title)
        )
    }
}

#[derive(Deserialize)]
struct Summary {
    extract: Option<String>,
}

#[async_trait]
impl Tool for WikipediaSearch {
    fn name(&self) -> &str {
        "Wikipedia"
    }

    fn description(&self) -> &str {
        "Look up a topic on Wikipedia and return a short summary of its page."
    }

    async fn invoke(&self, argument: &str) -> String {
        let url = self.summary_url(argument);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Wikipedia request failed");
                return WIKIPEDIA_ERROR.to_string();
            }
        };

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Wikipedia returned non-success status");
            return WIKIPEDIA_ERROR.to_string();
        }

        match response.json::<Summary>().await {
            Ok(summary) => summary
                .extract
                .unwrap_or_else(|| WIKIPEDIA_NOT_FOUND.to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "Wikipedia summary was not valid JSON");
                WIKIPEDIA_ERROR.to_string()
            }
        }
    }
}
