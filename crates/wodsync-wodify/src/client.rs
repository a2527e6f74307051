//! Wodify API client.
//!
//! One paginated-free GET against the class search endpoint, filtered to the
//! configured coach and to classes starting today or later.

use chrono::Utc;
use tracing::instrument;

use crate::error::WodifyError;
use crate::types::{ClassRecord, ClassesResponse};

const WODIFY_API_BASE: &str = "https://api.wodify.com";

pub struct WodifyClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl WodifyClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: WODIFY_API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub fn new_with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
        }
    }

    /// Fetch the coach's upcoming classes, sorted by start date.
    ///
    /// Records the API returns malformed (bad timestamps, start >= end) are
    /// skipped with a warning rather than failing the run.
    #[instrument(skip(self), level = "info")]
    pub async fn upcoming_classes(&self, coach: &str) -> Result<Vec<ClassRecord>, WodifyError> {
        let url = format!("{}/v1/classes/search", self.base_url);
        let today = Utc::now().date_naive().to_string();
        // Filter syntax per https://docs.wodify.com/docs/search#-syntax
        let query = format!("start_date|gte|{};coach|eq|'{}'", today, coach);

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .header("x-api-key", &self.api_key)
            .query(&[("q", query.as_str()), ("sort", "start_date")])
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(WodifyError::InvalidApiKey);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(WodifyError::ApiError(format!("{}: {}", status, text)));
        }

        let body: ClassesResponse = response
            .json()
            .await
            .map_err(|e| WodifyError::ApiError(format!("JSON parse error: {}", e)))?;

        let mut classes = Vec::with_capacity(body.classes.len());
        for api_class in body.classes {
            match ClassRecord::from_api(api_class) {
                Ok(class) => classes.push(class),
                Err(e) => tracing::warn!("Skipping malformed Wodify class: {}", e),
            }
        }

        tracing::info!("Fetched {} upcoming classes", classes.len());
        Ok(classes)
    }
}
