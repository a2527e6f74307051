//! Google Calendar API client.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::instrument;

use crate::error::CalendarError;
use crate::types::{Event, EventListResponse, NewEvent};

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

pub struct CalendarClient {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl CalendarClient {
    pub fn new(access_token: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token: access_token.to_string(),
            base_url: CALENDAR_API_BASE.to_string(),
        }
    }

    pub fn new_with_base_url(access_token: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token: access_token.to_string(),
            base_url: base_url.to_string(),
        }
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// List upcoming singleton events ordered by start time, following page
    /// tokens until `max_results` events have been collected.
    ///
    /// Events without a usable start field are dropped here.
    #[instrument(skip(self), level = "info")]
    pub async fn list_upcoming(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        max_results: u32,
    ) -> Result<Vec<Event>, CalendarError> {
        let mut events: Vec<Event> = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = format!(
                "{}/calendars/{}/events?timeMin={}&singleEvents=true&orderBy=startTime&maxResults={}",
                self.base_url,
                urlencoding::encode(calendar_id),
                urlencoding::encode(&time_min.to_rfc3339_opts(SecondsFormat::Secs, true)),
                max_results,
            );
            if let Some(pt) = &page_token {
                url.push_str(&format!("&pageToken={}", pt));
            }

            let response = self
                .client
                .get(&url)
                .header("Authorization", self.auth_header())
                .send()
                .await?;

            let page: EventListResponse = self.handle_response(response).await?;

            for api_event in page.items {
                let id = api_event.id.clone();
                match Event::from_api(api_event) {
                    Some(event) => events.push(event),
                    None => tracing::warn!("Skipping event {} with no usable start", id),
                }
            }

            page_token = page.next_page_token;
            if page_token.is_none() || events.len() >= max_results as usize {
                break;
            }
        }

        events.truncate(max_results as usize);
        tracing::info!("Listed {} upcoming events", events.len());
        Ok(events)
    }

    /// Create a new event.
    #[instrument(skip(self, new_event), level = "info")]
    pub async fn insert_event(
        &self,
        calendar_id: &str,
        new_event: &NewEvent,
    ) -> Result<Event, CalendarError> {
        let url = format!(
            "{}/calendars/{}/events",
            self.base_url,
            urlencoding::encode(calendar_id),
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&new_event.to_api_body())
            .send()
            .await?;

        let api_event = self.handle_response(response).await?;
        Event::from_api(api_event).ok_or_else(|| {
            CalendarError::ApiError("created event came back without a start".to_string())
        })
    }

    /// Delete an event by id.
    #[instrument(skip(self), level = "info")]
    pub async fn delete_event(
        &self,
        calendar_id: &str,
        event_id: &str,
    ) -> Result<(), CalendarError> {
        let url = format!(
            "{}/calendars/{}/events/{}",
            self.base_url,
            urlencoding::encode(calendar_id),
            urlencoding::encode(event_id),
        );

        let response = self
            .client
            .delete(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        // Delete returns 204 No Content on success
        if response.status().is_success() {
            Ok(())
        } else if response.status().as_u16() == 404 {
            Err(CalendarError::EventNotFound(event_id.to_string()))
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(CalendarError::ApiError(format!("{}: {}", status, text)))
        }
    }

    /// Helper to handle API responses and errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, CalendarError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| CalendarError::ApiError(format!("JSON parse error: {}", e)))
        } else if status.as_u16() == 401 {
            Err(CalendarError::TokenExpired)
        } else if status.as_u16() == 403 {
            Err(CalendarError::AuthRequired)
        } else if status.as_u16() == 404 {
            let text = response.text().await.unwrap_or_default();
            Err(CalendarError::EventNotFound(text))
        } else if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            Err(CalendarError::RateLimited(retry_after))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(CalendarError::ApiError(format!("{}: {}", status, text)))
        }
    }
}
