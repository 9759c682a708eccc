//! HTTP client for the Google Calendar v3 API.
//!
//! This module provides the [`CalendarSource`] trait used by the announcer and
//! its [`GoogleCalendar`] implementation.

use chrono::{SecondsFormat, Utc};
use log::{debug, info};
use mockall::automock;
use reqwest::Client;
use thiserror::Error;

use crate::calendar::{
    parser::parse_event, response_structs::EventsResponse, structs::EventSnapshot,
};

/// Transport level failures while polling the calendar.
///
/// A calendar that answers but holds no usable event is not an error, see
/// [`EventSnapshot::NotFound`] and [`EventSnapshot::Malformed`].
#[derive(Debug, Error)]
pub enum CalendarError {
    /// The request could not be sent or the connection failed.
    #[error("calendar request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    /// The calendar answered with a non-success status code.
    #[error("calendar answered {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response body was not the expected JSON document.
    #[error("failed to decode calendar response from {url}: {source}")]
    Decode { url: String, source: reqwest::Error },
}

/// Source of the next scheduled playtest.
///
/// This trait abstracts the calendar for easier testing with mocks.
#[automock]
pub trait CalendarSource {
    /// Fetches the next event that has not ended yet.
    async fn get_next_event(&self) -> Result<EventSnapshot, CalendarError>;
}

/// Google Calendar client reading a public calendar with an API key.
///
/// # Examples
///
/// ```no_run
/// let calendar = GoogleCalendar::new(
///     "https://www.googleapis.com/calendar/v3",
///     "playtests@group.calendar.google.com",
///     "api-key",
/// );
/// let snapshot = calendar.get_next_event().await?;
/// ```
pub struct GoogleCalendar {
    /// Base url of the calendar API
    url: String,
    /// Identifier of the calendar holding the playtests
    calendar_id: String,
    /// Google API key
    api_key: String,
    /// HTTP client
    client: Client,
}

impl GoogleCalendar {
    /// Create a new [GoogleCalendar].
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL of the calendar API, without trailing slash.
    /// * `calendar_id` - The calendar to read events from.
    /// * `api_key` - The API key used to authenticate.
    pub fn new(url: &str, calendar_id: &str, api_key: &str) -> Self {
        GoogleCalendar {
            url: url.trim_end_matches('/').to_string(),
            calendar_id: calendar_id.to_string(),
            api_key: api_key.to_string(),
            client: Client::new(),
        }
    }
}

impl CalendarSource for GoogleCalendar {
    /// Request `/calendars/{calendarId}/events` for the first event ending after now.
    ///
    /// `timeMin` filters on the event end time, so a playtest that already
    /// started is still returned until it is over.
    async fn get_next_event(&self) -> Result<EventSnapshot, CalendarError> {
        let url = format!("{}/calendars/{}/events", &self.url, &self.calendar_id);
        let time_min = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        info!("request next event from calendar");
        debug!("request {}?timeMin={}", &url, &time_min);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("timeMin", time_min.as_str()),
                ("maxResults", "1"),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
            ])
            .send()
            .await
            .map_err(|source| CalendarError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CalendarError::UnexpectedStatus { url, status });
        }

        let events: EventsResponse = response
            .json()
            .await
            .map_err(|source| CalendarError::Decode {
                url: url.clone(),
                source,
            })?;

        debug!("response from {} -> {:?}", &url, &events);

        Ok(parse_event(events.items.first()))
    }
}
