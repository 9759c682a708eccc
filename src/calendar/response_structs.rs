//! Response structures for the Google Calendar v3 events endpoint.
//!
//! Only the handful of fields the bot reads are declared; serde ignores the
//! rest of the payload.

use std::fmt;

use serde::Deserialize;

/// Body of `GET /calendars/{calendarId}/events`.
#[derive(Deserialize, Debug)]
pub struct EventsResponse {
    /// Events matching the query, ordered by start time.
    #[serde(default)]
    pub items: Vec<EventItem>,
}

/// A single calendar event.
#[derive(Deserialize, Debug, Clone)]
pub struct EventItem {
    /// Event title.
    pub summary: Option<String>,
    /// Free text body holding the `Key: value` playtest fields.
    pub description: Option<String>,
    /// Where the event happens, used as the server address.
    pub location: Option<String>,
    /// Start of the event, reported as malformed when missing.
    #[serde(default)]
    pub start: EventTime,
}

/// Start or end of an event.
///
/// Timed events carry `dateTime`, all-day events only carry `date`.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    /// RFC 3339 timestamp
    pub date_time: Option<String>,
    /// `yyyy-mm-dd` date of an all-day event
    pub date: Option<String>,
}

impl fmt::Display for EventItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "summary={:?}, location={:?}, start={:?}",
            self.summary, self.location, self.start.date_time
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_events_response() {
        let body = r#"{
            "kind": "calendar#events",
            "items": [{
                "summary": "de_alpha",
                "location": "play.example.com",
                "description": "Creator: Alice",
                "start": {"dateTime": "2026-10-16T18:00:00Z"}
            }]
        }"#;

        let response: EventsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].summary.as_deref(), Some("de_alpha"));
        assert_eq!(
            response.items[0].start.date_time.as_deref(),
            Some("2026-10-16T18:00:00Z")
        );
    }

    #[test]
    fn test_deserialize_without_items() {
        let response: EventsResponse =
            serde_json::from_str(r#"{"kind": "calendar#events"}"#).unwrap();
        assert!(response.items.is_empty());
    }

    #[test]
    fn test_deserialize_all_day_event() {
        let body = r#"{"items": [{"summary": "Holiday", "start": {"date": "2026-12-25"}}]}"#;
        let response: EventsResponse = serde_json::from_str(body).unwrap();
        assert!(response.items[0].start.date_time.is_none());
        assert_eq!(response.items[0].start.date.as_deref(), Some("2026-12-25"));
    }

    #[test]
    fn test_deserialize_event_without_start() {
        let body = r#"{"items": [{"summary": "de_alpha", "description": "Creator: Alice"}]}"#;
        let response: EventsResponse = serde_json::from_str(body).unwrap();
        assert!(response.items[0].start.date_time.is_none());
        assert!(response.items[0].start.date.is_none());
    }
}
