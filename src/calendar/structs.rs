//! Internal data structures for representing the next playtest.
//!
//! A fresh [`EventSnapshot`] is produced on every calendar poll and is never
//! mutated afterwards.

use std::fmt;

use chrono::{DateTime, Utc};

/// Title shared by every snapshot that does not carry a usable event.
///
/// Two consecutive `NotFound` (or `Malformed`) polls therefore compare equal
/// by title, which keeps the announcement in place instead of rebuilding it.
pub const NO_EVENT_TITLE: &str = "No Playtests Found!";

/// A fully parsed playtest event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaytestEvent {
    /// Scheduled start of the playtest
    pub start_time: DateTime<Utc>,
    /// Event title, also used as the event identity
    pub title: String,
    /// Level designer who submitted the map
    pub creator: String,
    /// Member moderating the session
    pub moderator: String,
    /// Server address players connect to
    pub location: String,
    /// Free text description of the map and what to test
    pub description: String,
    /// Game mode played during the test
    pub game_mode: String,
    /// Link to additional screenshots
    pub gallery_url: String,
    /// Main screenshot shown in the announcement
    pub featured_image_url: String,
    /// Link to the workshop page of the map
    pub workshop_url: String,
}

/// Result of one calendar poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSnapshot {
    /// A well formed upcoming (or running) playtest
    Found(PlaytestEvent),
    /// Nothing is scheduled
    NotFound,
    /// An event exists but its fields could not be parsed
    Malformed {
        /// Diagnostic explaining what was wrong with the event
        note: String,
    },
}

impl EventSnapshot {
    /// Returns the identity of the event carried by this snapshot.
    ///
    /// Snapshots without a usable event all share [`NO_EVENT_TITLE`].
    pub fn title(&self) -> &str {
        match self {
            EventSnapshot::Found(event) => &event.title,
            EventSnapshot::NotFound | EventSnapshot::Malformed { .. } => NO_EVENT_TITLE,
        }
    }

    /// Returns the event if the snapshot is [`EventSnapshot::Found`].
    pub fn event(&self) -> Option<&PlaytestEvent> {
        match self {
            EventSnapshot::Found(event) => Some(event),
            _ => None,
        }
    }
}

impl fmt::Display for EventSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EventSnapshot::Found(event) => write!(
                f,
                "found title={}, start={}, location={}",
                event.title, event.start_time, event.location
            ),
            EventSnapshot::NotFound => write!(f, "not found"),
            EventSnapshot::Malformed { note } => write!(f, "malformed note={}", note),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn create_test_event(title: &str) -> PlaytestEvent {
        PlaytestEvent {
            start_time: Utc.with_ymd_and_hms(2026, 10, 16, 18, 0, 0).unwrap(),
            title: title.to_string(),
            creator: "Alice".to_string(),
            moderator: "Bob".to_string(),
            location: "play.example.com:27015".to_string(),
            description: "A small defuse map".to_string(),
            game_mode: "Casual".to_string(),
            gallery_url: "https://imgur.com/a/gallery".to_string(),
            featured_image_url: "https://imgur.com/featured.png".to_string(),
            workshop_url: "https://steamcommunity.com/sharedfiles/filedetails/?id=123".to_string(),
        }
    }

    #[test]
    fn test_found_title_is_event_title() {
        let snapshot = EventSnapshot::Found(create_test_event("de_alpha"));
        assert_eq!(snapshot.title(), "de_alpha");
        assert!(snapshot.event().is_some());
    }

    #[test]
    fn test_missing_events_share_sentinel_title() {
        let not_found = EventSnapshot::NotFound;
        let malformed = EventSnapshot::Malformed {
            note: "bad description".to_string(),
        };

        assert_eq!(not_found.title(), NO_EVENT_TITLE);
        assert_eq!(malformed.title(), not_found.title());
        assert!(malformed.event().is_none());
    }

    #[test]
    fn test_snapshot_display() {
        let display = format!("{}", EventSnapshot::Found(create_test_event("de_alpha")));
        assert!(display.contains("title=de_alpha"));
        assert!(display.contains("location=play.example.com:27015"));

        let display = format!(
            "{}",
            EventSnapshot::Malformed {
                note: "oops".to_string()
            }
        );
        assert_eq!(display, "malformed note=oops");
    }
}
