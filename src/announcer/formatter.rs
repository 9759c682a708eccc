//! Announcement formatting.
//!
//! The [`AnnouncementFormatter`] maps an [`EventSnapshot`] to an
//! [`AnnouncementPayload`]. It is pure: the current time is always passed in,
//! so the same snapshot and instant always give the same payload.

use chrono::{DateTime, Utc};
use chrono_tz::{America, Europe, Tz};

use crate::{
    announcer::payload::{AnnouncementPayload, Author, Color, PayloadField},
    calendar::{EventSnapshot, NO_EVENT_TITLE, PlaytestEvent},
};

const EVENT_COLOR: Color = Color(71, 126, 159);
const NO_EVENT_COLOR: Color = Color(214, 91, 47);

/// Time zones displayed next to the local time of a playtest.
const EXTRA_ZONES: [Tz; 3] = [America::New_York, America::Los_Angeles, Europe::London];

/// Community links and images shown in every announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    /// Icon displayed next to the event title
    pub icon_url: String,
    /// Logo displayed as thumbnail of an event announcement
    pub thumbnail_url: String,
    /// Page explaining how to schedule a playtest
    pub schedule_url: String,
    /// Banner shown when no playtest is scheduled
    pub header_image_url: String,
}

/// Builds announcement payloads from calendar snapshots.
#[derive(Debug, Clone)]
pub struct AnnouncementFormatter {
    /// Zone the calendar times are primarily displayed in
    local_zone: Tz,
    branding: Branding,
}

impl AnnouncementFormatter {
    pub fn new(local_zone: Tz, branding: Branding) -> Self {
        AnnouncementFormatter {
            local_zone,
            branding,
        }
    }

    /// Formats `snapshot` as seen at `now`.
    pub fn format(&self, snapshot: &EventSnapshot, now: DateTime<Utc>) -> AnnouncementPayload {
        match snapshot {
            EventSnapshot::Found(event) => self.format_event(event, now),
            EventSnapshot::NotFound => self.format_no_event(None),
            EventSnapshot::Malformed { note } => self.format_no_event(Some(note)),
        }
    }

    fn format_event(&self, event: &PlaytestEvent, now: DateTime<Utc>) -> AnnouncementPayload {
        let fields = vec![
            PayloadField::new(
                "Time Until Test",
                &format_time_left(event.start_time, now),
                true,
            ),
            PayloadField::new("Creator", &event.creator, true),
            PayloadField::new("Where?", &event.location, true),
            PayloadField::new("Moderator", &event.moderator, true),
            PayloadField::new("More Images", &event.gallery_url, false),
            PayloadField::new("When?", &self.format_schedule(event.start_time), false),
        ];

        AnnouncementPayload {
            author: Author {
                name: event.title.clone(),
                icon_url: self.branding.icon_url.clone(),
            },
            title: "--Workshop Link--".to_owned(),
            url: event.workshop_url.clone(),
            description: event.description.clone(),
            fields,
            image_url: event.featured_image_url.clone(),
            thumbnail_url: Some(self.branding.thumbnail_url.clone()),
            color: EVENT_COLOR,
            footer: format!("{} | {}", event.game_mode, self.branding.schedule_url),
        }
    }

    fn format_no_event(&self, note: Option<&str>) -> AnnouncementPayload {
        let mut description = "Believe it or not, there aren't any tests scheduled. \
            Click the link above to schedule your own playtest!"
            .to_owned();

        if let Some(note) = note {
            description.push_str(&format!(
                "\n\n**There was an issue with the calendar event. \
                If you're seeing this, a test is probably scheduled but its details \
                cannot be read: {}**",
                note
            ));
        }

        AnnouncementPayload {
            author: Author {
                name: NO_EVENT_TITLE.to_owned(),
                icon_url: self.branding.icon_url.clone(),
            },
            title: "Click here to schedule your playtest!".to_owned(),
            url: self.branding.schedule_url.clone(),
            description,
            fields: vec![],
            image_url: self.branding.header_image_url.clone(),
            thumbnail_url: None,
            color: NO_EVENT_COLOR,
            footer: self.branding.schedule_url.clone(),
        }
    }

    /// Renders the start time in the local zone followed by [`EXTRA_ZONES`].
    ///
    /// Example: `October Fri 16, 13:00 CDT | Fri 14:00 EDT | Fri 11:00 PDT | Fri 19:00 BST`
    pub fn format_schedule(&self, start_time: DateTime<Utc>) -> String {
        let local = start_time
            .with_timezone(&self.local_zone)
            .format("%B %a %-d, %H:%M %Z")
            .to_string();

        let others = EXTRA_ZONES
            .iter()
            .map(|zone| start_time.with_timezone(zone).format("%a %H:%M %Z").to_string());

        std::iter::once(local)
            .chain(others)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Formats the countdown until `start_time`, or the elapsed time once started.
///
/// Leading zero units are dropped: `1D 2H 5M`, `3H 0M`, `45M`.
pub fn format_time_left(start_time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if now >= start_time {
        return format!("Started: {} ago!", format_duration(now - start_time));
    }
    format_duration(start_time - now)
}

fn format_duration(duration: chrono::Duration) -> String {
    let total_minutes = duration.num_minutes();
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes / 60) % 24;
    let minutes = total_minutes % 60;

    if days > 0 {
        format!("{}D {}H {}M", days, hours, minutes)
    } else if hours > 0 {
        format!("{}H {}M", hours, minutes)
    } else {
        format!("{}M", minutes)
    }
}
