//! Conversion of raw calendar events into [`EventSnapshot`]s.
//!
//! Playtest details live in the event description, one `Key: value` per line:
//!
//! ```text
//! Creator: Alice
//! Featured Image: https://imgur.com/featured.png
//! Map Images: https://imgur.com/a/gallery
//! Workshop Link: https://steamcommunity.com/sharedfiles/filedetails/?id=123
//! Game Mode: Casual
//! Moderator: Bob
//! Description: A small defuse map.
//! ```
//!
//! A value continues on the following lines until the next known key, which
//! allows multi-line descriptions. Anything the bot cannot trust becomes
//! [`EventSnapshot::Malformed`] instead of an error.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::calendar::{
    response_structs::EventItem,
    structs::{EventSnapshot, PlaytestEvent},
};

const CREATOR: &str = "creator";
const FEATURED_IMAGE: &str = "featured image";
const MAP_IMAGES: &str = "map images";
const WORKSHOP_LINK: &str = "workshop link";
const GAME_MODE: &str = "game mode";
const MODERATOR: &str = "moderator";
const DESCRIPTION: &str = "description";

const KEYS: [&str; 7] = [
    CREATOR,
    FEATURED_IMAGE,
    MAP_IMAGES,
    WORKSHOP_LINK,
    GAME_MODE,
    MODERATOR,
    DESCRIPTION,
];

/// Converts the first calendar item (if any) into a snapshot.
pub fn parse_event(item: Option<&EventItem>) -> EventSnapshot {
    let Some(item) = item else {
        debug!("no upcoming event in calendar");
        return EventSnapshot::NotFound;
    };

    match parse_item(item) {
        Ok(event) => EventSnapshot::Found(event),
        Err(note) => {
            warn!("malformed calendar event {}: {}", item, note);
            EventSnapshot::Malformed { note }
        }
    }
}

fn parse_item(item: &EventItem) -> Result<PlaytestEvent, String> {
    let title = non_empty(item.summary.as_deref()).ok_or("the event has no title")?;
    let location = non_empty(item.location.as_deref()).ok_or("the event has no location")?;
    let start_time = parse_start(item)?;

    let description = item.description.as_deref().unwrap_or_default();
    if contains_markup(description) {
        return Err("the event description contains HTML, so it cannot be parsed. \
                    A playtest is probably scheduled but its details are unreadable."
            .to_owned());
    }

    let mut fields = parse_fields(description);
    let mut take = |key: &str| -> Result<String, String> {
        fields
            .remove(key)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| format!("the event description is missing `{}`", capitalize(key)))
    };

    Ok(PlaytestEvent {
        start_time,
        title: title.to_owned(),
        creator: take(CREATOR)?,
        moderator: take(MODERATOR)?,
        location: location.to_owned(),
        description: take(DESCRIPTION)?,
        game_mode: take(GAME_MODE)?,
        gallery_url: take(MAP_IMAGES)?,
        featured_image_url: take(FEATURED_IMAGE)?,
        workshop_url: take(WORKSHOP_LINK)?,
    })
}

fn parse_start(item: &EventItem) -> Result<DateTime<Utc>, String> {
    let Some(date_time) = item.start.date_time.as_deref() else {
        return Err(match item.start.date.as_deref() {
            Some(date) => format!("the event is an all-day event on {}, set a start time", date),
            None => "the event has no start time".to_owned(),
        });
    };

    DateTime::parse_from_rfc3339(date_time)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("the event start time `{}` is invalid: {}", date_time, e))
}

/// Splits a description into lowercase keys and their trimmed values.
fn parse_fields(description: &str) -> HashMap<&'static str, String> {
    let mut fields: HashMap<&'static str, String> = HashMap::new();
    let mut current: Option<&'static str> = None;

    for line in description.lines() {
        if let Some((key, value)) = split_key(line) {
            fields.insert(key, value.trim().to_owned());
            current = Some(key);
            continue;
        }

        // Continuation of the previous value
        if let Some(key) = current
            && let Some(value) = fields.get_mut(key)
        {
            let line = line.trim();
            if !line.is_empty() {
                if !value.is_empty() {
                    value.push('\n');
                }
                value.push_str(line);
            }
        }
    }

    fields
}

fn split_key(line: &str) -> Option<(&'static str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim().to_lowercase();
    KEYS.iter().find(|k| **k == key).map(|k| (*k, value))
}

/// Detects HTML tags such as `<br>` or `</a>` left by the calendar web editor.
fn contains_markup(text: &str) -> bool {
    text.match_indices('<').any(|(index, _)| {
        let rest = &text[index + 1..];
        let starts_tag = rest
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/');
        starts_tag && rest.contains('>')
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn capitalize(key: &str) -> String {
    key.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
