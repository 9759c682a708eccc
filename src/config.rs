//! Configuration of the Herald bot.
//!
//! The configuration is read from a YAML file, and any value can be
//! overridden with an environment variable prefixed by `HERALD_`, using `__`
//! to separate sections (e.g. `HERALD_MATRIX__PASSWORD`).
//!
//! # Configuration File Format
//!
//! ```yaml
//! calendar:
//!   # Optional, Google Calendar v3 API by default
//!   url: "https://www.googleapis.com/calendar/v3"
//!   calendar_id: "playtests@group.calendar.google.com"
//!   api_key: "google-api-key"
//!
//! announcer:
//!   # Seconds between two ticks, 60 by default
//!   tick_interval: 60
//!   # Ticks between two calendar polls, 2 by default
//!   update_ticks: 2
//!   # Time zone of the announced times, America/Chicago by default
//!   timezone: "America/Chicago"
//!   announcement_room: "!announcements:example.com"
//!   testing_room: "!testing:example.com"
//!
//! matrix:
//!   user_id: "@herald:example.com"
//!   password: "secret-password"
//!   passphrase: "recovery-passphrase"
//!
//! search:
//!   catalog_path: "searchData.json"
//! ```
//!
//! The `announcer.branding` and `search` sections accept more keys, see
//! [`Branding`] and [`Search`]; their defaults target the TopHATTwaffle site.

use chrono_tz::{America, Tz};
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use log::warn;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{
    announcer::{self, DEFAULT_POLL_INTERVAL_TICKS},
    search::SearchSettings,
};

const DEFAULT_TIMEZONE: Tz = America::Chicago;
const LOGO_URL: &str =
    "https://www.tophattwaffle.com/wp-content/uploads/2017/11/1024_png-300x300.png";

/// Root configuration structure.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Calendar holding the playtests
    pub calendar: Calendar,
    /// Announcement scheduling and rooms
    pub announcer: Announcer,
    /// Matrix account configuration
    pub matrix: Matrix,
    /// Tutorial and FAQ search
    #[serde(default)]
    pub search: Search,
}

impl Config {
    /// Loads the configuration from the YAML file at `path`, merged with the
    /// `HERALD_` environment variables.
    pub fn load(path: &str) -> Result<Config, figment::Error> {
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("HERALD_").split("__"))
            .extract()
    }
}

/// Google Calendar configuration.
#[derive(Debug, Deserialize)]
pub struct Calendar {
    /// Base URL of the calendar API
    #[serde(default = "default_calendar_url")]
    pub url: String,
    /// Identifier of the public calendar holding the playtests
    pub calendar_id: String,
    /// Google API key
    pub api_key: String,
}

/// Announcement configuration.
#[derive(Debug, Deserialize)]
pub struct Announcer {
    /// Seconds between two ticks
    #[serde(default = "default_tick_interval")]
    pub tick_interval: u64,
    /// Ticks between two calendar polls, ignored unless a positive integer
    #[serde(default, deserialize_with = "lenient_ticks")]
    pub update_ticks: Option<u32>,
    /// IANA name of the zone the playtest times are primarily shown in
    #[serde(default)]
    pub timezone: Option<String>,
    /// Room holding the playtest announcement
    pub announcement_room: String,
    /// Room receiving the alerts for playtesters
    pub testing_room: String,
    #[serde(default)]
    pub branding: Branding,
}

impl Announcer {
    /// Returns the number of ticks between two polls, or the default when
    /// missing or invalid.
    pub fn poll_interval_ticks(&self) -> u32 {
        self.update_ticks.unwrap_or_else(|| {
            warn!(
                "announcer.update_ticks is not set to a positive integer, using {}",
                DEFAULT_POLL_INTERVAL_TICKS
            );
            DEFAULT_POLL_INTERVAL_TICKS
        })
    }

    /// Returns the configured zone, or the default one when missing or unknown.
    pub fn local_zone(&self) -> Tz {
        let Some(timezone) = &self.timezone else {
            return DEFAULT_TIMEZONE;
        };

        timezone.parse::<Tz>().unwrap_or_else(|e| {
            warn!(
                "invalid timezone {} ({}), using {}",
                timezone, e, DEFAULT_TIMEZONE
            );
            DEFAULT_TIMEZONE
        })
    }
}

/// Links and images displayed in the announcements.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Branding {
    pub icon_url: String,
    pub thumbnail_url: String,
    /// Page explaining how to schedule a playtest
    pub schedule_url: String,
    pub header_image_url: String,
}

impl Default for Branding {
    fn default() -> Self {
        Branding {
            icon_url: LOGO_URL.to_owned(),
            thumbnail_url: LOGO_URL.to_owned(),
            schedule_url: "https://www.tophattwaffle.com/playtesting/".to_owned(),
            header_image_url: "https://www.tophattwaffle.com/wp-content/uploads/2017/11/header.png"
                .to_owned(),
        }
    }
}

impl From<&Branding> for announcer::Branding {
    fn from(branding: &Branding) -> Self {
        announcer::Branding {
            icon_url: branding.icon_url.clone(),
            thumbnail_url: branding.thumbnail_url.clone(),
            schedule_url: branding.schedule_url.clone(),
            header_image_url: branding.header_image_url.clone(),
        }
    }
}

/// Matrix account configuration.
#[derive(Debug, Deserialize)]
pub struct Matrix {
    /// Fully qualified Matrix user ID, e.g. `@herald:example.com`
    pub user_id: String,
    /// Password, only used for the first login
    pub password: String,
    /// E2EE recovery passphrase
    pub passphrase: String,
}

/// Search configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Search {
    /// Path of the JSON tutorial catalog
    pub catalog_path: String,
    /// Only pages whose url contains this domain get a description
    pub site_domain: String,
    /// Suffix removed from page titles
    pub title_suffix: String,
    pub default_image_url: String,
    pub tutorials_url: String,
    /// FAQ search endpoint, search terms are appended to it
    pub faq_url: String,
    pub faq_page_url: String,
}

impl Default for Search {
    fn default() -> Self {
        Search {
            catalog_path: "searchData.json".to_owned(),
            site_domain: "tophattwaffle".to_owned(),
            title_suffix: " | TopHATTwaffle".to_owned(),
            default_image_url: LOGO_URL.to_owned(),
            tutorials_url: "https://www.tophattwaffle.com/tutorials/".to_owned(),
            faq_url: "https://www.tophattwaffle.com/wp-admin/admin-ajax.php?action=epkb-search-kb&epkb_kb_id=1&search_words=".to_owned(),
            faq_page_url: "http://tophattwaffle.com/faq".to_owned(),
        }
    }
}

impl From<&Search> for SearchSettings {
    fn from(search: &Search) -> Self {
        SearchSettings {
            site_domain: search.site_domain.to_lowercase(),
            title_suffix: search.title_suffix.clone(),
            default_image_url: search.default_image_url.clone(),
            tutorials_url: search.tutorials_url.clone(),
            faq_url: search.faq_url.clone(),
            faq_page_url: search.faq_page_url.clone(),
        }
    }
}

fn default_calendar_url() -> String {
    "https://www.googleapis.com/calendar/v3".to_owned()
}

fn default_tick_interval() -> u64 {
    60
}

/// Reads `update_ticks` without failing the whole configuration.
///
/// Anything but a positive integer, or a string holding one, becomes `None`.
fn lenient_ticks<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let ticks = match &value {
        Value::Null => return Ok(None),
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse::<u32>().ok(),
        _ => None,
    };

    match ticks {
        Some(ticks) if ticks > 0 => Ok(Some(ticks)),
        _ => {
            warn!("invalid announcer.update_ticks {}, ignoring it", value);
            Ok(None)
        }
    }
}
