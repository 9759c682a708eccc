//! Threshold alerts raised before and at the start of a playtest.

use chrono::{DateTime, Duration, Utc};

use crate::calendar::{EventSnapshot, PlaytestEvent};

/// An alert sent to the playtesters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// The playtest starts within the hour
    OneHour,
    /// The playtest has started
    Start,
}

impl AlertKind {
    /// Text of the alert for `event`.
    pub fn message(&self, event: &PlaytestEvent) -> String {
        match self {
            AlertKind::OneHour => "**Playtest starting in 1 hour**".to_owned(),
            AlertKind::Start => {
                format!("**Playtest starting now!** `connect {}`", event.location)
            }
        }
    }
}

/// Returns the alerts that became due for `snapshot` at `now` and were not
/// sent yet, one-hour alert first.
///
/// Only a found event can raise alerts.
pub fn due_alerts(
    snapshot: &EventSnapshot,
    now: DateTime<Utc>,
    alerted_one_hour: bool,
    alerted_start: bool,
) -> Vec<AlertKind> {
    let Some(event) = snapshot.event() else {
        return vec![];
    };

    let mut alerts = Vec::new();
    if !alerted_one_hour && now + Duration::hours(1) >= event.start_time {
        alerts.push(AlertKind::OneHour);
    }
    if !alerted_start && now >= event.start_time {
        alerts.push(AlertKind::Start);
    }
    alerts
}
