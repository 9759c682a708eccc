//! Scheduler keeping the announcement in sync with the calendar.
//!
//! This module provides the [`PlaytestAnnouncer`] state machine driven by the
//! ticker, and the read-only [`AnnouncementViewer`] used to answer users.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, error, info, trace, warn};

use crate::{
    announcer::{
        alerts::{AlertKind, due_alerts},
        formatter::AnnouncementFormatter,
        payload::AnnouncementPayload,
        sink::{ChannelSink, MessageHandle},
        state::AnnouncerState,
    },
    calendar::{CalendarSource, EventSnapshot},
};

/// Keeps a single announcement synchronized with the next playtest.
///
/// On every poll, the announcer either posts the announcement (no message
/// yet), edits it (same event title), or deletes it and posts a new one (the
/// event changed). Alerts are evaluated after the announcement was posted or
/// edited, and each alert fires at most once per event.
///
/// # Examples
///
/// ```no_run
/// let mut announcer = PlaytestAnnouncer::new(calendar, sink, formatter, 2).await;
/// loop {
///     ticks.recv().await;
///     announcer.on_tick(Utc::now()).await;
/// }
/// ```
pub struct PlaytestAnnouncer<C: CalendarSource, S: ChannelSink> {
    /// Calendar polled for the next event
    calendar: Arc<C>,
    /// Channel holding the announcement
    sink: S,
    formatter: Arc<AnnouncementFormatter>,
    state: AnnouncerState,
}

impl<C: CalendarSource, S: ChannelSink> PlaytestAnnouncer<C, S> {
    /// Create a new [PlaytestAnnouncer], seeded with an initial poll.
    ///
    /// If the initial poll fails the announcer starts from [`EventSnapshot::NotFound`].
    ///
    /// # Arguments
    ///
    /// * `calendar` - Source of the next playtest.
    /// * `sink` - Channel receiving the announcement and the alerts.
    /// * `formatter` - Formatter shared with the [AnnouncementViewer].
    /// * `poll_interval_ticks` - Number of ticks between two calendar polls.
    pub async fn new(
        calendar: Arc<C>,
        sink: S,
        formatter: Arc<AnnouncementFormatter>,
        poll_interval_ticks: u32,
    ) -> Self {
        let initial_snapshot = match calendar.get_next_event().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("initial calendar poll failed: {}", e);
                EventSnapshot::NotFound
            }
        };
        info!("initial playtest snapshot: {}", initial_snapshot);

        PlaytestAnnouncer {
            calendar,
            sink,
            formatter,
            state: AnnouncerState::new(initial_snapshot, poll_interval_ticks),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &AnnouncerState {
        &self.state
    }

    /// Returns a viewer sharing the calendar and formatter, without access to the state.
    pub fn viewer(&self) -> AnnouncementViewer<C> {
        AnnouncementViewer {
            calendar: Arc::clone(&self.calendar),
            formatter: Arc::clone(&self.formatter),
        }
    }

    /// Handles one tick of the scheduler.
    ///
    /// The calendar is polled every `poll_interval_ticks` ticks. A failed poll
    /// leaves the state untouched until the next poll.
    pub async fn on_tick(&mut self, now: DateTime<Utc>) {
        if !self.state.register_tick() {
            trace!("tick skipped, waiting for next poll");
            return;
        }

        let snapshot = match self.calendar.get_next_event().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("failed to poll calendar, retrying next poll: {}", e);
                return;
            }
        };
        debug!("polled snapshot: {}", snapshot);

        let announced = match self.state.posted_message().cloned() {
            None => self.post(&snapshot, now).await,
            Some(handle) if snapshot.title() == self.state.last_snapshot().title() => {
                self.edit(&handle, &snapshot, now).await
            }
            Some(handle) => self.rebuild(&handle, &snapshot, now).await,
        };

        if announced {
            self.send_due_alerts(&snapshot, now).await;
        }
    }

    async fn post(&mut self, snapshot: &EventSnapshot, now: DateTime<Utc>) -> bool {
        let payload = self.formatter.format(snapshot, now);
        match self.sink.post(&payload).await {
            Ok(handle) => {
                info!("posted announcement {} for \"{}\"", handle, snapshot.title());
                self.state.set_posted(handle, snapshot.clone());
                true
            }
            Err(e) => {
                error!("failed to post announcement: {:#}", e);
                false
            }
        }
    }

    async fn edit(
        &mut self,
        handle: &MessageHandle,
        snapshot: &EventSnapshot,
        now: DateTime<Utc>,
    ) -> bool {
        let payload = self.formatter.format(snapshot, now);
        match self.sink.edit(handle, &payload).await {
            Ok(()) => {
                debug!("edited announcement {}", handle);
                self.state.set_last_snapshot(snapshot.clone());
                true
            }
            Err(e) => {
                error!("failed to edit announcement {}: {:#}", handle, e);
                false
            }
        }
    }

    /// Deletes the stale announcement then posts the new one.
    async fn rebuild(
        &mut self,
        handle: &MessageHandle,
        snapshot: &EventSnapshot,
        now: DateTime<Utc>,
    ) -> bool {
        info!(
            "event changed from \"{}\" to \"{}\", rebuilding announcement",
            self.state.last_snapshot().title(),
            snapshot.title()
        );

        if let Err(e) = self.sink.delete(handle).await {
            error!("failed to delete announcement {}: {:#}", handle, e);
            return false;
        }
        self.state.clear_posted(snapshot.clone());

        self.post(snapshot, now).await
    }

    async fn send_due_alerts(&mut self, snapshot: &EventSnapshot, now: DateTime<Utc>) {
        let Some(event) = snapshot.event() else {
            return;
        };

        let alerts = due_alerts(
            snapshot,
            now,
            self.state.alerted_one_hour(),
            self.state.alerted_start(),
        );

        for alert in alerts {
            let payload = self.formatter.format(snapshot, now);
            if let Err(e) = self
                .sink
                .send_alert(&alert.message(event), Some(payload))
                .await
            {
                error!("failed to send {:?} alert: {:#}", alert, e);
                continue;
            }

            info!("sent {:?} alert for \"{}\"", alert, event.title);
            match alert {
                AlertKind::OneHour => self.state.mark_one_hour_alerted(),
                AlertKind::Start => self.state.mark_start_alerted(),
            }
        }
    }
}

/// Read-only access to the current announcement, for user requests.
///
/// The viewer polls the calendar on each call and never raises alerts.
pub struct AnnouncementViewer<C: CalendarSource> {
    calendar: Arc<C>,
    formatter: Arc<AnnouncementFormatter>,
}

impl<C: CalendarSource> Clone for AnnouncementViewer<C> {
    fn clone(&self) -> Self {
        AnnouncementViewer {
            calendar: Arc::clone(&self.calendar),
            formatter: Arc::clone(&self.formatter),
        }
    }
}

impl<C: CalendarSource> AnnouncementViewer<C> {
    /// Formats the next playtest as seen at `now_override`, or now.
    ///
    /// A failed poll is displayed as if no playtest was scheduled.
    pub async fn current_announcement_view(
        &self,
        now_override: Option<DateTime<Utc>>,
    ) -> AnnouncementPayload {
        let now = now_override.unwrap_or_else(Utc::now);
        let snapshot = match self.calendar.get_next_event().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("failed to poll calendar for user request: {}", e);
                EventSnapshot::NotFound
            }
        };

        self.formatter.format(&snapshot, now)
    }
}
