//! Bookkeeping of the live announcement.

use log::warn;

use crate::{announcer::sink::MessageHandle, calendar::EventSnapshot};

/// Number of ticks between two calendar polls when none is configured.
pub const DEFAULT_POLL_INTERVAL_TICKS: u32 = 2;

/// State of the announcer, owned by a single task for the process lifetime.
///
/// Alert flags are only ever set while a message is posted and are reset
/// together with the message handle, so no alert flag survives without an
/// announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncerState {
    posted_message: Option<MessageHandle>,
    last_snapshot: EventSnapshot,
    alerted_one_hour: bool,
    alerted_start: bool,
    ticks_since_last_poll: u32,
    poll_interval_ticks: u32,
}

impl AnnouncerState {
    /// Create a new idle [AnnouncerState].
    ///
    /// # Arguments
    ///
    /// * `initial_snapshot` - Snapshot of the first poll, used for the first comparison.
    /// * `poll_interval_ticks` - Ticks between two polls, `0` falls back to [`DEFAULT_POLL_INTERVAL_TICKS`].
    pub fn new(initial_snapshot: EventSnapshot, poll_interval_ticks: u32) -> Self {
        let poll_interval_ticks = if poll_interval_ticks == 0 {
            warn!(
                "poll interval of 0 ticks is invalid, using {}",
                DEFAULT_POLL_INTERVAL_TICKS
            );
            DEFAULT_POLL_INTERVAL_TICKS
        } else {
            poll_interval_ticks
        };

        AnnouncerState {
            posted_message: None,
            last_snapshot: initial_snapshot,
            alerted_one_hour: false,
            alerted_start: false,
            ticks_since_last_poll: 0,
            poll_interval_ticks,
        }
    }

    /// Counts a tick and returns true when the calendar must be polled.
    ///
    /// The counter restarts after a poll is due, whatever the poll outcome.
    pub fn register_tick(&mut self) -> bool {
        self.ticks_since_last_poll += 1;
        if self.ticks_since_last_poll < self.poll_interval_ticks {
            return false;
        }
        self.ticks_since_last_poll = 0;
        true
    }

    pub fn posted_message(&self) -> Option<&MessageHandle> {
        self.posted_message.as_ref()
    }

    pub fn last_snapshot(&self) -> &EventSnapshot {
        &self.last_snapshot
    }

    pub fn alerted_one_hour(&self) -> bool {
        self.alerted_one_hour
    }

    pub fn alerted_start(&self) -> bool {
        self.alerted_start
    }

    #[cfg(test)]
    pub fn poll_interval_ticks(&self) -> u32 {
        self.poll_interval_ticks
    }

    /// Records a freshly posted announcement.
    pub(super) fn set_posted(&mut self, handle: MessageHandle, snapshot: EventSnapshot) {
        self.posted_message = Some(handle);
        self.last_snapshot = snapshot;
    }

    pub(super) fn set_last_snapshot(&mut self, snapshot: EventSnapshot) {
        self.last_snapshot = snapshot;
    }

    /// Forgets the deleted announcement and its alerts.
    pub(super) fn clear_posted(&mut self, snapshot: EventSnapshot) {
        self.posted_message = None;
        self.alerted_one_hour = false;
        self.alerted_start = false;
        self.last_snapshot = snapshot;
    }

    pub(super) fn mark_one_hour_alerted(&mut self) {
        if self.posted_message.is_some() {
            self.alerted_one_hour = true;
        }
    }

    pub(super) fn mark_start_alerted(&mut self) {
        if self.posted_message.is_some() {
            self.alerted_start = true;
        }
    }
}
