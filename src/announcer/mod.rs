//! Playtest announcement scheduling.
//!
//! # Modules
//!
//! - `alerts` - One-hour and start alerts
//! - `formatter` - Conversion of snapshots into announcement payloads
//! - `payload` - Transport independent announcement content and its Markdown rendering
//! - `playtest_announcer` - The tick driven state machine and the read-only viewer
//! - `sink` - The [`ChannelSink`] trait implemented by the chat transport
//! - `state` - Bookkeeping of the live announcement

mod alerts;
mod formatter;
mod payload;
mod playtest_announcer;
mod sink;
mod state;

pub use crate::announcer::formatter::{AnnouncementFormatter, Branding};
pub use crate::announcer::payload::AnnouncementPayload;
pub use crate::announcer::playtest_announcer::{AnnouncementViewer, PlaytestAnnouncer};
#[cfg(test)]
pub use crate::announcer::sink::MockChannelSink;
pub use crate::announcer::sink::{ChannelSink, MessageHandle};
pub use crate::announcer::state::DEFAULT_POLL_INTERVAL_TICKS;
