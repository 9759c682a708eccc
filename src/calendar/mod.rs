//! Calendar integration providing the next scheduled playtest.
//!
//! # Modules
//!
//! - `requester` - HTTP client for the Google Calendar API and the [`CalendarSource`] trait
//! - `response_structs` - Internal data structures for API responses
//! - `parser` - Conversion of raw events into snapshots
//! - `structs` - Public snapshot structures consumed by the announcer

mod parser;
mod requester;
mod response_structs;
mod structs;

pub use crate::calendar::requester::{CalendarSource, GoogleCalendar};
#[cfg(test)]
pub use crate::calendar::requester::{CalendarError, MockCalendarSource};
pub use crate::calendar::structs::{EventSnapshot, NO_EVENT_TITLE, PlaytestEvent};
