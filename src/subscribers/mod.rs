//! Playtester subscriptions.
//!
//! Users toggle their subscription with the `playtester` command and are
//! mentioned by every playtest alert.

mod playtester_loader;
mod playtester_registry;

pub use crate::subscribers::playtester_registry::PlaytesterRegistry;
