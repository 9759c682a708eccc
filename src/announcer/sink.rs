//! Destination of the announcements.

use std::fmt;

use mockall::automock;

use crate::announcer::payload::AnnouncementPayload;

/// Identifier of a posted announcement, used to edit or delete it later.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageHandle(pub String);

impl fmt::Display for MessageHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Chat channel holding the single live announcement.
///
/// This trait abstracts the chat transport for easier testing with mocks.
/// Callers never retry a failed operation, they report it and try again on
/// the next tick.
#[automock]
pub trait ChannelSink {
    /// Posts a new announcement and returns its handle.
    async fn post(&self, payload: &AnnouncementPayload) -> anyhow::Result<MessageHandle>;
    /// Replaces the content of an existing announcement.
    async fn edit(&self, handle: &MessageHandle, payload: &AnnouncementPayload)
    -> anyhow::Result<()>;
    /// Removes an existing announcement.
    async fn delete(&self, handle: &MessageHandle) -> anyhow::Result<()>;
    /// Sends a standalone alert mentioning the playtesters, followed by a
    /// copy of the announcement if any.
    async fn send_alert(
        &self,
        text: &str,
        payload: Option<AnnouncementPayload>,
    ) -> anyhow::Result<()>;
}
