//! Upcoming command handler.
//!
//! Replies with the next playtest, rendered like the announcement but without
//! ever raising an alert.

use log::debug;

use crate::{
    announcer::AnnouncementViewer, calendar::CalendarSource, commands::CommandResult,
};

pub async fn handle_upcoming<C: CalendarSource>(viewer: &AnnouncementViewer<C>) -> CommandResult {
    debug!("handling upcoming command");

    let payload = viewer.current_announcement_view(None).await;

    CommandResult {
        response: payload.to_markdown(),
    }
}
