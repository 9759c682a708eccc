//! Announcement channel backed by Matrix rooms.
//!
//! The announcement lives in the announcement room, while alerts go to the
//! testing room and mention every playtester.

use std::sync::Arc;

use crate::{
    announcer::{AnnouncementPayload, ChannelSink, MessageHandle},
    matrix::MatrixClient,
    subscribers::PlaytesterRegistry,
};

const REPLACED_REASON: &str = "Playtest announcement replaced";

/// [ChannelSink] posting to Matrix rooms.
pub struct MatrixChannel {
    client: Arc<MatrixClient>,
    announcement_room: String,
    testing_room: String,
    playtesters: Arc<PlaytesterRegistry>,
}

impl MatrixChannel {
    pub fn new(
        client: Arc<MatrixClient>,
        announcement_room: String,
        testing_room: String,
        playtesters: Arc<PlaytesterRegistry>,
    ) -> Self {
        MatrixChannel {
            client,
            announcement_room,
            testing_room,
            playtesters,
        }
    }
}

impl ChannelSink for MatrixChannel {
    async fn post(&self, payload: &AnnouncementPayload) -> anyhow::Result<MessageHandle> {
        let event_id = self
            .client
            .send_markdown(&self.announcement_room, &payload.to_markdown(), &[])
            .await?;
        Ok(MessageHandle(event_id))
    }

    async fn edit(
        &self,
        handle: &MessageHandle,
        payload: &AnnouncementPayload,
    ) -> anyhow::Result<()> {
        self.client
            .edit_markdown(&self.announcement_room, &handle.0, &payload.to_markdown())
            .await
    }

    async fn delete(&self, handle: &MessageHandle) -> anyhow::Result<()> {
        self.client
            .redact(&self.announcement_room, &handle.0, REPLACED_REASON)
            .await
    }

    async fn send_alert(
        &self,
        text: &str,
        payload: Option<AnnouncementPayload>,
    ) -> anyhow::Result<()> {
        let playtesters = self.playtesters.get_playtesters().await;
        let body = format_alert(text, &playtesters, payload.as_ref());

        self.client
            .send_markdown(&self.testing_room, &body, &playtesters)
            .await?;
        Ok(())
    }
}

/// Builds the body of an alert: the mentions, the alert text and the announcement.
fn format_alert(
    text: &str,
    playtesters: &[String],
    payload: Option<&AnnouncementPayload>,
) -> String {
    let mut sections = Vec::new();

    if !playtesters.is_empty() {
        let mentions = playtesters
            .iter()
            .map(|user_id| format!("[{}](https://matrix.to/#/{})", user_id, user_id))
            .collect::<Vec<String>>()
            .join(" ");
        sections.push(mentions);
    }

    sections.push(text.to_owned());

    if let Some(payload) = payload {
        sections.push(payload.to_markdown());
    }

    sections.join("\n\n")
}
