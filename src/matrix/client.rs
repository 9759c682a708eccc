//! Matrix client wrapper for bot messaging and synchronization.
//!
//! This module provides a high-level [`MatrixClient`] interface that wraps the
//! Matrix SDK client and handles message sending, editing, redaction and
//! synchronization.

use std::path::Path;

use anyhow::Context;
use log::{debug, error, info};
use matrix_sdk::{
    Client, Room,
    ruma::{
        EventId, OwnedUserId, RoomId, UserId,
        events::{
            Mentions,
            room::message::{
                AddMentions, ForwardThread, MessageType, ReplacementMetadata, ReplyMetadata,
                RoomMessageEventContent, RoomMessageEventContentWithoutRelation,
            },
        },
    },
};

use crate::matrix::{
    UserCredentials,
    encryption::connect,
    session::SessionStore,
    sync::{IncomingMessage, MatrixSync},
};

const DISPLAY_NAME: &str = "Herald";

/// Matrix client of the bot.
///
/// # Examples
///
/// ```no_run
/// let client = MatrixClient::new(&credentials, Path::new("data")).await?;
/// let event_id = client.send_markdown("!room:example.com", "**Hello**", &[]).await?;
/// client.edit_markdown("!room:example.com", &event_id, "**Hello again**").await?;
/// ```
pub struct MatrixClient {
    matrix_sync: MatrixSync,
    client: Client,
}

impl MatrixClient {
    /// Logs in, or restores the login stored in `data_path`.
    pub async fn new(credentials: &UserCredentials, data_path: &Path) -> anyhow::Result<Self> {
        let store = SessionStore::open(data_path).await;
        let client = connect(credentials, &store)
            .await
            .context("failed to set up matrix client")?;

        client.account().set_display_name(Some(DISPLAY_NAME)).await?;

        let matrix_sync = MatrixSync::new(&client, &store);

        Ok(MatrixClient {
            matrix_sync,
            client,
        })
    }

    /// Syncs with the homeserver until an unrecoverable error occurs.
    pub async fn sync<F>(&self, on_message: F)
    where
        F: Fn(IncomingMessage) + Send + Sync + 'static,
    {
        match self.matrix_sync.sync(on_message).await {
            Ok(_) => info!("matrix sync ended successfully"),
            Err(e) => error!("matrix sync ended with error: {:?}", e),
        }
    }

    /// Replies to the event `event_id` sent by `sender_id`.
    pub async fn send_reply(
        &self,
        room_id: &str,
        sender_id: &str,
        event_id: &str,
        body: &str,
    ) -> anyhow::Result<()> {
        let sender = UserId::parse(sender_id)?;
        let event = EventId::parse(event_id)?;

        let content = RoomMessageEventContent::text_markdown(body).make_reply_to(
            ReplyMetadata::new(&event, &sender, None),
            ForwardThread::No,
            AddMentions::No,
        );

        self.send(room_id, content).await?;
        Ok(())
    }

    /// Sends a Markdown message mentioning `user_ids` and returns its event id.
    pub async fn send_markdown(
        &self,
        room_id: &str,
        body: &str,
        user_ids: &[String],
    ) -> anyhow::Result<String> {
        let mut content = RoomMessageEventContent::text_markdown(body);
        if !user_ids.is_empty() {
            let user_ids = user_ids
                .iter()
                .map(|user_id| UserId::parse(user_id.as_str()))
                .collect::<Result<Vec<OwnedUserId>, _>>()?;
            content = content.add_mentions(Mentions::with_user_ids(user_ids));
        }

        self.send(room_id, content).await
    }

    /// Replaces the content of the message `event_id`.
    pub async fn edit_markdown(
        &self,
        room_id: &str,
        event_id: &str,
        body: &str,
    ) -> anyhow::Result<()> {
        let event = EventId::parse(event_id)?;

        let content = RoomMessageEventContentWithoutRelation::new(MessageType::text_markdown(body))
            .make_replacement(ReplacementMetadata::new(event, None));

        self.send(room_id, content).await?;
        Ok(())
    }

    /// Redacts the message `event_id`.
    pub async fn redact(&self, room_id: &str, event_id: &str, reason: &str) -> anyhow::Result<()> {
        let event = EventId::parse(event_id)?;

        self.room(room_id)?
            .redact(&event, Some(reason), None)
            .await
            .with_context(|| format!("failed to redact {} in {}", event_id, room_id))?;

        debug!("redacted {} in {}", event_id, room_id);
        Ok(())
    }

    async fn send(
        &self,
        room_id: &str,
        content: RoomMessageEventContent,
    ) -> anyhow::Result<String> {
        let result = self
            .room(room_id)?
            .send(content)
            .await
            .with_context(|| format!("failed to send message to {}", room_id))?;

        let event_id = result.event_id.to_string();
        debug!("sent {} to {}", event_id, room_id);
        Ok(event_id)
    }

    fn room(&self, room_id: &str) -> anyhow::Result<Room> {
        let room_id = RoomId::parse(room_id)?;
        self.client
            .get_room(&room_id)
            .with_context(|| format!("room {} is not known, is the bot invited?", room_id))
    }
}
