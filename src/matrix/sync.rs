//! Matrix client synchronization and event handling.
//!
//! The [`MatrixSync::sync`] method:
//! 1. Performs an initial sync to catch up on offline events (especially invites)
//! 2. Sets up event handlers for auto-joining rooms and message processing
//! 3. Enters a continuous sync loop, saving the sync token after each response

use std::sync::Arc;

use anyhow::Result;
use log::{error, info, warn};
use matrix_sdk::{
    Client, LoopCtrl, Room, RoomState,
    config::SyncSettings,
    ruma::{
        api::client::filter::FilterDefinition,
        events::room::{
            member::StrippedRoomMemberEvent,
            message::{MessageType, OriginalSyncRoomMessageEvent},
        },
    },
};
use tokio::time::{Duration, sleep};

use crate::matrix::session::SessionStore;

/// Text message received in a joined room.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub body: String,
    pub room_id: String,
    pub sender_id: String,
    pub event_id: String,
    /// Whether the room only holds the sender and the bot
    pub is_direct: bool,
}

pub struct MatrixSync {
    client: Client,
    store: SessionStore,
}

impl MatrixSync {
    pub fn new(client: &Client, store: &SessionStore) -> Self {
        MatrixSync {
            client: client.clone(),
            store: store.clone(),
        }
    }

    /// Syncs forever, calling `on_message` for every new text message.
    pub async fn sync<F>(&self, on_message: F) -> Result<()>
    where
        F: Fn(IncomingMessage) + Send + Sync + 'static,
    {
        info!("start syncing");

        self.client.add_event_handler(auto_join_rooms);

        // See <https://spec.matrix.org/v1.6/client-server-api/#lazy-loading-room-members>.
        let filter = FilterDefinition::with_lazy_loading();
        let mut sync_settings = SyncSettings::default().filter(filter.into());
        if let Some(sync_token) = self.store.sync_token() {
            sync_settings = sync_settings.token(sync_token);
        }

        // Catch up first, so that messages sent while offline are not answered
        let next_batch = loop {
            match self.client.sync_once(sync_settings.clone()).await {
                Ok(response) => break response.next_batch,
                Err(e) => {
                    error!("initial sync failed, retrying in 5s: {}", e);
                    sleep(Duration::from_secs(5)).await;
                }
            }
        };
        if let Err(e) = self.store.save_sync_token(next_batch.clone()).await {
            error!("failed to save sync token: {:#}", e);
        }

        let on_message = Arc::new(on_message);
        self.client.add_event_handler(
            move |event: OriginalSyncRoomMessageEvent, room: Room, client: Client| {
                let on_message = Arc::clone(&on_message);
                async move { on_room_message(event, room, client, on_message.as_ref()).await }
            },
        );

        sync_settings = sync_settings.token(next_batch);
        self.client
            .sync_with_result_callback(sync_settings, |sync_result| async move {
                let response = sync_result?;

                if let Err(e) = self.store.save_sync_token(response.next_batch).await {
                    error!("failed to save sync token: {:#}", e);
                }

                Ok(LoopCtrl::Continue)
            })
            .await?;

        Ok(())
    }
}

async fn auto_join_rooms(room_member: StrippedRoomMemberEvent, client: Client, room: Room) {
    let Some(user_id) = client.user_id() else {
        warn!("could not get user id from client");
        return;
    };

    if room_member.state_key != user_id {
        return;
    }

    tokio::spawn(async move {
        info!("auto joining room {}", room.room_id());
        let mut delay = 2;

        // Synapse may send the invite before the user is able to join
        // https://github.com/matrix-org/synapse/issues/4345
        while let Err(e) = room.join().await {
            if delay > 3600 {
                error!("can't join room {} ({:?})", room.room_id(), e);
                return;
            }
            warn!(
                "failed to join room {} ({:?}), retrying in {}s",
                room.room_id(),
                e,
                delay
            );
            sleep(Duration::from_secs(delay)).await;
            delay *= 2;
        }
        info!("joined room {}", room.room_id());
    });
}

async fn on_room_message<F>(
    event: OriginalSyncRoomMessageEvent,
    room: Room,
    client: Client,
    on_message: &F,
) where
    F: Fn(IncomingMessage),
{
    if room.state() != RoomState::Joined {
        return;
    }

    if client.user_id() == Some(&*event.sender) {
        return;
    }

    let MessageType::Text(text_content) = event.content.msgtype else {
        return;
    };

    on_message(IncomingMessage {
        body: text_content.body,
        room_id: room.room_id().to_string(),
        sender_id: event.sender.to_string(),
        event_id: event.event_id.to_string(),
        is_direct: room.joined_members_count() <= 2,
    });
}
