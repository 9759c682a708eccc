//! Bot module wiring the calendar, the announcement room and the commands.
//!
//! # Architecture
//!
//! The bot runs three concurrent tasks:
//!
//! 1. **Ticker Task**: Emits a tick every `tick_interval` seconds into a
//!    single slot channel. A tick emitted while the previous one is still being
//!    processed is dropped, so ticks never pile up.
//!
//! 2. **Announcer Task**: Drives the [`PlaytestAnnouncer`] one tick at a time,
//!    which polls the calendar and keeps the announcement up to date.
//!
//! 3. **Matrix Sync Task**: Listens for Matrix messages, parses user
//!    commands, executes them and replies in the room.
//!
//! # Command Processing Flow
//!
//! ```text
//! Matrix Message → Parse Command → Execute → Send Reply
//! ```

use std::{path::Path, sync::Arc, time::Duration};

use chrono::Utc;
use log::{debug, error, info, warn};
use tokio::{
    sync::mpsc::{self, Receiver, Sender, error::TrySendError},
    time,
};

use crate::{
    Args,
    announcer::{AnnouncementFormatter, Branding, PlaytestAnnouncer},
    calendar::GoogleCalendar,
    commands::{CommandContext, CommandParseError, Commander},
    config::Config,
    matrix::{IncomingMessage, MatrixChannel, MatrixClient, UserCredentials},
    search::{HttpFetcher, SearchSettings, Searcher, TutorialCatalog},
    subscribers::PlaytesterRegistry,
    utils::get_path,
};

type HeraldCommander = Commander<GoogleCalendar, HttpFetcher>;

pub struct Bot {
    matrix_client: Arc<MatrixClient>,

    announcer: PlaytestAnnouncer<GoogleCalendar, MatrixChannel>,

    /// Seconds between two ticks
    tick_interval: u64,

    commander: Arc<HeraldCommander>,
}

impl Bot {
    pub async fn new(config: Config, args: Args) -> anyhow::Result<Self> {
        let session_path = get_path(&args.data, "session");
        tokio::fs::create_dir_all(&session_path).await?;

        let matrix_client = Arc::new(
            MatrixClient::new(
                &UserCredentials {
                    user_id: config.matrix.user_id,
                    password: config.matrix.password,
                    passphrase: config.matrix.passphrase,
                },
                Path::new(&session_path),
            )
            .await?,
        );

        let playtesters =
            Arc::new(PlaytesterRegistry::new(get_path(&args.data, "playtesters")).await);

        let calendar = Arc::new(GoogleCalendar::new(
            &config.calendar.url,
            &config.calendar.calendar_id,
            &config.calendar.api_key,
        ));
        let formatter = Arc::new(AnnouncementFormatter::new(
            config.announcer.local_zone(),
            Branding::from(&config.announcer.branding),
        ));
        let channel = MatrixChannel::new(
            Arc::clone(&matrix_client),
            config.announcer.announcement_room.clone(),
            config.announcer.testing_room.clone(),
            Arc::clone(&playtesters),
        );
        let announcer = PlaytestAnnouncer::new(
            calendar,
            channel,
            formatter,
            config.announcer.poll_interval_ticks(),
        )
        .await;

        let searcher = Searcher::new(
            HttpFetcher::new(),
            TutorialCatalog::load(&config.search.catalog_path).await,
            SearchSettings::from(&config.search),
        );
        let commander = Arc::new(Commander::new(
            announcer.viewer(),
            Arc::new(searcher),
            playtesters,
        ));

        Ok(Bot {
            matrix_client,
            announcer,
            tick_interval: config.announcer.tick_interval.max(1),
            commander,
        })
    }

    /// Starts the bot, runs until the Matrix sync ends.
    pub async fn start(self) {
        let (tick_sender, tick_receiver) = mpsc::channel(1);
        start_ticker_task(tick_sender, self.tick_interval);
        start_announcer_task(self.announcer, tick_receiver);

        let matrix_client = Arc::clone(&self.matrix_client);
        let commander = Arc::clone(&self.commander);
        let on_message = move |message: IncomingMessage| {
            handle_matrix_message(message, Arc::clone(&matrix_client), Arc::clone(&commander));
        };

        self.matrix_client.sync(on_message).await;
    }
}

fn start_ticker_task(sender: Sender<()>, tick_interval: u64) {
    tokio::spawn(async move {
        info!("ticking every {} seconds", tick_interval);
        let mut interval = time::interval(Duration::from_secs(tick_interval));

        loop {
            interval.tick().await;
            match sender.try_send(()) {
                Ok(()) => {}
                Err(TrySendError::Full(())) => warn!("previous tick still running, skipping tick"),
                Err(TrySendError::Closed(())) => {
                    error!("announcer stopped, stopping ticker");
                    return;
                }
            }
        }
    });
}

fn start_announcer_task(
    mut announcer: PlaytestAnnouncer<GoogleCalendar, MatrixChannel>,
    mut receiver: Receiver<()>,
) {
    tokio::spawn(async move {
        while receiver.recv().await.is_some() {
            announcer.on_tick(Utc::now()).await;
        }
        debug!("ticker stopped, stopping announcer");
    });
}

fn handle_matrix_message(
    message: IncomingMessage,
    matrix_client: Arc<MatrixClient>,
    commander: Arc<HeraldCommander>,
) {
    tokio::spawn(async move {
        let command = match commander.parse(&message.body) {
            Ok(command) => command,
            // Return silently if the command is not for the bot
            Err(CommandParseError::NotForBot) => return,
            Err(CommandParseError::InvalidCommand(reply)) => {
                reply_to(&matrix_client, &message, &reply).await;
                return;
            }
        };

        let context = CommandContext {
            room_id: message.room_id.clone(),
            user_id: message.sender_id.clone(),
            is_direct: message.is_direct,
        };
        let result = commander.execute(&command, &context).await;

        reply_to(&matrix_client, &message, &result.response).await;
    });
}

async fn reply_to(matrix_client: &MatrixClient, message: &IncomingMessage, body: &str) {
    if let Err(e) = matrix_client
        .send_reply(&message.room_id, &message.sender_id, &message.event_id, body)
        .await
    {
        error!("failed to reply in {}: {:#}", message.room_id, e);
    }
}
