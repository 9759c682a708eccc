//! Herald - A Matrix bot announcing community playtests.
//!
//! Herald keeps a single announcement of the next playtest up to date in a
//! Matrix room, using a public Google Calendar as the source of truth.
//!
//! # Features
//!
//! - **Live Announcement**: The next playtest is posted once, then edited in place
//!   as its countdown progresses, and replaced when another playtest comes next
//! - **Playtest Alerts**: Subscribed playtesters are mentioned one hour before the
//!   playtest and when it starts
//! - **Tutorial Search**: Community tutorials and FAQ entries can be searched
//!   from any room
//! - **Session Persistence**: Maintains Matrix login sessions across restarts
//! - **YAML Configuration**: Simple configuration file format with environment variable support
//!
//! # Configuration
//!
//! See the [`config`] module for the file format. Any value can be overridden
//! with a `HERALD_` prefixed environment variable:
//!
//! ```bash
//! export HERALD_CALENDAR__API_KEY="google-api-key"
//! export HERALD_MATRIX__PASSWORD="your-password"
//! export HERALD_MATRIX__PASSPHRASE="your-passphrase"
//! ```
//!
//! # Usage
//!
//! ```bash
//! herald --config config.yaml --data ./herald-data
//! ```
//!
//! # Bot Commands
//!
//! - `!herald help` - Display help information
//! - `!herald upcoming` - Display the next playtest
//! - `!herald playtester` - Subscribe to or unsubscribe from the playtest alerts
//! - `!herald search <series> <terms...>` - Search tutorials or the FAQ
//!
//! # Architecture
//!
//! - [`announcer`] - Announcement state machine, formatting and alerts
//! - [`bot`] - Wiring of the tasks
//! - [`calendar`] - Google Calendar client and event parsing
//! - [`commands`] - Command parsing and execution
//! - [`config`] - YAML configuration with environment variable support
//! - [`matrix`] - Matrix client integration and session management
//! - [`search`] - Tutorial and FAQ search
//! - [`subscribers`] - Persisted playtester subscriptions
//! - [`utils`] - Path helpers
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod announcer;
mod bot;
mod calendar;
mod commands;
mod config;
mod matrix;
mod search;
mod subscribers;
mod utils;

/// Command-line arguments for the Herald bot.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    #[arg(short, long)]
    config: String,

    /// Path to the directory for storing persistent data.
    ///
    /// This directory will contain:
    /// - `session/` - Matrix session data (authentication tokens, device keys)
    /// - `playtesters` - JSON file with the subscribed playtesters
    ///
    /// The Matrix session allows impersonating the bot and decrypting its
    /// messages, restrict the access to this directory.
    #[arg(short, long)]
    data: String,
}

#[tokio::main]
async fn main() {
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting herald {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    let bot = match Bot::new(config, args).await {
        Ok(bot) => bot,
        Err(e) => {
            error!("Failed to initialize bot: {:#}", e);
            return;
        }
    };
    bot.start().await;
}
