//! Matrix transport of the bot.
//!
//! # Modules
//!
//! - `channel` - The [`MatrixChannel`] announcement channel
//! - `client` - The [`MatrixClient`] used to send, edit and redact messages
//! - `encryption` - Login and end-to-end encryption setup
//! - `session` - On-disk persistence of the login and sync token
//! - `sync` - Sync loop and incoming message handling

mod channel;
mod client;
mod encryption;
mod session;
mod sync;

pub use crate::matrix::channel::MatrixChannel;
pub use crate::matrix::client::MatrixClient;
pub use crate::matrix::sync::IncomingMessage;

/// User credentials for a Matrix account
#[derive(Debug, Clone)]
pub struct UserCredentials {
    /// User ID of the matrix account
    pub user_id: String,
    /// Password of the matrix account
    pub password: String,
    /// Passphrase to recover the matrix account secrets
    pub passphrase: String,
}
