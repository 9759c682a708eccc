//! Login and end-to-end encryption setup.
//!
//! On first start the bot logs in with its password, bootstraps cross-signing
//! and enables recovery with the configured passphrase. On later starts the
//! stored login is restored and the secrets are imported from secret storage.
//! Both paths end with the own device verified.

use anyhow::{Context, bail};
use log::{debug, info};
use matrix_sdk::{
    Client,
    authentication::matrix::MatrixSession,
    encryption::{
        BackupDownloadStrategy, EncryptionSettings,
        recovery::{RecoveryError, RecoveryState},
    },
    ruma::{OwnedUserId, api::client::uiaa},
};

use crate::matrix::{UserCredentials, session::SessionStore};

const DEVICE_DISPLAY_NAME: &str = "herald bot";

/// Returns a client logged in as the bot, with encryption ready.
pub async fn connect(
    credentials: &UserCredentials,
    store: &SessionStore,
) -> anyhow::Result<Client> {
    info!("connecting to matrix as {}", credentials.user_id);

    let user_id: OwnedUserId = credentials.user_id.as_str().try_into()?;
    let client = Client::builder()
        .server_name(user_id.server_name())
        .sqlite_store(store.sqlite_path(), Some(&credentials.passphrase))
        .with_encryption_settings(EncryptionSettings {
            auto_enable_cross_signing: true,
            backup_download_strategy: BackupDownloadStrategy::default(),
            auto_enable_backups: true,
        })
        .build()
        .await?;

    match store.login() {
        Some(login) => restore_login(&client, credentials, login).await?,
        None => first_login(&client, credentials, user_id, store).await?,
    }

    check_encryption(&client).await?;
    info!("matrix client ready");

    Ok(client)
}

async fn first_login(
    client: &Client,
    credentials: &UserCredentials,
    user_id: OwnedUserId,
    store: &SessionStore,
) -> anyhow::Result<()> {
    info!("no stored login, logging in with password");

    client
        .matrix_auth()
        .login_username(user_id, &credentials.password)
        .initial_device_display_name(DEVICE_DISPLAY_NAME)
        .send()
        .await?;

    bootstrap_cross_signing(client, credentials).await?;
    enable_recovery(client, &credentials.passphrase).await?;

    debug!("recovering secrets");
    client
        .encryption()
        .recovery()
        .recover(&credentials.passphrase)
        .await?;

    let login = client
        .matrix_auth()
        .session()
        .context("no session after login")?;
    store
        .save_login(&login)
        .await
        .context("failed to save login")?;

    Ok(())
}

async fn restore_login(
    client: &Client,
    credentials: &UserCredentials,
    login: &MatrixSession,
) -> anyhow::Result<()> {
    info!("restoring stored login");

    client.restore_session(login.clone()).await?;

    let secret_store = client
        .encryption()
        .secret_storage()
        .open_secret_store(&credentials.passphrase)
        .await
        .context("failed to open secret store")?;
    secret_store.import_secrets().await?;

    Ok(())
}

async fn bootstrap_cross_signing(
    client: &Client,
    credentials: &UserCredentials,
) -> anyhow::Result<()> {
    let Err(e) = client
        .encryption()
        .bootstrap_cross_signing_if_needed(None)
        .await
    else {
        debug!("cross signing already set up");
        return Ok(());
    };

    // The homeserver asks for the password before uploading the keys
    let Some(response) = e.as_uiaa_response() else {
        bail!("cross signing bootstrap failed: {:?}", e);
    };
    let mut password = uiaa::Password::new(
        uiaa::UserIdentifier::UserIdOrLocalpart(credentials.user_id.clone()),
        credentials.password.clone(),
    );
    password.session = response.session.clone();

    client
        .encryption()
        .bootstrap_cross_signing(Some(uiaa::AuthData::Password(password)))
        .await?;

    debug!("cross signing set up");
    Ok(())
}

async fn enable_recovery(client: &Client, passphrase: &str) -> anyhow::Result<()> {
    match client
        .encryption()
        .recovery()
        .enable()
        .with_passphrase(passphrase)
        .await
    {
        Ok(_) => debug!("recovery enabled"),
        Err(RecoveryError::BackupExistsOnServer) => debug!("recovery already enabled"),
        Err(e) => bail!("failed to enable recovery: {:?}", e),
    }

    Ok(())
}

async fn check_encryption(client: &Client) -> anyhow::Result<()> {
    if client.encryption().recovery().state() != RecoveryState::Enabled {
        bail!("recovery is not enabled");
    }

    let Some(device) = client.encryption().get_own_device().await? else {
        bail!("own device is unknown");
    };
    if !device.is_verified() {
        bail!("own device is not verified");
    }

    Ok(())
}
