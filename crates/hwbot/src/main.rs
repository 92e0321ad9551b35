use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use hwbot_core::{config::Config, notifier::Notifier, poller::Poller};
use hwbot_practicum::PracticumClient;
use hwbot_telegram::TelegramMessenger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Arc::new(Config::load().context("failed to load configuration")?);
    hwbot_core::logging::init("hwbot", Some(&cfg.log_path))
        .context("failed to initialise logging")?;

    let api = Arc::new(PracticumClient::from_config(&cfg)?);
    let messenger = Arc::new(TelegramMessenger::from_token(cfg.telegram_token.clone()));

    match messenger.username().await {
        Ok(name) => info!("hwbot started: @{name}"),
        Err(e) => warn!("could not identify bot account: {e}"),
    }
    info!(endpoint = api.endpoint(), chat_id = cfg.telegram_chat_id.0, "watching homework statuses");

    let notifier = Notifier::new(messenger, cfg.telegram_chat_id);
    let mut poller = Poller::new(&cfg, api, notifier);

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for ctrl-c: {e}");
            return;
        }
        info!("shutdown requested");
        on_signal.cancel();
    });

    poller.run(cancel).await?;
    Ok(())
}
