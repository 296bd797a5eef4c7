//! Manual long-polling loop against the Telegram Bot API.

use std::sync::Arc;

use {
    secrecy::ExposeSecret,
    teloxide::{
        ApiError, RequestError,
        prelude::*,
        types::{AllowedUpdate, BotCommand, CallbackQuery, UpdateKind},
    },
    tokio_util::sync::CancellationToken,
    tracing::{debug, error, info, warn},
};

use {
    crate::{
        config::BotConfig,
        event::{ButtonAction, InboundEvent, sender_profile},
        handlers,
        outbound::TelegramGateway,
        state::BotState,
    },
    jobgram_directory::{UserDirectory, UserProfile},
};

/// Start polling for updates.
///
/// Verifies credentials, clears any webhook, registers slash commands, then
/// spawns a background task that processes updates until the returned
/// `CancellationToken` is cancelled.
pub async fn start_polling(
    config: BotConfig,
    directory: Arc<dyn UserDirectory>,
) -> anyhow::Result<CancellationToken> {
    // Client timeout longer than the long-polling timeout (30s) so the HTTP
    // client doesn't abort the request before Telegram responds.
    let client = teloxide::net::default_reqwest_settings()
        .timeout(std::time::Duration::from_secs(45))
        .build()?;
    let bot = Bot::with_client(config.token.expose_secret(), client);

    let me = bot.get_me().await?;

    // Delete any existing webhook so long polling works.
    bot.delete_webhook().send().await?;

    // Register slash commands for autocomplete in Telegram clients.
    let commands = vec![
        BotCommand::new("start", "Register and show the main menu"),
        BotCommand::new("menu", "Show the main menu"),
        BotCommand::new("admin", "Open the admin panel"),
        BotCommand::new("cancel", "Cancel broadcast authoring"),
    ];
    if let Err(e) = bot.set_my_commands(commands).await {
        warn!("failed to register bot commands: {e}");
    }

    info!(username = ?me.username, "telegram bot connected (webhook cleared)");

    let gateway = Arc::new(TelegramGateway::new(bot.clone()));
    let state = Arc::new(BotState::new(config, directory, gateway));

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();

    tokio::spawn(async move {
        info!("starting telegram manual polling loop");
        let mut offset: i32 = 0;

        loop {
            if cancel_clone.is_cancelled() {
                info!("telegram polling stopped");
                break;
            }

            let result = bot
                .get_updates()
                .offset(offset)
                .timeout(30)
                .allowed_updates(vec![AllowedUpdate::Message, AllowedUpdate::CallbackQuery])
                .await;

            match result {
                Ok(updates) => {
                    debug!(count = updates.len(), "got telegram updates");
                    for update in updates {
                        offset = update.id.as_offset();
                        match update.kind {
                            UpdateKind::Message(msg) => {
                                debug!(chat_id = msg.chat.id.0, "received telegram message");
                                if let Err(e) = handle_message(&state, &msg).await {
                                    error!(error = %e, "error handling telegram message");
                                }
                            },
                            UpdateKind::CallbackQuery(query) => {
                                debug!(
                                    callback_data = ?query.data,
                                    "received telegram callback query"
                                );
                                if let Err(e) = handle_callback(&bot, &state, query).await {
                                    error!(error = %e, "error handling telegram callback query");
                                }
                            },
                            other => {
                                debug!("ignoring non-message update: {other:?}");
                            },
                        }
                    }
                },
                Err(e) => {
                    // Conflict means another instance is polling with the
                    // same token; keeping both alive would split updates.
                    let is_conflict =
                        matches!(&e, RequestError::Api(ApiError::TerminatedByOtherGetUpdates));
                    if is_conflict {
                        error!(
                            "telegram polling stopped: another instance is already running \
                             with this token"
                        );
                        cancel_clone.cancel();
                        break;
                    }

                    warn!(error = %e, "telegram getUpdates failed");
                    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                },
            }
        }
    });

    Ok(cancel)
}

async fn handle_message(state: &BotState, msg: &Message) -> crate::error::Result<()> {
    let Some(event) = InboundEvent::from_message(msg) else {
        return Ok(());
    };
    let Some(profile) = sender_profile(msg) else {
        return Ok(());
    };
    handlers::handle_event(state, msg.chat.id.0, &profile, event).await
}

async fn handle_callback(
    bot: &Bot,
    state: &BotState,
    query: CallbackQuery,
) -> crate::error::Result<()> {
    // Ack first so the client stops showing the loading spinner, whatever
    // the press resolves to.
    bot.answer_callback_query(&query.id).await?;

    let Some(action) = query.data.as_deref().and_then(ButtonAction::parse) else {
        debug!(callback_data = ?query.data, "unrecognized callback data ignored");
        return Ok(());
    };

    let user_id = query.from.id.0 as i64;
    let profile = UserProfile {
        user_id,
        username: query.from.username.clone(),
        first_name: Some(query.from.first_name.clone()),
        last_name: query.from.last_name.clone(),
    };
    // Private-chat bot: the chat is the sender unless the message survives.
    let chat_id = query
        .message
        .as_ref()
        .map(|m| m.chat().id.0)
        .unwrap_or(user_id);

    handlers::handle_event(state, chat_id, &profile, InboundEvent::Button(action)).await
}
