use crate::commands::Command;
use crate::handlers;
use std::time::Duration;
use telesonar_app::infrastructure::security::RateLimiter;
use telesonar_app::infrastructure::telegram::{Message, Update};
use telesonar_app::AppContext;

const POLL_TIMEOUT_SECS: u32 = 25;
const ERROR_BACKOFF: Duration = Duration::from_secs(3);

/// Long-polls Telegram until Ctrl-C.
pub async fn run(ctx: AppContext) {
    if let Err(e) = ctx.telegram.delete_webhook(true).await {
        tracing::warn!("Could not delete webhook: {}", e);
    }

    tracing::info!("Bot is polling for updates");
    let mut offset: Option<i64> = None;
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        let updates = tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received");
                break;
            }
            result = ctx.telegram.get_updates(offset, POLL_TIMEOUT_SECS) => result,
        };

        let updates = match updates {
            Ok(updates) => updates,
            Err(e) => {
                tracing::error!("Polling failed: {}", e);
                tokio::time::sleep(ERROR_BACKOFF).await;
                continue;
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);
            let ctx = ctx.clone();
            tokio::spawn(async move { dispatch(&ctx, update).await });
        }
    }

    tracing::info!("Bot stopped");
}

/// Throttles by sender, then routes the command. Throttled messages get no reply.
async fn dispatch(ctx: &AppContext, update: Update) {
    let Some(message) = update.message else {
        return;
    };
    let Some(command) = admit_command(&ctx.rate_limiter, &message) else {
        return;
    };

    tracing::info!(
        user_id = message.from.as_ref().map(|user| user.id),
        chat_id = message.chat.id,
        ?command,
        "Handling command"
    );

    if let Err(e) = handlers::handle(ctx, &message, command).await {
        tracing::error!(?command, "Handler failed: {}", e);
    }
}

/// Messages without a sender are ignored. Every other message counts against
/// the sender's window, commands or not.
fn admit_command(limiter: &RateLimiter, message: &Message) -> Option<Command> {
    let sender = message.from.as_ref()?;

    if !limiter.admit(sender.id) {
        tracing::debug!(user_id = sender.id, "Throttled message dropped");
        return None;
    }

    message.text.as_deref().and_then(Command::parse)
}
