use crate::commands::{input_text, trending_args, Command};
use crate::messages;
use telesonar_app::application::{FetchTrending, LookupCves};
use telesonar_app::domain::ResearchCommand;
use telesonar_app::infrastructure::telegram::{Message, OutgoingMessage, ParseMode};
use telesonar_app::AppContext;
use telesonar_errors::AppError;

pub async fn handle(
    ctx: &AppContext,
    message: &Message,
    command: Command,
) -> Result<(), AppError> {
    match command {
        Command::Welcome => welcome(ctx, message).await,
        Command::Research(research) => research_query(ctx, message, research).await,
        Command::Nvd => nvd_search(ctx, message).await,
        Command::Trending => trending(ctx, message).await,
    }
}

async fn welcome(ctx: &AppContext, message: &Message) -> Result<(), AppError> {
    ctx.telegram
        .send_message(&OutgoingMessage::new(message.chat.id, messages::WELCOME).html())
        .await?;
    Ok(())
}

async fn research_query(
    ctx: &AppContext,
    message: &Message,
    command: ResearchCommand,
) -> Result<(), AppError> {
    let Some(input) = input_text(message) else {
        reply_html(ctx, message, command.usage_text()).await?;
        return Ok(());
    };

    let status = reply_html(ctx, message, command.status_text()).await?;

    let answer = match ctx.run_research.execute(command, &input).await {
        Ok(answer) => answer,
        Err(e) => {
            tracing::warn!(command = command.name(), "Research failed: {}", e);
            e.user_message()
        }
    };

    delete_quietly(ctx, &status).await;

    ctx.telegram
        .send_message(
            &OutgoingMessage::new(message.chat.id, answer)
                .html()
                .reply_to(message.message_id)
                .without_link_preview(),
        )
        .await?;
    Ok(())
}

async fn nvd_search(ctx: &AppContext, message: &Message) -> Result<(), AppError> {
    let Some(keyword) = input_text(message) else {
        reply_html(ctx, message, messages::NVD_USAGE).await?;
        return Ok(());
    };

    let status = reply_html(ctx, message, messages::NVD_STATUS).await?;

    let text = match ctx.lookup_cves.execute(&keyword).await {
        Ok(records) => LookupCves::format_reply(&keyword, &records),
        Err(e) => e.user_message(),
    };

    if let Err(e) = ctx
        .telegram
        .edit_message_text(status.chat.id, status.message_id, &text, Some(ParseMode::Html))
        .await
    {
        tracing::error!("Telegram formatting error: {}", e);
        ctx.telegram
            .edit_message_text(
                status.chat.id,
                status.message_id,
                "Found results, but failed to format them.",
                None,
            )
            .await?;
    }
    Ok(())
}

async fn trending(ctx: &AppContext, message: &Message) -> Result<(), AppError> {
    let input = input_text(message);
    let (language, period) = trending_args(input.as_deref());
    let language = language.as_deref();

    let status = reply_html(
        ctx,
        message,
        messages::trending_status(&FetchTrending::language_label(language), period.label()),
    )
    .await?;

    let report = match ctx.fetch_trending.execute(language, period).await {
        Ok(report) => report,
        Err(e) => {
            edit_html(ctx, &status, &e.user_message()).await?;
            return Ok(());
        }
    };

    if report.repos.is_empty() {
        edit_html(ctx, &status, &messages::trending_empty(language)).await?;
        return Ok(());
    }

    delete_quietly(ctx, &status).await;

    ctx.telegram
        .send_document(
            message.chat.id,
            Some(message.message_id),
            &report.filename,
            report.csv,
            &report.caption,
        )
        .await?;
    Ok(())
}

async fn reply_html(
    ctx: &AppContext,
    message: &Message,
    text: impl Into<String>,
) -> Result<Message, AppError> {
    ctx.telegram
        .send_message(
            &OutgoingMessage::new(message.chat.id, text)
                .html()
                .reply_to(message.message_id),
        )
        .await
}

async fn edit_html(ctx: &AppContext, status: &Message, text: &str) -> Result<(), AppError> {
    ctx.telegram
        .edit_message_text(status.chat.id, status.message_id, text, Some(ParseMode::Html))
        .await?;
    Ok(())
}

async fn delete_quietly(ctx: &AppContext, status: &Message) {
    if let Err(e) = ctx
        .telegram
        .delete_message(status.chat.id, status.message_id)
        .await
    {
        tracing::debug!("Could not delete status message: {}", e);
    }
}
