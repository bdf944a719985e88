mod commands;
mod dispatcher;
mod handlers;
mod messages;

use telesonar_app::AppContext;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let app_context = match AppContext::from_env() {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("❌ {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("🚀 Bot is starting...");
    tracing::info!(
        "Security: 1 request per {:.1}s per user",
        app_context.rate_limiter.window().as_secs_f64()
    );

    dispatcher::run(app_context).await;
}
