mod config;
mod db;
mod telegram;

use crate::config::BotConfig;
use crate::db::PgDirectory;
use crate::telegram::TelegramApi;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use station_roster_access::RoleResolver;
use station_roster_core::ChatId;
use station_roster_dialogue::{Router, SessionStore};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = BotConfig::from_env().expect("failed to load configuration");
    let super_admins = config
        .telegram
        .super_admin_ids()
        .expect("invalid TELEGRAM__SUPER_ADMINS");
    tracing::info!(super_admins = super_admins.len(), "Loaded configuration");

    // Create database connection pool
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("failed to run migrations");

    let directory = Arc::new(PgDirectory::new(db_pool));
    let api = Arc::new(
        TelegramApi::new(
            &config.telegram.bot_token,
            Duration::from_secs(config.telegram.poll_timeout_seconds),
        )
        .expect("failed to create Telegram client"),
    );

    let sessions = SessionStore::new(
        config.session.max_sessions,
        chrono::Duration::seconds(config.session.idle_timeout_seconds),
    );
    let router = Arc::new(Router::new(
        directory,
        api.clone(),
        RoleResolver::new(super_admins),
        config.telegram.audit_chat_id.map(ChatId::new),
        sessions,
    ));

    // Spawn periodic idle-session sweep task
    let sweep_router = router.clone();
    let sweep_interval_secs = config.session.sweep_interval_seconds;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(sweep_interval_secs));
        loop {
            interval.tick().await;
            let swept = sweep_router.sweep_idle_sessions(Utc::now()).await;
            if swept > 0 {
                tracing::debug!(swept, "Periodic idle-session sweep");
            }
        }
    });

    tracing::info!("Polling for updates");
    let mut offset: Option<i64> = None;
    loop {
        let batch = tokio::select! {
            batch = api.updates(offset) => batch,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!(
                    active_sessions = router.active_sessions(),
                    "Shutting down"
                );
                break;
            }
        };

        let updates = match batch {
            Ok(updates) => updates,
            Err(e) => {
                tracing::warn!(error = %e, "Polling failed, backing off");
                tokio::time::sleep(Duration::from_secs(2)).await;
                continue;
            }
        };

        for update in updates {
            // Advance past every update, including kinds the bot ignores.
            offset = Some(update.update_id + 1);
            if let Some(event) = update.into_event() {
                router.dispatch(event).await;
            }
        }
    }
}
