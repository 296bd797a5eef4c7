use std::{str::FromStr, sync::Arc};

use {
    clap::Parser,
    secrecy::Secret,
    sqlx::sqlite::{SqliteConnectOptions, SqlitePool},
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use {
    jobgram_directory::SqliteUserDirectory,
    jobgram_telegram::{BotConfig, bot},
};

#[derive(Parser)]
#[command(name = "jobgram", about = "Telegram job-search bot")]
struct Cli {
    /// Bot token from @BotFather.
    #[arg(long, env = "JOBGRAM_TOKEN", hide_env_values = true)]
    token: String,

    /// User id of the single privileged operator.
    #[arg(long, env = "JOBGRAM_OPERATOR_ID")]
    operator_id: i64,

    /// Path to the sqlite database file (created when missing).
    #[arg(long, env = "JOBGRAM_DB", default_value = "jobgram.db")]
    db: String,

    /// Listing provider endpoint.
    #[arg(
        long,
        env = "JOBGRAM_API_URL",
        default_value = jobgram_listings::DEFAULT_API_URL
    )]
    api_url: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "jobgram starting");

    let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", cli.db))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;
    SqliteUserDirectory::init(&pool).await?;
    let directory = Arc::new(SqliteUserDirectory::new(pool));

    let config = BotConfig {
        token: Secret::new(cli.token),
        operator_id: cli.operator_id,
        api_url: cli.api_url,
    };

    let cancel = bot::start_polling(config, directory).await?;

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    cancel.cancel();

    Ok(())
}
