// memoshare - server-rendered pages for a memo-sharing site
// Entry point and server setup

use clap::Parser;
use memoshare::config::Settings;
use memoshare::{app, server};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "memoshare", version, about = "Server-rendered memo pages")]
struct Args {
    /// Configuration file (defaults to memoshare.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database path, overrides database.path
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Listen address, overrides server.bind
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memoshare=debug,tower_http=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(database) = args.database {
        settings.database.path = database;
    }
    if let Some(bind) = args.bind {
        settings.server.bind = bind;
    }

    tracing::info!("Starting memoshare");

    let bind = settings.server.bind.clone();
    let state = app::setup(settings).await?;
    let router = server::create_app(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router).await?;

    Ok(())
}
