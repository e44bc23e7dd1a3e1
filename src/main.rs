use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use engram::auth::StubAuthProvider;
use engram::config::{get_config, CliArgs};
use engram::render::BasicTypesetter;
use engram::{create_app, db, run_migrations, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads them
    if std::fs::metadata(".env").is_ok() {
        dotenv::dotenv().ok();
    }

    let args = CliArgs::parse();

    let default_filter = if args.debug { "engram=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Human-readable logs on stdout, structured JSON in a daily log file
    let file_appender = tracing_appender::rolling::daily("logs", "engram.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::fmt::layer().json().with_writer(file_writer))
        .init();

    let config = get_config(args);

    // Initialize the database pool and bring the schema up to date
    let pool = Arc::new(db::init_pool(&config.database_url));
    {
        let mut conn = pool.get()?;
        run_migrations(&mut conn);
    }

    let state = AppState::new(
        pool,
        Arc::new(StubAuthProvider::new()),
        Arc::new(BasicTypesetter::new()),
    );
    let app = create_app(state);

    let addr = config.bind_addr()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
