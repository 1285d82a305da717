//! studylog web server entry point.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use studylog_core::{Config, RecordService};
use studylog_web::{build_router, AppState};

#[derive(Parser)]
#[command(name = "studylog-web", version, about = "Personal productivity log server")]
struct Args {
    /// Bind address (overrides config)
    #[arg(long)]
    bind: Option<String>,

    /// Port (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Database file (overrides config)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Log filter, e.g. "info" or "studylog=debug"
    #[arg(long, env = "STUDYLOG_LOG", default_value = "info")]
    log: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Init once, before any tracing calls.
    tracing_subscriber::fmt()
        .with_env_filter(args.log.as_str())
        .compact()
        .init();

    if let Err(e) = run(args).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();

    let db_path = match args.db {
        Some(path) => path,
        None => config.database_path()?,
    };
    let bind = args.bind.unwrap_or_else(|| config.server.bind.clone());
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;

    let state = AppState {
        service: RecordService::new(&db_path),
        chart_width: config.chart.width,
        chart_height: config.chart.height,
    };
    let router = build_router(state);

    info!(db = %db_path.display(), "studylog listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
