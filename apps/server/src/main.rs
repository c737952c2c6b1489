use anyhow::Context;
use clap::{Parser, Subcommand};
use natter_config::load as load_config;
use natter_database::{check_connectivity, redact};
use natter_gateway::{build_router, GatewayState};
use natter_runtime::{shutdown_signal, telemetry, BackendServices};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "natter-server")]
#[command(about = "Natter backend (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Connect to the document store, list its collections and disconnect
    CheckDb,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing().context("failed to initialise tracing")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::CheckDb => {
            if let Err(error) = check_db().await {
                eprintln!("error: {error:#}");
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

async fn run_server() -> anyhow::Result<()> {
    info!("starting Natter backend");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let app = build_router(GatewayState::new(services.store.clone()));

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error");

    services.shutdown().await;
    served?;

    info!("backend shut down");
    Ok(())
}

async fn check_db() -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;
    let url = redact(&config.database.url);

    let report = check_connectivity(&config.database)
        .await
        .with_context(|| format!("could not connect to {url}"))?;

    println!("Connected to {url} ({})", report.backend);
    if report.collections.is_empty() {
        println!("No collections found");
    } else {
        println!("Collections:");
        for name in &report.collections {
            println!("{name}");
        }
    }
    Ok(())
}
