//! view-router server.
//!
//! Serves a directory of views as GET routes.
//!
//! # Architecture Overview
//!
//! ```text
//!    views/ ──────┐      ┌──────────────┐      ┌──────────────┐
//!    public/ ─────┼─────▶│  ViewEngine  │─────▶│   AxumHost   │
//!    controllers/ ┘      │  (setup)     │      │ GET routes   │
//!                        └──────────────┘      └──────┬───────┘
//!                                                     │
//!     Client Request     ┌──────────────┐             ▼
//!     ──────────────────▶│  HttpServer  │──▶ context setter
//!                        │ trace, id,   │──▶ controller invoker
//!     ◀──────────────────│ timeout      │◀── JsonRenderer
//!     Client Response    └──────────────┘
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use view_router::config::{load_config, AppConfig};
use view_router::engine::VIEWS_SETTING;
use view_router::lifecycle::{signals, Shutdown};
use view_router::observability::logging;
use view_router::{AxumHost, HttpServer, ViewDescriptor, ViewEngine};

#[derive(Parser)]
#[command(name = "view-router")]
#[command(about = "Serve a directory of views as GET routes", long_about = None)]
struct Cli {
    /// TOML config file with [server] and [engine] tables.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project root that relative locations resolve against.
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// View root directory.
    #[arg(long)]
    views: Option<PathBuf>,

    /// Bind address, e.g. 127.0.0.1:8080.
    #[arg(short, long)]
    bind: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Register the view routes and serve them (default)
    Serve,
    /// Print the routes the view tree produces
    Routes,
    /// Print the effective engine configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(root) = cli.root {
        config.server.root = root;
    }
    if let Some(views) = cli.views {
        config.server.views = views;
    }
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
    }

    logging::init(&config.server.log_filter)?;
    tracing::info!("view-router v{} starting", env!("CARGO_PKG_VERSION"));

    let engine = ViewEngine::new(&config.server.root);

    if let Some(Commands::Config) = cli.command {
        let effective = engine.resolve_config(&config.engine);
        println!("{}", serde_json::to_string_pretty(&effective)?);
        return Ok(());
    }

    let mut host = AxumHost::new().set(VIEWS_SETTING, config.server.views.display().to_string());
    let descriptors = engine.register(&mut host, &config.engine)?;

    if let Some(Commands::Routes) = cli.command {
        print_routes(&descriptors);
        return Ok(());
    }

    tracing::info!(
        bind_address = %config.server.bind_address,
        request_timeout_secs = ?config.server.request_timeout_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config.server.clone(), host.into_router());
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        signals::shutdown_on_ctrl_c(&shutdown).await;
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn print_routes(descriptors: &[ViewDescriptor]) {
    for descriptor in descriptors {
        let controller = descriptor
            .controller()
            .map(|c| c.origin().to_string())
            .unwrap_or_else(|| "-".to_string());

        for url in descriptor.urls() {
            println!(
                "GET {:<32} view={} controller={} script={} style={}",
                url,
                descriptor.view_id(),
                controller,
                descriptor.script_asset().unwrap_or("-"),
                descriptor.style_asset().unwrap_or("-"),
            );
        }
    }
}
