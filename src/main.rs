//! Tax per-capita map server
//!
//! Loads the cleaned tax table and the census population table, merges
//! them once at startup, and serves the two-panel choropleth page.
//!
//! Endpoints:
//!   GET /                           - Two-panel map page
//!   GET /api/v1/health              - Health check
//!   GET /api/v1/panels              - Panel configurations
//!   GET /api/v1/panels/:id/figure   - Rendered figure (?item=CODE)

use anyhow::Result;
use axum::{routing::get, Router};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use tax_atlas::api::{handlers, MapService};
use tax_atlas::table::MergedTable;

#[derive(Parser, Debug)]
#[command(about = "Serve interactive per-capita state tax maps")]
struct Args {
    /// Cleaned tax table produced by the clean binary
    #[arg(long, default_value = "data/filteredTaxData2021.csv")]
    tax_file: PathBuf,

    /// Wide-format census population table
    #[arg(long, default_value = "data/statePopulations2021.csv")]
    population_file: PathBuf,

    /// Port to listen on
    #[arg(long, default_value_t = 8050)]
    port: u16,

    /// Verbose request and render logging
    #[arg(long, default_value_t = false)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(if args.debug {
            "debug,tower_http=debug"
        } else {
            "info"
        })
        .init();

    let table = MergedTable::load(&args.tax_file, &args.population_file)?;
    info!("Merged table ready: {} rows", table.rows().len());

    let service = Arc::new(MapService::new(table));
    let app = create_router(service);

    let addr: SocketAddr = format!("0.0.0.0:{}", args.port).parse()?;
    info!("Starting map server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router(service: Arc<MapService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/panels", get(handlers::get_panels))
        .route("/api/v1/panels/:id/figure", get(handlers::get_figure))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
