//! Librarium web server
//!
//! Serves the server-rendered catalog pages over the librarium domain
//! library. Configuration comes from the environment: `DATABASE_URL`,
//! `PORT`, `APP_ENV`.

mod error;
mod extract;
mod forms;
mod pages;
mod routes;
mod state;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use librarium::database::{self, DatabaseManager};

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "librarium=info,librarium_web_server=info,tower_http=info".into()
        }))
        .init();

    let manager = DatabaseManager::with_default_config().await?;
    database::ensure_schema(manager.pool()).await?;

    let state = AppState::new(manager.pool().clone());
    let app = routes::create_router(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3000);
    let addr = format!("0.0.0.0:{port}");
    info!("Catalog server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
