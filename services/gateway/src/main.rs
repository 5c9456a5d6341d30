mod auth;
mod config;
mod error;
mod handlers;
mod models;
mod recovery;
mod router;
mod state;
mod store;
mod trading;

use config::Config;
use matching_engine::BookRegistry;
use router::create_router;
use sqlx::postgres::PgPoolOptions;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let books = Arc::new(BookRegistry::new());
    recovery::rebuild_books(&pool, &books).await?;

    let port = config.port;
    let state = AppState::new(pool, books, config);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
