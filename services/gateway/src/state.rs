use matching_engine::BookRegistry;
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub books: Arc<BookRegistry>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(pool: PgPool, books: Arc<BookRegistry>, config: Config) -> Self {
        Self {
            pool,
            books,
            config: Arc::new(config),
        }
    }
}
