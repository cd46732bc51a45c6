use std::sync::Arc;

use sqlx::PgPool;
use tera::Tera;

use crate::{config::Config, database, templates::load_templates};

/// Everything a request handler needs, built once at startup. Requests share
/// it through an [`Arc`]; nothing in here is mutable, so there is no teardown
/// beyond process exit.
pub struct AppState {
    pub config: Config,
    pub pool: PgPool,
    pub templates: Tera,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let pool = database::connect(&config.db_url)
            .await
            .expect("Could not reach the database configured in DB_URL!");
        database::ensure_schema(&pool)
            .await
            .expect("Could not initialize the orders table!");

        let templates = load_templates();

        Arc::new(Self {
            config,
            pool,
            templates,
        })
    }
}
