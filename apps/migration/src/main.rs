//! Migration CLI tool.
//!
//! Connects with `DATABASE_URL`; `DATABASE_SCHEMA` selects the target schema.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    tracing::info!("Running travel journal migrations");

    cli::run_cli(migration::Migrator).await;
}
