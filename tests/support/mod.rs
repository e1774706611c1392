//! Shared setup for store-backed integration tests.
//!
//! Tests run against the database named by `DATABASE_URL`. When the
//! variable is unset the test skips with a notice instead of failing, so
//! the suite stays green on machines without a provisioned Postgres.

use librarium::database::ensure_schema;
use sqlx::PgPool;

pub async fn test_pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("skipping store-backed test: DATABASE_URL is not set");
        return None;
    };
    let pool = PgPool::connect(&url)
        .await
        .expect("Failed to connect to test database");
    ensure_schema(&pool)
        .await
        .expect("Failed to create catalog schema");
    Some(pool)
}

/// Unique-per-run marker so repeated runs never collide on names.
pub fn unique(label: &str) -> String {
    format!("{label} {}", uuid::Uuid::new_v4().simple())
}
