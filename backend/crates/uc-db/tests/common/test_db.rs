#![allow(dead_code)]

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct OrderRow {
    pub id: String,
    pub tenant_id: String,
    pub title: String,
    pub created_at: i64,
}

/// In-memory SQLite pool with a tenant-owned `orders` table
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    // In-memory databases live per connection
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    sqlx::query(
        "CREATE TABLE orders (
             id TEXT PRIMARY KEY,
             tenant_id TEXT NOT NULL,
             title TEXT NOT NULL,
             created_at INTEGER NOT NULL
         )",
    )
    .execute(&pool)
    .await
    .expect("Failed to create orders table");

    pool
}

/// Inserts `count` orders for `tenant_id`, with `created_at` 1..=count
pub async fn seed_orders(pool: &SqlitePool, tenant_id: &str, count: i64) {
    for n in 1..=count {
        sqlx::query("INSERT INTO orders (id, tenant_id, title, created_at) VALUES (?, ?, ?, ?)")
            .bind(format!("{tenant_id}-{n}"))
            .bind(tenant_id)
            .bind(format!("Order {n:03}"))
            .bind(n)
            .execute(pool)
            .await
            .expect("Failed to seed order");
    }
}
