//! # Postgres
//!
//! The shared relational store. Postgres owns concurrency control,
//! durability, and multi-writer semantics; this module's whole contract with
//! it is one parameterized INSERT plus an idempotent `CREATE TABLE IF NOT
//! EXISTS` at startup.
//!
//! ## Schema
//!
//! One table, `orders`:
//! - `id`: auto-increment primary key
//! - `name`: orderer name, text
//! - `quantity`: positive integer (CHECK-enforced)
//! - `created_at`: timestamp, database default `now()`
//!
//! ## Connection handling
//!
//! A single pool is built at startup and held for the process lifetime.
//! Every operation checks a connection out and releases it right after;
//! `test_before_acquire` pings the connection first so a restarted database
//! does not hand out dead sockets. Timeouts are the sqlx defaults.

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::order::{NewOrder, Order};

/// The page and the CSV export both show this many of the newest orders.
pub const RECENT_ORDERS_LIMIT: i64 = 200;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS orders (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    quantity INTEGER NOT NULL CHECK (quantity > 0),
    created_at TIMESTAMP NOT NULL DEFAULT now()
)";

pub async fn connect(db_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .test_before_acquire(true)
        .connect(db_url)
        .await
}

/// Idempotent: safe to run at every startup, and restarting never touches
/// existing rows.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(SCHEMA).execute(pool).await?;
    Ok(())
}

/// The single write this application performs. `id` and `created_at` are
/// generated by the database; there is no retry on failure.
pub async fn insert_order(pool: &PgPool, order: &NewOrder) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO orders (name, quantity) VALUES ($1, $2)")
        .bind(&order.name)
        .bind(order.quantity)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn fetch_orders(pool: &PgPool, limit: i64) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(
        "SELECT id, name, quantity, created_at FROM orders ORDER BY id DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}
