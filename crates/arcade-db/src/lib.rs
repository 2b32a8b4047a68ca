pub mod frames;
pub mod games;
pub mod market;
pub mod migrations;
pub mod models;
pub mod social;
pub mod users;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// Bounded pool size. Handlers borrow a connection per query or transaction
/// and release it on every exit path.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} {id}")]
    NotFound { resource: &'static str, id: i32 },

    #[error("insufficient balance: have {balance}, need {price}")]
    InsufficientBalance { balance: f64, price: f64 },
}

pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to Postgres and bring the schema up to date.
    pub async fn connect(database_url: &str) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS)
            .connect(database_url)
            .await?;

        migrations::run(&pool).await?;

        info!("Database pool ready");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::Database;

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    pub async fn test_db() -> Database {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        Database::connect(&url).await.expect("connect failed")
    }

    /// Insert a user with a unique throwaway email and the given balance.
    pub async fn create_user(db: &Database, balance: f64) -> i32 {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before epoch")
            .as_nanos();
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let email = format!("test-{nanos}-{n}@example.com");

        let row = db.create_user(&email, "not-a-real-hash").await.expect("create user");
        db.set_balance(row.id, balance).await.expect("set balance");
        row.id
    }
}
