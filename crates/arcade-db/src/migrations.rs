use sqlx::PgPool;
use tracing::info;

use crate::DbError;

/// Idempotent startup migrations. Frames come first: users carry a nullable
/// FK to them for the active avatar frame.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS frames (
            id          SERIAL PRIMARY KEY,
            name        TEXT NOT NULL,
            image_url   TEXT,
            price       DOUBLE PRECISION NOT NULL DEFAULT 0,
            created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id              SERIAL PRIMARY KEY,
            email           TEXT NOT NULL UNIQUE,
            password_hash   TEXT NOT NULL,
            username        TEXT,
            display_name    TEXT,
            avatar_url      TEXT,
            balance         DOUBLE PRECISION NOT NULL DEFAULT 0,
            role            TEXT NOT NULL DEFAULT 'user',
            is_banned       BOOLEAN NOT NULL DEFAULT FALSE,
            is_verified     BOOLEAN NOT NULL DEFAULT FALSE,
            has_checkmark   BOOLEAN NOT NULL DEFAULT FALSE,
            active_frame_id INTEGER REFERENCES frames(id) ON DELETE SET NULL,
            created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS games (
            id              SERIAL PRIMARY KEY,
            title           TEXT NOT NULL,
            description     TEXT NOT NULL,
            category        TEXT,
            age_rating      TEXT,
            file_url        TEXT,
            logo_url        TEXT,
            publisher_login TEXT,
            contact_email   TEXT,
            status          TEXT NOT NULL DEFAULT 'pending',
            price           DOUBLE PRECISION NOT NULL DEFAULT 0,
            is_popular      BOOLEAN NOT NULL DEFAULT FALSE,
            created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS purchases (
            id           SERIAL PRIMARY KEY,
            user_id      INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            game_id      INTEGER NOT NULL REFERENCES games(id) ON DELETE CASCADE,
            price        DOUBLE PRECISION NOT NULL DEFAULT 0,
            is_on_market BOOLEAN NOT NULL DEFAULT FALSE,
            market_price DOUBLE PRECISION,
            created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            UNIQUE (user_id, game_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_frames (
            id           SERIAL PRIMARY KEY,
            user_id      INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            frame_id     INTEGER NOT NULL REFERENCES frames(id) ON DELETE CASCADE,
            is_on_market BOOLEAN NOT NULL DEFAULT FALSE,
            market_price DOUBLE PRECISION,
            created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            UNIQUE (user_id, frame_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS friendships (
            user_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            friend_id  INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            PRIMARY KEY (user_id, friend_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS messages (
            id          SERIAL PRIMARY KEY,
            sender_id   INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            receiver_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            message     TEXT NOT NULL,
            created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_messages_pair
             ON messages (sender_id, receiver_id, created_at)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_purchases_market
             ON purchases (is_on_market) WHERE is_on_market",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_user_frames_market
             ON user_frames (is_on_market) WHERE is_on_market",
    )
    .execute(pool)
    .await?;

    info!("Database migrations complete");
    Ok(())
}
