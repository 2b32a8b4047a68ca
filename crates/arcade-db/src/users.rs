use crate::models::UserRow;
use crate::{Database, DbError};

impl Database {
    // -- Accounts --

    pub async fn create_user(&self, email: &str, password_hash: &str) -> Result<UserRow, DbError> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, username, display_name, avatar_url,
                      balance, role, is_banned, is_verified, has_checkmark,
                      active_frame_id, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>, DbError> {
        let row = sqlx::query_as(
            r#"
            SELECT id, email, password_hash, username, display_name, avatar_url,
                   balance, role, is_banned, is_verified, has_checkmark,
                   active_frame_id, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<UserRow>, DbError> {
        let row = sqlx::query_as(
            r#"
            SELECT id, email, password_hash, username, display_name, avatar_url,
                   balance, role, is_banned, is_verified, has_checkmark,
                   active_frame_id, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update_profile(
        &self,
        user_id: i32,
        username: Option<&str>,
        display_name: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<(), DbError> {
        sqlx::query(
            "UPDATE users SET username = $1, display_name = $2, avatar_url = $3 WHERE id = $4",
        )
        .bind(username)
        .bind(display_name)
        .bind(avatar_url)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn set_active_frame(&self, user_id: i32, frame_id: i32) -> Result<(), DbError> {
        sqlx::query("UPDATE users SET active_frame_id = $1 WHERE id = $2")
            .bind(frame_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // -- Admin console --

    pub async fn list_users(&self, search: Option<&str>) -> Result<Vec<UserRow>, DbError> {
        let rows = match search {
            Some(search) if !search.is_empty() => {
                sqlx::query_as(
                    r#"
                    SELECT id, email, password_hash, username, display_name, avatar_url,
                           balance, role, is_banned, is_verified, has_checkmark,
                           active_frame_id, created_at
                    FROM users
                    WHERE email ILIKE $1 OR username ILIKE $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(format!("%{search}%"))
                .fetch_all(&self.pool)
                .await?
            }
            _ => {
                sqlx::query_as(
                    r#"
                    SELECT id, email, password_hash, username, display_name, avatar_url,
                           balance, role, is_banned, is_verified, has_checkmark,
                           active_frame_id, created_at
                    FROM users
                    ORDER BY created_at DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }

    pub async fn set_banned(&self, user_id: i32, banned: bool) -> Result<(), DbError> {
        sqlx::query("UPDATE users SET is_banned = $1 WHERE id = $2")
            .bind(banned)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn set_balance(&self, user_id: i32, balance: f64) -> Result<(), DbError> {
        sqlx::query("UPDATE users SET balance = $1 WHERE id = $2")
            .bind(balance)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Self-inverse: applying twice restores the original flag.
    pub async fn toggle_verified(&self, user_id: i32) -> Result<(), DbError> {
        sqlx::query("UPDATE users SET is_verified = NOT is_verified WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn toggle_checkmark(&self, user_id: i32) -> Result<(), DbError> {
        sqlx::query("UPDATE users SET has_checkmark = NOT has_checkmark WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil;

    // Integration tests require a real database.
    // Run with: DATABASE_URL=postgres://... cargo test -p arcade-db -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn toggle_flags_are_self_inverse() {
        let db = testutil::test_db().await;
        let user = testutil::create_user(&db, 0.0).await;

        let before = db.get_user_by_id(user).await.unwrap().unwrap();

        db.toggle_verified(user).await.unwrap();
        db.toggle_checkmark(user).await.unwrap();
        let flipped = db.get_user_by_id(user).await.unwrap().unwrap();
        assert_eq!(flipped.is_verified, !before.is_verified);
        assert_eq!(flipped.has_checkmark, !before.has_checkmark);

        db.toggle_verified(user).await.unwrap();
        db.toggle_checkmark(user).await.unwrap();
        let restored = db.get_user_by_id(user).await.unwrap().unwrap();
        assert_eq!(restored.is_verified, before.is_verified);
        assert_eq!(restored.has_checkmark, before.has_checkmark);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ban_then_unban_restores_user() {
        let db = testutil::test_db().await;
        let user = testutil::create_user(&db, 0.0).await;

        db.set_banned(user, true).await.unwrap();
        assert!(db.get_user_by_id(user).await.unwrap().unwrap().is_banned);

        db.set_banned(user, false).await.unwrap();
        assert!(!db.get_user_by_id(user).await.unwrap().unwrap().is_banned);
    }
}
