use crate::models::{FriendRow, MessageRow};
use crate::{Database, DbError};

impl Database {
    pub async fn friends_of(&self, user_id: i32) -> Result<Vec<FriendRow>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT u.id, u.username, u.display_name, u.avatar_url,
                   u.is_verified, u.has_checkmark, af.image_url AS frame_url
            FROM friendships f
            JOIN users u ON u.id = f.friend_id
            LEFT JOIN frames af ON af.id = u.active_frame_id
            WHERE f.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn search_users(&self, user_id: i32, search: &str) -> Result<Vec<FriendRow>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT u.id, u.username, u.display_name, u.avatar_url,
                   u.is_verified, u.has_checkmark, af.image_url AS frame_url
            FROM users u
            LEFT JOIN frames af ON af.id = u.active_frame_id
            WHERE (u.username ILIKE $1 OR u.display_name ILIKE $1) AND u.id <> $2
            ORDER BY u.has_checkmark DESC, u.is_verified DESC, u.username ASC
            "#,
        )
        .bind(format!("%{search}%"))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn messages_between(
        &self,
        user_id: i32,
        friend_id: i32,
    ) -> Result<Vec<MessageRow>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT id, sender_id, receiver_id, message, created_at
            FROM messages
            WHERE (sender_id = $1 AND receiver_id = $2)
               OR (sender_id = $2 AND receiver_id = $1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(friend_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Friendships are symmetric: one add writes both (a,b) and (b,a) in a
    /// single transaction, and re-adding is a no-op.
    pub async fn add_friend(&self, user_id: i32, friend_id: i32) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO friendships (user_id, friend_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(friend_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO friendships (user_id, friend_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(friend_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn send_message(
        &self,
        sender_id: i32,
        receiver_id: i32,
        message: &str,
    ) -> Result<i32, DbError> {
        let id = sqlx::query_scalar(
            "INSERT INTO messages (sender_id, receiver_id, message) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(sender_id)
        .bind(receiver_id)
        .bind(message)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn add_friend_is_symmetric_and_idempotent() {
        let db = testutil::test_db().await;
        let a = testutil::create_user(&db, 0.0).await;
        let b = testutil::create_user(&db, 0.0).await;

        db.add_friend(a, b).await.unwrap();

        let a_friends = db.friends_of(a).await.unwrap();
        let b_friends = db.friends_of(b).await.unwrap();
        assert!(a_friends.iter().any(|f| f.id == b));
        assert!(b_friends.iter().any(|f| f.id == a));

        // Adding again produces no duplicates, in either direction.
        db.add_friend(a, b).await.unwrap();
        db.add_friend(b, a).await.unwrap();

        let a_friends = db.friends_of(a).await.unwrap();
        let b_friends = db.friends_of(b).await.unwrap();
        assert_eq!(a_friends.iter().filter(|f| f.id == b).count(), 1);
        assert_eq!(b_friends.iter().filter(|f| f.id == a).count(), 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn conversation_reads_both_directions_in_order() {
        let db = testutil::test_db().await;
        let a = testutil::create_user(&db, 0.0).await;
        let b = testutil::create_user(&db, 0.0).await;
        let outsider = testutil::create_user(&db, 0.0).await;

        db.send_message(a, b, "ping").await.unwrap();
        db.send_message(b, a, "pong").await.unwrap();
        db.send_message(a, outsider, "other thread").await.unwrap();

        let conversation = db.messages_between(a, b).await.unwrap();
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation[0].message, "ping");
        assert_eq!(conversation[1].message, "pong");
    }
}
