use arcade_types::api::{GameStatus, GameStatusFilter, SubmitGameRequest};

use crate::models::GameRow;
use crate::{Database, DbError};

impl Database {
    pub async fn list_games(&self, filter: GameStatusFilter) -> Result<Vec<GameRow>, DbError> {
        let rows = match filter {
            GameStatusFilter::All => {
                sqlx::query_as(
                    r#"
                    SELECT id, title, description, category, age_rating, file_url, logo_url,
                           publisher_login, status, created_at, price, is_popular
                    FROM games
                    ORDER BY created_at DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
            GameStatusFilter::Popular => {
                sqlx::query_as(
                    r#"
                    SELECT id, title, description, category, age_rating, file_url, logo_url,
                           publisher_login, status, created_at, price, is_popular
                    FROM games
                    WHERE status = 'approved' AND is_popular
                    ORDER BY created_at DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
            GameStatusFilter::Pending | GameStatusFilter::Approved | GameStatusFilter::Rejected => {
                let status = match filter {
                    GameStatusFilter::Pending => "pending",
                    GameStatusFilter::Rejected => "rejected",
                    _ => "approved",
                };
                sqlx::query_as(
                    r#"
                    SELECT id, title, description, category, age_rating, file_url, logo_url,
                           publisher_login, status, created_at, price, is_popular
                    FROM games
                    WHERE status = $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }

    /// New submissions always enter the moderation queue as `pending`.
    pub async fn submit_game(&self, req: &SubmitGameRequest) -> Result<i32, DbError> {
        let id = sqlx::query_scalar(
            r#"
            INSERT INTO games (title, description, category, age_rating, file_url, logo_url,
                               publisher_login, contact_email, status, price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending', $9)
            RETURNING id
            "#,
        )
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.category.as_deref())
        .bind(req.age_rating.as_deref())
        .bind(req.file_url.as_deref())
        .bind(req.logo_url.as_deref())
        .bind(req.publisher_login.as_deref())
        .bind(req.contact_email.as_deref())
        .bind(req.price)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn set_game_status(&self, id: i32, status: GameStatus) -> Result<(), DbError> {
        sqlx::query("UPDATE games SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn delete_game(&self, id: i32) -> Result<(), DbError> {
        sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn set_game_price(&self, id: i32, price: f64) -> Result<(), DbError> {
        sqlx::query("UPDATE games SET price = $1 WHERE id = $2")
            .bind(price)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn set_game_popular(&self, id: i32, is_popular: bool) -> Result<(), DbError> {
        sqlx::query("UPDATE games SET is_popular = $1 WHERE id = $2")
            .bind(is_popular)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use arcade_types::api::{GameStatus, GameStatusFilter, SubmitGameRequest};

    use crate::testutil;

    fn submission(title: &str) -> SubmitGameRequest {
        SubmitGameRequest {
            title: title.to_string(),
            description: "test game".to_string(),
            category: Some("puzzle".to_string()),
            age_rating: None,
            file_url: None,
            logo_url: None,
            publisher_login: Some("dev".to_string()),
            contact_email: None,
            price: 10.0,
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn submission_enters_pending_queue() {
        let db = testutil::test_db().await;

        let id = db.submit_game(&submission("Pending Quest")).await.unwrap();
        let pending = db.list_games(GameStatusFilter::Pending).await.unwrap();
        assert!(pending.iter().any(|g| g.id == id));

        // Not visible in the storefront until approved.
        let approved = db.list_games(GameStatusFilter::Approved).await.unwrap();
        assert!(!approved.iter().any(|g| g.id == id));

        db.set_game_status(id, GameStatus::Approved).await.unwrap();
        let approved = db.list_games(GameStatusFilter::Approved).await.unwrap();
        assert!(approved.iter().any(|g| g.id == id));

        db.delete_game(id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn popular_filter_requires_approval() {
        let db = testutil::test_db().await;

        let id = db.submit_game(&submission("Hidden Gem")).await.unwrap();
        db.set_game_popular(id, true).await.unwrap();

        let popular = db.list_games(GameStatusFilter::Popular).await.unwrap();
        assert!(!popular.iter().any(|g| g.id == id));

        db.set_game_status(id, GameStatus::Approved).await.unwrap();
        let popular = db.list_games(GameStatusFilter::Popular).await.unwrap();
        assert!(popular.iter().any(|g| g.id == id));

        db.delete_game(id).await.unwrap();
    }
}
