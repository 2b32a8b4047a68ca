use crate::models::FrameRow;
use crate::{Database, DbError};

impl Database {
    pub async fn list_frames(&self) -> Result<Vec<FrameRow>, DbError> {
        let rows = sqlx::query_as(
            "SELECT id, name, image_url, price FROM frames ORDER BY price ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Every frame the user owns, listed or not.
    pub async fn user_frames(&self, user_id: i32) -> Result<Vec<FrameRow>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT f.id, f.name, f.image_url, f.price
            FROM user_frames uf
            JOIN frames f ON f.id = uf.frame_id
            WHERE uf.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create_frame(
        &self,
        name: &str,
        image_url: Option<&str>,
        price: f64,
    ) -> Result<i32, DbError> {
        let id = sqlx::query_scalar(
            "INSERT INTO frames (name, image_url, price) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(name)
        .bind(image_url)
        .bind(price)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn delete_frame(&self, id: i32) -> Result<(), DbError> {
        sqlx::query("DELETE FROM frames WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn set_frame_price(&self, id: i32, price: f64) -> Result<(), DbError> {
        sqlx::query("UPDATE frames SET price = $1 WHERE id = $2")
            .bind(price)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
