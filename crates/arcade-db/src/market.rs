//! Purchases and the peer-to-peer resale market. Every money movement in
//! this module runs inside a single transaction with `FOR UPDATE` row locks
//! on the balances involved, so concurrent requests serialize instead of
//! double-spending.

use arcade_types::models::ItemType;

use crate::models::{ListingRow, OwnedFrameRow, OwnedGameRow};
use crate::{Database, DbError};

impl Database {
    // -- Owned items (profile view) --

    /// Games the user owns and has not listed for resale.
    pub async fn owned_games(&self, user_id: i32) -> Result<Vec<OwnedGameRow>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT p.id AS purchase_id, g.id, g.title, g.description, g.category,
                   g.price, g.file_url, g.logo_url
            FROM purchases p
            JOIN games g ON g.id = p.game_id
            WHERE p.user_id = $1 AND NOT p.is_on_market
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn owned_frames(&self, user_id: i32) -> Result<Vec<OwnedFrameRow>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT uf.id AS user_frame_id, f.id, f.name, f.image_url, f.price
            FROM user_frames uf
            JOIN frames f ON f.id = uf.frame_id
            WHERE uf.user_id = $1 AND NOT uf.is_on_market
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // -- Catalog purchases --

    /// Buy a game at catalog price: balance-checked debit plus an idempotent
    /// ownership insert, atomically. Returns the new balance.
    pub async fn purchase_game(&self, user_id: i32, game_id: i32) -> Result<f64, DbError> {
        let mut tx = self.pool.begin().await?;

        let price: f64 = sqlx::query_scalar("SELECT price FROM games WHERE id = $1")
            .bind(game_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DbError::NotFound {
                resource: "game",
                id: game_id,
            })?;

        let balance: f64 = sqlx::query_scalar("SELECT balance FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DbError::NotFound {
                resource: "user",
                id: user_id,
            })?;

        if balance < price {
            return Err(DbError::InsufficientBalance { balance, price });
        }

        sqlx::query(
            r#"
            INSERT INTO purchases (user_id, game_id, price)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, game_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(game_id)
        .bind(price)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE users SET balance = balance - $1 WHERE id = $2")
            .bind(price)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(balance - price)
    }

    pub async fn purchase_frame(&self, user_id: i32, frame_id: i32) -> Result<f64, DbError> {
        let mut tx = self.pool.begin().await?;

        let price: f64 = sqlx::query_scalar("SELECT price FROM frames WHERE id = $1")
            .bind(frame_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DbError::NotFound {
                resource: "frame",
                id: frame_id,
            })?;

        let balance: f64 = sqlx::query_scalar("SELECT balance FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DbError::NotFound {
                resource: "user",
                id: user_id,
            })?;

        if balance < price {
            return Err(DbError::InsufficientBalance { balance, price });
        }

        sqlx::query(
            r#"
            INSERT INTO user_frames (user_id, frame_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, frame_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(frame_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE users SET balance = balance - $1 WHERE id = $2")
            .bind(price)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(balance - price)
    }

    // -- Marketplace --

    pub async fn market_listings(&self) -> Result<Vec<ListingRow>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT p.id, 'game' AS item_type, g.title, g.logo_url AS image_url,
                   p.market_price, u.id AS seller_id, u.email AS seller_email
            FROM purchases p
            JOIN games g ON g.id = p.game_id
            JOIN users u ON u.id = p.user_id
            WHERE p.is_on_market AND p.market_price IS NOT NULL
            UNION ALL
            SELECT uf.id, 'frame' AS item_type, f.name AS title, f.image_url,
                   uf.market_price, u.id AS seller_id, u.email AS seller_email
            FROM user_frames uf
            JOIN frames f ON f.id = uf.frame_id
            JOIN users u ON u.id = uf.user_id
            WHERE uf.is_on_market AND uf.market_price IS NOT NULL
            ORDER BY market_price ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Flag an owned row as for sale. The `user_id` guard keeps users from
    /// listing items they do not own.
    pub async fn list_on_market(
        &self,
        user_id: i32,
        item_type: ItemType,
        item_id: i32,
        price: f64,
    ) -> Result<(), DbError> {
        let sql = match item_type {
            ItemType::Game => {
                "UPDATE purchases SET is_on_market = TRUE, market_price = $1
                 WHERE id = $2 AND user_id = $3"
            }
            ItemType::Frame => {
                "UPDATE user_frames SET is_on_market = TRUE, market_price = $1
                 WHERE id = $2 AND user_id = $3"
            }
        };

        sqlx::query(sql)
            .bind(price)
            .bind(item_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn remove_from_market(
        &self,
        user_id: i32,
        item_type: ItemType,
        item_id: i32,
    ) -> Result<(), DbError> {
        let sql = match item_type {
            ItemType::Game => {
                "UPDATE purchases SET is_on_market = FALSE, market_price = NULL
                 WHERE id = $1 AND user_id = $2"
            }
            ItemType::Frame => {
                "UPDATE user_frames SET is_on_market = FALSE, market_price = NULL
                 WHERE id = $1 AND user_id = $2"
            }
        };

        sqlx::query(sql)
            .bind(item_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Buy a listed item from its current owner. One transaction: lock the
    /// listing, lock both balance rows (id order, so concurrent trades cannot
    /// deadlock), check funds, move the money, move the ownership row.
    /// Returns the buyer's new balance.
    pub async fn buy_from_market(
        &self,
        buyer_id: i32,
        listing_id: i32,
        item_type: ItemType,
    ) -> Result<f64, DbError> {
        let mut tx = self.pool.begin().await?;

        let listing_sql = match item_type {
            ItemType::Game => {
                "SELECT user_id, game_id, market_price FROM purchases
                 WHERE id = $1 AND is_on_market AND market_price IS NOT NULL
                 FOR UPDATE"
            }
            ItemType::Frame => {
                "SELECT user_id, frame_id, market_price FROM user_frames
                 WHERE id = $1 AND is_on_market AND market_price IS NOT NULL
                 FOR UPDATE"
            }
        };

        // A concurrent buyer blocks here; once the first trade commits, the
        // row is gone and the second request sees NotFound.
        let (seller_id, item_id, price): (i32, i32, f64) = sqlx::query_as(listing_sql)
            .bind(listing_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DbError::NotFound {
                resource: "listing",
                id: listing_id,
            })?;

        let mut lock_ids = vec![buyer_id, seller_id];
        lock_ids.sort_unstable();
        lock_ids.dedup();

        let mut buyer_balance = 0.0;
        for id in lock_ids {
            let balance: f64 =
                sqlx::query_scalar("SELECT balance FROM users WHERE id = $1 FOR UPDATE")
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or(DbError::NotFound {
                        resource: "user",
                        id,
                    })?;
            if id == buyer_id {
                buyer_balance = balance;
            }
        }

        if buyer_balance < price {
            return Err(DbError::InsufficientBalance {
                balance: buyer_balance,
                price,
            });
        }

        sqlx::query("UPDATE users SET balance = balance - $1 WHERE id = $2")
            .bind(price)
            .bind(buyer_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE users SET balance = balance + $1 WHERE id = $2")
            .bind(price)
            .bind(seller_id)
            .execute(&mut *tx)
            .await?;

        match item_type {
            ItemType::Game => {
                sqlx::query("DELETE FROM purchases WHERE id = $1")
                    .bind(listing_id)
                    .execute(&mut *tx)
                    .await?;

                sqlx::query(
                    r#"
                    INSERT INTO purchases (user_id, game_id, price)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (user_id, game_id) DO NOTHING
                    "#,
                )
                .bind(buyer_id)
                .bind(item_id)
                .bind(price)
                .execute(&mut *tx)
                .await?;
            }
            ItemType::Frame => {
                sqlx::query("DELETE FROM user_frames WHERE id = $1")
                    .bind(listing_id)
                    .execute(&mut *tx)
                    .await?;

                sqlx::query(
                    r#"
                    INSERT INTO user_frames (user_id, frame_id)
                    VALUES ($1, $2)
                    ON CONFLICT (user_id, frame_id) DO NOTHING
                    "#,
                )
                .bind(buyer_id)
                .bind(item_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(buyer_balance - price)
    }
}

#[cfg(test)]
mod tests {
    use arcade_types::api::SubmitGameRequest;
    use arcade_types::models::ItemType;

    use crate::{Database, DbError, testutil};

    async fn create_game(db: &Database, price: f64) -> i32 {
        db.submit_game(&SubmitGameRequest {
            title: "Market Fixture".to_string(),
            description: "trade test".to_string(),
            category: None,
            age_rating: None,
            file_url: None,
            logo_url: None,
            publisher_login: None,
            contact_email: None,
            price,
        })
        .await
        .expect("create game")
    }

    async fn balance_of(db: &Database, user_id: i32) -> f64 {
        db.get_user_by_id(user_id)
            .await
            .expect("fetch user")
            .expect("user exists")
            .balance
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn purchase_debits_price_and_inserts_once() {
        let db = testutil::test_db().await;
        let user = testutil::create_user(&db, 100.0).await;
        let game = create_game(&db, 30.0).await;

        let new_balance = db.purchase_game(user, game).await.unwrap();
        assert_eq!(new_balance, 70.0);
        assert_eq!(balance_of(&db, user).await, 70.0);

        // Duplicate purchase debits again but never duplicates the row.
        db.purchase_game(user, game).await.unwrap();
        let owned = db.owned_games(user).await.unwrap();
        assert_eq!(owned.iter().filter(|g| g.id == game).count(), 1);

        db.delete_game(game).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insufficient_balance_mutates_nothing() {
        let db = testutil::test_db().await;
        let user = testutil::create_user(&db, 5.0).await;
        let game = create_game(&db, 30.0).await;

        let err = db.purchase_game(user, game).await.unwrap_err();
        assert!(matches!(err, DbError::InsufficientBalance { .. }));

        assert_eq!(balance_of(&db, user).await, 5.0);
        assert!(db.owned_games(user).await.unwrap().is_empty());

        db.delete_game(game).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn market_trade_conserves_total_balance() {
        let db = testutil::test_db().await;
        let seller = testutil::create_user(&db, 50.0).await;
        let buyer = testutil::create_user(&db, 100.0).await;
        let game = create_game(&db, 10.0).await;

        db.purchase_game(seller, game).await.unwrap();
        let owned = db.owned_games(seller).await.unwrap();
        let purchase_id = owned[0].purchase_id;

        db.list_on_market(seller, ItemType::Game, purchase_id, 25.0)
            .await
            .unwrap();

        let total_before = balance_of(&db, seller).await + balance_of(&db, buyer).await;

        let new_balance = db
            .buy_from_market(buyer, purchase_id, ItemType::Game)
            .await
            .unwrap();
        assert_eq!(new_balance, 75.0);

        let total_after = balance_of(&db, seller).await + balance_of(&db, buyer).await;
        assert_eq!(total_before, total_after);

        // Ownership moved: seller lost the row, buyer gained exactly one.
        assert!(db.owned_games(seller).await.unwrap().is_empty());
        let buyer_owned = db.owned_games(buyer).await.unwrap();
        assert_eq!(buyer_owned.iter().filter(|g| g.id == game).count(), 1);

        // Listing is gone from the market.
        let listings = db.market_listings().await.unwrap();
        assert!(!listings.iter().any(|l| l.id == purchase_id));

        db.delete_game(game).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn buying_missing_listing_is_not_found_and_mutates_nothing() {
        let db = testutil::test_db().await;
        let buyer = testutil::create_user(&db, 100.0).await;

        let err = db
            .buy_from_market(buyer, i32::MAX, ItemType::Game)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        assert_eq!(balance_of(&db, buyer).await, 100.0);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delisted_item_cannot_be_bought() {
        let db = testutil::test_db().await;
        let seller = testutil::create_user(&db, 50.0).await;
        let buyer = testutil::create_user(&db, 100.0).await;
        let game = create_game(&db, 10.0).await;

        db.purchase_game(seller, game).await.unwrap();
        let purchase_id = db.owned_games(seller).await.unwrap()[0].purchase_id;

        db.list_on_market(seller, ItemType::Game, purchase_id, 25.0)
            .await
            .unwrap();
        db.remove_from_market(seller, ItemType::Game, purchase_id)
            .await
            .unwrap();

        let err = db
            .buy_from_market(buyer, purchase_id, ItemType::Game)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        assert_eq!(balance_of(&db, buyer).await, 100.0);
        assert_eq!(balance_of(&db, seller).await, 40.0);

        db.delete_game(game).await.unwrap();
    }
}
