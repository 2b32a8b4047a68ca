use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public view of a user account. The password hash never leaves the DB
/// layer; this is the shape the client stores after login.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub balance: f64,
    pub role: String,
    pub is_banned: bool,
    pub is_verified: bool,
    pub has_checkmark: bool,
    pub active_frame_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Game {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub age_rating: Option<String>,
    pub file_url: Option<String>,
    pub logo_url: Option<String>,
    pub publisher_login: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub price: f64,
    pub is_popular: bool,
}

/// Cosmetic avatar frame from the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub price: f64,
}

/// A game the user owns and has not listed for resale. `purchase_id` is the
/// ownership row id, which is what marketplace actions operate on.
#[derive(Debug, Clone, Serialize)]
pub struct OwnedGame {
    pub purchase_id: i32,
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub price: f64,
    pub file_url: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OwnedFrame {
    pub user_frame_id: i32,
    pub id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub price: f64,
}

/// Which ownership table a marketplace action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Game,
    Frame,
}

/// One resale offer on the peer-to-peer market. `id` is the ownership row id
/// (`purchases.id` or `user_frames.id` depending on `item_type`).
#[derive(Debug, Clone, Serialize)]
pub struct MarketListing {
    pub id: i32,
    pub item_type: ItemType,
    pub title: String,
    pub image_url: Option<String>,
    pub market_price: f64,
    pub seller_id: i32,
    pub seller_email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FriendInfo {
    pub id: i32,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub is_verified: bool,
    pub has_checkmark: bool,
    /// Image of the user's active avatar frame, if any.
    pub frame_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectMessage {
    pub id: i32,
    pub sender_id: i32,
    pub receiver_id: i32,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// User row as the admin console sees it.
#[derive(Debug, Clone, Serialize)]
pub struct AdminUser {
    pub id: i32,
    pub email: String,
    pub username: Option<String>,
    pub role: String,
    pub balance: f64,
    pub is_banned: bool,
    pub is_verified: bool,
    pub has_checkmark: bool,
    pub created_at: DateTime<Utc>,
}
