//! Database row types, mapped 1:1 to Postgres columns. Distinct from the
//! arcade-types API models so the wire shapes can evolve without touching
//! SQL; the `From` impls below are the only bridge.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use arcade_types::models::{
    AdminUser, DirectMessage, Frame, FriendInfo, Game, ItemType, MarketListing, OwnedFrame,
    OwnedGame, User,
};

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub balance: f64,
    pub role: String,
    pub is_banned: bool,
    pub is_verified: bool,
    pub has_checkmark: bool,
    pub active_frame_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            username: row.username,
            display_name: row.display_name,
            avatar_url: row.avatar_url,
            balance: row.balance,
            role: row.role,
            is_banned: row.is_banned,
            is_verified: row.is_verified,
            has_checkmark: row.has_checkmark,
            active_frame_id: row.active_frame_id,
        }
    }
}

impl From<UserRow> for AdminUser {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            username: row.username,
            role: row.role,
            balance: row.balance,
            is_banned: row.is_banned,
            is_verified: row.is_verified,
            has_checkmark: row.has_checkmark,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct GameRow {
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

impl From<GameRow> for Game {
    fn from(row: GameRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            category: row.category,
            age_rating: row.age_rating,
            file_url: row.file_url,
            logo_url: row.logo_url,
            publisher_login: row.publisher_login,
            status: row.status,
            created_at: row.created_at,
            price: row.price,
            is_popular: row.is_popular,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct FrameRow {
    pub id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub price: f64,
}

impl From<FrameRow> for Frame {
    fn from(row: FrameRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            image_url: row.image_url,
            price: row.price,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct OwnedGameRow {
    pub purchase_id: i32,
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub price: f64,
    pub file_url: Option<String>,
    pub logo_url: Option<String>,
}

impl From<OwnedGameRow> for OwnedGame {
    fn from(row: OwnedGameRow) -> Self {
        Self {
            purchase_id: row.purchase_id,
            id: row.id,
            title: row.title,
            description: row.description,
            category: row.category,
            price: row.price,
            file_url: row.file_url,
            logo_url: row.logo_url,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct OwnedFrameRow {
    pub user_frame_id: i32,
    pub id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub price: f64,
}

impl From<OwnedFrameRow> for OwnedFrame {
    fn from(row: OwnedFrameRow) -> Self {
        Self {
            user_frame_id: row.user_frame_id,
            id: row.id,
            name: row.name,
            image_url: row.image_url,
            price: row.price,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ListingRow {
    pub id: i32,
    pub item_type: String,
    pub title: String,
    pub image_url: Option<String>,
    pub market_price: f64,
    pub seller_id: i32,
    pub seller_email: String,
}

impl From<ListingRow> for MarketListing {
    fn from(row: ListingRow) -> Self {
        let item_type = if row.item_type == "frame" {
            ItemType::Frame
        } else {
            ItemType::Game
        };
        Self {
            id: row.id,
            item_type,
            title: row.title,
            image_url: row.image_url,
            market_price: row.market_price,
            seller_id: row.seller_id,
            seller_email: row.seller_email,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct FriendRow {
    pub id: i32,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub is_verified: bool,
    pub has_checkmark: bool,
    pub frame_url: Option<String>,
}

impl From<FriendRow> for FriendInfo {
    fn from(row: FriendRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            display_name: row.display_name,
            avatar_url: row.avatar_url,
            is_verified: row.is_verified,
            has_checkmark: row.has_checkmark,
            frame_url: row.frame_url,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct MessageRow {
    pub id: i32,
    pub sender_id: i32,
    pub receiver_id: i32,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<MessageRow> for DirectMessage {
    fn from(row: MessageRow) -> Self {
        Self {
            id: row.id,
            sender_id: row.sender_id,
            receiver_id: row.receiver_id,
            message: row.message,
            created_at: row.created_at,
        }
    }
}
