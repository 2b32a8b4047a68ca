use serde::{Deserialize, Serialize};

use crate::models::{ItemType, MarketListing, OwnedFrame, OwnedGame, User};

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AuthRequest {
    Register { email: String, password: String },
    Login { email: String, password: String },
}

// -- Games --

/// Catalog filter. `popular` narrows to approved games flagged popular;
/// `all` is the moderation view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatusFilter {
    Pending,
    #[default]
    Approved,
    Rejected,
    All,
    Popular,
}

#[derive(Debug, Deserialize)]
pub struct GamesQuery {
    #[serde(default)]
    pub status: GameStatusFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Pending,
    Approved,
    Rejected,
}

impl GameStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitGameRequest {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub age_rating: Option<String>,
    pub file_url: Option<String>,
    pub logo_url: Option<String>,
    pub publisher_login: Option<String>,
    pub contact_email: Option<String>,
    #[serde(default)]
    pub price: f64,
}

#[derive(Debug, Serialize)]
pub struct SubmitGameResponse {
    pub id: i32,
    pub status: GameStatus,
}

#[derive(Debug, Deserialize)]
pub struct ModerateGameRequest {
    pub id: i32,
    pub status: GameStatus,
}

#[derive(Debug, Deserialize)]
pub struct DeleteGameQuery {
    pub id: i32,
}

// -- Profile & marketplace --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileQueryAction {
    MarketListings,
}

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub user_id: Option<i32>,
    pub action: Option<ProfileQueryAction>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub user_id: i32,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Closed set of profile POST actions. Unknown `action` strings fail
/// deserialization at the boundary.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ProfileAction {
    GetFrames,
    GetUserFrames {
        user_id: i32,
    },
    PurchaseFrame {
        user_id: i32,
        frame_id: i32,
    },
    SetActiveFrame {
        user_id: i32,
        frame_id: i32,
    },
    CreateFrame {
        name: String,
        image_url: Option<String>,
        #[serde(default)]
        price: f64,
    },
    DeleteFrame {
        frame_id: i32,
    },
    UpdateFramePrice {
        frame_id: i32,
        price: f64,
    },
    Purchase {
        user_id: i32,
        game_id: i32,
    },
    ListOnMarket {
        user_id: i32,
        item_type: ItemType,
        item_id: i32,
        price: f64,
    },
    RemoveFromMarket {
        user_id: i32,
        item_type: ItemType,
        item_id: i32,
    },
    BuyFromMarket {
        buyer_id: i32,
        listing_id: i32,
        item_type: ItemType,
    },
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: User,
    pub purchases: Vec<OwnedGame>,
    pub frames: Vec<OwnedFrame>,
}

#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    pub success: bool,
    pub new_balance: f64,
}

#[derive(Debug, Serialize)]
pub struct MarketListingsResponse {
    pub listings: Vec<MarketListing>,
}

// -- Friends --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendsQueryAction {
    Friends,
    Search,
    Messages,
}

#[derive(Debug, Deserialize)]
pub struct FriendsQuery {
    pub action: Option<FriendsQueryAction>,
    pub user_id: Option<i32>,
    pub friend_id: Option<i32>,
    #[serde(default)]
    pub search: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FriendsAction {
    AddFriend {
        user_id: i32,
        friend_id: i32,
    },
    SendMessage {
        sender_id: i32,
        receiver_id: i32,
        message: String,
    },
}

// -- Admin --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminQueryAction {
    #[default]
    Users,
}

#[derive(Debug, Deserialize)]
pub struct AdminQuery {
    #[serde(default)]
    pub action: AdminQueryAction,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AdminAction {
    Ban { user_id: i32 },
    Unban { user_id: i32 },
    UpdateBalance { user_id: i32, balance: f64 },
    ToggleVerified { user_id: i32 },
    ToggleCheckmark { user_id: i32 },
    UpdateGamePrice { game_id: i32, price: f64 },
    TogglePopular { game_id: i32, is_popular: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_action_parses_tagged_body() {
        let action: ProfileAction = serde_json::from_str(
            r#"{"action": "buy_from_market", "buyer_id": 7, "listing_id": 12, "item_type": "frame"}"#,
        )
        .unwrap();

        match action {
            ProfileAction::BuyFromMarket {
                buyer_id,
                listing_id,
                item_type,
            } => {
                assert_eq!(buyer_id, 7);
                assert_eq!(listing_id, 12);
                assert_eq!(item_type, ItemType::Frame);
            }
            other => panic!("parsed wrong variant: {other:?}"),
        }
    }

    #[test]
    fn unknown_action_is_rejected() {
        let result = serde_json::from_str::<ProfileAction>(r#"{"action": "drain_treasury"}"#);
        assert!(result.is_err());

        let result = serde_json::from_str::<AdminAction>(r#"{"action": "sudo", "user_id": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn submit_price_defaults_to_zero() {
        let req: SubmitGameRequest =
            serde_json::from_str(r#"{"title": "Snake", "description": "classic"}"#).unwrap();
        assert_eq!(req.price, 0.0);
    }

    #[test]
    fn status_filter_defaults_to_approved() {
        let q: GamesQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.status, GameStatusFilter::Approved);
    }

    #[test]
    fn admin_query_defaults_to_users() {
        let q: AdminQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.action, AdminQueryAction::Users);
    }
}
