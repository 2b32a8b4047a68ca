use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde_json::json;

use arcade_types::api::{FriendsAction, FriendsQuery, FriendsQueryAction};
use arcade_types::models::{DirectMessage, FriendInfo};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::extract::ApiJson;

/// GET /friends?action= - friend list, user search, or a conversation.
pub async fn friends_query(
    State(state): State<AppState>,
    Query(query): Query<FriendsQuery>,
) -> Result<Response, ApiError> {
    let Some(action) = query.action else {
        return Err(ApiError::MethodNotAllowed);
    };

    let user_id = query
        .user_id
        .ok_or_else(|| ApiError::BadRequest("user_id is required".into()))?;

    match action {
        FriendsQueryAction::Friends => {
            let friends: Vec<FriendInfo> = state
                .db
                .friends_of(user_id)
                .await?
                .into_iter()
                .map(Into::into)
                .collect();
            Ok(Json(friends).into_response())
        }
        FriendsQueryAction::Search => {
            let users: Vec<FriendInfo> = state
                .db
                .search_users(user_id, &query.search)
                .await?
                .into_iter()
                .map(Into::into)
                .collect();
            Ok(Json(users).into_response())
        }
        FriendsQueryAction::Messages => {
            let friend_id = query
                .friend_id
                .ok_or_else(|| ApiError::BadRequest("friend_id is required".into()))?;

            let messages: Vec<DirectMessage> = state
                .db
                .messages_between(user_id, friend_id)
                .await?
                .into_iter()
                .map(Into::into)
                .collect();
            Ok(Json(messages).into_response())
        }
    }
}

/// POST /friends - add a friendship or send a direct message.
pub async fn friends_action(
    State(state): State<AppState>,
    ApiJson(action): ApiJson<FriendsAction>,
) -> Result<Response, ApiError> {
    match action {
        FriendsAction::AddFriend { user_id, friend_id } => {
            state.db.add_friend(user_id, friend_id).await?;
            Ok(Json(json!({ "success": true })).into_response())
        }
        FriendsAction::SendMessage {
            sender_id,
            receiver_id,
            message,
        } => {
            let id = state.db.send_message(sender_id, receiver_id, &message).await?;
            Ok(Json(json!({ "success": true, "id": id })).into_response())
        }
    }
}
