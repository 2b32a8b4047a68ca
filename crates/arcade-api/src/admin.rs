//! Admin console endpoints. There is no server-side authorization here;
//! the client gates the console on `role == "admin"`, matching the original
//! storefront.

use axum::{Json, extract::{Query, State}};
use serde_json::{Value, json};

use arcade_types::api::{AdminAction, AdminQuery, AdminQueryAction};
use arcade_types::models::AdminUser;

use crate::auth::AppState;
use crate::error::ApiError;
use crate::extract::ApiJson;

/// GET /admin?action=users[&search=] - user list for the console.
pub async fn admin_query(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
) -> Result<Json<Vec<AdminUser>>, ApiError> {
    match query.action {
        AdminQueryAction::Users => {
            let users = state
                .db
                .list_users(query.search.as_deref())
                .await?
                .into_iter()
                .map(Into::into)
                .collect();

            Ok(Json(users))
        }
    }
}

/// PUT /admin - moderation and pricing actions.
pub async fn admin_action(
    State(state): State<AppState>,
    ApiJson(action): ApiJson<AdminAction>,
) -> Result<Json<Value>, ApiError> {
    match action {
        AdminAction::Ban { user_id } => state.db.set_banned(user_id, true).await?,
        AdminAction::Unban { user_id } => state.db.set_banned(user_id, false).await?,
        AdminAction::UpdateBalance { user_id, balance } => {
            state.db.set_balance(user_id, balance).await?
        }
        AdminAction::ToggleVerified { user_id } => state.db.toggle_verified(user_id).await?,
        AdminAction::ToggleCheckmark { user_id } => state.db.toggle_checkmark(user_id).await?,
        AdminAction::UpdateGamePrice { game_id, price } => {
            state.db.set_game_price(game_id, price).await?
        }
        AdminAction::TogglePopular {
            game_id,
            is_popular,
        } => state.db.set_game_popular(game_id, is_popular).await?,
    }

    Ok(Json(json!({ "success": true })))
}
