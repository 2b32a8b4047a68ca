use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde_json::json;

use arcade_types::api::{
    MarketListingsResponse, ProfileAction, ProfileQuery, ProfileQueryAction, ProfileResponse,
    PurchaseResponse, UpdateProfileRequest,
};
use arcade_types::models::Frame;

use crate::auth::AppState;
use crate::error::ApiError;
use crate::extract::ApiJson;

/// GET /profile - either a user's profile (`?user_id=`) or the marketplace
/// listings view (`?action=market_listings`). A GET naming neither falls
/// through to 405, as the original storefront did.
pub async fn get_profile(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> Result<Response, ApiError> {
    match (query.action, query.user_id) {
        (Some(ProfileQueryAction::MarketListings), _) => {
            let listings = state
                .db
                .market_listings()
                .await?
                .into_iter()
                .map(Into::into)
                .collect();

            Ok(Json(MarketListingsResponse { listings }).into_response())
        }
        (None, Some(user_id)) => {
            let user = state
                .db
                .get_user_by_id(user_id)
                .await?
                .ok_or_else(|| ApiError::NotFound(format!("user {user_id} not found")))?;

            let purchases = state
                .db
                .owned_games(user_id)
                .await?
                .into_iter()
                .map(Into::into)
                .collect();
            let frames = state
                .db
                .owned_frames(user_id)
                .await?
                .into_iter()
                .map(Into::into)
                .collect();

            Ok(Json(ProfileResponse {
                user: user.into(),
                purchases,
                frames,
            })
            .into_response())
        }
        (None, None) => Err(ApiError::MethodNotAllowed),
    }
}

/// PUT /profile - update display fields.
pub async fn update_profile(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> Result<Response, ApiError> {
    state
        .db
        .update_profile(
            req.user_id,
            req.username.as_deref(),
            req.display_name.as_deref(),
            req.avatar_url.as_deref(),
        )
        .await?;

    Ok(Json(json!({ "success": true })).into_response())
}

/// POST /profile - the storefront's action endpoint: frame shop, catalog
/// purchases, and the resale market. The action set is a closed enum, so the
/// match below is exhaustive by construction.
pub async fn profile_action(
    State(state): State<AppState>,
    ApiJson(action): ApiJson<ProfileAction>,
) -> Result<Response, ApiError> {
    match action {
        ProfileAction::GetFrames => {
            let frames: Vec<Frame> = state
                .db
                .list_frames()
                .await?
                .into_iter()
                .map(Into::into)
                .collect();
            Ok(Json(frames).into_response())
        }
        ProfileAction::GetUserFrames { user_id } => {
            let frames: Vec<Frame> = state
                .db
                .user_frames(user_id)
                .await?
                .into_iter()
                .map(Into::into)
                .collect();
            Ok(Json(frames).into_response())
        }
        ProfileAction::PurchaseFrame { user_id, frame_id } => {
            let new_balance = state.db.purchase_frame(user_id, frame_id).await?;
            Ok(Json(PurchaseResponse {
                success: true,
                new_balance,
            })
            .into_response())
        }
        ProfileAction::SetActiveFrame { user_id, frame_id } => {
            state.db.set_active_frame(user_id, frame_id).await?;
            Ok(Json(json!({ "success": true })).into_response())
        }
        ProfileAction::CreateFrame {
            name,
            image_url,
            price,
        } => {
            let id = state
                .db
                .create_frame(&name, image_url.as_deref(), price)
                .await?;
            Ok(Json(json!({ "id": id })).into_response())
        }
        ProfileAction::DeleteFrame { frame_id } => {
            state.db.delete_frame(frame_id).await?;
            Ok(Json(json!({ "success": true })).into_response())
        }
        ProfileAction::UpdateFramePrice { frame_id, price } => {
            state.db.set_frame_price(frame_id, price).await?;
            Ok(Json(json!({ "success": true })).into_response())
        }
        ProfileAction::Purchase { user_id, game_id } => {
            let new_balance = state.db.purchase_game(user_id, game_id).await?;
            Ok(Json(PurchaseResponse {
                success: true,
                new_balance,
            })
            .into_response())
        }
        ProfileAction::ListOnMarket {
            user_id,
            item_type,
            item_id,
            price,
        } => {
            state
                .db
                .list_on_market(user_id, item_type, item_id, price)
                .await?;
            Ok(Json(json!({ "success": true })).into_response())
        }
        ProfileAction::RemoveFromMarket {
            user_id,
            item_type,
            item_id,
        } => {
            state
                .db
                .remove_from_market(user_id, item_type, item_id)
                .await?;
            Ok(Json(json!({ "success": true })).into_response())
        }
        ProfileAction::BuyFromMarket {
            buyer_id,
            listing_id,
            item_type,
        } => {
            let new_balance = state
                .db
                .buy_from_market(buyer_id, listing_id, item_type)
                .await?;
            Ok(Json(PurchaseResponse {
                success: true,
                new_balance,
            })
            .into_response())
        }
    }
}
