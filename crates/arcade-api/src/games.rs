use axum::{Json, extract::{Query, State}};
use serde_json::{Value, json};

use arcade_types::api::{
    DeleteGameQuery, GameStatus, GamesQuery, ModerateGameRequest, SubmitGameRequest,
    SubmitGameResponse,
};
use arcade_types::models::Game;

use crate::auth::AppState;
use crate::error::ApiError;
use crate::extract::ApiJson;

/// GET /games?status= - storefront and moderation listings, newest first.
pub async fn list_games(
    State(state): State<AppState>,
    Query(query): Query<GamesQuery>,
) -> Result<Json<Vec<Game>>, ApiError> {
    let games = state
        .db
        .list_games(query.status)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(games))
}

/// POST /games - publisher submission; always enters the queue as pending.
pub async fn submit_game(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SubmitGameRequest>,
) -> Result<Json<SubmitGameResponse>, ApiError> {
    if req.title.is_empty() {
        return Err(ApiError::BadRequest("Название не может быть пустым".into()));
    }

    let id = state.db.submit_game(&req).await?;
    Ok(Json(SubmitGameResponse {
        id,
        status: GameStatus::Pending,
    }))
}

/// PUT /games - moderation verdict.
pub async fn moderate_game(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ModerateGameRequest>,
) -> Result<Json<Value>, ApiError> {
    state.db.set_game_status(req.id, req.status).await?;
    Ok(Json(json!({ "success": true })))
}

/// DELETE /games?id=
pub async fn delete_game(
    State(state): State<AppState>,
    Query(query): Query<DeleteGameQuery>,
) -> Result<Json<Value>, ApiError> {
    state.db.delete_game(query.id).await?;
    Ok(Json(json!({ "success": true })))
}
