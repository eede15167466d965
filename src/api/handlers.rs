//! HTTP request handlers

use super::types::{
    CatalogResponse, ErrorResponse, GameSnapshot, MessageRequest, MessageResponse, SuccessResponse,
};
use super::AppState;
use crate::quiz::OPTION_COUNT;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Message exchange
        .route("/api/conversations/:id/messages", post(post_message))
        .route("/api/conversations/:id/game", get(get_game))
        .route("/api/conversations/:id", delete(delete_conversation))
        // Content
        .route("/api/catalog", get(get_catalog))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Conversations
// ============================================================

async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if request.is_empty() {
        return Err(AppError::BadRequest(
            "Message needs text, a caption or photos".to_string(),
        ));
    }

    let messages = state.bot.handle(&id, &request.into()).await;
    Ok(Json(MessageResponse { messages }))
}

async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameSnapshot>, AppError> {
    let game = state
        .bot
        .game(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("No active game in conversation {id}")))?;

    Ok(Json(game.into()))
}

async fn delete_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<SuccessResponse> {
    let success = state.bot.forget(&id).await;
    Json(SuccessResponse { success })
}

// ============================================================
// Catalog
// ============================================================

async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    let catalog = state.bot.catalog();
    let playable_riddles = catalog.playable_riddles().len();

    Json(CatalogResponse {
        entries: catalog.entries().to_vec(),
        riddles: catalog.riddles().len(),
        playable_riddles,
        quiz_ready: catalog.len() >= OPTION_COUNT && playable_riddles > 0,
    })
}

async fn get_version() -> &'static str {
    concat!("anitime-bot ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
