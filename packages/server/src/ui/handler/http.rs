//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    domain::{LanguageCode, MessageText, TranslationError},
    infrastructure::dto::http::{
        ErrorResponseDto, HealthDto, RoomSummaryDto, TranslateRequestDto, TranslateResponseDto,
    },
    ui::state::AppState,
    usecase::GetRoomDetailError,
};

type ApiError = (StatusCode, Json<ErrorResponseDto>);

fn api_error(status: StatusCode, message: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorResponseDto {
            error: message.to_string(),
        }),
    )
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Translate a single text, independent of any room
pub async fn translate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TranslateRequestDto>, JsonRejection>,
) -> Result<Json<TranslateResponseDto>, ApiError> {
    let Json(request) = payload.map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?;

    // DTO から Domain Model への変換
    let text = MessageText::new(request.text.clone())
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?;
    let target = LanguageCode::new(request.target_lang.clone())
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?;

    match state.translate_text_usecase.execute(text, target).await {
        Ok(translated_text) => Ok(Json(TranslateResponseDto {
            original_text: request.text,
            target_lang: request.target_lang,
            translated_text,
        })),
        Err(e @ TranslationError::TextTooLong { .. }) => Err(api_error(StatusCode::BAD_REQUEST, e)),
        Err(e @ TranslationError::UnsupportedLanguage(_)) => {
            Err(api_error(StatusCode::UNPROCESSABLE_ENTITY, e))
        }
        Err(e @ TranslationError::Unavailable(_)) => {
            tracing::warn!("Translation request failed: {}", e);
            Err(api_error(StatusCode::BAD_GATEWAY, e))
        }
    }
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(rooms.iter().map(RoomSummaryDto::from).collect())
}

/// Get one room by name
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<RoomSummaryDto>, StatusCode> {
    match state.get_room_detail_usecase.execute(room).await {
        Ok(room) => Ok(Json(RoomSummaryDto::from(&room))),
        Err(GetRoomDetailError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
    }
}
