//! Narration HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::PreviewNarration;
use crate::infrastructure::http::dto::{
    ApiResponse, PreviewNarrationRequest, PreviewNarrationResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 单段文本合成试听
pub async fn preview_narration(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PreviewNarrationRequest>,
) -> Result<Json<ApiResponse<PreviewNarrationResponse>>, ApiError> {
    let result = state
        .preview_narration_handler
        .handle(PreviewNarration {
            text: req.text,
            voice_id: req.voice_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(PreviewNarrationResponse {
        audio_url: result.audio_url,
        file_name: result.file_name,
    })))
}
