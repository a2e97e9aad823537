//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping             GET   健康检查
//! - /api/story/generate   POST  生成故事（multipart 表单，同步返回结果）
//! - /api/story/get        POST  获取故事详情
//! - /api/story/list       GET   列出公开故事
//! - /api/story/delete     POST  删除故事
//! - /api/audio/preview    POST  单段文本合成试听
//! - /media/*              GET   生成产物静态文件（server 层挂载）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/story", story_routes())
        .route("/audio/preview", post(handlers::preview_narration))
}

/// Story 路由
fn story_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate", post(handlers::generate_story))
        .route("/get", post(handlers::get_story))
        .route("/list", get(handlers::list_stories))
        .route("/delete", post(handlers::delete_story))
}
