//! Media Storage Port - 出站端口
//!
//! 定义生成产物（插画、音频）的存储抽象，返回可对外访问的 URL

use async_trait::async_trait;
use thiserror::Error;

/// 媒体存储错误
#[derive(Debug, Error)]
pub enum MediaStorageError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),
}

/// 媒体类别，决定存储子目录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaCategory {
    Images,
    Audio,
}

impl MediaCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaCategory::Images => "images",
            MediaCategory::Audio => "audio",
        }
    }
}

/// MIME 类型对应的存储扩展名，未知类型按 png 处理
pub fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "audio/mpeg" => "mp3",
        "audio/wav" => "wav",
        _ => "png",
    }
}

/// Media Storage Port
#[async_trait]
pub trait MediaStoragePort: Send + Sync {
    /// 保存一份媒体数据，返回可访问的公开 URL
    async fn put(
        &self,
        data: &[u8],
        file_name: &str,
        content_type: &str,
        category: MediaCategory,
    ) -> Result<String, MediaStorageError>;
}
