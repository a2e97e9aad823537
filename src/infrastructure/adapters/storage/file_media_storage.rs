//! File Media Storage - 文件系统媒体存储实现
//!
//! 实现 MediaStoragePort trait。生成产物写到本地媒体目录，
//! 由 HTTP 层以 /media 静态路径对外提供，返回的 URL 基于
//! 配置的公开 Base URL 拼接。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{MediaCategory, MediaStorageError, MediaStoragePort};

/// 文件系统媒体存储
pub struct FileMediaStorage {
    /// 存储根目录
    base_dir: PathBuf,
    /// 对外访问的 Base URL（不带末尾斜杠）
    public_base_url: String,
}

impl FileMediaStorage {
    pub fn new(base_dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        Self {
            base_dir: base_dir.into(),
            public_base_url,
        }
    }

    /// 获取存储根目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// 文件名必须是单段路径，拒绝目录穿越
    fn validate_file_name(file_name: &str) -> Result<(), MediaStorageError> {
        if file_name.is_empty()
            || file_name.contains('/')
            || file_name.contains('\\')
            || file_name.contains("..")
        {
            return Err(MediaStorageError::InvalidFileName(file_name.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl MediaStoragePort for FileMediaStorage {
    async fn put(
        &self,
        data: &[u8],
        file_name: &str,
        _content_type: &str,
        category: MediaCategory,
    ) -> Result<String, MediaStorageError> {
        Self::validate_file_name(file_name)?;

        let dir = self.base_dir.join(category.as_str());
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| MediaStorageError::IoError(e.to_string()))?;

        let path = dir.join(file_name);
        fs::write(&path, data)
            .await
            .map_err(|e| MediaStorageError::IoError(e.to_string()))?;

        tracing::debug!(
            path = %path.display(),
            size = data.len(),
            "Media file saved"
        );

        Ok(format!(
            "{}/media/{}/{}",
            self.public_base_url,
            category.as_str(),
            file_name
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_writes_file_and_builds_url() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileMediaStorage::new(dir.path(), "http://localhost:5080/");

        let url = storage
            .put(b"data", "a.mp3", "audio/mpeg", MediaCategory::Audio)
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:5080/media/audio/a.mp3");
        let written = std::fs::read(dir.path().join("audio/a.mp3")).unwrap();
        assert_eq!(written, b"data");
    }

    #[tokio::test]
    async fn test_put_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileMediaStorage::new(dir.path(), "http://localhost:5080");

        let err = storage
            .put(b"data", "../evil.mp3", "audio/mpeg", MediaCategory::Audio)
            .await
            .unwrap_err();

        assert!(matches!(err, MediaStorageError::InvalidFileName(_)));
    }

    #[tokio::test]
    async fn test_categories_use_separate_directories() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileMediaStorage::new(dir.path(), "http://x");

        storage
            .put(b"i", "f.png", "image/png", MediaCategory::Images)
            .await
            .unwrap();
        storage
            .put(b"a", "f.mp3", "audio/mpeg", MediaCategory::Audio)
            .await
            .unwrap();

        assert!(dir.path().join("images/f.png").exists());
        assert!(dir.path().join("audio/f.mp3").exists());
    }
}
