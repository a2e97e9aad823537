//! Storage Adapter - 媒体存储实现

mod file_media_storage;

pub use file_media_storage::FileMediaStorage;
