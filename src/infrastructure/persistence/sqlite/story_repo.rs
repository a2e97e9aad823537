//! SQLite Story Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{
    RepositoryError, StoryMetadata, StoryRecord, StoryRepositoryPort,
};
use crate::domain::story::{SceneSummary, Story};

/// SQLite Story Repository
pub struct SqliteStoryRepository {
    pool: DbPool,
}

impl SqliteStoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct StoryRow {
    id: String,
    story: String,
    image_urls: String,
    audio_urls: String,
    scenes: String,
    metadata: String,
    is_public: i64,
    created_at: String,
    updated_at: String,
}

fn parse_json<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, RepositoryError> {
    serde_json::from_str(raw).map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

impl TryFrom<StoryRow> for StoryRecord {
    type Error = RepositoryError;

    fn try_from(row: StoryRow) -> Result<Self, Self::Error> {
        Ok(StoryRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            story: parse_json::<Story>(&row.story)?,
            image_urls: parse_json::<Vec<String>>(&row.image_urls)?,
            audio_urls: parse_json::<Vec<String>>(&row.audio_urls)?,
            scenes: parse_json::<Vec<SceneSummary>>(&row.scenes)?,
            metadata: parse_json::<StoryMetadata>(&row.metadata)?,
            is_public: row.is_public != 0,
            created_at: parse_time(&row.created_at)?,
            updated_at: parse_time(&row.updated_at)?,
        })
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, RepositoryError> {
    serde_json::to_string(value).map_err(|e| RepositoryError::SerializationError(e.to_string()))
}


#[async_trait]
impl StoryRepositoryPort for SqliteStoryRepository {
    async fn save(&self, record: &StoryRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO stories (id, story, image_urls, audio_urls, scenes, metadata, is_public, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                story = excluded.story,
                image_urls = excluded.image_urls,
                audio_urls = excluded.audio_urls,
                scenes = excluded.scenes,
                metadata = excluded.metadata,
                is_public = excluded.is_public,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(record.id.to_string())
        .bind(to_json(&record.story)?)
        .bind(to_json(&record.image_urls)?)
        .bind(to_json(&record.audio_urls)?)
        .bind(to_json(&record.scenes)?)
        .bind(to_json(&record.metadata)?)
        .bind(record.is_public as i64)
        .bind(record.created_at.to_rfc3339())
        .bind(record.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<StoryRecord>, RepositoryError> {
        let row: Option<StoryRow> = sqlx::query_as(
            "SELECT id, story, image_urls, audio_urls, scenes, metadata, is_public, created_at, updated_at FROM stories WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(StoryRecord::try_from).transpose()
    }

    async fn list_public(&self) -> Result<Vec<StoryRecord>, RepositoryError> {
        let rows: Vec<StoryRow> = sqlx::query_as(
            "SELECT id, story, image_urls, audio_urls, scenes, metadata, is_public, created_at, updated_at FROM stories WHERE is_public = 1 ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(StoryRecord::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM stories WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::story::{fallback_plan, Story};
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    async fn repo() -> SqliteStoryRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteStoryRepository::new(pool)
    }

    fn record(is_public: bool) -> StoryRecord {
        let plan = fallback_plan("Mira", "firefighter", 3);
        let story = Story::fallback_from_plan("Mira", "firefighter", &plan);
        let now = Utc::now();
        StoryRecord {
            id: Uuid::new_v4(),
            scenes: story.scene_summaries(),
            story,
            image_urls: vec!["/a.png".to_string(), "/b.png".to_string()],
            audio_urls: vec!["/a.mp3".to_string(), String::new()],
            metadata: StoryMetadata {
                name: "Mira".to_string(),
                dream: "firefighter".to_string(),
                personality: "brave".to_string(),
                voice_preset: "warm_narrator".to_string(),
                designed_voice_id: None,
                reading_level: "primary".to_string(),
                story_length: "short".to_string(),
                image_style: "storybook".to_string(),
                pace: "normal".to_string(),
                created_at: now,
            },
            is_public,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_save_and_find_round_trip() {
        let repo = repo().await;
        let record = record(true);

        repo.save(&record).await.unwrap();
        let loaded = repo.find_by_id(record.id).await.unwrap().unwrap();

        assert_eq!(loaded.story, record.story);
        assert_eq!(loaded.image_urls, record.image_urls);
        assert_eq!(loaded.audio_urls, record.audio_urls);
        assert_eq!(loaded.metadata, record.metadata);
        assert!(loaded.is_public);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repo = repo().await;
        assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_public_filters_private() {
        let repo = repo().await;
        let public = record(true);
        let private = record(false);

        repo.save(&public).await.unwrap();
        repo.save(&private).await.unwrap();

        let listed = repo.list_public().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, public.id);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let repo = repo().await;
        let record = record(true);

        repo.save(&record).await.unwrap();
        repo.delete(record.id).await.unwrap();

        assert!(repo.find_by_id(record.id).await.unwrap().is_none());
    }
}
