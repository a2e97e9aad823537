//! SQLite Persistence

mod database;
mod story_repo;

pub use database::{create_pool, run_migrations, DatabaseConfig, DbPool};
pub use story_repo::SqliteStoryRepository;
