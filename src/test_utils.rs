//! Test utilities for Song Catalog
//!
//! Provides helpers for creating isolated test environments with:
//! - In-memory SQLite databases (one per test)
//! - AppState and CatalogService factories pointed at a stub song info service
//! - Test data generators

use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use std::time::Duration;

use crate::{
    config::{Config, LogFormat},
    db::entities::{music_group, song},
    services::{CatalogService, SongInfoService},
    state::AppState,
};

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_SONG_INFO_TOKEN: &str = "test-song-info-token";
pub const TEST_DB_TIMEOUT: Duration = Duration::from_secs(5);

/// Setup an in-memory SQLite database with all migrations applied
///
/// Each call creates a fresh, isolated database perfect for parallel testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    // Run all migrations
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create a test configuration pointing the song info client at `song_info_url`
pub fn test_config(song_info_url: &str) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 5000,
        api_key: TEST_API_KEY.to_string(),
        song_info_url: song_info_url.to_string(),
        song_info_token: Some(TEST_SONG_INFO_TOKEN.to_string()),
        song_info_timeout_secs: 5,
        db_timeout_secs: TEST_DB_TIMEOUT.as_secs(),
        log_format: LogFormat::Pretty,
    }
}

/// Create a CatalogService over a fresh database
pub async fn setup_test_catalog(song_info_url: &str) -> (CatalogService, DatabaseConnection) {
    let db = setup_test_db().await;
    let song_info = SongInfoService::new(
        song_info_url.to_string(),
        Some(TEST_SONG_INFO_TOKEN.to_string()),
        Duration::from_secs(5),
    )
    .expect("Failed to build song info client");

    (CatalogService::new(db.clone(), song_info, TEST_DB_TIMEOUT), db)
}

/// Create a complete test AppState with an isolated database
pub async fn setup_test_app_state(song_info_url: &str) -> AppState {
    let db = setup_test_db().await;
    AppState::new(db, test_config(song_info_url)).expect("Failed to build app state")
}

// ============================================================================
// Test Data Factories
// ============================================================================

/// Create a test music group in the database
pub async fn create_test_group(db: &DatabaseConnection, name: &str) -> music_group::Model {
    let group = music_group::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };

    group.insert(db).await.expect("Failed to insert test group")
}

/// Create a live test song in the database
pub async fn create_test_song(
    db: &DatabaseConnection,
    group_id: i32,
    name: &str,
    lines: &[&str],
) -> song::Model {
    let text = serde_json::to_string(lines).expect("Failed to encode lyric lines");
    let song = song::ActiveModel {
        name: Set(name.to_string()),
        group_id: Set(group_id),
        release_date: Set("16.07.2006".to_string()),
        text: Set(text),
        link: Set(format!("https://example.com/{}", name)),
        deleted: Set(None),
        ..Default::default()
    };

    song.insert(db).await.expect("Failed to insert test song")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn test_setup_test_db() {
        let db = setup_test_db().await;
        // Verify we can query the database (it has tables from migrations)
        let songs = song::Entity::find().all(&db).await.unwrap();
        assert_eq!(songs.len(), 0);
    }

    #[tokio::test]
    async fn test_create_test_song() {
        let db = setup_test_db().await;
        let group = create_test_group(&db, "Ryazan").await;
        let song = create_test_song(&db, group.id, "Skibidi", &["line1", "line2"]).await;

        assert_eq!(song.name, "Skibidi");
        assert_eq!(song.group_id, group.id);
        assert_eq!(song.text, r#"["line1","line2"]"#);
        assert!(song.deleted.is_none());
    }

    #[tokio::test]
    async fn test_parallel_databases() {
        // Run two database setups in parallel - they should not interfere
        let (db1, db2) = tokio::join!(setup_test_db(), setup_test_db());

        let group1 = create_test_group(&db1, "Group 1").await;
        let group2 = create_test_group(&db2, "Group 2").await;

        // Both should be ID 1 (separate databases)
        assert_eq!(group1.id, 1);
        assert_eq!(group2.id, 1);

        let db1_groups = music_group::Entity::find().all(&db1).await.unwrap();
        assert_eq!(db1_groups.len(), 1);
        assert_eq!(db1_groups[0].name, "Group 1");
    }
}
