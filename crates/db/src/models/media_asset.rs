use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

/// An uploaded file in the shared media library.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct MediaAsset {
    pub id: Uuid,
    pub file_name: String,
    /// Public URL under which the file is served.
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
    pub alt_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateMediaAsset {
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
}

const COLUMNS: &str = "id, file_name, file_path, file_type, file_size, alt_text, created_at";

impl MediaAsset {
    /// Library listing, newest first.
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM media_assets ORDER BY created_at DESC");
        sqlx::query_as::<_, Self>(&sql).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM media_assets WHERE id = $1");
        sqlx::query_as::<_, Self>(&sql).bind(id).fetch_optional(pool).await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM media_assets")
            .fetch_one(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateMediaAsset) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let sql = format!(
            "INSERT INTO media_assets (id, file_name, file_path, file_type, file_size) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql)
            .bind(id)
            .bind(&data.file_name)
            .bind(&data.file_path)
            .bind(&data.file_type)
            .bind(data.file_size)
            .fetch_one(pool)
            .await
    }

    pub async fn update_alt_text(
        pool: &SqlitePool,
        id: Uuid,
        alt_text: Option<&str>,
    ) -> Result<Self, sqlx::Error> {
        let sql = format!(
            "UPDATE media_assets SET alt_text = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql)
            .bind(id)
            .bind(alt_text)
            .fetch_one(pool)
            .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM media_assets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DBService;

    #[tokio::test]
    async fn create_then_update_alt_text() {
        let db = DBService::new_in_memory().await.unwrap();
        let asset = MediaAsset::create(
            &db.pool,
            &CreateMediaAsset {
                file_name: "hero.jpg".to_string(),
                file_path: "http://localhost:3001/storage/media/uploads/1-abc.jpg".to_string(),
                file_type: "image/jpeg".to_string(),
                file_size: 52_000,
            },
        )
        .await
        .unwrap();
        assert!(asset.alt_text.is_none());

        let updated = MediaAsset::update_alt_text(&db.pool, asset.id, Some("Lobby hero"))
            .await
            .unwrap();
        assert_eq!(updated.alt_text.as_deref(), Some("Lobby hero"));
    }
}
