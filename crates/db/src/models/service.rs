use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use utils::text::slugify;
use uuid::Uuid;

/// A service offering (plantscaping, green walls, maintenance, ...).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Service {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub hero_image: Option<String>,
    pub icon: Option<String>,
    pub is_published: bool,
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateService {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub hero_image: Option<String>,
    pub icon: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub display_order: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateService {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub hero_image: Option<String>,
    pub icon: Option<String>,
    pub is_published: bool,
    pub display_order: i64,
}

const COLUMNS: &str = "id, title, slug, short_description, long_description, hero_image, icon, \
                       is_published, display_order, created_at, updated_at";

impl Service {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM services ORDER BY display_order ASC, created_at ASC");
        sqlx::query_as::<_, Self>(&sql).fetch_all(pool).await
    }

    pub async fn find_published(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM services WHERE is_published = 1 \
             ORDER BY display_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, Self>(&sql).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM services WHERE id = $1");
        sqlx::query_as::<_, Self>(&sql).bind(id).fetch_optional(pool).await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM services")
            .fetch_one(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateService) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let slug = match data.slug.as_deref() {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => slugify(&data.title),
        };
        let display_order = match data.display_order {
            Some(order) => order,
            None => Self::count(pool).await?,
        };
        let sql = format!(
            "INSERT INTO services (id, title, slug, short_description, long_description, \
             hero_image, icon, is_published, display_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql)
            .bind(id)
            .bind(&data.title)
            .bind(slug)
            .bind(&data.short_description)
            .bind(&data.long_description)
            .bind(&data.hero_image)
            .bind(&data.icon)
            .bind(data.is_published)
            .bind(display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateService,
    ) -> Result<Self, sqlx::Error> {
        let slug = match data.slug.as_deref() {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => slugify(&data.title),
        };
        let sql = format!(
            "UPDATE services SET title = $2, slug = $3, short_description = $4, \
             long_description = $5, hero_image = $6, icon = $7, is_published = $8, \
             display_order = $9, updated_at = datetime('now', 'subsec') \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql)
            .bind(id)
            .bind(&data.title)
            .bind(slug)
            .bind(&data.short_description)
            .bind(&data.long_description)
            .bind(&data.hero_image)
            .bind(&data.icon)
            .bind(data.is_published)
            .bind(data.display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn toggle_published(pool: &SqlitePool, id: Uuid) -> Result<Self, sqlx::Error> {
        let sql = format!(
            "UPDATE services SET is_published = NOT is_published, \
             updated_at = datetime('now', 'subsec') \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql).bind(id).fetch_one(pool).await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
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
    async fn slug_derivation_handles_punctuation() {
        let db = DBService::new_in_memory().await.unwrap();
        let service = Service::create(
            &db.pool,
            &CreateService {
                title: "Tree Restoration & Refurbishment!".to_string(),
                slug: None,
                short_description: None,
                long_description: None,
                hero_image: None,
                icon: Some("tree-pine".to_string()),
                is_published: false,
                display_order: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(service.slug, "tree-restoration-refurbishment");
    }
}
