use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct ClientLogo {
    pub id: Uuid,
    pub client_name: String,
    pub logo_url: String,
    pub website_url: Option<String>,
    pub is_published: bool,
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateClientLogo {
    pub client_name: String,
    pub logo_url: String,
    pub website_url: Option<String>,
    /// Logos go live immediately unless the form says otherwise.
    #[serde(default = "default_published")]
    pub is_published: bool,
    #[serde(default)]
    pub display_order: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateClientLogo {
    pub client_name: String,
    pub logo_url: String,
    pub website_url: Option<String>,
    pub is_published: bool,
    pub display_order: i64,
}

fn default_published() -> bool {
    true
}

const COLUMNS: &str =
    "id, client_name, logo_url, website_url, is_published, display_order, created_at, updated_at";

impl ClientLogo {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM client_logos ORDER BY display_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, Self>(&sql).fetch_all(pool).await
    }

    pub async fn find_published(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM client_logos WHERE is_published = 1 \
             ORDER BY display_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, Self>(&sql).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM client_logos WHERE id = $1");
        sqlx::query_as::<_, Self>(&sql).bind(id).fetch_optional(pool).await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM client_logos")
            .fetch_one(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateClientLogo) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let display_order = match data.display_order {
            Some(order) => order,
            None => Self::count(pool).await?,
        };
        let sql = format!(
            "INSERT INTO client_logos (id, client_name, logo_url, website_url, is_published, \
             display_order) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql)
            .bind(id)
            .bind(&data.client_name)
            .bind(&data.logo_url)
            .bind(&data.website_url)
            .bind(data.is_published)
            .bind(display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateClientLogo,
    ) -> Result<Self, sqlx::Error> {
        let sql = format!(
            "UPDATE client_logos SET client_name = $2, logo_url = $3, website_url = $4, \
             is_published = $5, display_order = $6, updated_at = datetime('now', 'subsec') \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql)
            .bind(id)
            .bind(&data.client_name)
            .bind(&data.logo_url)
            .bind(&data.website_url)
            .bind(data.is_published)
            .bind(data.display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn toggle_published(pool: &SqlitePool, id: Uuid) -> Result<Self, sqlx::Error> {
        let sql = format!(
            "UPDATE client_logos SET is_published = NOT is_published, \
             updated_at = datetime('now', 'subsec') \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql).bind(id).fetch_one(pool).await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM client_logos WHERE id = $1")
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
    async fn logos_default_to_published() {
        let db = DBService::new_in_memory().await.unwrap();
        let payload: CreateClientLogo = serde_json::from_str(
            r#"{"client_name": "Four Seasons", "logo_url": "https://cdn.example/fs.png", "website_url": null}"#,
        )
        .unwrap();
        assert!(payload.is_published);

        let logo = ClientLogo::create(&db.pool, &payload).await.unwrap();
        assert!(logo.is_published);
        assert_eq!(ClientLogo::find_published(&db.pool).await.unwrap().len(), 1);
    }
}
