use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use utils::text::slugify;
use uuid::Uuid;

/// A portfolio project shown on the public projects page.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub location: Option<String>,
    pub client_name: Option<String>,
    pub project_type: Option<String>,
    pub description: Option<String>,
    pub hero_image: Option<String>,
    pub video_url: Option<String>,
    pub is_published: bool,
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateProject {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub location: Option<String>,
    pub client_name: Option<String>,
    pub project_type: Option<String>,
    pub description: Option<String>,
    pub hero_image: Option<String>,
    pub video_url: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    /// Defaults to the current project count when unset.
    #[serde(default)]
    pub display_order: Option<i64>,
}

/// Full-form overwrite; the edit dialog always submits the whole shape.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateProject {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub location: Option<String>,
    pub client_name: Option<String>,
    pub project_type: Option<String>,
    pub description: Option<String>,
    pub hero_image: Option<String>,
    pub video_url: Option<String>,
    pub is_published: bool,
    pub display_order: i64,
}

const COLUMNS: &str = "id, title, slug, location, client_name, project_type, description, \
                       hero_image, video_url, is_published, display_order, created_at, updated_at";

impl Project {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM projects ORDER BY display_order ASC, created_at ASC");
        sqlx::query_as::<_, Self>(&sql).fetch_all(pool).await
    }

    pub async fn find_published(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM projects WHERE is_published = 1 \
             ORDER BY display_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, Self>(&sql).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Self>(&sql).bind(id).fetch_optional(pool).await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateProject) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let slug = resolve_slug(data.slug.as_deref(), &data.title);
        let display_order = match data.display_order {
            Some(order) => order,
            None => Self::count(pool).await?,
        };
        let sql = format!(
            "INSERT INTO projects (id, title, slug, location, client_name, project_type, \
             description, hero_image, video_url, is_published, display_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql)
            .bind(id)
            .bind(&data.title)
            .bind(slug)
            .bind(&data.location)
            .bind(&data.client_name)
            .bind(&data.project_type)
            .bind(&data.description)
            .bind(&data.hero_image)
            .bind(&data.video_url)
            .bind(data.is_published)
            .bind(display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateProject,
    ) -> Result<Self, sqlx::Error> {
        let slug = resolve_slug(data.slug.as_deref(), &data.title);
        let sql = format!(
            "UPDATE projects SET title = $2, slug = $3, location = $4, client_name = $5, \
             project_type = $6, description = $7, hero_image = $8, video_url = $9, \
             is_published = $10, display_order = $11, updated_at = datetime('now', 'subsec') \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql)
            .bind(id)
            .bind(&data.title)
            .bind(slug)
            .bind(&data.location)
            .bind(&data.client_name)
            .bind(&data.project_type)
            .bind(&data.description)
            .bind(&data.hero_image)
            .bind(&data.video_url)
            .bind(data.is_published)
            .bind(data.display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn toggle_published(pool: &SqlitePool, id: Uuid) -> Result<Self, sqlx::Error> {
        let sql = format!(
            "UPDATE projects SET is_published = NOT is_published, \
             updated_at = datetime('now', 'subsec') \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql).bind(id).fetch_one(pool).await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

fn resolve_slug(slug: Option<&str>, title: &str) -> String {
    match slug {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => slugify(title),
    }
}
