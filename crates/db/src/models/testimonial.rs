use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Testimonial {
    pub id: Uuid,
    pub client_name: String,
    pub role: Option<String>,
    pub company: Option<String>,
    pub quote: String,
    pub client_logo: Option<String>,
    pub is_published: bool,
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateTestimonial {
    pub client_name: String,
    pub role: Option<String>,
    pub company: Option<String>,
    pub quote: String,
    pub client_logo: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub display_order: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateTestimonial {
    pub client_name: String,
    pub role: Option<String>,
    pub company: Option<String>,
    pub quote: String,
    pub client_logo: Option<String>,
    pub is_published: bool,
    pub display_order: i64,
}

const COLUMNS: &str = "id, client_name, role, company, quote, client_logo, is_published, \
                       display_order, created_at, updated_at";

impl Testimonial {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM testimonials ORDER BY display_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, Self>(&sql).fetch_all(pool).await
    }

    pub async fn find_published(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM testimonials WHERE is_published = 1 \
             ORDER BY display_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, Self>(&sql).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM testimonials WHERE id = $1");
        sqlx::query_as::<_, Self>(&sql).bind(id).fetch_optional(pool).await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM testimonials")
            .fetch_one(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateTestimonial) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let display_order = match data.display_order {
            Some(order) => order,
            None => Self::count(pool).await?,
        };
        let sql = format!(
            "INSERT INTO testimonials (id, client_name, role, company, quote, client_logo, \
             is_published, display_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql)
            .bind(id)
            .bind(&data.client_name)
            .bind(&data.role)
            .bind(&data.company)
            .bind(&data.quote)
            .bind(&data.client_logo)
            .bind(data.is_published)
            .bind(display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateTestimonial,
    ) -> Result<Self, sqlx::Error> {
        let sql = format!(
            "UPDATE testimonials SET client_name = $2, role = $3, company = $4, quote = $5, \
             client_logo = $6, is_published = $7, display_order = $8, \
             updated_at = datetime('now', 'subsec') \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql)
            .bind(id)
            .bind(&data.client_name)
            .bind(&data.role)
            .bind(&data.company)
            .bind(&data.quote)
            .bind(&data.client_logo)
            .bind(data.is_published)
            .bind(data.display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn toggle_published(pool: &SqlitePool, id: Uuid) -> Result<Self, sqlx::Error> {
        let sql = format!(
            "UPDATE testimonials SET is_published = NOT is_published, \
             updated_at = datetime('now', 'subsec') \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql).bind(id).fetch_one(pool).await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
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
    async fn publish_toggle_moves_testimonial_onto_public_surface() {
        let db = DBService::new_in_memory().await.unwrap();
        let testimonial = Testimonial::create(
            &db.pool,
            &CreateTestimonial {
                client_name: "Sarah Al-Rashid".to_string(),
                role: Some("Facilities Director".to_string()),
                company: Some("Aramco".to_string()),
                quote: "The attention to detail was remarkable.".to_string(),
                client_logo: None,
                is_published: false,
                display_order: None,
            },
        )
        .await
        .unwrap();

        assert!(Testimonial::find_published(&db.pool).await.unwrap().is_empty());

        Testimonial::toggle_published(&db.pool, testimonial.id).await.unwrap();

        let published = Testimonial::find_published(&db.pool).await.unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].client_name, "Sarah Al-Rashid");
    }
}
