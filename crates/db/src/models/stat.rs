use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

/// A headline number for the stats band ("500+" projects, ...).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Stat {
    pub id: Uuid,
    pub label: String,
    pub value: String,
    pub unit: Option<String>,
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateStat {
    pub label: String,
    pub value: String,
    pub unit: Option<String>,
    #[serde(default)]
    pub display_order: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateStat {
    pub label: String,
    pub value: String,
    pub unit: Option<String>,
    pub display_order: i64,
}

const COLUMNS: &str = "id, label, value, unit, display_order, created_at, updated_at";

impl Stat {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM stats ORDER BY display_order ASC, created_at ASC");
        sqlx::query_as::<_, Self>(&sql).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM stats WHERE id = $1");
        sqlx::query_as::<_, Self>(&sql).bind(id).fetch_optional(pool).await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM stats").fetch_one(pool).await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateStat) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let display_order = match data.display_order {
            Some(order) => order,
            None => Self::count(pool).await?,
        };
        let sql = format!(
            "INSERT INTO stats (id, label, value, unit, display_order) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql)
            .bind(id)
            .bind(&data.label)
            .bind(&data.value)
            .bind(&data.unit)
            .bind(display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update(pool: &SqlitePool, id: Uuid, data: &UpdateStat) -> Result<Self, sqlx::Error> {
        let sql = format!(
            "UPDATE stats SET label = $2, value = $3, unit = $4, display_order = $5, \
             updated_at = datetime('now', 'subsec') \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql)
            .bind(id)
            .bind(&data.label)
            .bind(&data.value)
            .bind(&data.unit)
            .bind(data.display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stats WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
