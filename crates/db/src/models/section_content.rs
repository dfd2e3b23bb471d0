use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

/// Public pages whose free-form sections can be edited in the admin panel.
#[derive(Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display)]
#[sqlx(type_name = "page", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Page {
    Home,
    TreeSolutions,
    Services,
    Collection,
    Projects,
    About,
    Contact,
    Hospitality,
    Flowers,
    Styling,
}

/// One value in a section body. Either a text-like field (copy, URL) or a
/// list of sub-records sharing the same flat string shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
pub enum SectionValue {
    Text(String),
    Items(Vec<BTreeMap<String, String>>),
}

/// Rendering/editing hint for a section value; dispatch on this instead of
/// inspecting the raw JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    ShortText,
    LongText,
    Url,
    Items,
}

impl SectionValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Items(_) => ValueKind::Items,
            Self::Text(s)
                if s.starts_with("http://") || s.starts_with("https://") || s.starts_with('/') =>
            {
                ValueKind::Url
            }
            Self::Text(s) if s.chars().count() > 120 => ValueKind::LongText,
            Self::Text(_) => ValueKind::ShortText,
        }
    }
}

/// The open-ended body of a section: field name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(transparent)]
pub struct SectionBody(pub BTreeMap<String, SectionValue>);

/// A free-form editable block of marketing copy on a public page.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct SectionContent {
    pub id: Uuid,
    pub section_key: String,
    pub section_name: String,
    pub page: Page,
    /// JSON-serialized [`SectionBody`].
    pub content: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SectionContent {
    /// Parse the content JSON; malformed content renders as an empty body
    /// rather than an error.
    pub fn body(&self) -> SectionBody {
        serde_json::from_str(&self.content).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateSectionContent {
    pub section_key: String,
    pub section_name: String,
    pub page: Page,
    #[serde(default)]
    pub content: SectionBody,
}

const COLUMNS: &str =
    "id, section_key, section_name, page, content, is_published, created_at, updated_at";

impl SectionContent {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM section_content ORDER BY page ASC, section_key ASC"
        );
        sqlx::query_as::<_, Self>(&sql).fetch_all(pool).await
    }

    pub async fn find_published_by_page(
        pool: &SqlitePool,
        page: Page,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM section_content \
             WHERE page = $1 AND is_published = 1 \
             ORDER BY section_key ASC"
        );
        sqlx::query_as::<_, Self>(&sql).bind(page).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM section_content WHERE id = $1");
        sqlx::query_as::<_, Self>(&sql).bind(id).fetch_optional(pool).await
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreateSectionContent,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let content = serde_json::to_string(&data.content)
            .map_err(|e| sqlx::Error::Protocol(e.to_string()))?;
        let sql = format!(
            "INSERT INTO section_content (id, section_key, section_name, page, content) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql)
            .bind(id)
            .bind(&data.section_key)
            .bind(&data.section_name)
            .bind(data.page)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// Overwrite the body; the section editor always saves the whole map.
    pub async fn update_content(
        pool: &SqlitePool,
        id: Uuid,
        body: &SectionBody,
    ) -> Result<Self, sqlx::Error> {
        let content =
            serde_json::to_string(body).map_err(|e| sqlx::Error::Protocol(e.to_string()))?;
        let sql = format!(
            "UPDATE section_content SET content = $2, updated_at = datetime('now', 'subsec') \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql)
            .bind(id)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM section_content WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
