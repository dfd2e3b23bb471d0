use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use utils::text::slugify;
use uuid::Uuid;

/// Fixed category set for collection items.
#[derive(Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display)]
#[sqlx(type_name = "collection_category")]
pub enum CollectionCategory {
    Trees,
    Flowers,
    #[sqlx(rename = "Leaves/Foliage")]
    #[serde(rename = "Leaves/Foliage")]
    #[strum(serialize = "Leaves/Foliage")]
    LeavesFoliage,
    #[sqlx(rename = "Green Walls")]
    #[serde(rename = "Green Walls")]
    #[strum(serialize = "Green Walls")]
    GreenWalls,
    #[sqlx(rename = "Trunks & Branches")]
    #[serde(rename = "Trunks & Branches")]
    #[strum(serialize = "Trunks & Branches")]
    TrunksBranches,
    Planters,
}

/// An artificial-greenery catalogue entry.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct CollectionItem {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub category: CollectionCategory,
    pub short_description: Option<String>,
    pub dimensions: Option<String>,
    pub materials: Option<String>,
    pub price: Option<String>,
    pub application: Option<String>,
    pub is_published: bool,
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateCollectionItem {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub category: CollectionCategory,
    pub short_description: Option<String>,
    pub dimensions: Option<String>,
    pub materials: Option<String>,
    pub price: Option<String>,
    pub application: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub display_order: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateCollectionItem {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub category: CollectionCategory,
    pub short_description: Option<String>,
    pub dimensions: Option<String>,
    pub materials: Option<String>,
    pub price: Option<String>,
    pub application: Option<String>,
    pub is_published: bool,
    pub display_order: i64,
}

const COLUMNS: &str = "id, name, slug, category, short_description, dimensions, materials, \
                       price, application, is_published, display_order, created_at, updated_at";

impl CollectionItem {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM collection_items ORDER BY display_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, Self>(&sql).fetch_all(pool).await
    }

    /// Published items, optionally narrowed to one category.
    pub async fn find_published(
        pool: &SqlitePool,
        category: Option<CollectionCategory>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        match category {
            Some(category) => {
                let sql = format!(
                    "SELECT {COLUMNS} FROM collection_items \
                     WHERE is_published = 1 AND category = $1 \
                     ORDER BY display_order ASC, created_at ASC"
                );
                sqlx::query_as::<_, Self>(&sql).bind(category).fetch_all(pool).await
            }
            None => {
                let sql = format!(
                    "SELECT {COLUMNS} FROM collection_items WHERE is_published = 1 \
                     ORDER BY display_order ASC, created_at ASC"
                );
                sqlx::query_as::<_, Self>(&sql).fetch_all(pool).await
            }
        }
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM collection_items WHERE id = $1");
        sqlx::query_as::<_, Self>(&sql).bind(id).fetch_optional(pool).await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM collection_items")
            .fetch_one(pool)
            .await
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreateCollectionItem,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let slug = match data.slug.as_deref() {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => slugify(&data.name),
        };
        let display_order = match data.display_order {
            Some(order) => order,
            None => Self::count(pool).await?,
        };
        let sql = format!(
            "INSERT INTO collection_items (id, name, slug, category, short_description, \
             dimensions, materials, price, application, is_published, display_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql)
            .bind(id)
            .bind(&data.name)
            .bind(slug)
            .bind(data.category)
            .bind(&data.short_description)
            .bind(&data.dimensions)
            .bind(&data.materials)
            .bind(&data.price)
            .bind(&data.application)
            .bind(data.is_published)
            .bind(display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateCollectionItem,
    ) -> Result<Self, sqlx::Error> {
        let slug = match data.slug.as_deref() {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => slugify(&data.name),
        };
        let sql = format!(
            "UPDATE collection_items SET name = $2, slug = $3, category = $4, \
             short_description = $5, dimensions = $6, materials = $7, price = $8, \
             application = $9, is_published = $10, display_order = $11, \
             updated_at = datetime('now', 'subsec') \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql)
            .bind(id)
            .bind(&data.name)
            .bind(slug)
            .bind(data.category)
            .bind(&data.short_description)
            .bind(&data.dimensions)
            .bind(&data.materials)
            .bind(&data.price)
            .bind(&data.application)
            .bind(data.is_published)
            .bind(data.display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn toggle_published(pool: &SqlitePool, id: Uuid) -> Result<Self, sqlx::Error> {
        let sql = format!(
            "UPDATE collection_items SET is_published = NOT is_published, \
             updated_at = datetime('now', 'subsec') \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql).bind(id).fetch_one(pool).await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM collection_items WHERE id = $1")
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

    fn item(name: &str, category: CollectionCategory, published: bool) -> CreateCollectionItem {
        CreateCollectionItem {
            name: name.to_string(),
            slug: None,
            category,
            short_description: None,
            dimensions: None,
            materials: None,
            price: None,
            application: None,
            is_published: published,
            display_order: None,
        }
    }

    #[tokio::test]
    async fn category_round_trips_through_text_column() {
        let db = DBService::new_in_memory().await.unwrap();
        let created = CollectionItem::create(
            &db.pool,
            &item("Ficus Wall", CollectionCategory::GreenWalls, true),
        )
        .await
        .unwrap();
        let fetched = CollectionItem::find_by_id(&db.pool, created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.category, CollectionCategory::GreenWalls);
    }

    #[tokio::test]
    async fn category_filter_applies_with_publish_predicate() {
        let db = DBService::new_in_memory().await.unwrap();
        CollectionItem::create(&db.pool, &item("Olive Tree", CollectionCategory::Trees, true))
            .await
            .unwrap();
        CollectionItem::create(&db.pool, &item("Draft Tree", CollectionCategory::Trees, false))
            .await
            .unwrap();
        CollectionItem::create(&db.pool, &item("Orchid", CollectionCategory::Flowers, true))
            .await
            .unwrap();

        let trees = CollectionItem::find_published(&db.pool, Some(CollectionCategory::Trees))
            .await
            .unwrap();
        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].name, "Olive Tree");

        let all = CollectionItem::find_published(&db.pool, None).await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
