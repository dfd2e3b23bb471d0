use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

/// Coarse admin-panel role. Admins additionally manage users; editors
/// manage content only.
#[derive(Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display)]
#[sqlx(type_name = "app_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AppRole {
    Admin,
    Editor,
}

#[derive(Debug, Clone, FromRow, Serialize, TS)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateProfile {
    pub email: String,
    pub full_name: Option<String>,
    pub password_digest: String,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct UserRole {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: AppRole,
}

const PROFILE_COLUMNS: &str = "id, user_id, email, full_name, password_digest, created_at";

impl Profile {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at DESC");
        sqlx::query_as::<_, Self>(&sql).fetch_all(pool).await
    }

    pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE email = $1");
        sqlx::query_as::<_, Self>(&sql).bind(email).fetch_optional(pool).await
    }

    pub async fn find_by_user_id(
        pool: &SqlitePool,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Self>(&sql).bind(user_id).fetch_optional(pool).await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
            .fetch_one(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateProfile) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let sql = format!(
            "INSERT INTO profiles (id, user_id, email, full_name, password_digest) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {PROFILE_COLUMNS}"
        );
        sqlx::query_as::<_, Self>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(&data.email)
            .bind(&data.full_name)
            .bind(&data.password_digest)
            .fetch_one(pool)
            .await
    }
}

impl UserRole {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT id, user_id, role FROM user_roles")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_user_id(
        pool: &SqlitePool,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT id, user_id, role FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the user's role assignment: remove the existing row, then
    /// insert the new one (or nothing, revoking access).
    pub async fn replace_for_user(
        pool: &SqlitePool,
        user_id: Uuid,
        role: Option<AppRole>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        if let Some(role) = role {
            sqlx::query("INSERT INTO user_roles (id, user_id, role) VALUES ($1, $2, $3)")
                .bind(Uuid::new_v4())
                .bind(user_id)
                .bind(role)
                .execute(pool)
                .await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DBService;

    #[tokio::test]
    async fn role_replacement_is_delete_then_insert() {
        let db = DBService::new_in_memory().await.unwrap();
        let profile = Profile::create(
            &db.pool,
            &CreateProfile {
                email: "editor@district.example".to_string(),
                full_name: None,
                password_digest: "salt$digest".to_string(),
            },
        )
        .await
        .unwrap();

        UserRole::replace_for_user(&db.pool, profile.user_id, Some(AppRole::Editor))
            .await
            .unwrap();
        let role = UserRole::find_by_user_id(&db.pool, profile.user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(role.role, AppRole::Editor);

        UserRole::replace_for_user(&db.pool, profile.user_id, Some(AppRole::Admin))
            .await
            .unwrap();
        let role = UserRole::find_by_user_id(&db.pool, profile.user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(role.role, AppRole::Admin);

        UserRole::replace_for_user(&db.pool, profile.user_id, None)
            .await
            .unwrap();
        assert!(
            UserRole::find_by_user_id(&db.pool, profile.user_id)
                .await
                .unwrap()
                .is_none()
        );
    }
}
