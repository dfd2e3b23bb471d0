//! Sessions and role resolution for the admin panel.
//!
//! Sessions are process-wide state: created at login, dropped at logout,
//! held in a concurrent map keyed by bearer token. Roles are read from
//! `user_roles` so a role change takes effect on the next request.

use std::sync::Arc;

use dashmap::DashMap;
use db::models::user::{AppRole, CreateProfile, Profile, UserRole};
use rand::{Rng, distributions::Alphanumeric};
use serde::Serialize;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// An authenticated admin-panel session.
#[derive(Debug, Clone, Serialize, TS)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
    pub email: String,
}

#[derive(Clone, Default)]
pub struct SessionService {
    sessions: Arc<DashMap<String, Session>>,
}

impl SessionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify credentials and open a session. Returns the session together
    /// with the user's current role, if any.
    pub async fn sign_in(
        &self,
        pool: &SqlitePool,
        email: &str,
        password: &str,
    ) -> Result<(Session, Option<AppRole>), AuthError> {
        let profile = Profile::find_by_email(pool, email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        if !verify_password(&profile.password_digest, password) {
            return Err(AuthError::InvalidCredentials);
        }

        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(48)
            .map(char::from)
            .collect();
        let session = Session {
            token: token.clone(),
            user_id: profile.user_id,
            email: profile.email.clone(),
        };
        self.sessions.insert(token, session.clone());

        let role = UserRole::find_by_user_id(pool, profile.user_id)
            .await?
            .map(|r| r.role);
        info!(email = %profile.email, "signed in");
        Ok((session, role))
    }

    pub fn sign_out(&self, token: &str) {
        self.sessions.remove(token);
    }

    pub fn resolve(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).map(|entry| entry.value().clone())
    }
}

/// Create an admin account from configured credentials when the database
/// holds no profiles at all. No-op otherwise.
pub async fn bootstrap_admin(
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<(), AuthError> {
    if Profile::count(pool).await? > 0 {
        return Ok(());
    }
    let profile = Profile::create(
        pool,
        &CreateProfile {
            email: email.to_string(),
            full_name: Some("Administrator".to_string()),
            password_digest: hash_password(password),
        },
    )
    .await?;
    UserRole::replace_for_user(pool, profile.user_id, Some(AppRole::Admin)).await?;
    info!(%email, "created bootstrap admin account");
    Ok(())
}

/// Salted SHA-256 digest, stored as `{salt}${hex}`.
pub fn hash_password(password: &str) -> String {
    let salt: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();
    format!("{salt}${}", digest_hex(&salt, password))
}

pub fn verify_password(stored: &str, candidate: &str) -> bool {
    let Some((salt, digest)) = stored.split_once('$') else {
        return false;
    };
    // Length-constant comparison over fixed-size hex digests.
    let computed = digest_hex(salt, candidate);
    computed.len() == digest.len()
        && computed
            .bytes()
            .zip(digest.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

fn digest_hex(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::DBService;

    #[test]
    fn password_round_trip() {
        let digest = hash_password("greenhouse");
        assert!(verify_password(&digest, "greenhouse"));
        assert!(!verify_password(&digest, "Greenhouse"));
        assert!(!verify_password("garbage", "greenhouse"));
    }

    #[tokio::test]
    async fn sign_in_resolves_session_and_role() {
        let db = DBService::new_in_memory().await.unwrap();
        bootstrap_admin(&db.pool, "admin@district.example", "verdant").await.unwrap();

        let sessions = SessionService::new();
        let (session, role) = sessions
            .sign_in(&db.pool, "admin@district.example", "verdant")
            .await
            .unwrap();
        assert_eq!(role, Some(AppRole::Admin));

        let resolved = sessions.resolve(&session.token).unwrap();
        assert_eq!(resolved.email, "admin@district.example");

        sessions.sign_out(&session.token);
        assert!(sessions.resolve(&session.token).is_none());
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let db = DBService::new_in_memory().await.unwrap();
        bootstrap_admin(&db.pool, "admin@district.example", "verdant").await.unwrap();

        let sessions = SessionService::new();
        let err = sessions
            .sign_in(&db.pool, "admin@district.example", "wilted")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn bootstrap_is_a_noop_on_populated_database() {
        let db = DBService::new_in_memory().await.unwrap();
        bootstrap_admin(&db.pool, "first@district.example", "one").await.unwrap();
        bootstrap_admin(&db.pool, "second@district.example", "two").await.unwrap();

        assert_eq!(Profile::count(&db.pool).await.unwrap(), 1);
        assert!(
            Profile::find_by_email(&db.pool, "second@district.example")
                .await
                .unwrap()
                .is_none()
        );
    }
}
