//! User store boundary and its Postgres implementation.
//!
//! The store owns `UserRecord`s; auth code holds a transient read-only
//! copy for one request. The stored secret hash never leaves the auth
//! boundary (see [`UserRecord::redacted`]).

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

use super::types::PublicUser;

/// A stored user row including its secret hash.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub secret_hash: String,
}

impl UserRecord {
    /// Drop secret material before the record crosses into the response
    /// or token layer.
    #[must_use]
    pub fn redacted(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// Lookup interface for the external user store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// One submitted identifier matches either a stored email or a
    /// stored username.
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<UserRecord>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>>;
}

/// Postgres-backed store.
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<UserRecord>> {
        let query =
            "SELECT id, username, email, password_hash FROM users WHERE email = $1 OR username = $1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to lookup user by identifier")?;

        Ok(row.map(|row| UserRecord {
            id: row.get("id"),
            username: row.get("username"),
            email: row.get("email"),
            secret_hash: row.get("password_hash"),
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>> {
        let query = "SELECT id, username, email, password_hash FROM users WHERE id = $1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to lookup user by id")?;

        Ok(row.map(|row| UserRecord {
            id: row.get("id"),
            username: row.get("username"),
            email: row.get("email"),
            secret_hash: row.get("password_hash"),
        }))
    }
}

/// In-memory store for tests and local experiments.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Vec<UserRecord>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<UserRecord>> {
        Ok(self
            .users
            .iter()
            .find(|user| user.email == identifier || user.username == identifier)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>> {
        Ok(self.users.iter().find(|user| user.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            username: "admin".to_string(),
            email: "admin@test.com".to_string(),
            secret_hash: "$2b$10$hash".to_string(),
        }
    }

    #[test]
    fn redaction_drops_secret_hash() {
        let record = record();
        let public = record.redacted();
        assert_eq!(public.id, record.id);
        assert_eq!(public.username, "admin");
        assert_eq!(public.email, "admin@test.com");
    }

    #[tokio::test]
    async fn memory_store_matches_email_or_username() -> Result<()> {
        let record = record();
        let store = MemoryUserStore::new(vec![record.clone()]);

        let by_email = store.find_by_identifier("admin@test.com").await?;
        assert!(by_email.is_some());

        let by_username = store.find_by_identifier("admin").await?;
        assert!(by_username.is_some());

        let missing = store.find_by_identifier("ghost@test.com").await?;
        assert!(missing.is_none());

        let by_id = store.find_by_id(record.id).await?;
        assert_eq!(by_id.map(|user| user.username), Some("admin".to_string()));
        Ok(())
    }
}
