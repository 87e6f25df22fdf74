//! # Preference Store
//!
//! String key-value pairs for order-scoped state that outlives a screen:
//! the customer comment, the don't-call-me flag and the pending order guid.
//!
//! Independent of the relational tables; no transaction spans both.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Saved customer comment text.
pub const CUSTOMER_COMMENT_KEY: &str = "order.customer_comment";
/// "Don't call me back" checkbox.
pub const DONT_CALL_ME_KEY: &str = "order.dont_call_me";
/// Correlation id reused across re-submissions of one order.
pub const PENDING_ORDER_GUID_KEY: &str = "order.pending_guid";

#[derive(Debug, Clone)]
pub struct PreferenceStore {
    pool: SqlitePool,
}

impl PreferenceStore {
    pub fn new(pool: SqlitePool) -> Self {
        PreferenceStore { pool }
    }

    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM preferences WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key, "Saving preference");
        sqlx::query(
            r#"
            INSERT INTO preferences (key, value) VALUES (?1, ?2)
            ON CONFLICT (key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn remove(&self, key: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM preferences WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Removes several keys at once.
    pub async fn remove_all(&self, keys: &[&str]) -> DbResult<()> {
        for key in keys {
            self.remove(key).await?;
        }
        Ok(())
    }

    /// ## Errors
    /// `DbError::CorruptValue` when the stored text is not `true`/`false`.
    pub async fn get_bool(&self, key: &str) -> DbResult<Option<bool>> {
        match self.get(key).await? {
            None => Ok(None),
            Some(v) => v.parse::<bool>().map(Some).map_err(|e| DbError::CorruptValue {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    pub async fn set_bool(&self, key: &str, value: bool) -> DbResult<()> {
        self.set(key, if value { "true" } else { "false" }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::test_db;

    #[tokio::test]
    async fn test_string_values() {
        let db = test_db().await;
        let prefs = db.preferences();

        assert_eq!(prefs.get(CUSTOMER_COMMENT_KEY).await.unwrap(), None);
        prefs.set(CUSTOMER_COMMENT_KEY, "Ring twice").await.unwrap();
        prefs.set(CUSTOMER_COMMENT_KEY, "Leave at door").await.unwrap();
        assert_eq!(
            prefs.get(CUSTOMER_COMMENT_KEY).await.unwrap().as_deref(),
            Some("Leave at door")
        );
    }

    #[tokio::test]
    async fn test_bool_values_and_corruption() {
        let db = test_db().await;
        let prefs = db.preferences();

        prefs.set_bool(DONT_CALL_ME_KEY, true).await.unwrap();
        assert_eq!(prefs.get_bool(DONT_CALL_ME_KEY).await.unwrap(), Some(true));

        prefs.set(DONT_CALL_ME_KEY, "yes please").await.unwrap();
        assert!(matches!(
            prefs.get_bool(DONT_CALL_ME_KEY).await,
            Err(DbError::CorruptValue { .. })
        ));
    }

    #[tokio::test]
    async fn test_remove_all() {
        let db = test_db().await;
        let prefs = db.preferences();
        prefs.set(CUSTOMER_COMMENT_KEY, "x").await.unwrap();
        prefs.set_bool(DONT_CALL_ME_KEY, false).await.unwrap();

        prefs
            .remove_all(&[CUSTOMER_COMMENT_KEY, DONT_CALL_ME_KEY, PENDING_ORDER_GUID_KEY])
            .await
            .unwrap();

        assert_eq!(prefs.get(CUSTOMER_COMMENT_KEY).await.unwrap(), None);
        assert_eq!(prefs.get_bool(DONT_CALL_ME_KEY).await.unwrap(), None);
    }
}
