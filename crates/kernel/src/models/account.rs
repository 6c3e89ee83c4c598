//! Player account model and single-record operations.
//!
//! Listing and filtering live in the listing engine; this model only does
//! primary-key reads and single-row writes (last write wins at the store).

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Account record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub uname: String,
    pub email: String,
    pub fname: Option<String>,
    pub lname: Option<String>,
    /// Game-level account tier; opaque to the back office.
    pub account_type: i16,
    /// In-game click balance.
    pub clicks: i64,
    pub status: i16,
    /// Back-office access flag; set by the auth service, only read here.
    pub is_admin: bool,
    pub created: DateTime<Utc>,
}

impl Account {
    /// Check if this account is active.
    pub fn is_active(&self) -> bool {
        self.status == 1
    }

    /// Human-readable name for display: real name when present, otherwise
    /// the username.
    pub fn display_name(&self) -> String {
        match (self.fname.as_deref(), self.lname.as_deref()) {
            (Some(f), Some(l)) if !f.is_empty() && !l.is_empty() => format!("{f} {l}"),
            (Some(f), _) if !f.is_empty() => f.to_string(),
            _ => self.uname.clone(),
        }
    }

    /// Find an account by ID.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("failed to fetch account by id")?;

        Ok(account)
    }

    /// Update an account's status.
    pub async fn set_status(pool: &PgPool, id: i64, status: i16) -> Result<bool> {
        let result = sqlx::query("UPDATE accounts SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(pool)
            .await
            .context("failed to update account status")?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an account.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete account")?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn sample() -> Account {
        Account {
            id: 7,
            uname: "moneybags".to_string(),
            email: "mb@example.com".to_string(),
            fname: None,
            lname: None,
            account_type: 1,
            clicks: 1200,
            status: 1,
            is_admin: false,
            created: Utc::now(),
        }
    }

    #[test]
    fn display_name_prefers_real_name() {
        let mut account = sample();
        assert_eq!(account.display_name(), "moneybags");

        account.fname = Some("Ada".to_string());
        assert_eq!(account.display_name(), "Ada");

        account.lname = Some("Lovelace".to_string());
        assert_eq!(account.display_name(), "Ada Lovelace");
    }

    #[test]
    fn empty_name_parts_fall_back_to_uname() {
        let mut account = sample();
        account.fname = Some(String::new());
        account.lname = Some(String::new());
        assert_eq!(account.display_name(), "moneybags");
    }

    #[test]
    fn active_status_is_one() {
        let mut account = sample();
        assert!(account.is_active());
        account.status = 0;
        assert!(!account.is_active());
    }
}
