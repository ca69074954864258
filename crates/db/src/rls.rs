//! Row-Level Security (RLS) context management.
//!
//! Every tracking table carries an `organization_id` column guarded by a
//! `tenant_isolation` policy. This module sets the `PostgreSQL` session
//! variable `app.current_organization_id` per transaction so those policies
//! apply to all queries issued through it.
//!
//! # Usage
//!
//! ```ignore
//! use vantora_db::rls::RlsConnection;
//!
//! let rls = RlsConnection::new(&db, organization_id).await?;
//!
//! // All queries through the transaction see only this tenant's rows
//! let versions = entity_versions::Entity::find().all(rls.transaction()).await?;
//!
//! rls.commit().await?;
//! ```

use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use uuid::Uuid;

/// A database connection wrapper that sets RLS context for multi-tenant isolation.
///
/// Wraps a transaction and guarantees the `app.current_organization_id`
/// session variable is set before any query runs on it.
pub struct RlsConnection {
    txn: DatabaseTransaction,
}

impl RlsConnection {
    /// Creates a new RLS-enabled connection with the given organization context.
    ///
    /// Begins a transaction and sets `app.current_organization_id` via
    /// `SET LOCAL`, which scopes the setting to this transaction only.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started or the RLS
    /// context cannot be set.
    pub async fn new(db: &DatabaseConnection, organization_id: Uuid) -> Result<Self, DbErr> {
        let txn = db.begin().await?;

        // Uuid renders as a fixed hyphenated form, so interpolation is safe here
        let sql = format!("SET LOCAL app.current_organization_id = '{organization_id}'");
        txn.execute_unprepared(&sql).await?;

        Ok(Self { txn })
    }

    /// Returns a reference to the underlying transaction for executing queries.
    #[must_use]
    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.txn
    }

    /// Commits the transaction, persisting all changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails.
    pub async fn commit(self) -> Result<(), DbErr> {
        self.txn.commit().await
    }

    /// Rolls back the transaction, discarding all changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback fails.
    pub async fn rollback(self) -> Result<(), DbErr> {
        self.txn.rollback().await
    }
}

/// Extension trait for `DatabaseConnection` to easily create RLS-enabled connections.
#[async_trait::async_trait]
pub trait RlsExt {
    /// Creates an RLS-enabled connection with the given organization context.
    ///
    /// # Errors
    ///
    /// Returns an error if the RLS connection cannot be created.
    async fn with_rls(&self, organization_id: Uuid) -> Result<RlsConnection, DbErr>;
}

#[async_trait::async_trait]
impl RlsExt for DatabaseConnection {
    async fn with_rls(&self, organization_id: Uuid) -> Result<RlsConnection, DbErr> {
        RlsConnection::new(self, organization_id).await
    }
}

/// Sets the RLS context on an existing transaction.
///
/// Use this when a transaction already exists, e.g. inside a repository that
/// batches several writes.
///
/// # Errors
///
/// Returns an error if the RLS context cannot be set.
pub async fn set_rls_context(
    txn: &DatabaseTransaction,
    organization_id: Uuid,
) -> Result<(), DbErr> {
    let sql = format!("SET LOCAL app.current_organization_id = '{organization_id}'");
    txn.execute_unprepared(&sql).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Exercising the policies themselves needs a live PostgreSQL; see the
    // integration tests under tests/.

    #[test]
    fn test_rls_sql_format() {
        let org_id = Uuid::parse_str("1d4a7f60-9e2b-4c11-8f3a-2b5c6d7e8f90").unwrap();
        let sql = format!("SET LOCAL app.current_organization_id = '{org_id}'");
        assert_eq!(
            sql,
            "SET LOCAL app.current_organization_id = '1d4a7f60-9e2b-4c11-8f3a-2b5c6d7e8f90'"
        );
    }
}
