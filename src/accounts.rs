use crate::models::{Account, DirectoryStats, ADMIN_ROLE};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// AccountRepository Trait
///
/// Defines the abstract contract for the account directory, the persistence layer the
/// identity provider resolves roles from. Handlers and the identity provider interact
/// with this trait only, never with a concrete store, so the directory can be swapped
/// between Postgres in production and an in-memory mock in tests.
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn AccountRepository>`) safely shareable across Axum's task boundaries.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Resolves a directory record by primary key. Returning `None` means the account
    /// does not exist (including accounts deleted after a token was issued).
    async fn get_account(&self, id: Uuid) -> Option<Account>;

    /// Inserts the mirrored directory record after the external credential service has
    /// accepted the signup. Returns `None` when the insert fails (e.g. duplicate email).
    async fn create_account(&self, account: Account) -> Option<Account>;

    /// Compiles the counters for the engine's admin dashboard in a single call.
    async fn get_stats(&self) -> DirectoryStats;
}

/// AccountsState
///
/// The concrete type used to share directory access across the application state.
pub type AccountsState = Arc<dyn AccountRepository>;

/// PostgresAccounts
///
/// The concrete implementation of `AccountRepository`, backed by PostgreSQL.
pub struct PostgresAccounts {
    pool: PgPool,
}

impl PostgresAccounts {
    /// Creates a new directory instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccounts {
    /// get_account
    ///
    /// Fetches the record the identity provider needs (id, email, role). Database
    /// errors degrade to `None`: an unverifiable account is treated exactly like a
    /// missing one, so the gate stays fail-closed.
    async fn get_account(&self, id: Uuid) -> Option<Account> {
        sqlx::query_as::<_, Account>(
            "SELECT id, email, role, created_at FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("get_account error: {:?}", e);
            None
        })
    }

    /// create_account
    ///
    /// Creates the mirroring directory record after external signup success. The id is
    /// the canonical UUID assigned by the credential service, keeping primary keys
    /// synchronized between the two systems.
    async fn create_account(&self, account: Account) -> Option<Account> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (id, email, role, created_at) VALUES ($1, $2, $3, NOW()) \
             RETURNING id, email, role, created_at",
        )
        .bind(account.id)
        .bind(account.email)
        .bind(account.role)
        .fetch_one(&self.pool)
        .await
        .map(Some)
        .unwrap_or_else(|e| {
            tracing::error!("create_account error: {:?}", e);
            None
        })
    }

    /// get_stats
    ///
    /// Counts the whole directory and its administrator subset. Failures degrade to
    /// zeroed counters rather than surfacing an error to the dashboard.
    async fn get_stats(&self) -> DirectoryStats {
        let total_accounts = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await
            .unwrap_or(0);
        let total_administrators =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts WHERE role = $1")
                .bind(ADMIN_ROLE)
                .fetch_one(&self.pool)
                .await
                .unwrap_or(0);
        DirectoryStats {
            total_accounts,
            total_administrators,
        }
    }
}
