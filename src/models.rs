use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

/// The directory role that marks a session as an administrator.
///
/// Mere authentication is never sufficient for the admin gate; the resolved account
/// must carry exactly this role. Kept as a single constant so the hard gate and the
/// UI-visibility check can never drift apart on what "administrator" means.
pub const ADMIN_ROLE: &str = "admin";

// --- Core Directory Schemas (Mapped to Database) ---

/// Account
///
/// The identity provider's canonical directory record, stored in the `accounts` table.
/// Carries the minimal data needed to answer the only question the gate ever asks:
/// is this session an authenticated administrator.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Account {
    // Primary key, also the subject ("sub") claim of issued bearer tokens.
    pub id: Uuid,
    // The account's primary identifier.
    pub email: String,
    // The RBAC field: 'member' or 'admin'.
    pub role: String,
    // When the directory record was mirrored in.
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// True iff this directory record carries the administrator role.
    pub fn is_administrator(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// --- Request Payloads (Input Schemas) ---

/// RegisterAdministratorRequest
///
/// Input payload for the administrator registration endpoint (POST /administrators).
/// Note: the password is only passed through to the external credential service and is
/// never persisted, hashed, or logged by this application.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RegisterAdministratorRequest {
    pub email: String,
    pub password: String,
}

/// --- Engine & Session Schemas (Output) ---

/// EngineInfo
///
/// Output schema for the engine's front page (GET {mount}/). Describes the mounted
/// engine rather than rendering any content, which stays out of scope.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct EngineInfo {
    pub engine: String,
    pub version: String,
    // The base path the engine was mounted under, as configured.
    pub mount_path: String,
}

/// SiteBar
///
/// Output schema for the engine's UI-visibility extension point (GET {mount}/site_bar).
/// The frontend renders the admin site bar iff `display` is true.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SiteBar {
    pub display: bool,
}

/// SessionStatus
///
/// Output schema for session introspection (GET /session). Both booleans derive from
/// the same identity resolution, so `administrator` implies `authenticated`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub administrator: bool,
    // The resolved directory record, when the session is authenticated.
    pub account: Option<Account>,
}

/// DirectoryStats
///
/// Output schema for the engine's admin dashboard (GET {mount}/admin/dashboard).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct DirectoryStats {
    pub total_accounts: i64,
    pub total_administrators: i64,
}
