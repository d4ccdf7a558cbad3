use crate::{
    models::{self, Account, DirectoryStats, EngineInfo, RegisterAdministratorRequest, SessionStatus, SiteBar, ADMIN_ROLE},
    session::SessionContext,
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

/// CredentialServiceResponse
///
/// Minimal struct to deserialize the response from the external credential service's
/// signup endpoint, capturing the canonical UUID assigned to the new account.
#[derive(Deserialize)]
struct CredentialServiceResponse {
    id: Uuid,
}

// --- Engine Surface Handlers ---

/// engine_home
///
/// [Public Engine Route] The engine's front page descriptor. Content rendering belongs
/// to the engine itself and stays out of scope here; this endpoint only reports what
/// is mounted and where.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Engine descriptor", body = EngineInfo))
)]
pub async fn engine_home(State(state): State<AppState>) -> Json<EngineInfo> {
    Json(EngineInfo {
        engine: "content-engine".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        mount_path: state.config.mount_path.clone(),
    })
}

/// site_bar
///
/// [Public Engine Route] The engine's UI-visibility extension point. Site templates
/// ask this endpoint whether to render the admin site bar, and the answer comes from
/// the injected authorization gate rather than the engine's built-in check.
///
/// The endpoint is reachable by anyone; the response only ever reveals a boolean that
/// the admin area itself would confirm (or deny) identically.
#[utoipa::path(
    get,
    path = "/site_bar",
    responses((status = 200, description = "Site bar visibility", body = SiteBar))
)]
pub async fn site_bar(
    session: SessionContext,
    State(state): State<AppState>,
) -> Json<SiteBar> {
    let display = state.gate.show_admin_affordance(&session).await;
    Json(SiteBar { display })
}

/// admin_dashboard
///
/// [Admin Engine Route] Directory counters for the engine's admin landing view.
///
/// *Authorization*: the admin route layer has already run `require_administrator`
/// before this handler executes; there is no second check to drift out of sync.
#[utoipa::path(
    get,
    path = "/admin/dashboard",
    responses((status = 200, description = "Directory stats", body = DirectoryStats))
)]
pub async fn admin_dashboard(State(state): State<AppState>) -> Json<DirectoryStats> {
    Json(state.accounts.get_stats().await)
}

/// get_admin_account
///
/// [Admin Engine Route] Resolves a single directory record for administrative review.
#[utoipa::path(
    get,
    path = "/admin/accounts/{id}",
    params(("id" = Uuid, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Found", body = Account),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_admin_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::Account>, StatusCode> {
    match state.accounts.get_account(id).await {
        Some(account) => Ok(Json(account)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

// --- Identity Surface Handlers ---

/// session_show
///
/// [Identity Route] Session introspection: who does the identity provider say this
/// request is, and is that identity an administrator?
///
/// Both booleans are derived from one `authenticate` call, so the response can never
/// claim administrator status for an unauthenticated session.
#[utoipa::path(
    get,
    path = "/session",
    responses((status = 200, description = "Session status", body = SessionStatus))
)]
pub async fn session_show(
    session: SessionContext,
    State(state): State<AppState>,
) -> Json<SessionStatus> {
    let account = state.identity.authenticate(&session).await;
    Json(SessionStatus {
        authenticated: account.is_some(),
        administrator: account
            .as_ref()
            .map(Account::is_administrator)
            .unwrap_or(false),
        account,
    })
}

/// register_administrator
///
/// [Identity Route] Creates a new administrator via the external credential service.
///
/// *Flow*: the password is forwarded to the credential service's signup endpoint and
/// never touches local storage or logs. On success the service's canonical UUID is
/// mirrored into the local directory with the administrator role, keeping primary
/// keys synchronized between the two systems.
#[utoipa::path(
    post,
    path = "/administrators",
    request_body = RegisterAdministratorRequest,
    responses(
        (status = 200, description = "Registered", body = Account),
        (status = 400, description = "Rejected by credential service")
    )
)]
pub async fn register_administrator(
    State(state): State<AppState>,
    Json(payload): Json<RegisterAdministratorRequest>,
) -> Result<Json<Account>, StatusCode> {
    // Step 1: Delegate credential handling to the external service.
    let client = reqwest::Client::new();
    let signup_url = format!("{}/auth/v1/signup", state.config.auth_service_url);

    let response = client
        .post(signup_url)
        .header("apikey", &state.config.auth_service_key)
        .header("Content-Type", "application/json")
        .json(&serde_json::json!({ "email": payload.email, "password": payload.password }))
        .send()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !response.status().is_success() {
        // The credential service rejected the signup (duplicate email, weak password).
        return Err(StatusCode::BAD_REQUEST);
    }

    // Step 2: Extract the canonical account ID from the external response.
    let created = response
        .json::<CredentialServiceResponse>()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    // Step 3: Mirror the record into the local directory with the administrator role.
    // The directory stamps the authoritative created_at on insert; this value only
    // seeds the struct.
    let account = Account {
        id: created.id,
        email: payload.email,
        role: ADMIN_ROLE.to_string(),
        created_at: chrono::Utc::now(),
    };

    match state.accounts.create_account(account).await {
        Some(account) => Ok(Json(account)),
        None => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}
