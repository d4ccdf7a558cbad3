use axum::{
    extract::{FromRef, Request, State},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod accounts;
pub mod config;
pub mod handlers;
pub mod identity;
pub mod models;
pub mod policy;
pub mod session;

// Module for routing segregation (engine site, engine admin, identity provider).
pub mod routes;
use policy::AccessDenied;
use routes::{admin, identity as identity_routes, site};
use session::SessionContext;

// --- Public Re-exports ---

// Makes the composition-root types easily accessible to main.rs and tests.
pub use accounts::{AccountsState, PostgresAccounts};
pub use config::AppConfig;
pub use identity::{IdentityState, TokenIdentity};
pub use policy::{GateState, IdentityGate};

/// ApiDoc
///
/// Auto-generates the OpenAPI documentation (Swagger JSON) for the application by
/// aggregating every handler annotated with `#[utoipa::path]` and every schema
/// deriving `utoipa::ToSchema`. Served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::engine_home, handlers::site_bar, handlers::admin_dashboard,
        handlers::get_admin_account, handlers::session_show, handlers::register_administrator
    ),
    components(
        schemas(
            models::Account, models::EngineInfo, models::SiteBar, models::SessionStatus,
            models::DirectoryStats, models::RegisterAdministratorRequest,
        )
    ),
    tags(
        (name = "admin-gate", description = "Administrator gate for a mounted content engine")
    )
)]
struct ApiDoc;

/// AppState
///
/// Implements the **Unified State Pattern**: a single, thread-safe, immutable
/// container holding every injected collaborator. Assembled once at startup (or per
/// test) and shared across all requests. The authorization substitution happens here:
/// the gate is a field, not a patched method table, so swapping the policy is a
/// construction-time decision.
#[derive(Clone)]
pub struct AppState {
    /// Account directory: the persistence the identity provider resolves roles from.
    pub accounts: AccountsState,
    /// Identity provider: owns session resolution and the administrator predicate.
    pub identity: IdentityState,
    /// Authorization gate: the engine's two extension points, answered by `identity`.
    pub gate: GateState,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// Allow handlers and extractors to selectively pull components from the shared state.

impl FromRef<AppState> for AccountsState {
    fn from_ref(app_state: &AppState) -> AccountsState {
        app_state.accounts.clone()
    }
}

impl FromRef<AppState> for IdentityState {
    fn from_ref(app_state: &AppState) -> IdentityState {
        app_state.identity.clone()
    }
}

impl FromRef<AppState> for GateState {
    fn from_ref(app_state: &AppState) -> GateState {
        app_state.gate.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// admin_gate_layer
///
/// The middleware that wires `require_administrator` in front of the engine's admin
/// subtree.
///
/// *Mechanism*: the request's `SessionContext` snapshot is extracted (infallibly) and
/// handed to the gate. A positive verdict forwards the request unchanged; a negative
/// verdict never reaches a handler and resolves through the engine's one standard
/// unauthorized response. The gate itself contributes nothing to the response shape.
async fn admin_gate_layer(
    State(state): State<AppState>,
    session: SessionContext,
    request: Request,
    next: Next,
) -> Response {
    match state.gate.require_administrator(&session).await {
        Ok(()) => next.run(request).await,
        Err(AccessDenied) => routes::unauthorized_response(),
    }
}

/// create_router
///
/// Assembles the application's entire routing structure: the engine surface mounted
/// at the configured base path, the identity provider's routes at the site root, the
/// Swagger documentation, and the observability layers.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Engine Surface Assembly
    // Public site routes plus the admin area. The admin subtree is the only place the
    // hard gate applies; the site bar hook consults the same gate from its handler.
    let engine = Router::new().merge(site::site_routes()).nest(
        "/admin",
        admin::admin_routes()
            .route_layer(middleware::from_fn_with_state(state.clone(), admin_gate_layer)),
    );

    // 3. Engine Mounting
    // The engine lands at the configured base path. Axum refuses to nest at "/", so a
    // root mount merges the engine routes directly instead.
    let mounted_engine = if state.config.mount_path == "/" {
        Router::new().merge(engine)
    } else {
        Router::new().nest(&state.config.mount_path, engine)
    };

    // 4. Base Router Assembly
    let base_router = mounted_engine
        // Documentation: serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Identity provider routes, mounted independently of the engine.
        .merge(identity_routes::identity_routes())
        // Apply the Unified State to all routes.
        .with_state(state);

    // 5. Observability and Correlation Layers (applied outermost)
    base_router
        .layer(
            ServiceBuilder::new()
                // 5a. Request ID Generation: a unique UUID for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 5b. Request Tracing: wraps the request/response lifecycle in a span
                // correlated by the generated request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 5c. Request ID Propagation: return the x-request-id header to the
                // client and to downstream calls.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 6. CORS Layer
        .layer(cors)
}

/// trace_span_logger
///
/// Customizes span creation for `TraceLayer`: includes the `x-request-id` header (if
/// present) alongside the HTTP method and URI so every log line of one request shares
/// a correlation ID.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
