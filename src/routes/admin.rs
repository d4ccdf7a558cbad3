use crate::{handlers, AppState};
use axum::{routing::get, Router};

/// Admin Router Module
///
/// The engine's admin area, nested under '{mount}/admin'.
///
/// Access Control:
/// This entire router is wrapped (at assembly time, in `create_router`) in a layer
/// that runs `AuthorizationPolicy::require_administrator` before any handler here
/// executes. A denial short-circuits into the engine's standard unauthorized
/// response. Handlers therefore contain no role checks of their own; the single gate
/// verdict is authoritative for the whole subtree.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET {mount}/admin/dashboard
        // Directory counters for the admin landing view.
        .route("/dashboard", get(handlers::admin_dashboard))
        // GET {mount}/admin/accounts/{id}
        // Administrative lookup of a single directory record.
        .route("/accounts/{id}", get(handlers::get_admin_account))
}
