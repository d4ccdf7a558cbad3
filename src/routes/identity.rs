use crate::{handlers, AppState};
use axum::{
    routing::{get, post},
    Router,
};

/// Identity Router Module
///
/// The identity provider's own mountable surface, kept separate from the engine mount
/// the same way the original deployment mounted its credential routes independently
/// of the CMS engine. Password verification and token issuance live in the external
/// credential service; these routes only introspect sessions and mirror new
/// administrator records into the local directory.
pub fn identity_routes() -> Router<AppState> {
    Router::new()
        // GET /session
        // Session introspection: authenticated? administrator? which account?
        .route("/session", get(handlers::session_show))
        // POST /administrators
        // Administrator signup, delegated to the external credential service.
        .route("/administrators", post(handlers::register_administrator))
}
