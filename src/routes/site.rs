use crate::{handlers, AppState};
use axum::{routing::get, Router};

/// Site Router Module
///
/// The engine's **unauthenticated** surface, reachable by any client. Alongside the
/// front page descriptor it exposes the UI-visibility extension point: templates call
/// `GET /site_bar` to decide whether to draw the admin site bar, and the answer is
/// produced by the injected authorization gate.
///
/// Nothing in this module performs content management or rendering; those concerns
/// belong to the engine proper and are out of scope for this deployment shell.
pub fn site_routes() -> Router<AppState> {
    Router::new()
        // GET /
        // The engine's front page descriptor (what is mounted, and where).
        .route("/", get(handlers::engine_home))
        // GET /site_bar
        // The UI-visibility hook. Must stay consistent with the admin area's hard
        // gate: a session told "display" here is a session the gate would admit.
        .route("/site_bar", get(handlers::site_bar))
}
