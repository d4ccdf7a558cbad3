use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Router Module Index
///
/// Organizes the routing surface into its three mount groups:
/// the engine's public pages, the engine's admin area, and the identity provider's
/// own routes. The engine groups are mounted together under the configured base path;
/// the identity routes are mounted separately at the site root, mirroring how the
/// external collaborators would each bring their own routing surface.

/// The engine's public surface (front page, site bar visibility hook).
pub mod site;

/// The engine's admin area. Every route here sits behind the authorization gate
/// applied as a route layer at assembly time.
pub mod admin;

/// The identity provider's routes (session introspection, administrator signup).
pub mod identity;

/// unauthorized_response
///
/// The engine's standard effect for a denied admin request. This is engine policy,
/// not gate policy: the gate only supplies the verdict, and whatever the engine does
/// with a denial happens here, in exactly one place.
pub fn unauthorized_response() -> Response {
    StatusCode::UNAUTHORIZED.into_response()
}
