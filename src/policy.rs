use async_trait::async_trait;
use std::sync::Arc;

use crate::{identity::IdentityState, session::SessionContext};

/// AccessDenied
///
/// The negative outcome of the hard gate. Deliberately a payload-free marker: denial
/// is normal control flow, not an error, and the content engine alone decides what a
/// denied request looks like on the wire (its standard unauthorized response). The
/// gate adds no translation, wrapping, or recovery of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDenied;

/// AuthorizationPolicy Trait
///
/// The engine's two authentication extension points, as an explicit, injectable
/// interface. The engine is constructed with a pluggable implementation instead of
/// having its built-in checks overridden in place, which keeps the substitution
/// visible at the composition root and testable in isolation.
///
/// Both operations answer the same underlying question ("is this session an
/// authenticated administrator") against the same request snapshot, so for any one
/// `SessionContext` they can never disagree: the UI must not advertise an admin area
/// the hard gate would then reject, and vice versa.
#[async_trait]
pub trait AuthorizationPolicy: Send + Sync {
    /// The hard gate invoked before any admin-restricted action. `Ok(())` lets the
    /// request proceed; `Err(AccessDenied)` hands control to the engine's standard
    /// unauthorized path.
    async fn require_administrator(&self, session: &SessionContext) -> Result<(), AccessDenied>;

    /// The UI-visibility hook invoked when rendering site chrome: should admin-only
    /// affordances (the site bar) be shown for this session?
    ///
    /// Pure query with no side effects, safe to call any number of times per request.
    /// Provided in terms of `require_administrator` so the two extension points share
    /// one verdict by construction.
    async fn show_admin_affordance(&self, session: &SessionContext) -> bool {
        self.require_administrator(session).await.is_ok()
    }
}

/// GateState
///
/// The concrete type used to share the gate across the application state.
pub type GateState = Arc<dyn AuthorizationPolicy>;

/// IdentityGate
///
/// The production gate: redirects the engine's extension points onto the external
/// identity provider's single administrator predicate. This is the whole point of the
/// component; there is intentionally no logic here beyond the delegation.
pub struct IdentityGate {
    identity: IdentityState,
}

impl IdentityGate {
    /// Builds the gate over the shared identity provider.
    pub fn new(identity: IdentityState) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl AuthorizationPolicy for IdentityGate {
    async fn require_administrator(&self, session: &SessionContext) -> Result<(), AccessDenied> {
        if self.identity.administrator_signed_in(session).await {
            Ok(())
        } else {
            Err(AccessDenied)
        }
    }
}
