use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use std::convert::Infallible;
use uuid::Uuid;

/// Header carrying the Local-environment identity bypass (an account UUID).
pub const DEV_ACCOUNT_HEADER: &str = "x-account-id";

/// SessionContext
///
/// An owned, per-request snapshot of the authentication-relevant request data. This is
/// the explicit form of the "current session" that the identity provider and the
/// authorization gate receive as a parameter: nothing downstream reaches back into the
/// request or into ambient globals to answer an authentication question.
///
/// The context is created once at request start (by extraction) and is never mutated
/// by the gate; it only ever has a derived fact read from it. Capturing it up front is
/// also what makes the gate's answers idempotent within a request: the same snapshot
/// yields the same answer no matter how many times it is asked.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    /// The raw bearer token from the Authorization header, if one was presented.
    pub bearer_token: Option<String>,
    /// The Local-only bypass account id, if the development header was presented.
    pub dev_account_id: Option<Uuid>,
}

impl SessionContext {
    /// A context carrying no credentials at all (anonymous request).
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A context presenting a bearer token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            bearer_token: Some(token.into()),
            dev_account_id: None,
        }
    }

    /// from_parts
    ///
    /// Captures the snapshot from the request head:
    /// 1. Authorization header, accepted only with the "Bearer " scheme.
    /// 2. The development bypass header, accepted only if it parses as a UUID.
    ///
    /// Whether either credential is *honored* is not decided here; that belongs to the
    /// identity provider (which also enforces the Env::Local guard on the bypass).
    pub fn from_parts(parts: &Parts) -> Self {
        let bearer_token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_string);

        let dev_account_id = parts
            .headers
            .get(DEV_ACCOUNT_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok());

        Self {
            bearer_token,
            dev_account_id,
        }
    }
}

/// SessionContext Extractor Implementation
///
/// Makes the snapshot usable as a handler or middleware argument. Extraction is
/// infallible: a request with no credentials still yields a (fully anonymous) context,
/// because "not authenticated" is a normal outcome, not a rejection.
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionContext::from_parts(parts))
    }
}
