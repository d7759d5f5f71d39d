//! Gateway-injected admin identity extractor.

use axum::extract::FromRequestParts;
use axum::response::Response;
use http::StatusCode;
use http::request::Parts;

use shelfmark_core::error::error_response;

/// Header carrying the authenticated admin's user id, set by the gateway once
/// the login session has been verified.
pub const ADMIN_ID_HEADER: &str = "x-shelfmark-admin-id";

/// Proof that the request comes from an authenticated library admin.
///
/// Taking this extractor as a handler argument is the auth gate: requests
/// without a non-empty `x-shelfmark-admin-id` header are rejected with 401 and
/// the usual `{"success": false, ...}` error body before the handler runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub admin_id: String,
}

impl<S> FromRequestParts<S> for AdminIdentity
where
    S: Send + Sync,
{
    type Rejection = Response;

    // Extract synchronously and return a 'static future; `async fn` here would
    // capture the `parts` lifetime.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let admin_id = parts
            .headers
            .get(ADMIN_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        async move {
            let admin_id = admin_id.ok_or_else(|| {
                tracing::debug!("rejecting request without admin identity");
                error_response(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "admin login required")
            })?;
            Ok(Self { admin_id })
        }
    }
}
