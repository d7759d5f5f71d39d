//! Mock auth helpers for integration tests.
//!
//! Services behind the gateway receive the `x-shelfmark-admin-id` header once the
//! gateway has verified the login session. In tests, `MockAuth` supplies this
//! header directly so no real gateway or session store is needed.

use axum::http::{HeaderName, HeaderValue};

use shelfmark_auth_types::identity::ADMIN_ID_HEADER;

/// Configurable admin identity injected into test requests.
pub struct MockAuth {
    pub admin_id: String,
}

impl MockAuth {
    pub fn new(admin_id: impl Into<String>) -> Self {
        Self {
            admin_id: admin_id.into(),
        }
    }

    /// The default library admin account.
    pub fn admin() -> Self {
        Self::new("ITLibrary")
    }

    /// Header name/value pair as the gateway would inject it.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        (
            HeaderName::from_static(ADMIN_ID_HEADER),
            HeaderValue::from_str(&self.admin_id).unwrap(),
        )
    }
}
