pub mod book;
pub mod borrow;
pub mod dashboard;
pub mod health;
pub mod inventory;
pub mod notification;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::Serialize;

use crate::error::LibraryServiceError;

/// `Json` body whose rejections come back as validation errors in the usual
/// error body instead of axum's plain-text 415/422.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = LibraryServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(
                    status = %rejection.status(),
                    error = %rejection.body_text(),
                    "request body rejected"
                );
                let message = match rejection {
                    JsonRejection::MissingJsonContentType(_) => {
                        "request body must be JSON".to_owned()
                    }
                    other => other.body_text(),
                };
                Err(LibraryServiceError::Validation(message))
            }
        }
    }
}

/// Body for mutations that return nothing but a confirmation.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

impl MessageResponse {
    pub fn ok(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}
