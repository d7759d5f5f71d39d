use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use shelfmark_core::error::error_response;

/// Library service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum LibraryServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("book not found")]
    BookNotFound,
    #[error("borrow record not found")]
    BorrowNotFound,
    #[error("no active borrow found for this book")]
    ActiveBorrowNotFound,
    #[error("book is not available")]
    BookUnavailable,
    #[error("cannot delete a book that is currently borrowed, return it first")]
    BookCurrentlyBorrowed,
    #[error("borrow has already been returned")]
    BorrowAlreadyReturned,
    #[error("borrower already has 2 books borrowed")]
    BorrowLimitExceeded,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl LibraryServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BookNotFound => "BOOK_NOT_FOUND",
            Self::BorrowNotFound => "BORROW_NOT_FOUND",
            Self::ActiveBorrowNotFound => "ACTIVE_BORROW_NOT_FOUND",
            Self::BookUnavailable => "BOOK_UNAVAILABLE",
            Self::BookCurrentlyBorrowed => "BOOK_CURRENTLY_BORROWED",
            Self::BorrowAlreadyReturned => "BORROW_ALREADY_RETURNED",
            Self::BorrowLimitExceeded => "BORROW_LIMIT_EXCEEDED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BookNotFound | Self::BorrowNotFound | Self::ActiveBorrowNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::BookUnavailable | Self::BookCurrentlyBorrowed | Self::BorrowAlreadyReturned => {
                StatusCode::CONFLICT
            }
            Self::BorrowLimitExceeded => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LibraryServiceError {
    fn into_response(self) -> Response {
        // 4xx are expected client errors and TraceLayer already records them.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        error_response(self.status(), self.kind(), self.to_string())
    }
}
