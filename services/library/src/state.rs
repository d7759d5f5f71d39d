use std::sync::Arc;

use sea_orm::DatabaseConnection;

use shelfmark_core::clock::Clock;

use crate::infra::db::{DbBookRepository, DbBorrowRepository, DbNotificationRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn book_repo(&self) -> DbBookRepository {
        DbBookRepository {
            db: self.db.clone(),
        }
    }

    pub fn borrow_repo(&self) -> DbBorrowRepository {
        DbBorrowRepository {
            db: self.db.clone(),
        }
    }

    pub fn notification_repo(&self) -> DbNotificationRepository {
        DbNotificationRepository {
            db: self.db.clone(),
        }
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }
}
