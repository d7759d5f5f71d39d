use shelfmark_domain::status::BookStatus;

use crate::domain::repository::{BookRepository, NotificationRepository};
use crate::domain::types::DashboardStats;
use crate::error::LibraryServiceError;

// ── GetDashboard ─────────────────────────────────────────────────────────────

/// Live counts; every call runs fresh aggregate queries.
pub struct GetDashboardUseCase<B, N>
where
    B: BookRepository,
    N: NotificationRepository,
{
    pub books: B,
    pub notifications: N,
}

impl<B, N> GetDashboardUseCase<B, N>
where
    B: BookRepository,
    N: NotificationRepository,
{
    pub async fn execute(&self) -> Result<DashboardStats, LibraryServiceError> {
        Ok(DashboardStats {
            available: self.books.count_by_status(BookStatus::Available).await?,
            borrowed: self.books.count_by_status(BookStatus::Unavailable).await?,
            overdue: self.notifications.count_active().await?,
            total: self.books.count_all().await?,
        })
    }
}
