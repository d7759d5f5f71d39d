use chrono::NaiveDate;

use shelfmark_core::clock::Clock;
use shelfmark_domain::loan;

use crate::domain::repository::{BorrowRepository, NotificationRepository};
use crate::domain::types::{Borrow, Notification, OverdueWrite, SweepReport};
use crate::error::LibraryServiceError;

// ── ListNotifications ────────────────────────────────────────────────────────

pub struct ListNotificationsUseCase<N: NotificationRepository> {
    pub repo: N,
}

impl<N: NotificationRepository> ListNotificationsUseCase<N> {
    pub async fn execute(&self) -> Result<Vec<Notification>, LibraryServiceError> {
        self.repo.list_active().await
    }
}

// ── OverdueSweep ─────────────────────────────────────────────────────────────

/// Raises or refreshes one active notification per overdue borrow.
///
/// Best effort: a failure on one borrow is logged and counted, and the rest
/// of the batch still runs. Re-running on the same day changes nothing.
pub struct OverdueSweepUseCase<L, N, C>
where
    L: BorrowRepository,
    N: NotificationRepository,
    C: Clock,
{
    pub borrows: L,
    pub notifications: N,
    pub clock: C,
}

impl<L, N, C> OverdueSweepUseCase<L, N, C>
where
    L: BorrowRepository,
    N: NotificationRepository,
    C: Clock,
{
    pub async fn execute(&self) -> Result<SweepReport, LibraryServiceError> {
        let today = self.clock.today();
        let overdue = self.borrows.list_overdue(today).await?;

        let mut report = SweepReport {
            scanned: overdue.len(),
            ..SweepReport::default()
        };
        for borrow in &overdue {
            match self.sweep_one(borrow, today).await {
                Ok(OverdueWrite::Created) => report.created += 1,
                Ok(OverdueWrite::Updated) => report.updated += 1,
                Ok(OverdueWrite::Unchanged | OverdueWrite::BorrowClosed) => {}
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(
                        error = %e,
                        borrow_id = %borrow.id,
                        book_id = %borrow.book_id,
                        "failed to record overdue notification"
                    );
                }
            }
        }

        tracing::info!(
            %today,
            scanned = report.scanned,
            created = report.created,
            updated = report.updated,
            failed = report.failed,
            "overdue sweep finished"
        );
        Ok(report)
    }

    async fn sweep_one(
        &self,
        borrow: &Borrow,
        today: NaiveDate,
    ) -> Result<OverdueWrite, LibraryServiceError> {
        let Some(days) = loan::days_overdue(borrow.due_date, today) else {
            return Ok(OverdueWrite::Unchanged);
        };
        // The borrow may have been returned since `list_overdue`; the
        // repository re-checks it inside the write.
        let notification = Notification::for_overdue(borrow, days, self.clock.now());
        self.notifications
            .record_overdue(borrow.id, &notification)
            .await
    }
}
