use std::sync::Mutex;

use chrono::{Days, NaiveDate};

use shelfmark_core::clock::Clock;
use shelfmark_domain::id::{BookId, BorrowId};
use shelfmark_domain::loan;
use shelfmark_domain::status::{BookStatus, BorrowStatus};
use shelfmark_library::domain::repository::{
    BookRepository, BorrowRepository, NotificationRepository,
};
use shelfmark_library::domain::types::{Book, Borrow};
use shelfmark_library::error::LibraryServiceError;
use shelfmark_library::infra::db::DbBorrowRepository;
use shelfmark_library::usecase::book::DeleteBookUseCase;
use shelfmark_library::usecase::notification::OverdueSweepUseCase;

use crate::helpers::{TestLibrary, start_date};

/// A write another request commits while a use case is between its read and
/// its own write.
enum Interleave {
    /// Return every listed borrow right after the overdue scan.
    ReturnAfterOverdueScan(NaiveDate),
    /// Commit this borrow right after the active-borrow lookup.
    CheckOutAfterLookup(Borrow),
}

/// Database borrow ledger that runs one interleaved write, once.
struct InterleavingBorrows {
    inner: DbBorrowRepository,
    pending: Mutex<Option<Interleave>>,
}

impl InterleavingBorrows {
    fn new(inner: DbBorrowRepository, interleave: Interleave) -> Self {
        Self {
            inner,
            pending: Mutex::new(Some(interleave)),
        }
    }

    fn take(&self) -> Option<Interleave> {
        self.pending.lock().unwrap().take()
    }
}

impl BorrowRepository for InterleavingBorrows {
    async fn find_by_id(&self, id: BorrowId) -> Result<Option<Borrow>, LibraryServiceError> {
        self.inner.find_by_id(id).await
    }

    async fn count_active_by_register_number(
        &self,
        register_number: &str,
    ) -> Result<u64, LibraryServiceError> {
        self.inner
            .count_active_by_register_number(register_number)
            .await
    }

    async fn find_active_by_book_id(
        &self,
        book_id: BookId,
    ) -> Result<Option<Borrow>, LibraryServiceError> {
        let found = self.inner.find_active_by_book_id(book_id).await?;
        if let Some(Interleave::CheckOutAfterLookup(borrow)) = self.take() {
            assert!(self.inner.create_and_check_out(&borrow).await?);
        }
        Ok(found)
    }

    async fn find_latest_active_by_book_name(
        &self,
        book_name: &str,
    ) -> Result<Option<Borrow>, LibraryServiceError> {
        self.inner.find_latest_active_by_book_name(book_name).await
    }

    async fn list_overdue(&self, today: NaiveDate) -> Result<Vec<Borrow>, LibraryServiceError> {
        let overdue = self.inner.list_overdue(today).await?;
        if let Some(Interleave::ReturnAfterOverdueScan(returned_on)) = self.take() {
            for borrow in &overdue {
                assert!(self.inner.mark_returned(borrow, returned_on).await?);
            }
        }
        Ok(overdue)
    }

    async fn create_and_check_out(&self, borrow: &Borrow) -> Result<bool, LibraryServiceError> {
        self.inner.create_and_check_out(borrow).await
    }

    async fn mark_returned(
        &self,
        borrow: &Borrow,
        returned_on: NaiveDate,
    ) -> Result<bool, LibraryServiceError> {
        self.inner.mark_returned(borrow, returned_on).await
    }
}

fn borrow_of(book: &Book, register_number: &str, borrow_date: NaiveDate) -> Borrow {
    Borrow {
        id: BorrowId::new(),
        book_id: book.id,
        book_name: book.name.clone(),
        borrower_name: "Ravi".to_owned(),
        register_number: register_number.to_owned(),
        borrow_date,
        due_date: loan::due_date(borrow_date),
        returned_date: None,
        status: BorrowStatus::Active,
    }
}

#[tokio::test]
async fn should_not_raise_notice_for_borrow_returned_mid_sweep() {
    let library = TestLibrary::new().await;
    let book = library.add_book("B1", "Shelf A").await;
    library.borrow(&book, "R100").await;
    library.clock.advance_days(9);

    let report = OverdueSweepUseCase {
        borrows: InterleavingBorrows::new(
            library.borrows(),
            Interleave::ReturnAfterOverdueScan(library.clock.today()),
        ),
        notifications: library.notifications(),
        clock: library.clock.clone(),
    }
    .execute()
    .await
    .unwrap();

    assert_eq!(report.scanned, 1);
    assert_eq!(report.created, 0);
    assert_eq!(report.failed, 0);
    assert!(library.notifications().list_active().await.unwrap().is_empty());
    let stored = library.books().find_by_id(book.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookStatus::Available);

    // The next loan of the same book gets its own notice.
    let next = library.borrow(&book, "R200").await;
    library.clock.advance_days(9);
    library.sweep().await;

    let notices: Vec<_> = library
        .notifications()
        .list_active()
        .await
        .unwrap()
        .into_iter()
        .map(|n| (n.register_number, n.days_overdue, n.due_date))
        .collect();
    assert_eq!(notices, vec![("R200".to_owned(), 2, next.due_date)]);
    assert_eq!(next.due_date, start_date() + Days::new(16));
}

#[tokio::test]
async fn should_keep_borrow_committed_during_delete() {
    let library = TestLibrary::new().await;
    let book = library.add_book("B1", "Shelf A").await;
    let late = borrow_of(&book, "R300", library.clock.today());

    let result = DeleteBookUseCase {
        books: library.books(),
        borrows: InterleavingBorrows::new(
            library.borrows(),
            Interleave::CheckOutAfterLookup(late.clone()),
        ),
    }
    .execute(&book.id.to_string())
    .await;

    assert!(matches!(
        result,
        Err(LibraryServiceError::BookCurrentlyBorrowed)
    ));
    let stored = library.books().find_by_id(book.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookStatus::Unavailable);
    assert_eq!(
        library
            .borrows()
            .count_active_by_register_number("R300")
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        library.borrows().find_by_id(late.id).await.unwrap(),
        Some(late)
    );
}
