#![allow(async_fn_in_trait)]

use chrono::NaiveDate;

use shelfmark_domain::id::{BookId, BorrowId};
use shelfmark_domain::status::BookStatus;

use crate::domain::types::{
    Book, BookDeletion, BookDetails, Borrow, InventoryItem, Notification, OverdueWrite,
};
use crate::error::LibraryServiceError;

/// Catalog store for books.
pub trait BookRepository: Send + Sync {
    /// All books, newest first.
    async fn list(&self) -> Result<Vec<Book>, LibraryServiceError>;

    /// Available books ordered by name.
    async fn list_available(&self) -> Result<Vec<Book>, LibraryServiceError>;

    /// Code and name of available books ordered by name.
    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, LibraryServiceError>;

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, LibraryServiceError>;

    async fn create(&self, book: &Book) -> Result<(), LibraryServiceError>;

    /// Overwrite name, author and location. Returns `false` if no such book.
    async fn update_details(
        &self,
        id: BookId,
        details: &BookDetails,
    ) -> Result<bool, LibraryServiceError>;

    /// In one transaction: delete the book together with its borrows and
    /// notifications, but only while it is `Available` with no active borrow.
    async fn delete_with_history(&self, id: BookId) -> Result<BookDeletion, LibraryServiceError>;

    async fn count_by_status(&self, status: BookStatus) -> Result<u64, LibraryServiceError>;

    async fn count_all(&self) -> Result<u64, LibraryServiceError>;
}

/// Borrow ledger.
pub trait BorrowRepository: Send + Sync {
    async fn find_by_id(&self, id: BorrowId) -> Result<Option<Borrow>, LibraryServiceError>;

    async fn count_active_by_register_number(
        &self,
        register_number: &str,
    ) -> Result<u64, LibraryServiceError>;

    async fn find_active_by_book_id(
        &self,
        book_id: BookId,
    ) -> Result<Option<Borrow>, LibraryServiceError>;

    /// Most recent active borrow whose book-name snapshot equals `book_name`.
    async fn find_latest_active_by_book_name(
        &self,
        book_name: &str,
    ) -> Result<Option<Borrow>, LibraryServiceError>;

    /// Active borrows with `due_date < today`.
    async fn list_overdue(&self, today: NaiveDate) -> Result<Vec<Borrow>, LibraryServiceError>;

    /// In one transaction: flip the book to `Unavailable` if it is still
    /// `Available`, then insert `borrow`. Returns `false` and writes nothing
    /// when the book is no longer available.
    async fn create_and_check_out(&self, borrow: &Borrow) -> Result<bool, LibraryServiceError>;

    /// In one transaction: mark the borrow returned on `returned_on`, flip its
    /// book back to `Available` and clear the book's active notifications.
    /// Returns `false` and writes nothing when the borrow is not active.
    async fn mark_returned(
        &self,
        borrow: &Borrow,
        returned_on: NaiveDate,
    ) -> Result<bool, LibraryServiceError>;
}

/// Notification register maintained by the overdue sweep.
pub trait NotificationRepository: Send + Sync {
    /// Active notifications, most overdue first, then newest first.
    async fn list_active(&self) -> Result<Vec<Notification>, LibraryServiceError>;

    /// In one transaction: if borrow `borrow_id` is still active, refresh the
    /// active notification matching `notification`'s book, register number
    /// and due date, or insert `notification` when there is none. Active
    /// notifications on the same book for any other loan are cleared.
    async fn record_overdue(
        &self,
        borrow_id: BorrowId,
        notification: &Notification,
    ) -> Result<OverdueWrite, LibraryServiceError>;

    async fn count_active(&self) -> Result<u64, LibraryServiceError>;
}
