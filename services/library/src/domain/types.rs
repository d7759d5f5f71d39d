use chrono::{DateTime, NaiveDate, Utc};

use shelfmark_domain::id::{BookId, BorrowId, NotificationId};
use shelfmark_domain::status::{BookStatus, BorrowStatus, NotificationStatus};

/// A catalog entry for one physical book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub name: String,
    pub author: Option<String>,
    pub location: String,
    pub status: BookStatus,
    /// Public code printed on the QR label and shown in the inventory.
    pub unique_code: String,
    pub created_at: DateTime<Utc>,
}

/// The admin-editable fields of a book. Status is never edited directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetails {
    pub name: String,
    pub author: Option<String>,
    pub location: String,
}

/// Public inventory row: only what an unauthenticated visitor may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    pub unique_code: String,
    pub name: String,
}

/// A borrow transaction. `book_name` is the name at borrow time and is not
/// refreshed when the book is renamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Borrow {
    pub id: BorrowId,
    pub book_id: BookId,
    pub book_name: String,
    pub borrower_name: String,
    pub register_number: String,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub returned_date: Option<NaiveDate>,
    pub status: BorrowStatus,
}

impl Borrow {
    pub fn is_active(&self) -> bool {
        self.status == BorrowStatus::Active
    }
}

/// Overdue notice for an active borrow, maintained by the daily sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub book_id: BookId,
    pub book_name: String,
    pub borrower_name: String,
    pub register_number: String,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub days_overdue: i64,
    pub status: NotificationStatus,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// New active notice for `borrow`, copying its snapshots.
    pub fn for_overdue(borrow: &Borrow, days_overdue: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            id: NotificationId::new(),
            book_id: borrow.book_id,
            book_name: borrow.book_name.clone(),
            borrower_name: borrow.borrower_name.clone(),
            register_number: borrow.register_number.clone(),
            borrow_date: borrow.borrow_date,
            due_date: borrow.due_date,
            days_overdue,
            status: NotificationStatus::Active,
            created_at,
        }
    }
}

/// What a guarded book delete did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookDeletion {
    Deleted,
    NotFound,
    /// The book is checked out or has an active borrow; nothing was written.
    CheckedOut,
}

/// What recording one overdue borrow did to the notification register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverdueWrite {
    Created,
    Updated,
    Unchanged,
    /// The borrow was returned before the write; nothing was written.
    BorrowClosed,
}

/// Counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub available: u64,
    pub borrowed: u64,
    pub overdue: u64,
    pub total: u64,
}

/// Outcome of one overdue sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepReport {
    pub scanned: usize,
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
}

/// Trim a required text field; blank counts as missing.
pub fn required_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Trim an optional text field; blank is stored as absent.
pub fn optional_text(value: Option<String>) -> Option<String> {
    required_text(value)
}
