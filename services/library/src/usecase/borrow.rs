use shelfmark_core::clock::Clock;
use shelfmark_domain::id::{BookId, BorrowId};
use shelfmark_domain::loan;
use shelfmark_domain::status::{BookStatus, BorrowStatus};

use crate::domain::repository::{BookRepository, BorrowRepository};
use crate::domain::types::{Borrow, required_text};
use crate::error::LibraryServiceError;

// ── BorrowBook ───────────────────────────────────────────────────────────────

pub struct BorrowBookInput {
    pub book_id: Option<String>,
    pub borrower_name: Option<String>,
    pub register_number: Option<String>,
}

pub struct BorrowBookUseCase<B, L, C>
where
    B: BookRepository,
    L: BorrowRepository,
    C: Clock,
{
    pub books: B,
    pub borrows: L,
    pub clock: C,
}

impl<B, L, C> BorrowBookUseCase<B, L, C>
where
    B: BookRepository,
    L: BorrowRepository,
    C: Clock,
{
    pub async fn execute(&self, input: BorrowBookInput) -> Result<Borrow, LibraryServiceError> {
        let (Some(book_id), Some(borrower_name), Some(register_number)) = (
            required_text(input.book_id),
            required_text(input.borrower_name),
            required_text(input.register_number),
        ) else {
            return Err(LibraryServiceError::validation(
                "book id, borrower name and register number are required",
            ));
        };

        let active = self
            .borrows
            .count_active_by_register_number(&register_number)
            .await?;
        if !loan::within_borrow_limit(active) {
            return Err(LibraryServiceError::BorrowLimitExceeded);
        }

        let book_id: BookId = book_id
            .parse()
            .map_err(|_| LibraryServiceError::BookNotFound)?;
        let book = self
            .books
            .find_by_id(book_id)
            .await?
            .ok_or(LibraryServiceError::BookNotFound)?;
        if book.status != BookStatus::Available {
            return Err(LibraryServiceError::BookUnavailable);
        }

        let borrow_date = self.clock.today();
        let borrow = Borrow {
            id: BorrowId::new(),
            book_id,
            book_name: book.name,
            borrower_name,
            register_number,
            borrow_date,
            due_date: loan::due_date(borrow_date),
            returned_date: None,
            status: BorrowStatus::Active,
        };

        // Another borrow may have taken the book since the read above.
        if !self.borrows.create_and_check_out(&borrow).await? {
            return Err(LibraryServiceError::BookUnavailable);
        }
        tracing::info!(
            borrow_id = %borrow.id,
            book_id = %borrow.book_id,
            due_date = %borrow.due_date,
            "book borrowed"
        );
        Ok(borrow)
    }
}

// ── FindActiveBorrow ─────────────────────────────────────────────────────────

pub struct FindActiveBorrowUseCase<L: BorrowRepository> {
    pub repo: L,
}

impl<L: BorrowRepository> FindActiveBorrowUseCase<L> {
    pub async fn execute(&self, book_name: Option<String>) -> Result<Borrow, LibraryServiceError> {
        let book_name = required_text(book_name)
            .ok_or_else(|| LibraryServiceError::validation("book name is required"))?;
        self.repo
            .find_latest_active_by_book_name(&book_name)
            .await?
            .ok_or(LibraryServiceError::ActiveBorrowNotFound)
    }
}

// ── ReturnBook ───────────────────────────────────────────────────────────────

pub struct ReturnBookUseCase<L: BorrowRepository, C: Clock> {
    pub repo: L,
    pub clock: C,
}

impl<L: BorrowRepository, C: Clock> ReturnBookUseCase<L, C> {
    pub async fn execute(&self, borrow_id: Option<String>) -> Result<(), LibraryServiceError> {
        let borrow_id = required_text(borrow_id)
            .ok_or_else(|| LibraryServiceError::validation("borrow id is required"))?;
        let borrow_id: BorrowId = borrow_id
            .parse()
            .map_err(|_| LibraryServiceError::BorrowNotFound)?;

        let borrow = self
            .repo
            .find_by_id(borrow_id)
            .await?
            .ok_or(LibraryServiceError::BorrowNotFound)?;
        if !borrow.is_active() {
            return Err(LibraryServiceError::BorrowAlreadyReturned);
        }

        let returned_on = self.clock.today();
        // A concurrent return may have won the race since the read above.
        if !self.repo.mark_returned(&borrow, returned_on).await? {
            return Err(LibraryServiceError::BorrowAlreadyReturned);
        }
        tracing::info!(borrow_id = %borrow.id, book_id = %borrow.book_id, "book returned");
        Ok(())
    }
}
