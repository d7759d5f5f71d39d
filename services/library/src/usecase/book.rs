use rand::RngExt;

use shelfmark_core::clock::Clock;
use shelfmark_domain::id::BookId;
use shelfmark_domain::status::BookStatus;

use crate::domain::repository::{BookRepository, BorrowRepository};
use crate::domain::types::{
    Book, BookDeletion, BookDetails, InventoryItem, optional_text, required_text,
};
use crate::error::LibraryServiceError;

/// Charset for the random suffix of a book's public code (lowercase base-36).
const CODE_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const CODE_SUFFIX_LEN: usize = 9;

/// `BK` + creation millis + 9 random base-36 characters.
fn generate_unique_code(millis: i64) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..CODE_SUFFIX_LEN)
        .map(|_| CODE_CHARSET[rng.random_range(0..CODE_CHARSET.len())] as char)
        .collect();
    format!("BK{millis}{suffix}")
}

/// Unparsable ids cannot name a stored book.
fn parse_book_id(raw: &str) -> Result<BookId, LibraryServiceError> {
    raw.trim()
        .parse()
        .map_err(|_| LibraryServiceError::BookNotFound)
}

fn validate_details(input: BookInput) -> Result<BookDetails, LibraryServiceError> {
    match (required_text(input.name), required_text(input.location)) {
        (Some(name), Some(location)) => Ok(BookDetails {
            name,
            author: optional_text(input.author),
            location,
        }),
        _ => Err(LibraryServiceError::validation(
            "book name and location are required",
        )),
    }
}

/// Raw admin input for adding or editing a book.
#[derive(Debug, Clone, Default)]
pub struct BookInput {
    pub name: Option<String>,
    pub author: Option<String>,
    pub location: Option<String>,
}

// ── ListBooks ────────────────────────────────────────────────────────────────

pub struct ListBooksUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> ListBooksUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Book>, LibraryServiceError> {
        self.repo.list().await
    }
}

// ── ListAvailableBooks ───────────────────────────────────────────────────────

pub struct ListAvailableBooksUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> ListAvailableBooksUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Book>, LibraryServiceError> {
        self.repo.list_available().await
    }
}

// ── GetInventory ─────────────────────────────────────────────────────────────

pub struct GetInventoryUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> GetInventoryUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<InventoryItem>, LibraryServiceError> {
        self.repo.list_inventory().await
    }
}

// ── CreateBook ───────────────────────────────────────────────────────────────

pub struct CreateBookUseCase<R: BookRepository, C: Clock> {
    pub repo: R,
    pub clock: C,
}

impl<R: BookRepository, C: Clock> CreateBookUseCase<R, C> {
    pub async fn execute(&self, input: BookInput) -> Result<Book, LibraryServiceError> {
        let details = validate_details(input)?;
        let now = self.clock.now();
        let book = Book {
            id: BookId::new(),
            name: details.name,
            author: details.author,
            location: details.location,
            status: BookStatus::Available,
            unique_code: generate_unique_code(now.timestamp_millis()),
            created_at: now,
        };
        self.repo.create(&book).await?;
        tracing::info!(book_id = %book.id, unique_code = %book.unique_code, "book added");
        Ok(book)
    }
}

// ── UpdateBook ───────────────────────────────────────────────────────────────

pub struct UpdateBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> UpdateBookUseCase<R> {
    pub async fn execute(&self, id: &str, input: BookInput) -> Result<(), LibraryServiceError> {
        let details = validate_details(input)?;
        let id = parse_book_id(id)?;
        if !self.repo.update_details(id, &details).await? {
            return Err(LibraryServiceError::BookNotFound);
        }
        Ok(())
    }
}

// ── DeleteBook ───────────────────────────────────────────────────────────────

pub struct DeleteBookUseCase<B, L>
where
    B: BookRepository,
    L: BorrowRepository,
{
    pub books: B,
    pub borrows: L,
}

impl<B, L> DeleteBookUseCase<B, L>
where
    B: BookRepository,
    L: BorrowRepository,
{
    pub async fn execute(&self, id: &str) -> Result<(), LibraryServiceError> {
        let id = parse_book_id(id)?;
        let book = self
            .books
            .find_by_id(id)
            .await?
            .ok_or(LibraryServiceError::BookNotFound)?;

        if book.status != BookStatus::Available
            || self.borrows.find_active_by_book_id(id).await?.is_some()
        {
            return Err(LibraryServiceError::BookCurrentlyBorrowed);
        }

        // Checked again under the delete's transaction: a borrow may have
        // committed since the reads above.
        match self.books.delete_with_history(id).await? {
            BookDeletion::Deleted => {
                tracing::info!(book_id = %id, "book deleted with its borrow history");
                Ok(())
            }
            BookDeletion::NotFound => Err(LibraryServiceError::BookNotFound),
            BookDeletion::CheckedOut => Err(LibraryServiceError::BookCurrentlyBorrowed),
        }
    }
}
