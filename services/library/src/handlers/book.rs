use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use shelfmark_auth_types::identity::AdminIdentity;

use crate::domain::types::Book;
use crate::error::LibraryServiceError;
use crate::handlers::{JsonBody, MessageResponse};
use crate::state::AppState;
use crate::usecase::book::{
    BookInput, CreateBookUseCase, DeleteBookUseCase, ListAvailableBooksUseCase, ListBooksUseCase,
    UpdateBookUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct BookResponse {
    pub id: String,
    pub name: String,
    pub author: Option<String>,
    pub location: String,
    pub status: &'static str,
    pub unique_code: String,
    #[serde(serialize_with = "shelfmark_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.to_string(),
            name: book.name,
            author: book.author,
            location: book.location,
            status: book.status.as_str(),
            unique_code: book.unique_code,
            created_at: book.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct BookListResponse {
    pub success: bool,
    pub books: Vec<BookResponse>,
}

impl BookListResponse {
    fn from_books(books: Vec<Book>) -> Self {
        Self {
            success: true,
            books: books.into_iter().map(BookResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct CreateBookResponse {
    pub success: bool,
    pub message: &'static str,
    pub book_id: String,
    pub unique_code: String,
}

// ── Request types ────────────────────────────────────────────────────────────

/// Missing fields deserialize to `None` so validation can answer with a
/// domain message instead of a JSON rejection.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct BookRequest {
    pub name: Option<String>,
    pub author: Option<String>,
    pub location: Option<String>,
}

impl From<BookRequest> for BookInput {
    fn from(body: BookRequest) -> Self {
        Self {
            name: body.name,
            author: body.author,
            location: body.location,
        }
    }
}

// ── GET /books ───────────────────────────────────────────────────────────────

pub async fn list_books(
    _identity: AdminIdentity,
    State(state): State<AppState>,
) -> Result<Json<BookListResponse>, LibraryServiceError> {
    let usecase = ListBooksUseCase {
        repo: state.book_repo(),
    };
    let books = usecase.execute().await?;
    Ok(Json(BookListResponse::from_books(books)))
}

// ── GET /books/available ─────────────────────────────────────────────────────

pub async fn list_available_books(
    _identity: AdminIdentity,
    State(state): State<AppState>,
) -> Result<Json<BookListResponse>, LibraryServiceError> {
    let usecase = ListAvailableBooksUseCase {
        repo: state.book_repo(),
    };
    let books = usecase.execute().await?;
    Ok(Json(BookListResponse::from_books(books)))
}

// ── POST /books ──────────────────────────────────────────────────────────────

pub async fn create_book(
    _identity: AdminIdentity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<BookRequest>,
) -> Result<(StatusCode, Json<CreateBookResponse>), LibraryServiceError> {
    let usecase = CreateBookUseCase {
        repo: state.book_repo(),
        clock: state.clock(),
    };
    let book = usecase.execute(body.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateBookResponse {
            success: true,
            message: "book added successfully",
            book_id: book.id.to_string(),
            unique_code: book.unique_code,
        }),
    ))
}

// ── PUT /books/{id} ──────────────────────────────────────────────────────────

pub async fn update_book(
    _identity: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<BookRequest>,
) -> Result<Json<MessageResponse>, LibraryServiceError> {
    let usecase = UpdateBookUseCase {
        repo: state.book_repo(),
    };
    usecase.execute(&id, body.into()).await?;
    Ok(Json(MessageResponse::ok("book updated successfully")))
}

// ── DELETE /books/{id} ───────────────────────────────────────────────────────

pub async fn delete_book(
    _identity: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, LibraryServiceError> {
    let usecase = DeleteBookUseCase {
        books: state.book_repo(),
        borrows: state.borrow_repo(),
    };
    usecase.execute(&id).await?;
    Ok(Json(MessageResponse::ok("book deleted successfully")))
}
