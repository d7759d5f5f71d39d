use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shelfmark_auth_types::identity::AdminIdentity;

use crate::domain::types::Borrow;
use crate::error::LibraryServiceError;
use crate::handlers::{JsonBody, MessageResponse};
use crate::state::AppState;
use crate::usecase::borrow::{
    BorrowBookInput, BorrowBookUseCase, FindActiveBorrowUseCase, ReturnBookUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct BorrowResponse {
    pub id: String,
    pub book_id: String,
    pub book_name: String,
    pub borrower_name: String,
    pub register_number: String,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub returned_date: Option<NaiveDate>,
    pub status: &'static str,
}

impl From<Borrow> for BorrowResponse {
    fn from(borrow: Borrow) -> Self {
        Self {
            id: borrow.id.to_string(),
            book_id: borrow.book_id.to_string(),
            book_name: borrow.book_name,
            borrower_name: borrow.borrower_name,
            register_number: borrow.register_number,
            borrow_date: borrow.borrow_date,
            due_date: borrow.due_date,
            returned_date: borrow.returned_date,
            status: borrow.status.as_str(),
        }
    }
}

#[derive(Serialize)]
pub struct CreateBorrowResponse {
    pub success: bool,
    pub message: &'static str,
    pub borrow: BorrowResponse,
}

#[derive(Serialize)]
pub struct ActiveBorrowResponse {
    pub success: bool,
    pub borrow: BorrowResponse,
}

// ── POST /borrows ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CreateBorrowRequest {
    pub book_id: Option<String>,
    pub borrower_name: Option<String>,
    pub register_number: Option<String>,
}

pub async fn create_borrow(
    _identity: AdminIdentity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateBorrowRequest>,
) -> Result<(StatusCode, Json<CreateBorrowResponse>), LibraryServiceError> {
    let usecase = BorrowBookUseCase {
        books: state.book_repo(),
        borrows: state.borrow_repo(),
        clock: state.clock(),
    };
    let borrow = usecase
        .execute(BorrowBookInput {
            book_id: body.book_id,
            borrower_name: body.borrower_name,
            register_number: body.register_number,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateBorrowResponse {
            success: true,
            message: "book borrowed successfully",
            borrow: borrow.into(),
        }),
    ))
}

// ── GET /borrows/active?book_name= ───────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct ActiveBorrowQuery {
    pub book_name: Option<String>,
}

pub async fn find_active_borrow(
    _identity: AdminIdentity,
    State(state): State<AppState>,
    Query(query): Query<ActiveBorrowQuery>,
) -> Result<Json<ActiveBorrowResponse>, LibraryServiceError> {
    let usecase = FindActiveBorrowUseCase {
        repo: state.borrow_repo(),
    };
    let borrow = usecase.execute(query.book_name).await?;
    Ok(Json(ActiveBorrowResponse {
        success: true,
        borrow: borrow.into(),
    }))
}

// ── POST /borrows/return ─────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ReturnBorrowRequest {
    pub borrow_id: Option<String>,
}

pub async fn return_borrow(
    _identity: AdminIdentity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ReturnBorrowRequest>,
) -> Result<Json<MessageResponse>, LibraryServiceError> {
    let usecase = ReturnBookUseCase {
        repo: state.borrow_repo(),
        clock: state.clock(),
    };
    usecase.execute(body.borrow_id).await?;
    Ok(Json(MessageResponse::ok("book returned successfully")))
}
