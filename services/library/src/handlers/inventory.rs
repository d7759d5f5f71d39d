use axum::{Json, extract::State};
use serde::Serialize;

use crate::error::LibraryServiceError;
use crate::state::AppState;
use crate::usecase::book::GetInventoryUseCase;

#[derive(Serialize)]
pub struct InventoryItemResponse {
    pub unique_code: String,
    pub name: String,
}

#[derive(Serialize)]
pub struct InventoryResponse {
    pub success: bool,
    pub books: Vec<InventoryItemResponse>,
}

// ── GET /inventory ───────────────────────────────────────────────────────────

/// Public listing of what is on the shelves. No admin identity required.
pub async fn get_inventory(
    State(state): State<AppState>,
) -> Result<Json<InventoryResponse>, LibraryServiceError> {
    let usecase = GetInventoryUseCase {
        repo: state.book_repo(),
    };
    let items = usecase.execute().await?;
    Ok(Json(InventoryResponse {
        success: true,
        books: items
            .into_iter()
            .map(|item| InventoryItemResponse {
                unique_code: item.unique_code,
                name: item.name,
            })
            .collect(),
    }))
}
