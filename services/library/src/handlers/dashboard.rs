use axum::{Json, extract::State};
use serde::Serialize;

use shelfmark_auth_types::identity::AdminIdentity;

use crate::error::LibraryServiceError;
use crate::state::AppState;
use crate::usecase::dashboard::GetDashboardUseCase;

#[derive(Serialize)]
pub struct DashboardResponse {
    pub success: bool,
    pub available: u64,
    pub borrowed: u64,
    pub overdue: u64,
    pub total: u64,
}

// ── GET /dashboard ───────────────────────────────────────────────────────────

pub async fn get_dashboard(
    _identity: AdminIdentity,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, LibraryServiceError> {
    let usecase = GetDashboardUseCase {
        books: state.book_repo(),
        notifications: state.notification_repo(),
    };
    let stats = usecase.execute().await?;
    Ok(Json(DashboardResponse {
        success: true,
        available: stats.available,
        borrowed: stats.borrowed,
        overdue: stats.overdue,
        total: stats.total,
    }))
}
