use axum::{Json, extract::State};
use chrono::NaiveDate;
use serde::Serialize;

use shelfmark_auth_types::identity::AdminIdentity;

use crate::domain::types::Notification;
use crate::error::LibraryServiceError;
use crate::state::AppState;
use crate::usecase::notification::ListNotificationsUseCase;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub book_id: String,
    pub book_name: String,
    pub borrower_name: String,
    pub register_number: String,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub days_overdue: i64,
    pub status: &'static str,
    #[serde(serialize_with = "shelfmark_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id.to_string(),
            book_id: n.book_id.to_string(),
            book_name: n.book_name,
            borrower_name: n.borrower_name,
            register_number: n.register_number,
            borrow_date: n.borrow_date,
            due_date: n.due_date,
            days_overdue: n.days_overdue,
            status: n.status.as_str(),
            created_at: n.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct NotificationListResponse {
    pub success: bool,
    pub notifications: Vec<NotificationResponse>,
}

// ── GET /notifications ───────────────────────────────────────────────────────

pub async fn list_notifications(
    _identity: AdminIdentity,
    State(state): State<AppState>,
) -> Result<Json<NotificationListResponse>, LibraryServiceError> {
    let usecase = ListNotificationsUseCase {
        repo: state.notification_repo(),
    };
    let notifications = usecase.execute().await?;
    Ok(Json(NotificationListResponse {
        success: true,
        notifications: notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    }))
}
