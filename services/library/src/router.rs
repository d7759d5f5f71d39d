use axum::{
    Router,
    routing::{get, post, put},
};

use shelfmark_core::health::healthz;
use shelfmark_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    book::{create_book, delete_book, list_available_books, list_books, update_book},
    borrow::{create_borrow, find_active_borrow, return_borrow},
    dashboard::get_dashboard,
    health::readyz,
    inventory::get_inventory,
    notification::list_notifications,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Catalog
        .route("/books", get(list_books).post(create_book))
        .route("/books/available", get(list_available_books))
        .route("/books/{id}", put(update_book).delete(delete_book))
        // Borrow ledger
        .route("/borrows", post(create_borrow))
        .route("/borrows/active", get(find_active_borrow))
        .route("/borrows/return", post(return_borrow))
        // Notifications
        .route("/notifications", get(list_notifications))
        // Dashboard
        .route("/dashboard", get(get_dashboard))
        // Public
        .route("/inventory", get(get_inventory))
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
