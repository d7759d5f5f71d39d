use chrono::Days;
use sea_orm::EntityTrait;

use shelfmark_domain::status::{BookStatus, BorrowStatus, NotificationStatus};
use shelfmark_library::domain::repository::{
    BookRepository, BorrowRepository, NotificationRepository,
};
use shelfmark_library::error::LibraryServiceError;
use shelfmark_library::usecase::book::{BookInput, DeleteBookUseCase, UpdateBookUseCase};
use shelfmark_library::usecase::borrow::FindActiveBorrowUseCase;
use shelfmark_library::usecase::dashboard::GetDashboardUseCase;
use shelfmark_library_schema::notifications;

use crate::helpers::{TestLibrary, borrow_input, start_date};

/// Every Unavailable book has exactly one Active borrow, and no Available
/// book has any.
async fn assert_book_borrow_consistency(library: &TestLibrary) {
    for book in library.books().list().await.unwrap() {
        let active = library.borrows().find_active_by_book_id(book.id).await.unwrap();
        match book.status {
            BookStatus::Available => assert!(active.is_none(), "{} has an active borrow", book.name),
            BookStatus::Unavailable => assert!(active.is_some(), "{} has no active borrow", book.name),
        }
    }
}

#[tokio::test]
async fn should_run_borrow_overdue_return_cycle() {
    let library = TestLibrary::new().await;

    let book = library.add_book("B1", "Shelf A").await;
    assert_eq!(book.status, BookStatus::Available);

    let borrow = library.borrow(&book, "R100").await;
    assert_eq!(borrow.status, BorrowStatus::Active);
    assert_eq!(borrow.borrow_date, start_date());
    assert_eq!(borrow.due_date, start_date() + Days::new(7));
    let stored = library.books().find_by_id(book.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookStatus::Unavailable);
    assert_book_borrow_consistency(&library).await;

    library.clock.advance_days(10);
    let report = library.sweep().await;
    assert_eq!(report.scanned, 1);
    assert_eq!(report.created, 1);
    let notifications = library.notifications().list_active().await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].days_overdue, 3);
    assert_eq!(notifications[0].book_name, "B1");
    assert_eq!(notifications[0].register_number, "R100");

    library
        .return_usecase()
        .execute(Some(borrow.id.to_string()))
        .await
        .unwrap();

    let stored = library.books().find_by_id(book.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookStatus::Available);
    let returned = library.borrows().find_by_id(borrow.id).await.unwrap().unwrap();
    assert_eq!(returned.status, BorrowStatus::Returned);
    assert_eq!(returned.returned_date, Some(start_date() + Days::new(10)));
    assert!(library.notifications().list_active().await.unwrap().is_empty());
    let stored = notifications::Entity::find()
        .all(&library.state.db)
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, NotificationStatus::Cleared.as_str());
    assert_book_borrow_consistency(&library).await;
}

#[tokio::test]
async fn should_keep_cleared_notification_out_of_dashboard() {
    let library = TestLibrary::new().await;
    let b1 = library.add_book("B1", "Shelf A").await;
    library.add_book("B2", "Shelf B").await;
    let borrow = library.borrow(&b1, "R100").await;
    library.clock.advance_days(9);
    library.sweep().await;

    let dashboard = GetDashboardUseCase {
        books: library.books(),
        notifications: library.notifications(),
    };
    let stats = dashboard.execute().await.unwrap();
    assert_eq!((stats.available, stats.borrowed, stats.overdue, stats.total), (1, 1, 1, 2));

    library
        .return_usecase()
        .execute(Some(borrow.id.to_string()))
        .await
        .unwrap();
    let stats = dashboard.execute().await.unwrap();
    assert_eq!((stats.available, stats.borrowed, stats.overdue, stats.total), (2, 0, 0, 2));
}

#[tokio::test]
async fn should_refuse_third_active_borrow() {
    let library = TestLibrary::new().await;
    let b1 = library.add_book("B1", "Shelf A").await;
    let b2 = library.add_book("B2", "Shelf A").await;
    let b3 = library.add_book("B3", "Shelf A").await;

    let first = library.borrow(&b1, "R100").await;
    library.borrow(&b2, "R100").await;
    let result = library.borrow_usecase().execute(borrow_input(&b3, "R100")).await;

    assert!(matches!(result, Err(LibraryServiceError::BorrowLimitExceeded)));
    let stored = library.books().find_by_id(b3.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookStatus::Available);
    assert_eq!(
        library.borrows().count_active_by_register_number("R100").await.unwrap(),
        2
    );

    // Returning one frees a slot.
    library
        .return_usecase()
        .execute(Some(first.id.to_string()))
        .await
        .unwrap();
    library.borrow(&b3, "R100").await;
    assert_book_borrow_consistency(&library).await;
}

#[tokio::test]
async fn should_conflict_on_unavailable_book_without_changes() {
    let library = TestLibrary::new().await;
    let book = library.add_book("B1", "Shelf A").await;
    let borrow = library.borrow(&book, "R100").await;

    let result = library.borrow_usecase().execute(borrow_input(&book, "R200")).await;

    assert!(matches!(result, Err(LibraryServiceError::BookUnavailable)));
    assert_eq!(
        library.borrows().count_active_by_register_number("R200").await.unwrap(),
        0
    );
    let active = library.borrows().find_active_by_book_id(book.id).await.unwrap();
    assert_eq!(active, Some(borrow));
}

#[tokio::test]
async fn should_reject_second_return_without_changes() {
    let library = TestLibrary::new().await;
    let book = library.add_book("B1", "Shelf A").await;
    let borrow = library.borrow(&book, "R100").await;
    library
        .return_usecase()
        .execute(Some(borrow.id.to_string()))
        .await
        .unwrap();
    let returned = library.borrows().find_by_id(borrow.id).await.unwrap();

    library.clock.advance_days(2);
    let result = library
        .return_usecase()
        .execute(Some(borrow.id.to_string()))
        .await;

    assert!(matches!(result, Err(LibraryServiceError::BorrowAlreadyReturned)));
    assert_eq!(library.borrows().find_by_id(borrow.id).await.unwrap(), returned);
}

#[tokio::test]
async fn should_sweep_idempotently_on_the_same_day() {
    let library = TestLibrary::new().await;
    let b1 = library.add_book("B1", "Shelf A").await;
    let b2 = library.add_book("B2", "Shelf A").await;
    library.borrow(&b1, "R100").await;
    library.clock.advance_days(1);
    library.borrow(&b2, "R200").await;

    library.clock.advance_days(10);
    let first = library.sweep().await;
    library.clock.advance_hours(8);
    let second = library.sweep().await;

    assert_eq!((first.scanned, first.created), (2, 2));
    assert_eq!((second.scanned, second.created, second.updated), (2, 0, 0));
    let notifications = library.notifications().list_active().await.unwrap();
    assert_eq!(notifications.len(), 2);
    // Most overdue first.
    assert_eq!(notifications[0].book_name, "B1");
    assert_eq!(notifications[0].days_overdue, 4);
    assert_eq!(notifications[1].days_overdue, 3);
}

#[tokio::test]
async fn should_refresh_days_overdue_on_later_sweep() {
    let library = TestLibrary::new().await;
    let book = library.add_book("B1", "Shelf A").await;
    library.borrow(&book, "R100").await;

    library.clock.advance_days(8);
    library.sweep().await;
    library.clock.advance_days(2);
    let report = library.sweep().await;

    assert_eq!(report.updated, 1);
    let notifications = library.notifications().list_active().await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].days_overdue, 3);
}

#[tokio::test]
async fn should_not_flag_book_due_today() {
    let library = TestLibrary::new().await;
    let book = library.add_book("B1", "Shelf A").await;
    library.borrow(&book, "R100").await;

    library.clock.advance_days(7);
    let report = library.sweep().await;

    assert_eq!(report.scanned, 0);
    assert_eq!(library.notifications().count_active().await.unwrap(), 0);
}

#[tokio::test]
async fn should_delete_only_after_return_and_cascade_history() {
    let library = TestLibrary::new().await;
    let book = library.add_book("B1", "Shelf A").await;
    let borrow = library.borrow(&book, "R100").await;
    library.clock.advance_days(9);
    library.sweep().await;

    let delete = DeleteBookUseCase {
        books: library.books(),
        borrows: library.borrows(),
    };
    let result = delete.execute(&book.id.to_string()).await;
    assert!(matches!(result, Err(LibraryServiceError::BookCurrentlyBorrowed)));
    assert!(library.books().find_by_id(book.id).await.unwrap().is_some());

    library
        .return_usecase()
        .execute(Some(borrow.id.to_string()))
        .await
        .unwrap();
    delete.execute(&book.id.to_string()).await.unwrap();

    assert!(library.books().find_by_id(book.id).await.unwrap().is_none());
    assert!(library.borrows().find_by_id(borrow.id).await.unwrap().is_none());
    assert_eq!(library.notifications().count_active().await.unwrap(), 0);
    let result = delete.execute(&book.id.to_string()).await;
    assert!(matches!(result, Err(LibraryServiceError::BookNotFound)));
}

#[tokio::test]
async fn should_keep_borrow_snapshot_after_rename() {
    let library = TestLibrary::new().await;
    let book = library.add_book("B1", "Shelf A").await;
    let borrow = library.borrow(&book, "R100").await;

    UpdateBookUseCase {
        repo: library.books(),
    }
    .execute(
        &book.id.to_string(),
        BookInput {
            name: Some("B1 (2nd ed.)".into()),
            author: Some("Someone".into()),
            location: Some("Shelf C".into()),
        },
    )
    .await
    .unwrap();

    let stored = library.books().find_by_id(book.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "B1 (2nd ed.)");
    assert_eq!(stored.status, BookStatus::Unavailable);

    let find = FindActiveBorrowUseCase {
        repo: library.borrows(),
    };
    assert_eq!(find.execute(Some("B1".into())).await.unwrap(), borrow);
    let result = find.execute(Some("B1 (2nd ed.)".into())).await;
    assert!(matches!(result, Err(LibraryServiceError::ActiveBorrowNotFound)));
}

#[tokio::test]
async fn should_list_catalog_views() {
    let library = TestLibrary::new().await;
    let emma = library.add_book("Emma", "Shelf B").await;
    library.clock.advance_hours(1);
    let dune = library.add_book("Dune", "Shelf A").await;
    library.clock.advance_hours(1);
    let borrowed = library.add_book("Anna Karenina", "Shelf C").await;
    library.borrow(&borrowed, "R100").await;

    let all: Vec<_> = library
        .books()
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();
    assert_eq!(all, vec![borrowed.id, dune.id, emma.id]);

    let available: Vec<_> = library
        .books()
        .list_available()
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(available, vec!["Dune", "Emma"]);

    let inventory = library.books().list_inventory().await.unwrap();
    assert_eq!(inventory.len(), 2);
    assert_eq!(inventory[0].unique_code, dune.unique_code);
    assert_eq!(inventory[1].name, "Emma");
}

#[tokio::test]
async fn should_give_each_book_a_distinct_code() {
    let library = TestLibrary::new().await;
    let first = library.add_book("B1", "Shelf A").await;
    let second = library.add_book("B1", "Shelf A").await;
    assert_ne!(first.unique_code, second.unique_code);
    assert!(first.unique_code.starts_with("BK"));
}
