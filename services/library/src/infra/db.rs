use anyhow::Context as _;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    sea_query::Expr,
};

use shelfmark_domain::id::{BookId, BorrowId, NotificationId};
use shelfmark_domain::status::{BookStatus, BorrowStatus, NotificationStatus};
use shelfmark_library_schema::{books, borrows, notifications};

use crate::domain::repository::{BookRepository, BorrowRepository, NotificationRepository};
use crate::domain::types::{
    Book, BookDeletion, BookDetails, Borrow, InventoryItem, Notification, OverdueWrite,
};
use crate::error::LibraryServiceError;

// ── Book repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBookRepository {
    pub db: DatabaseConnection,
}

impl BookRepository for DbBookRepository {
    async fn list(&self) -> Result<Vec<Book>, LibraryServiceError> {
        let models = books::Entity::find()
            .order_by_desc(books::Column::CreatedAt)
            .order_by_desc(books::Column::Id)
            .all(&self.db)
            .await
            .context("list books")?;
        Ok(models
            .into_iter()
            .map(book_from_model)
            .collect::<anyhow::Result<Vec<_>>>()?)
    }

    async fn list_available(&self) -> Result<Vec<Book>, LibraryServiceError> {
        let models = books::Entity::find()
            .filter(books::Column::Status.eq(BookStatus::Available.as_str()))
            .order_by_asc(books::Column::Name)
            .order_by_asc(books::Column::Id)
            .all(&self.db)
            .await
            .context("list available books")?;
        Ok(models
            .into_iter()
            .map(book_from_model)
            .collect::<anyhow::Result<Vec<_>>>()?)
    }

    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, LibraryServiceError> {
        let rows: Vec<(String, String)> = books::Entity::find()
            .select_only()
            .column(books::Column::UniqueCode)
            .column(books::Column::Name)
            .filter(books::Column::Status.eq(BookStatus::Available.as_str()))
            .order_by_asc(books::Column::Name)
            .order_by_asc(books::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .context("list public inventory")?;
        Ok(rows
            .into_iter()
            .map(|(unique_code, name)| InventoryItem { unique_code, name })
            .collect())
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, LibraryServiceError> {
        let model = books::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find book by id")?;
        Ok(model.map(book_from_model).transpose()?)
    }

    async fn create(&self, book: &Book) -> Result<(), LibraryServiceError> {
        books::ActiveModel {
            id: Set(book.id.0),
            name: Set(book.name.clone()),
            author: Set(book.author.clone()),
            location: Set(book.location.clone()),
            status: Set(book.status.as_str().to_owned()),
            unique_code: Set(book.unique_code.clone()),
            created_at: Set(book.created_at),
        }
        .insert(&self.db)
        .await
        .context("create book")?;
        Ok(())
    }

    async fn update_details(
        &self,
        id: BookId,
        details: &BookDetails,
    ) -> Result<bool, LibraryServiceError> {
        let result = books::Entity::update_many()
            .col_expr(books::Column::Name, Expr::value(details.name.clone()))
            .col_expr(books::Column::Author, Expr::value(details.author.clone()))
            .col_expr(books::Column::Location, Expr::value(details.location.clone()))
            .filter(books::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("update book details")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_with_history(&self, id: BookId) -> Result<BookDeletion, LibraryServiceError> {
        let outcome = self
            .db
            .transaction::<_, BookDeletion, DbErr>(|txn| {
                Box::pin(async move {
                    // Guarded no-op write: holds the book row for the rest of
                    // the transaction, so a borrow cannot check it out between
                    // this check and the delete below.
                    let held = books::Entity::update_many()
                        .col_expr(
                            books::Column::Status,
                            Expr::value(BookStatus::Available.as_str()),
                        )
                        .filter(books::Column::Id.eq(id.0))
                        .filter(books::Column::Status.eq(BookStatus::Available.as_str()))
                        .exec(txn)
                        .await?;
                    if held.rows_affected == 0 {
                        let exists = books::Entity::find_by_id(id.0).one(txn).await?.is_some();
                        return Ok(if exists {
                            BookDeletion::CheckedOut
                        } else {
                            BookDeletion::NotFound
                        });
                    }

                    let active_borrows = borrows::Entity::find()
                        .filter(borrows::Column::BookId.eq(id.0))
                        .filter(borrows::Column::Status.eq(BorrowStatus::Active.as_str()))
                        .count(txn)
                        .await?;
                    if active_borrows > 0 {
                        return Ok(BookDeletion::CheckedOut);
                    }

                    // Dependents first: both tables reference books(id).
                    notifications::Entity::delete_many()
                        .filter(notifications::Column::BookId.eq(id.0))
                        .exec(txn)
                        .await?;
                    borrows::Entity::delete_many()
                        .filter(borrows::Column::BookId.eq(id.0))
                        .exec(txn)
                        .await?;
                    books::Entity::delete_many()
                        .filter(books::Column::Id.eq(id.0))
                        .filter(books::Column::Status.eq(BookStatus::Available.as_str()))
                        .exec(txn)
                        .await?;
                    Ok(BookDeletion::Deleted)
                })
            })
            .await
            .context("delete book with history")?;
        Ok(outcome)
    }

    async fn count_by_status(&self, status: BookStatus) -> Result<u64, LibraryServiceError> {
        let count = books::Entity::find()
            .filter(books::Column::Status.eq(status.as_str()))
            .count(&self.db)
            .await
            .context("count books by status")?;
        Ok(count)
    }

    async fn count_all(&self) -> Result<u64, LibraryServiceError> {
        let count = books::Entity::find()
            .count(&self.db)
            .await
            .context("count books")?;
        Ok(count)
    }
}

fn book_from_model(model: books::Model) -> anyhow::Result<Book> {
    Ok(Book {
        id: BookId(model.id),
        status: model.status.parse().context("decode book status")?,
        name: model.name,
        author: model.author,
        location: model.location,
        unique_code: model.unique_code,
        created_at: model.created_at,
    })
}

// ── Borrow repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBorrowRepository {
    pub db: DatabaseConnection,
}

impl BorrowRepository for DbBorrowRepository {
    async fn find_by_id(&self, id: BorrowId) -> Result<Option<Borrow>, LibraryServiceError> {
        let model = borrows::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find borrow by id")?;
        Ok(model.map(borrow_from_model).transpose()?)
    }

    async fn count_active_by_register_number(
        &self,
        register_number: &str,
    ) -> Result<u64, LibraryServiceError> {
        let count = borrows::Entity::find()
            .filter(borrows::Column::RegisterNumber.eq(register_number))
            .filter(borrows::Column::Status.eq(BorrowStatus::Active.as_str()))
            .count(&self.db)
            .await
            .context("count active borrows by register number")?;
        Ok(count)
    }

    async fn find_active_by_book_id(
        &self,
        book_id: BookId,
    ) -> Result<Option<Borrow>, LibraryServiceError> {
        let model = borrows::Entity::find()
            .filter(borrows::Column::BookId.eq(book_id.0))
            .filter(borrows::Column::Status.eq(BorrowStatus::Active.as_str()))
            .one(&self.db)
            .await
            .context("find active borrow by book id")?;
        Ok(model.map(borrow_from_model).transpose()?)
    }

    async fn find_latest_active_by_book_name(
        &self,
        book_name: &str,
    ) -> Result<Option<Borrow>, LibraryServiceError> {
        let model = borrows::Entity::find()
            .filter(borrows::Column::BookName.eq(book_name))
            .filter(borrows::Column::Status.eq(BorrowStatus::Active.as_str()))
            .order_by_desc(borrows::Column::BorrowDate)
            .order_by_desc(borrows::Column::Id)
            .one(&self.db)
            .await
            .context("find latest active borrow by book name")?;
        Ok(model.map(borrow_from_model).transpose()?)
    }

    async fn list_overdue(&self, today: NaiveDate) -> Result<Vec<Borrow>, LibraryServiceError> {
        let models = borrows::Entity::find()
            .filter(borrows::Column::Status.eq(BorrowStatus::Active.as_str()))
            .filter(borrows::Column::DueDate.lt(today))
            .order_by_asc(borrows::Column::DueDate)
            .order_by_asc(borrows::Column::Id)
            .all(&self.db)
            .await
            .context("list overdue borrows")?;
        Ok(models
            .into_iter()
            .map(borrow_from_model)
            .collect::<anyhow::Result<Vec<_>>>()?)
    }

    async fn create_and_check_out(&self, borrow: &Borrow) -> Result<bool, LibraryServiceError> {
        let created = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                let borrow = borrow.clone();
                Box::pin(async move {
                    // Guarded flip: only an Available book can be checked out.
                    let claimed = books::Entity::update_many()
                        .col_expr(
                            books::Column::Status,
                            Expr::value(BookStatus::Unavailable.as_str()),
                        )
                        .filter(books::Column::Id.eq(borrow.book_id.0))
                        .filter(books::Column::Status.eq(BookStatus::Available.as_str()))
                        .exec(txn)
                        .await?;
                    if claimed.rows_affected == 0 {
                        return Ok(false);
                    }

                    borrows::ActiveModel {
                        id: Set(borrow.id.0),
                        book_id: Set(borrow.book_id.0),
                        book_name: Set(borrow.book_name),
                        borrower_name: Set(borrow.borrower_name),
                        register_number: Set(borrow.register_number),
                        borrow_date: Set(borrow.borrow_date),
                        due_date: Set(borrow.due_date),
                        returned_date: Set(borrow.returned_date),
                        status: Set(borrow.status.as_str().to_owned()),
                    }
                    .insert(txn)
                    .await?;
                    Ok(true)
                })
            })
            .await
            .context("create borrow and check out book")?;
        Ok(created)
    }

    async fn mark_returned(
        &self,
        borrow: &Borrow,
        returned_on: NaiveDate,
    ) -> Result<bool, LibraryServiceError> {
        let borrow_id = borrow.id;
        let book_id = borrow.book_id;
        let returned = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let closed = borrows::Entity::update_many()
                        .col_expr(borrows::Column::ReturnedDate, Expr::value(returned_on))
                        .col_expr(
                            borrows::Column::Status,
                            Expr::value(BorrowStatus::Returned.as_str()),
                        )
                        .filter(borrows::Column::Id.eq(borrow_id.0))
                        .filter(borrows::Column::Status.eq(BorrowStatus::Active.as_str()))
                        .exec(txn)
                        .await?;
                    if closed.rows_affected == 0 {
                        return Ok(false);
                    }

                    books::Entity::update_many()
                        .col_expr(
                            books::Column::Status,
                            Expr::value(BookStatus::Available.as_str()),
                        )
                        .filter(books::Column::Id.eq(book_id.0))
                        .exec(txn)
                        .await?;

                    notifications::Entity::update_many()
                        .col_expr(
                            notifications::Column::Status,
                            Expr::value(NotificationStatus::Cleared.as_str()),
                        )
                        .filter(notifications::Column::BookId.eq(book_id.0))
                        .filter(
                            notifications::Column::Status.eq(NotificationStatus::Active.as_str()),
                        )
                        .exec(txn)
                        .await?;
                    Ok(true)
                })
            })
            .await
            .context("mark borrow returned")?;
        Ok(returned)
    }
}

fn borrow_from_model(model: borrows::Model) -> anyhow::Result<Borrow> {
    Ok(Borrow {
        id: BorrowId(model.id),
        book_id: BookId(model.book_id),
        status: model.status.parse().context("decode borrow status")?,
        book_name: model.book_name,
        borrower_name: model.borrower_name,
        register_number: model.register_number,
        borrow_date: model.borrow_date,
        due_date: model.due_date,
        returned_date: model.returned_date,
    })
}

// ── Notification repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbNotificationRepository {
    pub db: DatabaseConnection,
}

impl NotificationRepository for DbNotificationRepository {
    async fn list_active(&self) -> Result<Vec<Notification>, LibraryServiceError> {
        let models = notifications::Entity::find()
            .filter(notifications::Column::Status.eq(NotificationStatus::Active.as_str()))
            .order_by_desc(notifications::Column::DaysOverdue)
            .order_by_desc(notifications::Column::CreatedAt)
            .order_by_desc(notifications::Column::Id)
            .all(&self.db)
            .await
            .context("list active notifications")?;
        Ok(models
            .into_iter()
            .map(notification_from_model)
            .collect::<anyhow::Result<Vec<_>>>()?)
    }

    async fn record_overdue(
        &self,
        borrow_id: BorrowId,
        notification: &Notification,
    ) -> Result<OverdueWrite, LibraryServiceError> {
        let days_overdue =
            i32::try_from(notification.days_overdue).context("days overdue out of range")?;
        let outcome = self
            .db
            .transaction::<_, OverdueWrite, DbErr>(|txn| {
                let notification = notification.clone();
                Box::pin(async move {
                    // Guarded no-op write: holds the borrow row, so a return
                    // lands either before this check or after the commit, where
                    // it clears whatever was written here.
                    let held = borrows::Entity::update_many()
                        .col_expr(
                            borrows::Column::Status,
                            Expr::value(BorrowStatus::Active.as_str()),
                        )
                        .filter(borrows::Column::Id.eq(borrow_id.0))
                        .filter(borrows::Column::Status.eq(BorrowStatus::Active.as_str()))
                        .exec(txn)
                        .await?;
                    if held.rows_affected == 0 {
                        return Ok(OverdueWrite::BorrowClosed);
                    }

                    let active = NotificationStatus::Active.as_str();
                    // Notices left behind by an earlier loan of the same book.
                    notifications::Entity::update_many()
                        .col_expr(
                            notifications::Column::Status,
                            Expr::value(NotificationStatus::Cleared.as_str()),
                        )
                        .filter(notifications::Column::BookId.eq(notification.book_id.0))
                        .filter(notifications::Column::Status.eq(active))
                        .filter(
                            Condition::any()
                                .add(
                                    notifications::Column::RegisterNumber
                                        .ne(notification.register_number.as_str()),
                                )
                                .add(notifications::Column::DueDate.ne(notification.due_date)),
                        )
                        .exec(txn)
                        .await?;

                    let existing = notifications::Entity::find()
                        .filter(notifications::Column::BookId.eq(notification.book_id.0))
                        .filter(
                            notifications::Column::RegisterNumber
                                .eq(notification.register_number.as_str()),
                        )
                        .filter(notifications::Column::DueDate.eq(notification.due_date))
                        .filter(notifications::Column::Status.eq(active))
                        .one(txn)
                        .await?;
                    match existing {
                        Some(existing) if existing.days_overdue == days_overdue => {
                            Ok(OverdueWrite::Unchanged)
                        }
                        Some(existing) => {
                            notifications::Entity::update_many()
                                .col_expr(
                                    notifications::Column::DaysOverdue,
                                    Expr::value(days_overdue),
                                )
                                .filter(notifications::Column::Id.eq(existing.id))
                                .exec(txn)
                                .await?;
                            Ok(OverdueWrite::Updated)
                        }
                        None => {
                            notifications::ActiveModel {
                                id: Set(notification.id.0),
                                book_id: Set(notification.book_id.0),
                                book_name: Set(notification.book_name),
                                borrower_name: Set(notification.borrower_name),
                                register_number: Set(notification.register_number),
                                borrow_date: Set(notification.borrow_date),
                                due_date: Set(notification.due_date),
                                days_overdue: Set(days_overdue),
                                status: Set(notification.status.as_str().to_owned()),
                                created_at: Set(notification.created_at),
                            }
                            .insert(txn)
                            .await?;
                            Ok(OverdueWrite::Created)
                        }
                    }
                })
            })
            .await
            .context("record overdue notification")?;
        Ok(outcome)
    }

    async fn count_active(&self) -> Result<u64, LibraryServiceError> {
        let count = notifications::Entity::find()
            .filter(notifications::Column::Status.eq(NotificationStatus::Active.as_str()))
            .count(&self.db)
            .await
            .context("count active notifications")?;
        Ok(count)
    }
}

fn notification_from_model(model: notifications::Model) -> anyhow::Result<Notification> {
    Ok(Notification {
        id: NotificationId(model.id),
        book_id: BookId(model.book_id),
        status: model.status.parse().context("decode notification status")?,
        book_name: model.book_name,
        borrower_name: model.borrower_name,
        register_number: model.register_number,
        borrow_date: model.borrow_date,
        due_date: model.due_date,
        days_overdue: i64::from(model.days_overdue),
        created_at: model.created_at,
    })
}
