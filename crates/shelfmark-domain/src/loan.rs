//! Loan rules: loan period, per-borrower limit and overdue arithmetic.
//!
//! All arithmetic is on calendar dates so that the same due date always
//! yields the same overdue count regardless of the time of day.

use chrono::{Days, NaiveDate};

/// Days between the borrow date and the due date.
pub const LOAN_PERIOD_DAYS: u64 = 7;

/// Maximum number of simultaneously active borrows per register number.
pub const MAX_ACTIVE_BORROWS: u64 = 2;

/// Due date for a loan starting on `borrowed_on`.
pub fn due_date(borrowed_on: NaiveDate) -> NaiveDate {
    borrowed_on
        .checked_add_days(Days::new(LOAN_PERIOD_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

/// Whole days past due as of `today`, or `None` when not yet overdue.
///
/// A loan due exactly `today` is not overdue.
pub fn days_overdue(due_on: NaiveDate, today: NaiveDate) -> Option<i64> {
    if due_on < today {
        Some((today - due_on).num_days())
    } else {
        None
    }
}

/// Whether a borrower holding `active` loans may take another one.
pub fn within_borrow_limit(active: u64) -> bool {
    active < MAX_ACTIVE_BORROWS
}
