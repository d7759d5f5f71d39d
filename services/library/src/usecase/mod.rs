pub mod book;
pub mod borrow;
pub mod dashboard;
pub mod notification;
