//! sea-orm entities for the library service.

pub mod books;
pub mod borrows;
pub mod notifications;
