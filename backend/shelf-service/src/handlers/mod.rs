pub mod books;
pub mod follows;
pub mod reviews;
pub mod shelf;
pub mod users;
