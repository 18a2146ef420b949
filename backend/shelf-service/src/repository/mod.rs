pub mod books;
pub mod follows;
pub mod user_books;
pub mod users;

pub use books::{BookRepository, PostgresBookRepository};
pub use follows::{FollowRepository, PostgresFollowRepository};
pub use user_books::{PostgresUserBookRepository, UserBookRepository};
pub use users::UserRepository;
