use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity (password hash never leaves the repository layer)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Catalog book entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub cover_image: Option<String>,
    pub genre: Option<String>,
    pub publication_date: Option<String>,
    pub isbn: Option<String>,
}

/// Reading status of a shelf entry. Stored as the `reading_status` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "reading_status", rename_all = "snake_case")]
pub enum ReadingStatus {
    Reading,
    Finished,
    WantToRead,
}

impl ReadingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingStatus::Reading => "reading",
            ReadingStatus::Finished => "finished",
            ReadingStatus::WantToRead => "want_to_read",
        }
    }
}

/// Shelf entry - a book on a user's bookshelf with reading state
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ShelfEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub status: ReadingStatus,
    /// Reading progress, 0-100
    pub progress: Option<i32>,
    /// Star rating, 0-5
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub is_public: bool,
    pub date_added: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

/// Fields accepted when creating a catalog book
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub cover_image: Option<String>,
    pub genre: Option<String>,
    pub publication_date: Option<String>,
    pub isbn: Option<String>,
}

/// Fields accepted when adding a book to a shelf
#[derive(Debug, Clone)]
pub struct NewShelfEntry {
    pub book_id: Uuid,
    pub status: ReadingStatus,
    pub progress: Option<i32>,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub is_public: bool,
}

/// Partial update to an existing shelf entry. `review` is doubled so a
/// PATCH can distinguish "leave as is" (`None`) from "clear it"
/// (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct ShelfEntryPatch {
    pub status: Option<ReadingStatus>,
    pub progress: Option<i32>,
    pub rating: Option<i32>,
    pub review: Option<Option<String>>,
    pub is_public: Option<bool>,
}

/// Shelf entry joined with its book
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfEntryWithBook {
    #[serde(flatten)]
    pub entry: ShelfEntry,
    pub book: Book,
}

/// Follow edge - a directed relationship between two users
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    pub follower_id: Uuid,
    pub followed_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A published review joined with book and reviewer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithContext {
    #[serde(flatten)]
    pub entry: ShelfEntry,
    pub book: Book,
    pub reviewer_name: String,
}

/// User summary for the community page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithFollowerCount {
    #[serde(flatten)]
    pub user: User,
    pub followers_count: i64,
}

/// Full public profile: user, visible entries, follow counts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user: User,
    pub public_books: Vec<ShelfEntryWithBook>,
    pub followers_count: i64,
    pub following_count: i64,
}
