use crate::domain::models::{
    Book, NewShelfEntry, ReadingStatus, ReviewWithContext, ShelfEntry, ShelfEntryPatch,
    ShelfEntryWithBook,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Flat row for shelf entry + book joins
#[derive(sqlx::FromRow)]
struct EntryBookRow {
    id: Uuid,
    user_id: Uuid,
    book_id: Uuid,
    status: ReadingStatus,
    progress: Option<i32>,
    rating: Option<i32>,
    review: Option<String>,
    is_public: bool,
    date_added: chrono::DateTime<chrono::Utc>,
    date_updated: chrono::DateTime<chrono::Utc>,
    title: String,
    author: String,
    cover_image: Option<String>,
    genre: Option<String>,
    publication_date: Option<String>,
    isbn: Option<String>,
    reviewer_name: Option<String>,
}

impl EntryBookRow {
    fn split(self) -> (ShelfEntry, Book, Option<String>) {
        let entry = ShelfEntry {
            id: self.id,
            user_id: self.user_id,
            book_id: self.book_id,
            status: self.status,
            progress: self.progress,
            rating: self.rating,
            review: self.review,
            is_public: self.is_public,
            date_added: self.date_added,
            date_updated: self.date_updated,
        };
        let book = Book {
            id: self.book_id,
            title: self.title,
            author: self.author,
            cover_image: self.cover_image,
            genre: self.genre,
            publication_date: self.publication_date,
            isbn: self.isbn,
        };
        (entry, book, self.reviewer_name)
    }
}

impl From<EntryBookRow> for ShelfEntryWithBook {
    fn from(row: EntryBookRow) -> Self {
        let (entry, book, _) = row.split();
        ShelfEntryWithBook { entry, book }
    }
}

const ENTRY_BOOK_COLUMNS: &str = r#"
    ub.id, ub.user_id, ub.book_id, ub.status, ub.progress, ub.rating,
    ub.review, ub.is_public, ub.date_added, ub.date_updated,
    b.title, b.author, b.cover_image, b.genre, b.publication_date, b.isbn,
    NULL::text AS reviewer_name
"#;

/// Storage seam for bookshelf entries
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserBookRepository: Send + Sync {
    async fn get_by_id(&self, entry_id: Uuid) -> Result<Option<ShelfEntry>>;
    async fn exists_for_user_book(&self, user_id: Uuid, book_id: Uuid) -> Result<bool>;
    async fn insert(&self, user_id: Uuid, new: NewShelfEntry) -> Result<ShelfEntry>;
    async fn update(&self, entry_id: Uuid, patch: ShelfEntryPatch) -> Result<ShelfEntry>;
    async fn delete(&self, entry_id: Uuid) -> Result<bool>;
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ShelfEntryWithBook>>;
    async fn list_public_for_user(&self, user_id: Uuid) -> Result<Vec<ShelfEntryWithBook>>;
    async fn list_reviews_for_user(&self, user_id: Uuid) -> Result<Vec<ShelfEntryWithBook>>;
    async fn list_all_reviews(&self) -> Result<Vec<ReviewWithContext>>;
}

#[derive(Clone)]
pub struct PostgresUserBookRepository {
    pool: PgPool,
}

impl PostgresUserBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserBookRepository for PostgresUserBookRepository {
    async fn get_by_id(&self, entry_id: Uuid) -> Result<Option<ShelfEntry>> {
        let entry = sqlx::query_as::<_, ShelfEntry>(
            r#"
            SELECT id, user_id, book_id, status, progress, rating, review,
                   is_public, date_added, date_updated
            FROM user_books
            WHERE id = $1
            "#,
        )
        .bind(entry_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch shelf entry")?;

        Ok(entry)
    }

    async fn exists_for_user_book(&self, user_id: Uuid, book_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM user_books
                WHERE user_id = $1 AND book_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to check shelf entry existence")?;

        Ok(exists)
    }

    async fn insert(&self, user_id: Uuid, new: NewShelfEntry) -> Result<ShelfEntry> {
        let entry = sqlx::query_as::<_, ShelfEntry>(
            r#"
            INSERT INTO user_books
                (id, user_id, book_id, status, progress, rating, review, is_public,
                 date_added, date_updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
            RETURNING id, user_id, book_id, status, progress, rating, review,
                      is_public, date_added, date_updated
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(new.book_id)
        .bind(new.status)
        .bind(new.progress)
        .bind(new.rating)
        .bind(&new.review)
        .bind(new.is_public)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert shelf entry")?;

        Ok(entry)
    }

    async fn update(&self, entry_id: Uuid, patch: ShelfEntryPatch) -> Result<ShelfEntry> {
        // The review column is handled with a set flag so a patch can null
        // it out, which COALESCE cannot express.
        let set_review = patch.review.is_some();
        let review = patch.review.flatten();

        let entry = sqlx::query_as::<_, ShelfEntry>(
            r#"
            UPDATE user_books
            SET status = COALESCE($2, status),
                progress = COALESCE($3, progress),
                rating = COALESCE($4, rating),
                review = CASE WHEN $5 THEN $6 ELSE review END,
                is_public = COALESCE($7, is_public),
                date_updated = NOW()
            WHERE id = $1
            RETURNING id, user_id, book_id, status, progress, rating, review,
                      is_public, date_added, date_updated
            "#,
        )
        .bind(entry_id)
        .bind(patch.status)
        .bind(patch.progress)
        .bind(patch.rating)
        .bind(set_review)
        .bind(review)
        .bind(patch.is_public)
        .fetch_one(&self.pool)
        .await
        .context("Failed to update shelf entry")?;

        Ok(entry)
    }

    async fn delete(&self, entry_id: Uuid) -> Result<bool> {
        let affected = sqlx::query("DELETE FROM user_books WHERE id = $1")
            .bind(entry_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete shelf entry")?
            .rows_affected();

        Ok(affected > 0)
    }

    /// All entries on a user's shelf, newest first
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ShelfEntryWithBook>> {
        let rows = sqlx::query_as::<_, EntryBookRow>(&format!(
            r#"
            SELECT {ENTRY_BOOK_COLUMNS}
            FROM user_books ub
            JOIN books b ON b.id = ub.book_id
            WHERE ub.user_id = $1
            ORDER BY ub.date_added DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list shelf entries")?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Only the entries a user has marked public
    async fn list_public_for_user(&self, user_id: Uuid) -> Result<Vec<ShelfEntryWithBook>> {
        let rows = sqlx::query_as::<_, EntryBookRow>(&format!(
            r#"
            SELECT {ENTRY_BOOK_COLUMNS}
            FROM user_books ub
            JOIN books b ON b.id = ub.book_id
            WHERE ub.user_id = $1 AND ub.is_public = TRUE
            ORDER BY ub.date_added DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list public shelf entries")?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Entries with a non-empty review for one user, newest first
    async fn list_reviews_for_user(&self, user_id: Uuid) -> Result<Vec<ShelfEntryWithBook>> {
        let rows = sqlx::query_as::<_, EntryBookRow>(&format!(
            r#"
            SELECT {ENTRY_BOOK_COLUMNS}
            FROM user_books ub
            JOIN books b ON b.id = ub.book_id
            WHERE ub.user_id = $1 AND ub.review IS NOT NULL AND ub.review <> ''
            ORDER BY ub.date_updated DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list reviews for user")?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Publicly visible reviews across users, newest first
    async fn list_all_reviews(&self) -> Result<Vec<ReviewWithContext>> {
        let rows = sqlx::query_as::<_, EntryBookRow>(
            r#"
            SELECT ub.id, ub.user_id, ub.book_id, ub.status, ub.progress, ub.rating,
                   ub.review, ub.is_public, ub.date_added, ub.date_updated,
                   b.title, b.author, b.cover_image, b.genre, b.publication_date, b.isbn,
                   u.name AS reviewer_name
            FROM user_books ub
            JOIN books b ON b.id = ub.book_id
            JOIN users u ON u.id = ub.user_id
            WHERE ub.review IS NOT NULL AND ub.review <> ''
              AND ub.is_public = TRUE
            ORDER BY ub.date_updated DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list reviews")?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let (entry, book, reviewer_name) = row.split();
                ReviewWithContext {
                    entry,
                    book,
                    reviewer_name: reviewer_name.unwrap_or_default(),
                }
            })
            .collect())
    }
}
