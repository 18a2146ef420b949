use crate::domain::models::{Book, NewBook};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Storage seam for catalog book operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Book>>;
    async fn get_by_id(&self, book_id: Uuid) -> Result<Option<Book>>;
    /// Case-insensitive lookup used for duplicate detection on create.
    async fn find_by_title_author(&self, title: &str, author: &str) -> Result<Option<Book>>;
    /// Insert a book. Returns `None` when another row already holds the
    /// same title/author pair, so concurrent creates never error.
    async fn create(&self, new: NewBook) -> Result<Option<Book>>;
}

#[derive(Clone)]
pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PostgresBookRepository {
    async fn get_all(&self) -> Result<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, cover_image, genre, publication_date, isbn
            FROM books
            ORDER BY title
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch books")?;

        Ok(books)
    }

    async fn get_by_id(&self, book_id: Uuid) -> Result<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, cover_image, genre, publication_date, isbn
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch book")?;

        Ok(book)
    }

    async fn find_by_title_author(&self, title: &str, author: &str) -> Result<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, cover_image, genre, publication_date, isbn
            FROM books
            WHERE LOWER(title) = LOWER($1) AND LOWER(author) = LOWER($2)
            "#,
        )
        .bind(title)
        .bind(author)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to look up book by title/author")?;

        Ok(book)
    }

    async fn create(&self, new: NewBook) -> Result<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, title, author, cover_image, genre, publication_date, isbn)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (LOWER(title), LOWER(author)) DO NOTHING
            RETURNING id, title, author, cover_image, genre, publication_date, isbn
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.title)
        .bind(&new.author)
        .bind(&new.cover_image)
        .bind(&new.genre)
        .bind(&new.publication_date)
        .bind(&new.isbn)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to create book")?;

        Ok(book)
    }
}
