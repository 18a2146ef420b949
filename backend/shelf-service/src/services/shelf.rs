use crate::domain::models::{
    Book, NewBook, NewShelfEntry, ReviewWithContext, ShelfEntry, ShelfEntryPatch,
    ShelfEntryWithBook,
};
use crate::error::{AppError, Result};
use crate::repository::{BookRepository, UserBookRepository};
use std::sync::Arc;
use uuid::Uuid;

/// Bookshelf operations: catalog access plus owner-scoped entry CRUD.
#[derive(Clone)]
pub struct ShelfService {
    books: Arc<dyn BookRepository>,
    entries: Arc<dyn UserBookRepository>,
}

impl ShelfService {
    pub fn new(books: Arc<dyn BookRepository>, entries: Arc<dyn UserBookRepository>) -> Self {
        Self { books, entries }
    }

    pub async fn list_books(&self) -> Result<Vec<Book>> {
        Ok(self.books.get_all().await?)
    }

    pub async fn get_book(&self, book_id: Uuid) -> Result<Book> {
        self.books
            .get_by_id(book_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("book {book_id} not found")))
    }

    /// Create a catalog book. Title+author matching is case-insensitive and
    /// a concurrent create of the same pair resolves to the surviving row.
    pub async fn create_book(&self, new: NewBook) -> Result<Book> {
        let (title, author) = (new.title.clone(), new.author.clone());

        if let Some(book) = self.books.create(new).await? {
            return Ok(book);
        }

        self.books
            .find_by_title_author(&title, &author)
            .await?
            .ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "book '{title}' by {author} vanished after insert conflict"
                ))
            })
    }

    /// Add a book to the caller's shelf. A book already on the shelf is a
    /// conflict, not a silent duplicate.
    pub async fn add_to_shelf(&self, user_id: Uuid, new: NewShelfEntry) -> Result<ShelfEntry> {
        let book = self
            .books
            .get_by_id(new.book_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("book {} not found", new.book_id)))?;

        if self.entries.exists_for_user_book(user_id, book.id).await? {
            return Err(AppError::Conflict(format!(
                "'{}' by {} is already on your shelf",
                book.title, book.author
            )));
        }

        let entry = self.entries.insert(user_id, new).await?;

        tracing::debug!(%user_id, book_id = %book.id, "shelf entry created");
        Ok(entry)
    }

    /// Update a shelf entry. Only the owner may mutate it.
    pub async fn update_entry(
        &self,
        caller_id: Uuid,
        entry_id: Uuid,
        patch: ShelfEntryPatch,
    ) -> Result<ShelfEntry> {
        let entry = self.owned_entry(caller_id, entry_id).await?;
        Ok(self.entries.update(entry.id, patch).await?)
    }

    /// Remove a shelf entry. Only the owner may remove it.
    pub async fn remove_entry(&self, caller_id: Uuid, entry_id: Uuid) -> Result<()> {
        let entry = self.owned_entry(caller_id, entry_id).await?;
        self.entries.delete(entry.id).await?;
        Ok(())
    }

    /// The caller's own shelf (all entries, public or not)
    pub async fn list_own(&self, user_id: Uuid) -> Result<Vec<ShelfEntryWithBook>> {
        Ok(self.entries.list_for_user(user_id).await?)
    }

    /// Another user's shelf as the public sees it
    pub async fn list_public(&self, user_id: Uuid) -> Result<Vec<ShelfEntryWithBook>> {
        Ok(self.entries.list_public_for_user(user_id).await?)
    }

    pub async fn list_reviews_for_user(&self, user_id: Uuid) -> Result<Vec<ShelfEntryWithBook>> {
        Ok(self.entries.list_reviews_for_user(user_id).await?)
    }

    /// The cross-user review feed is anonymous-readable, so only public
    /// entries may appear in it regardless of what storage returns.
    pub async fn list_all_reviews(&self) -> Result<Vec<ReviewWithContext>> {
        let mut reviews = self.entries.list_all_reviews().await?;
        reviews.retain(|review| review.entry.is_public);
        Ok(reviews)
    }

    async fn owned_entry(&self, caller_id: Uuid, entry_id: Uuid) -> Result<ShelfEntry> {
        let entry = self
            .entries
            .get_by_id(entry_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("shelf entry {entry_id} not found")))?;

        if entry.user_id != caller_id {
            return Err(AppError::Forbidden(
                "shelf entries can only be changed by their owner".to_string(),
            ));
        }

        Ok(entry)
    }
}
