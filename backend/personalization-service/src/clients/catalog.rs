use crate::domain::CatalogBook;
use crate::error::Result;

/// HTTP client for shelf-service's book catalog. The catalog is read-only
/// input here; errors propagate to the caller unchanged (no retries at this
/// layer).
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn list_books(&self) -> Result<Vec<CatalogBook>> {
        let books = self
            .http
            .get(format!("{}/api/books", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<CatalogBook>>()
            .await?;

        Ok(books)
    }
}
