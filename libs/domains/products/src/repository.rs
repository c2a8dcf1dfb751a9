use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{Product, ProductFilter, ProductInput, ProductStats};

/// Repository trait for Product persistence
///
/// Implementations keep insertion order: listings and search results come
/// back in the order products were added.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product under a freshly assigned id
    async fn create(&self, input: ProductInput) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: &str) -> ProductResult<Option<Product>>;

    /// List products matching the filter
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// Products whose name contains `term`, case-insensitively
    async fn search_by_name(&self, term: &str) -> ProductResult<Vec<Product>>;

    /// Replace all business fields of an existing product
    async fn update(&self, id: &str, input: ProductInput) -> ProductResult<Product>;

    /// Delete a product by ID, returning whether it existed
    async fn delete(&self, id: &str) -> ProductResult<bool>;

    /// Totals over the whole collection
    async fn stats(&self) -> ProductResult<ProductStats>;
}
