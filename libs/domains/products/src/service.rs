//! Product Service - Business logic layer

use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    ListQuery, Product, ProductPage, ProductPayload, ProductStats, SearchResults,
};
use crate::repository::ProductRepository;
use crate::validation::validate_product_payload;

/// Delay of the simulated lookup behind [`ProductService::failing_lookup`]
pub const SIMULATED_LOOKUP_DELAY: Duration = Duration::from_millis(100);

/// Product service providing business logic operations
///
/// Payload validation, pagination and search-term checks live here; the
/// repository only stores and filters.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Filter by category, then return the requested page
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ListQuery) -> ProductResult<ProductPage> {
        let filtered = self.repository.list(query.filter()).await?;
        Ok(ProductPage::paginate(filtered, query.page, query.limit))
    }

    /// Case-insensitive name search. A missing or empty term is rejected.
    #[instrument(skip(self))]
    pub async fn search_products(&self, name: Option<&str>) -> ProductResult<SearchResults> {
        let term = name
            .filter(|n| !n.is_empty())
            .ok_or(ProductError::MissingQueryParam("name"))?;

        let products = self.repository.search_by_name(term).await?;
        Ok(products.into())
    }

    #[instrument(skip(self))]
    pub async fn product_stats(&self) -> ProductResult<ProductStats> {
        self.repository.stats().await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Validate and store a new product
    #[instrument(skip(self, payload))]
    pub async fn create_product(&self, payload: ProductPayload) -> ProductResult<Product> {
        let input = validate_product_payload(&payload)?;
        self.repository.create(input).await
    }

    /// Full replace. The payload is validated before the id is looked up.
    #[instrument(skip(self, payload))]
    pub async fn update_product(&self, id: &str, payload: ProductPayload) -> ProductResult<Product> {
        let input = validate_product_payload(&payload)?;
        self.repository.update(id, input).await
    }

    /// Delete a product by ID
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(ProductError::NotFound(id.to_string()))
        }
    }

    /// Always fails with a 400, exercising the error pipeline synchronously.
    pub fn forced_error(&self) -> ProductResult<Product> {
        Err(ProductError::WithStatus {
            status: 400,
            message: "This is a forced error".to_string(),
        })
    }

    /// Simulates a slow lookup that finds nothing, then fails with a 404.
    #[instrument(skip(self))]
    pub async fn failing_lookup(&self) -> ProductResult<Product> {
        tokio::time::sleep(SIMULATED_LOOKUP_DELAY).await;
        let found: Option<Product> = None;

        found.ok_or_else(|| ProductError::WithStatus {
            status: 404,
            message: "Product not found".to_string(),
        })
    }
}
