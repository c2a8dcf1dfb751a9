use async_trait::async_trait;
use serde_json::Number;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFilter, ProductInput, ProductStats};
use crate::repository::ProductRepository;

#[derive(Debug, Default)]
struct Inventory {
    products: Vec<Product>,
    /// Last id handed out. Only ever grows, so deleted ids are never reused.
    last_id: u64,
}

/// In-memory implementation of ProductRepository
///
/// Cloning shares the same underlying collection.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    inventory: Arc<RwLock<Inventory>>,
}

impl InMemoryProductRepository {
    /// An empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding `products`, in order.
    ///
    /// New ids continue after the collection size or the highest numeric id
    /// already present, whichever is larger.
    pub fn with_products(products: Vec<Product>) -> Self {
        let highest = products
            .iter()
            .filter_map(|p| p.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        let last_id = highest.max(products.len() as u64);

        Self {
            inventory: Arc::new(RwLock::new(Inventory { products, last_id })),
        }
    }

    /// A store holding the three sample products served at startup
    pub fn seeded() -> Self {
        Self::with_products(seed_products())
    }
}

/// Sample catalogue loaded at startup
pub fn seed_products() -> Vec<Product> {
    let sample = |id: u64, name: &str, description: &str, price: u64, category: &str, in_stock| {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price: Number::from(price),
            category: category.to_string(),
            in_stock,
        }
    };

    vec![
        sample(
            1,
            "Laptop",
            "High-performance laptop with 16GB RAM",
            1200,
            "electronics",
            true,
        ),
        sample(
            2,
            "Smartphone",
            "Latest model with 128GB storage",
            800,
            "electronics",
            true,
        ),
        sample(
            3,
            "Coffee Maker",
            "Programmable coffee maker with timer",
            50,
            "kitchen",
            false,
        ),
    ]
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: ProductInput) -> ProductResult<Product> {
        let mut inventory = self.inventory.write().await;

        inventory.last_id += 1;
        let product = Product::new(inventory.last_id.to_string(), input);
        inventory.products.push(product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let inventory = self.inventory.read().await;
        Ok(inventory.products.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let inventory = self.inventory.read().await;
        let category = filter.category.map(|c| c.to_lowercase());

        Ok(inventory
            .products
            .iter()
            .filter(|p| match &category {
                Some(category) => p.category.to_lowercase() == *category,
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn search_by_name(&self, term: &str) -> ProductResult<Vec<Product>> {
        let inventory = self.inventory.read().await;
        let term = term.to_lowercase();

        Ok(inventory
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&term))
            .cloned()
            .collect())
    }

    async fn update(&self, id: &str, input: ProductInput) -> ProductResult<Product> {
        let mut inventory = self.inventory.write().await;

        let product = inventory
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;
        product.replace(input);

        tracing::info!(product_id = %id, "Updated product");
        Ok(product.clone())
    }

    async fn delete(&self, id: &str) -> ProductResult<bool> {
        let mut inventory = self.inventory.write().await;

        let before = inventory.products.len();
        inventory.products.retain(|p| p.id != id);
        let removed = inventory.products.len() < before;

        if removed {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(removed)
    }

    async fn stats(&self) -> ProductResult<ProductStats> {
        let inventory = self.inventory.read().await;
        Ok(ProductStats::from_products(&inventory.products))
    }
}
