use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier, never reused
    pub id: String,
    pub name: String,
    pub description: String,
    /// Price exactly as submitted (integers stay integers)
    #[schema(value_type = f64)]
    pub price: Number,
    pub category: String,
    pub in_stock: bool,
}

impl Product {
    pub fn new(id: String, input: ProductInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            in_stock: input.in_stock,
        }
    }

    /// Replace every business field, keeping the id.
    pub fn replace(&mut self, input: ProductInput) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price;
        self.category = input.category;
        self.in_stock = input.in_stock;
    }
}

/// The five business fields of a product, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Number,
    pub category: String,
    pub in_stock: bool,
}

/// Request body for create and full-replace update, before validation.
///
/// Fields are kept as raw JSON so that a wrong type is reported with the same
/// per-field message as a missing field. Only the five named keys of a JSON
/// object are read; any other body (array, scalar, `null`) yields an empty
/// payload, which the validator then rejects.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(from = "Value", rename_all = "camelCase")]
pub struct ProductPayload {
    #[schema(value_type = String)]
    pub name: Option<Value>,
    #[schema(value_type = String)]
    pub description: Option<Value>,
    #[schema(value_type = f64)]
    pub price: Option<Value>,
    #[schema(value_type = String)]
    pub category: Option<Value>,
    #[schema(value_type = bool)]
    pub in_stock: Option<Value>,
}

impl From<Value> for ProductPayload {
    fn from(body: Value) -> Self {
        let Value::Object(mut fields) = body else {
            return Self::default();
        };

        Self {
            name: fields.remove("name"),
            description: fields.remove("description"),
            price: fields.remove("price"),
            category: fields.remove("category"),
            in_stock: fields.remove("inStock"),
        }
    }
}

/// Repository-level filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive exact category match
    pub category: Option<String>,
}

/// Query parameters for listing products
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Case-insensitive category filter; empty means no filter
    pub category: Option<String>,
    /// 1-based page number
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u32,
    /// Page size
    #[serde(default = "default_limit")]
    #[validate(range(min = 1))]
    pub limit: u32,
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            category: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ListQuery {
    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            category: self.category.clone().filter(|c| !c.is_empty()),
        }
    }
}

/// Query parameters for name search
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring of the product name (required)
    pub name: Option<String>,
}

/// One page of a filtered product listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub total_items: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: usize,
    pub products: Vec<Product>,
}

impl ProductPage {
    /// Slice `[ (page-1)*limit, page*limit )` out of an already filtered set.
    ///
    /// `page` and `limit` must be at least 1.
    pub fn paginate(filtered: Vec<Product>, page: u32, limit: u32) -> Self {
        let total_items = filtered.len();
        let per_page = limit as usize;
        let start = (page.saturating_sub(1) as usize).saturating_mul(per_page);

        let products = filtered.into_iter().skip(start).take(per_page).collect();

        Self {
            total_items,
            page,
            limit,
            total_pages: total_items.div_ceil(per_page.max(1)),
            products,
        }
    }
}

/// Name search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub total_results: usize,
    pub products: Vec<Product>,
}

impl From<Vec<Product>> for SearchResults {
    fn from(products: Vec<Product>) -> Self {
        Self {
            total_results: products.len(),
            products,
        }
    }
}

/// Collection-wide aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total_products: usize,
    /// Lowercased category -> number of products
    pub count_by_category: BTreeMap<String, usize>,
}

impl ProductStats {
    pub fn from_products<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        let mut total_products = 0;
        let mut count_by_category = BTreeMap::new();
        for product in products {
            total_products += 1;
            *count_by_category
                .entry(product.category.to_lowercase())
                .or_insert(0) += 1;
        }
        Self {
            total_products,
            count_by_category,
        }
    }
}
