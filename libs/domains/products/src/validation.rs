//! Product payload validation.
//!
//! Fields are checked in a fixed order and the first failure wins, so a client
//! always sees one actionable message at a time.

use serde_json::{Number, Value};
use thiserror::Error;

use crate::models::{ProductInput, ProductPayload};

/// The first field of a payload that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PayloadRejection {
    #[error("Name is required and must be a string")]
    Name,

    #[error("Description is required and must be a string")]
    Description,

    #[error("Price is required and must be a number")]
    Price,

    #[error("Category is required and must be a string")]
    Category,

    #[error("inStock is required and must be a boolean")]
    InStock,
}

/// Check a raw payload and turn it into typed product fields.
///
/// Strings must be non-empty. Any JSON number is a valid price, `0` included;
/// any boolean is a valid `inStock`, `false` included.
pub fn validate_product_payload(payload: &ProductPayload) -> Result<ProductInput, PayloadRejection> {
    Ok(ProductInput {
        name: non_empty_string(&payload.name).ok_or(PayloadRejection::Name)?,
        description: non_empty_string(&payload.description)
            .ok_or(PayloadRejection::Description)?,
        price: number(&payload.price).ok_or(PayloadRejection::Price)?,
        category: non_empty_string(&payload.category).ok_or(PayloadRejection::Category)?,
        in_stock: boolean(&payload.in_stock).ok_or(PayloadRejection::InStock)?,
    })
}

fn non_empty_string(value: &Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn number(value: &Option<Value>) -> Option<Number> {
    match value {
        Some(Value::Number(n)) => Some(n.clone()),
        _ => None,
    }
}

fn boolean(value: &Option<Value>) -> Option<bool> {
    value.as_ref().and_then(Value::as_bool)
}
