use serde::Serialize;
use serde_json::Value;

use crate::record::{Decode, FieldPath, Fields, Record, ValidationErrors};

/// Represents a product in the catalogue.
///
/// `price` accepts numeric strings (`"999.99"`); `in_stock` defaults to `true`
/// when absent and must be a real boolean when present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    pub in_stock: bool,
}

impl Product {
    /// Default for `in_stock` when the payload omits it.
    pub const DEFAULT_IN_STOCK: bool = true;

    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `name` - Product name
    /// * `price` - Unit price
    /// * `in_stock` - Availability flag
    pub fn new(name: impl Into<String>, price: f64, in_stock: bool) -> Self {
        Self {
            name: name.into(),
            price,
            in_stock,
        }
    }
}

impl Decode for Product {
    fn decode_at(input: &Value, path: &FieldPath) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::open(input, path)?;
        let name = fields.required("name");
        let price = fields.required("price");
        let in_stock = fields.or_default("in_stock", Self::DEFAULT_IN_STOCK);
        fields.finish(|| {
            Some(Self {
                name: name?,
                price: price?,
                in_stock: in_stock?,
            })
        })
    }
}

impl Record for Product {
    const NAME: &'static str = "Product";
}
