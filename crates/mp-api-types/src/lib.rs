use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One product entry in the cart. Field names match the persisted JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    pub quantity: u32,
}

impl CartLineItem {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: String::new(),
            quantity: 1,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CartSignal {
    Added,
    QuantityUpdated,
    Removed,
    Unchanged,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WishlistSignal {
    Added,
    Removed,
}

/// Result of a cart mutation: what happened and the cart count afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartReceipt {
    pub signal: CartSignal,
    pub product_id: ProductId,
    /// Display name of the affected line item, when the cart knew it.
    pub name: Option<String>,
    pub cart_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WishlistReceipt {
    pub signal: WishlistSignal,
    pub product_id: ProductId,
    pub wishlist_count: usize,
}

impl WishlistReceipt {
    pub fn is_wishlisted(&self) -> bool {
        self.signal == WishlistSignal::Added
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ProductInputError {
    #[error("product id is required")]
    MissingId,
    #[error("invalid price for product {id}: {raw:?}")]
    InvalidPrice { id: String, raw: String },
}

/// Raw product attributes as read from a button's `data-product-*` fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductInput {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub image: String,
}

impl ProductInput {
    pub fn into_line_item(self, quantity: u32) -> Result<CartLineItem, ProductInputError> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(ProductInputError::MissingId);
        }

        let price = self
            .price
            .trim()
            .trim_start_matches('₹')
            .replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value >= 0.0)
            .ok_or_else(|| ProductInputError::InvalidPrice {
                id: id.to_owned(),
                raw: self.price.clone(),
            })?;

        Ok(CartLineItem {
            id: ProductId::new(id),
            name: self.name,
            price,
            image: self.image,
            quantity,
        })
    }
}
