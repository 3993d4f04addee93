use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CART_STORAGE_KEY: &str = "mediplant_cart";
pub const WISHLIST_STORAGE_KEY: &str = "mediplant_wishlist";

/// Storage keys the store reads and writes. A host page may override them
/// with a JSON object; missing fields keep the storefront defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
    #[serde(default = "default_wishlist_key")]
    pub wishlist_key: String,
}

fn default_cart_key() -> String {
    CART_STORAGE_KEY.to_owned()
}

fn default_wishlist_key() -> String {
    WISHLIST_STORAGE_KEY.to_owned()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            cart_key: default_cart_key(),
            wishlist_key: default_wishlist_key(),
        }
    }
}

impl StoreConfig {
    pub fn with_keys(cart_key: impl Into<String>, wishlist_key: impl Into<String>) -> Self {
        Self {
            cart_key: cart_key.into(),
            wishlist_key: wishlist_key.into(),
        }
    }

    /// Prefix both keys so two stores can share one backend.
    pub fn namespaced(self, prefix: &str) -> Self {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return self;
        }

        Self {
            cart_key: format!("{prefix}:{}", self.cart_key),
            wishlist_key: format!("{prefix}:{}", self.wishlist_key),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw).context("invalid store configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Both keys must be non-blank and distinct, otherwise one collection
    /// overwrites the other on every save.
    pub fn validate(&self) -> Result<()> {
        if self.cart_key.trim().is_empty() || self.wishlist_key.trim().is_empty() {
            anyhow::bail!("store configuration keys cannot be empty");
        }
        if self.cart_key == self.wishlist_key {
            anyhow::bail!("cart and wishlist must use different storage keys");
        }
        Ok(())
    }
}
