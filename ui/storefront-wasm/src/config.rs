use mp_cart_core::QuantityBounds;
use mp_cart_core::notice::DEFAULT_NOTICE_DURATION_MS;
use serde::{Deserialize, Serialize};

/// Presentation settings. Everything here is UI timing or input coercion;
/// storage keys live in [`mp_cart_core::StoreConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub notice_duration_ms: u32,
    pub search_debounce_ms: u32,
    pub quantity: QuantityBounds,
    pub confirm_removal: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notice_duration_ms: DEFAULT_NOTICE_DURATION_MS,
            search_debounce_ms: 300,
            quantity: QuantityBounds::default(),
            confirm_removal: true,
        }
    }
}
