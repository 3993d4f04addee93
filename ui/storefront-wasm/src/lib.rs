//! MediPlant storefront WASM frontend
//!
//! Binds the cart/wishlist store to the storefront pages. Page scripts call
//! `boot()` once and keep the returned `MediPlant` handle.

pub mod actions;
pub mod config;
pub mod dom;
pub mod events;
pub mod local_storage;
pub mod notify;
pub mod render;
pub mod search;
pub mod session;

use config::UiConfig;
use local_storage::LocalStoragePort;
use mp_api_types::{CartLineItem, ProductId};
use mp_cart_core::{CartStore, Notice, NoticeKind, StoreConfig, format_inr};
use mp_storage::{NoopStatePort, StatePort};
use serde::{Deserialize, Serialize};
use session::Session;
use wasm_bindgen::prelude::*;

/// Options a page may pass to `boot()`; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BootOptions {
    store: Option<StoreConfig>,
    ui: Option<UiConfig>,
}

impl BootOptions {
    /// Store keys from the page, falling back to the storefront defaults.
    fn store_config(&self) -> anyhow::Result<StoreConfig> {
        let config = self.store.clone().unwrap_or_default();
        config.validate()?;
        Ok(config)
    }
}

/// Product payload accepted by `MediPlant.addToCart`.
#[derive(Debug, Deserialize)]
struct ProductPayload {
    id: String,
    #[serde(default)]
    name: String,
    price: f64,
    #[serde(default)]
    image: String,
    #[serde(default)]
    quantity: Option<u32>,
}

impl From<ProductPayload> for CartLineItem {
    fn from(payload: ProductPayload) -> Self {
        CartLineItem::new(ProductId::new(payload.id), payload.name, payload.price)
            .with_image(payload.image)
            .with_quantity(payload.quantity.unwrap_or(1))
    }
}

/// Open the store over `localStorage`, wire the page and return the handle.
#[wasm_bindgen]
pub fn boot(options: JsValue) -> Result<MediPlant, JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    let options: BootOptions = if options.is_undefined() || options.is_null() {
        BootOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)?
    };

    let store_config = options
        .store_config()
        .map_err(|err| JsValue::from_str(&format!("{err:#}")))?;

    let port: Box<dyn StatePort> = match LocalStoragePort::open() {
        Ok(port) => Box::new(port),
        Err(err) => {
            gloo_console::warn!("cart will not persist:", err.to_string());
            Box::new(NoopStatePort)
        }
    };

    let store = CartStore::open(port, store_config);
    let session = Session::new(store, options.ui.unwrap_or_default());

    render::refresh_all(&session);
    events::bind_events(&session);

    Ok(MediPlant { session })
}

/// Handle exposed to page scripts as `MediPlant`.
#[wasm_bindgen]
pub struct MediPlant {
    session: Session,
}

#[wasm_bindgen]
impl MediPlant {
    #[wasm_bindgen(js_name = addToCart)]
    pub fn add_to_cart(&self, product: JsValue) -> Result<JsValue, JsValue> {
        let payload: ProductPayload = serde_wasm_bindgen::from_value(product)?;
        if payload.id.trim().is_empty() || !payload.price.is_finite() || payload.price < 0.0 {
            return Err(JsValue::from_str("product needs an id and a non-negative price"));
        }
        let receipt = actions::add_to_cart(&self.session, payload.into());
        to_js(&receipt)
    }

    #[wasm_bindgen(js_name = removeFromCart)]
    pub fn remove_from_cart(&self, id: &str) -> Result<JsValue, JsValue> {
        to_js(&actions::remove_from_cart(&self.session, id))
    }

    #[wasm_bindgen(js_name = updateCartQuantity)]
    pub fn update_cart_quantity(&self, id: &str, quantity: f64) -> Result<JsValue, JsValue> {
        if !quantity.is_finite() {
            return Err(JsValue::from_str("quantity must be a number"));
        }
        to_js(&actions::update_cart_quantity(&self.session, id, quantity.trunc() as i64))
    }

    #[wasm_bindgen(js_name = clearCart)]
    pub fn clear_cart(&self) -> f64 {
        actions::clear_cart(&self.session) as f64
    }

    #[wasm_bindgen(js_name = toggleWishlist)]
    pub fn toggle_wishlist(&self, id: &str) -> Result<JsValue, JsValue> {
        to_js(&actions::toggle_wishlist(&self.session, id))
    }

    #[wasm_bindgen(js_name = cartCount)]
    pub fn cart_count(&self) -> f64 {
        self.session.with(|store| store.cart_count()) as f64
    }

    #[wasm_bindgen(js_name = wishlistCount)]
    pub fn wishlist_count(&self) -> u32 {
        let count = self.session.with(|store| store.wishlist_count());
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    #[wasm_bindgen(js_name = cartTotal)]
    pub fn cart_total(&self) -> f64 {
        self.session.with(|store| store.cart_total())
    }

    #[wasm_bindgen(js_name = cartItems)]
    pub fn cart_items(&self) -> Result<JsValue, JsValue> {
        self.session.with(|store| to_js(&store.cart_items()))
    }

    #[wasm_bindgen(js_name = isWishlisted)]
    pub fn is_wishlisted(&self, id: &str) -> bool {
        self.session.with(|store| store.is_wishlisted(id))
    }

    #[wasm_bindgen(js_name = showNotification)]
    pub fn show_notification(&self, message: &str, kind: Option<String>) {
        let kind = kind.as_deref().map_or(NoticeKind::Info, NoticeKind::parse);
        actions::show_notice(&self.session, &Notice::new(kind, message));
    }

    #[wasm_bindgen(js_name = formatCurrency)]
    pub fn format_currency(amount: f64) -> String {
        format_inr(amount)
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}
