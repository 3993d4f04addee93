//! Cart and wishlist state mirrored to a [`StatePort`].
//!
//! Every mutation is written back through the port before it returns. A
//! failed write is logged and otherwise ignored; the in-memory state keeps
//! the change.

use crate::config::StoreConfig;
use mp_api_types::{CartLineItem, CartReceipt, CartSignal, ProductId, WishlistReceipt, WishlistSignal};
use mp_storage::{StatePort, load_json, save_json};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::{debug, warn};

pub struct CartStore<P> {
    port: P,
    config: StoreConfig,
    cart: Vec<CartLineItem>,
    wishlist: Vec<ProductId>,
}

/// Read both collections from the port. Absent or unreadable state yields an
/// empty collection; cart and wishlist recover independently.
pub fn load_state<P>(port: &P, config: &StoreConfig) -> (Vec<CartLineItem>, Vec<ProductId>)
where
    P: StatePort + ?Sized,
{
    let mut cart: Vec<CartLineItem> = load_collection(port, &config.cart_key);
    let mut wishlist: Vec<ProductId> = load_collection(port, &config.wishlist_key);

    let loaded_lines = cart.len();
    let mut seen = HashSet::new();
    cart.retain(|item| item.quantity > 0 && seen.insert(item.id.clone()));
    if cart.len() != loaded_lines {
        warn!(
            "dropped {} duplicate or empty cart lines from {}",
            loaded_lines - cart.len(),
            config.cart_key
        );
    }

    let loaded_ids = wishlist.len();
    let mut seen = HashSet::new();
    wishlist.retain(|id| seen.insert(id.clone()));
    if wishlist.len() != loaded_ids {
        warn!(
            "dropped {} duplicate wishlist entries from {}",
            loaded_ids - wishlist.len(),
            config.wishlist_key
        );
    }

    (cart, wishlist)
}

fn load_collection<T, P>(port: &P, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
    P: StatePort + ?Sized,
{
    match load_json::<Vec<T>, P>(port, key) {
        Ok(Some(items)) => items,
        Ok(None) => {
            debug!(key, "no persisted state");
            Vec::new()
        }
        Err(err) => {
            warn!("discarding unreadable state under {}: {:#}", key, err);
            Vec::new()
        }
    }
}

impl<P> CartStore<P>
where
    P: StatePort,
{
    pub fn open(port: P, config: StoreConfig) -> Self {
        let (cart, wishlist) = load_state(&port, &config);
        debug!(
            lines = cart.len(),
            wishlisted = wishlist.len(),
            "cart store opened"
        );

        Self {
            port,
            config,
            cart,
            wishlist,
        }
    }

    /// Replace the in-memory collections with whatever is persisted now,
    /// e.g. after another tab wrote to the same storage.
    pub fn reload(&mut self) {
        let (cart, wishlist) = load_state(&self.port, &self.config);
        self.cart = cart;
        self.wishlist = wishlist;
    }

    pub fn load_state(&self) -> (Vec<CartLineItem>, Vec<ProductId>) {
        load_state(&self.port, &self.config)
    }

    /// Adds a line item, or bumps an existing one by exactly 1. The caller's
    /// quantity only applies on first insertion.
    pub fn add_to_cart(&mut self, item: CartLineItem) -> CartReceipt {
        let product_id = item.id.clone();
        let name = item.name.clone();

        let signal = match self.cart.iter_mut().find(|line| line.id == item.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(1);
                CartSignal::QuantityUpdated
            }
            None => {
                let mut item = item;
                item.quantity = item.quantity.max(1);
                self.cart.push(item);
                CartSignal::Added
            }
        };

        self.persist_cart();
        self.cart_receipt(signal, product_id, Some(name))
    }

    pub fn remove_from_cart(&mut self, id: &str) -> CartReceipt {
        let removed = self
            .cart
            .iter()
            .position(|line| line.id.as_str() == id)
            .map(|index| self.cart.remove(index));

        self.persist_cart();

        match removed {
            Some(line) => self.cart_receipt(CartSignal::Removed, line.id, Some(line.name)),
            None => self.cart_receipt(CartSignal::Unchanged, ProductId::from(id), None),
        }
    }

    /// Sets a line item's quantity; zero or below removes it.
    pub fn update_cart_quantity(&mut self, id: &str, quantity: i64) -> CartReceipt {
        if quantity <= 0 {
            return self.remove_from_cart(id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let Some(line) = self.cart.iter_mut().find(|line| line.id.as_str() == id) else {
            return self.cart_receipt(CartSignal::Unchanged, ProductId::from(id), None);
        };

        line.quantity = quantity;
        let (product_id, name) = (line.id.clone(), line.name.clone());

        self.persist_cart();
        self.cart_receipt(CartSignal::QuantityUpdated, product_id, Some(name))
    }

    /// Empties the cart and returns how many units were removed.
    pub fn clear_cart(&mut self) -> u64 {
        let removed = self.cart_count();
        self.cart.clear();
        self.persist_cart();
        removed
    }

    pub fn toggle_wishlist(&mut self, id: &str) -> WishlistReceipt {
        let signal = match self.wishlist.iter().position(|entry| entry.as_str() == id) {
            Some(index) => {
                self.wishlist.remove(index);
                WishlistSignal::Removed
            }
            None => {
                self.wishlist.push(ProductId::from(id));
                WishlistSignal::Added
            }
        };

        self.persist_wishlist();

        WishlistReceipt {
            signal,
            product_id: ProductId::from(id),
            wishlist_count: self.wishlist_count(),
        }
    }

    pub fn cart_count(&self) -> u64 {
        self.cart.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn wishlist_count(&self) -> usize {
        self.wishlist.len()
    }

    pub fn cart_total(&self) -> f64 {
        self.cart.iter().map(CartLineItem::subtotal).sum()
    }

    pub fn cart_items(&self) -> &[CartLineItem] {
        &self.cart
    }

    pub fn cart_item(&self, id: &str) -> Option<&CartLineItem> {
        self.cart.iter().find(|line| line.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cart_item(id).is_some()
    }

    pub fn wishlist(&self) -> &[ProductId] {
        &self.wishlist
    }

    pub fn is_wishlisted(&self, id: &str) -> bool {
        self.wishlist.iter().any(|entry| entry.as_str() == id)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn cart_receipt(&self, signal: CartSignal, product_id: ProductId, name: Option<String>) -> CartReceipt {
        CartReceipt {
            signal,
            product_id,
            name,
            cart_count: self.cart_count(),
        }
    }

    fn persist_cart(&self) {
        if let Err(err) = save_json(&self.port, &self.config.cart_key, &self.cart) {
            warn!("failed to persist cart to {}: {:#}", self.config.cart_key, err);
        }
    }

    fn persist_wishlist(&self) {
        if let Err(err) = save_json(&self.port, &self.config.wishlist_key, &self.wishlist) {
            warn!("failed to persist wishlist to {}: {:#}", self.config.wishlist_key, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mp_storage::InMemoryStatePort;
    use std::rc::Rc;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn store_over(port: &Rc<InMemoryStatePort>) -> CartStore<Rc<InMemoryStatePort>> {
        init_tracing();
        CartStore::open(Rc::clone(port), StoreConfig::default())
    }

    fn aloe() -> CartLineItem {
        CartLineItem::new("p1", "Aloe Vera", 149.0).with_image("/static/img/aloe.jpg")
    }

    fn neem() -> CartLineItem {
        CartLineItem::new("p2", "Neem Oil", 89.5)
    }

    #[test]
    fn empty_store_reports_zero() {
        let store = store_over(&Rc::new(InMemoryStatePort::new()));
        assert_eq!(store.cart_count(), 0);
        assert_eq!(store.wishlist_count(), 0);
        assert_eq!(store.cart_total(), 0.0);
        assert!(store.cart_items().is_empty());
    }

    #[test]
    fn repeated_add_increments_by_one() {
        let port = Rc::new(InMemoryStatePort::new());
        let mut store = store_over(&port);

        let first = store.add_to_cart(aloe());
        assert_eq!(first.signal, CartSignal::Added);
        assert_eq!(first.cart_count, 1);
        assert_eq!(store.cart_total(), 149.0);

        let second = store.add_to_cart(aloe());
        assert_eq!(second.signal, CartSignal::QuantityUpdated);
        assert_eq!(second.name.as_deref(), Some("Aloe Vera"));
        assert_eq!(store.cart_count(), 2);
        assert_eq!(store.cart_total(), 298.0);

        for _ in 0..3 {
            store.add_to_cart(aloe());
        }
        assert_eq!(store.cart_item("p1").map(|line| line.quantity), Some(5));
        assert_eq!(store.cart_items().len(), 1);
    }

    #[test]
    fn initial_quantity_applies_only_on_first_insert() {
        let mut store = store_over(&Rc::new(InMemoryStatePort::new()));

        store.add_to_cart(neem().with_quantity(4));
        assert_eq!(store.cart_count(), 4);

        let receipt = store.add_to_cart(neem().with_quantity(10));
        assert_eq!(receipt.cart_count, 5);
    }

    #[test]
    fn zero_initial_quantity_is_stored_as_one() {
        let mut store = store_over(&Rc::new(InMemoryStatePort::new()));
        store.add_to_cart(neem().with_quantity(0));
        assert_eq!(store.cart_item("p2").map(|line| line.quantity), Some(1));
    }

    #[test]
    fn count_is_sum_of_quantities_not_lines() {
        let mut store = store_over(&Rc::new(InMemoryStatePort::new()));
        store.add_to_cart(aloe().with_quantity(2));
        store.add_to_cart(neem().with_quantity(3));

        assert_eq!(store.cart_items().len(), 2);
        assert_eq!(store.cart_count(), 5);
        assert_eq!(store.cart_total(), 2.0 * 149.0 + 3.0 * 89.5);
    }

    #[test]
    fn remove_unknown_id_is_a_noop() {
        let mut store = store_over(&Rc::new(InMemoryStatePort::new()));
        store.add_to_cart(aloe());

        let receipt = store.remove_from_cart("missing");
        assert_eq!(receipt.signal, CartSignal::Unchanged);
        assert_eq!(receipt.name, None);
        assert_eq!(receipt.cart_count, 1);
    }

    #[test]
    fn remove_returns_removed_line_name() {
        let mut store = store_over(&Rc::new(InMemoryStatePort::new()));
        store.add_to_cart(aloe());
        store.add_to_cart(neem());

        let receipt = store.remove_from_cart("p1");
        assert_eq!(receipt.signal, CartSignal::Removed);
        assert_eq!(receipt.name.as_deref(), Some("Aloe Vera"));
        assert_eq!(receipt.cart_count, 1);
        assert!(!store.contains("p1"));
    }

    #[test]
    fn update_to_zero_removes_and_drops_prior_quantity() {
        let mut store = store_over(&Rc::new(InMemoryStatePort::new()));
        store.add_to_cart(aloe().with_quantity(4));
        store.add_to_cart(neem());
        let before = store.cart_count();

        let receipt = store.update_cart_quantity("p1", 0);
        assert_eq!(receipt.signal, CartSignal::Removed);
        assert_eq!(store.cart_count(), before - 4);
    }

    #[test]
    fn negative_update_removes_line() {
        let mut store = store_over(&Rc::new(InMemoryStatePort::new()));
        store.add_to_cart(aloe().with_quantity(3));

        let receipt = store.update_cart_quantity("p1", -5);
        assert_eq!(receipt.signal, CartSignal::Removed);
        assert_eq!(receipt.cart_count, 0);
        assert!(store.cart_items().is_empty());
    }

    #[test]
    fn update_sets_quantity_and_ignores_unknown_ids() {
        let mut store = store_over(&Rc::new(InMemoryStatePort::new()));
        store.add_to_cart(aloe());

        let receipt = store.update_cart_quantity("p1", 7);
        assert_eq!(receipt.signal, CartSignal::QuantityUpdated);
        assert_eq!(receipt.cart_count, 7);

        let receipt = store.update_cart_quantity("p9", 3);
        assert_eq!(receipt.signal, CartSignal::Unchanged);
        assert_eq!(receipt.cart_count, 7);
        assert!(!store.contains("p9"));
    }

    #[test]
    fn toggle_wishlist_is_its_own_inverse() {
        let mut store = store_over(&Rc::new(InMemoryStatePort::new()));

        let added = store.toggle_wishlist("p1");
        assert_eq!(added.signal, WishlistSignal::Added);
        assert!(store.is_wishlisted("p1"));
        assert_eq!(store.wishlist_count(), 1);

        let removed = store.toggle_wishlist("p1");
        assert_eq!(removed.signal, WishlistSignal::Removed);
        assert!(!store.is_wishlisted("p1"));
        assert_eq!(removed.wishlist_count, 0);
    }

    #[test]
    fn wishlist_keeps_insertion_order() {
        let mut store = store_over(&Rc::new(InMemoryStatePort::new()));
        for id in ["p3", "p1", "p2"] {
            store.toggle_wishlist(id);
        }
        store.toggle_wishlist("p1");

        let ids: Vec<&str> = store.wishlist().iter().map(ProductId::as_str).collect();
        assert_eq!(ids, ["p3", "p2"]);
    }

    #[test]
    fn every_mutation_is_persisted_and_reloads_equal() {
        let port = Rc::new(InMemoryStatePort::new());
        let mut store = store_over(&port);

        store.add_to_cart(aloe());
        store.add_to_cart(aloe());
        store.add_to_cart(neem().with_quantity(2));
        store.update_cart_quantity("p2", 6);
        store.toggle_wishlist("p7");
        store.toggle_wishlist("p1");

        let reopened = store_over(&port);
        assert_eq!(reopened.cart_items(), store.cart_items());
        assert_eq!(reopened.wishlist(), store.wishlist());
        assert_eq!(reopened.cart_count(), 8);
        assert_eq!(store.load_state(), (store.cart_items().to_vec(), store.wishlist().to_vec()));
    }

    #[test]
    fn persisted_text_uses_storefront_keys_and_shape() {
        let port = Rc::new(InMemoryStatePort::new());
        let mut store = store_over(&port);
        store.add_to_cart(neem());
        store.toggle_wishlist("p2");

        let cart: serde_json::Value =
            serde_json::from_str(&port.get("mediplant_cart").expect("cart persisted")).unwrap();
        assert_eq!(
            cart,
            serde_json::json!([{"id": "p2", "name": "Neem Oil", "price": 89.5, "image": "", "quantity": 1}])
        );
        assert_eq!(port.get("mediplant_wishlist").as_deref(), Some(r#"["p2"]"#));
    }

    #[test]
    fn malformed_state_falls_back_per_collection() {
        let port = Rc::new(InMemoryStatePort::new());
        port.seed("mediplant_cart", "{definitely not json");
        port.seed("mediplant_wishlist", r#"["p1","p2"]"#);

        let store = store_over(&port);
        assert!(store.cart_items().is_empty());
        assert_eq!(store.wishlist_count(), 2);
    }

    #[test]
    fn null_and_wrongly_typed_state_load_empty() {
        let port = Rc::new(InMemoryStatePort::new());
        port.seed("mediplant_cart", "null");
        port.seed("mediplant_wishlist", r#"{"p1": true}"#);

        let store = store_over(&port);
        assert_eq!(store.cart_count(), 0);
        assert_eq!(store.wishlist_count(), 0);
    }

    #[test]
    fn loading_collapses_duplicates_and_empty_lines() {
        let port = Rc::new(InMemoryStatePort::new());
        port.seed(
            "mediplant_cart",
            r#"[
                {"id":"p1","name":"Aloe Vera","price":149.0,"image":"","quantity":2},
                {"id":"p1","name":"Aloe Vera","price":149.0,"image":"","quantity":9},
                {"id":"p2","name":"Neem Oil","price":89.5,"image":"","quantity":0}
            ]"#,
        );
        port.seed("mediplant_wishlist", r#"["p1","p1","p3"]"#);

        let store = store_over(&port);
        assert_eq!(store.cart_items().len(), 1);
        assert_eq!(store.cart_count(), 2);
        assert_eq!(store.wishlist_count(), 2);
    }

    #[test]
    fn write_failure_keeps_in_memory_state() {
        let port = Rc::new(InMemoryStatePort::with_quota(0));
        let mut store = store_over(&port);

        let receipt = store.add_to_cart(aloe());
        assert_eq!(receipt.signal, CartSignal::Added);
        assert_eq!(store.cart_count(), 1);
        assert!(store.toggle_wishlist("p1").is_wishlisted());
        assert!(port.is_empty());
    }

    #[test]
    fn reload_picks_up_writes_from_another_store() {
        let port = Rc::new(InMemoryStatePort::new());
        let mut first = store_over(&port);
        let mut second = store_over(&port);

        second.add_to_cart(neem().with_quantity(2));
        assert_eq!(first.cart_count(), 0);

        first.reload();
        assert_eq!(first.cart_count(), 2);

        // Last writer wins.
        first.toggle_wishlist("p5");
        second.toggle_wishlist("p6");
        first.reload();
        assert_eq!(first.wishlist(), [ProductId::from("p6")]);
    }

    #[test]
    fn clear_cart_reports_removed_units() {
        let port = Rc::new(InMemoryStatePort::new());
        let mut store = store_over(&port);
        store.add_to_cart(aloe().with_quantity(2));
        store.add_to_cart(neem());

        assert_eq!(store.clear_cart(), 3);
        assert_eq!(store.cart_count(), 0);
        assert_eq!(port.get("mediplant_cart").as_deref(), Some("[]"));
    }

    #[test]
    fn custom_keys_are_honored() {
        init_tracing();
        let port = InMemoryStatePort::new();
        let mut store = CartStore::open(&port, StoreConfig::default().namespaced("staging"));
        store.toggle_wishlist("p1");

        assert!(port.get("staging:mediplant_wishlist").is_some());
        assert!(port.get("mediplant_wishlist").is_none());
    }
}
