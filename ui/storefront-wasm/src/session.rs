//! The per-page store handle.
//!
//! One `Session` is created in `boot()` and cloned into every event closure;
//! clones share the same store.

use crate::config::UiConfig;
use mp_cart_core::CartStore;
use mp_storage::StatePort;
use std::cell::RefCell;
use std::rc::Rc;

pub type BrowserStore = CartStore<Box<dyn StatePort>>;

#[derive(Clone)]
pub struct Session {
    store: Rc<RefCell<BrowserStore>>,
    config: Rc<UiConfig>,
}

impl Session {
    pub fn new(store: BrowserStore, config: UiConfig) -> Self {
        Self {
            store: Rc::new(RefCell::new(store)),
            config: Rc::new(config),
        }
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Run a closure with shared access to the store.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&BrowserStore) -> R,
    {
        f(&self.store.borrow())
    }

    /// Run a closure with mutable access to the store. Do not render from
    /// inside `f`; rendering borrows the store again.
    pub fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut BrowserStore) -> R,
    {
        f(&mut self.store.borrow_mut())
    }
}
