//! Store operations plus their page side effects. Both the DOM event
//! handlers and the exported `MediPlant` handle go through here.

use crate::notify;
use crate::render;
use crate::session::Session;
use mp_api_types::{CartLineItem, CartReceipt, CartSignal, WishlistReceipt};
use mp_cart_core::Notice;

pub fn add_to_cart(session: &Session, item: CartLineItem) -> CartReceipt {
    let receipt = session.with_mut(|store| store.add_to_cart(item));
    after_cart_change(session, &receipt);
    receipt
}

pub fn remove_from_cart(session: &Session, id: &str) -> CartReceipt {
    let receipt = session.with_mut(|store| store.remove_from_cart(id));
    if receipt.signal == CartSignal::Removed {
        render::remove_cart_row(id);
    }
    after_cart_change(session, &receipt);
    receipt
}

pub fn update_cart_quantity(session: &Session, id: &str, quantity: i64) -> CartReceipt {
    let receipt = session.with_mut(|store| store.update_cart_quantity(id, quantity));
    match receipt.signal {
        CartSignal::QuantityUpdated => {
            refresh_cart(session);
            show_notice(session, &Notice::cart_updated());
        }
        CartSignal::Removed => {
            render::remove_cart_row(id);
            after_cart_change(session, &receipt);
        }
        CartSignal::Added | CartSignal::Unchanged => {}
    }
    receipt
}

/// Post-checkout reset. Returns the number of units removed.
pub fn clear_cart(session: &Session) -> u64 {
    let removed = session.with_mut(|store| store.clear_cart());
    render::remove_all_cart_rows();
    refresh_cart(session);
    if let Some(notice) = Notice::cart_cleared(removed) {
        show_notice(session, &notice);
    }
    removed
}

pub fn toggle_wishlist(session: &Session, id: &str) -> WishlistReceipt {
    let receipt = session.with_mut(|store| store.toggle_wishlist(id));
    render::wishlist_count(session);
    render::wishlist_buttons(session);
    show_notice(session, &Notice::for_wishlist(&receipt));
    receipt
}

/// Another tab wrote to the same storage; adopt its state.
pub fn reload(session: &Session) {
    session.with_mut(|store| store.reload());
    render::refresh_all(session);
}

pub fn show_notice(session: &Session, notice: &Notice) {
    notify::show(notice, session.config().notice_duration_ms);
}

fn after_cart_change(session: &Session, receipt: &CartReceipt) {
    refresh_cart(session);
    if let Some(notice) = Notice::for_cart(receipt) {
        show_notice(session, &notice);
    }
}

fn refresh_cart(session: &Session) {
    render::cart_count(session);
    render::cart_total(session);
    render::quantity_inputs(session);
}
