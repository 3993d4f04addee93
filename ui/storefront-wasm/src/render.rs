//! Reflect store state into the page: counter badges, cart total, wishlist
//! heart icons and quantity inputs.

use crate::dom;
use crate::session::Session;
use mp_cart_core::format_inr;

pub fn refresh_all(session: &Session) {
    cart_count(session);
    cart_total(session);
    wishlist_count(session);
    wishlist_buttons(session);
    quantity_inputs(session);
}

pub fn cart_count(session: &Session) {
    let count = session.with(|store| store.cart_count());
    for el in dom::query_all("#cart-count") {
        dom::set_text(&el, &count.to_string());
        dom::set_visible(&el, count > 0, "inline");
    }
}

pub fn wishlist_count(session: &Session) {
    let count = session.with(|store| store.wishlist_count());
    for el in dom::query_all("#wishlist-count") {
        dom::set_text(&el, &count.to_string());
        dom::set_visible(&el, count > 0, "inline");
    }
}

pub fn cart_total(session: &Session) {
    let total = format_inr(session.with(|store| store.cart_total()));
    for el in dom::query_all(".cart-total") {
        dom::set_text(&el, &total);
    }
}

pub fn wishlist_buttons(session: &Session) {
    for button in dom::query_all(".add-to-wishlist") {
        let id = dom::data(&button, "product-id");
        let wishlisted = session.with(|store| store.is_wishlisted(&id));
        set_heart(&button, wishlisted);
    }
}

pub fn set_heart(button: &web_sys::Element, wishlisted: bool) {
    let icon = if wishlisted { "fas" } else { "far" };
    dom::set_inner_html(button, &format!(r#"<i class="{icon} fa-heart"></i>"#));
    dom::toggle_class(button, "text-danger", wishlisted);
}

pub fn quantity_inputs(session: &Session) {
    for el in dom::query_all(".quantity-input[data-cart-id]") {
        let id = dom::data(&el, "cart-id");
        let quantity = session.with(|store| store.cart_item(&id).map(|line| line.quantity));
        if let (Some(quantity), Some(input)) = (quantity, dom::as_input(&el)) {
            input.set_value(&quantity.to_string());
        }
    }
}

/// Drop the `.cart-item` row that holds the given line, if it is on the page.
pub fn remove_cart_row(id: &str) {
    let selector = format!(r#"[data-cart-id="{}"]"#, dom::attr_selector_value(id));
    if let Some(row) = dom::query(&selector).and_then(|el| el.closest(".cart-item").ok().flatten()) {
        row.remove();
    }
}

pub fn remove_all_cart_rows() {
    for row in dom::query_all(".cart-item") {
        row.remove();
    }
}
