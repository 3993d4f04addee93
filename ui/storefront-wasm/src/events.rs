//! Event binding.
//!
//! Wires product buttons, quantity selectors, form checks and cross-tab
//! storage updates to the store. Call `bind_events` once after boot.

use crate::actions;
use crate::dom;
use crate::search;
use crate::session::Session;
use mp_api_types::ProductInput;
use mp_cart_core::Notice;
use mp_cart_core::search::{MIN_QUERY_CHARS, query_is_searchable};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlFormElement, HtmlInputElement};

/// Helper: attach a click handler that prevents the default action.
macro_rules! on_click {
    ($el:expr, $cb:expr) => {{
        let handler = $cb;
        let cb = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
            event.prevent_default();
            handler(event);
        }) as Box<dyn FnMut(web_sys::MouseEvent)>);
        let _ = $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
        cb.forget();
    }};
}

/// Helper: attach a handler for a non-mouse event.
macro_rules! on_event {
    ($el:expr, $name:expr, $cb:expr) => {{
        let cb = Closure::wrap(Box::new($cb) as Box<dyn FnMut(web_sys::Event)>);
        let _ = $el.add_event_listener_with_callback($name, cb.as_ref().unchecked_ref());
        cb.forget();
    }};
}

pub fn bind_events(session: &Session) {
    // ── Product buttons ──
    for button in dom::query_all(".add-to-cart") {
        let session = session.clone();
        let source = button.clone();
        on_click!(button, move |_| on_add_to_cart(&session, &source));
    }

    for button in dom::query_all(".add-to-wishlist") {
        let session = session.clone();
        let source = button.clone();
        on_click!(button, move |_| {
            let id = dom::data(&source, "product-id");
            if !id.is_empty() {
                actions::toggle_wishlist(&session, &id);
            }
        });
    }

    for button in dom::query_all(".remove-from-cart") {
        let session = session.clone();
        let source = button.clone();
        on_click!(button, move |_| on_remove_from_cart(&session, &source));
    }

    // ── Quantity selectors ──
    for selector in dom::query_all(".quantity-selector") {
        bind_quantity_selector(session, &selector);
    }

    // ── Forms ──
    for form in dom::query_all(".needs-validation") {
        let session = session.clone();
        let target = form.clone();
        on_event!(form, "submit", move |event: web_sys::Event| {
            on_validated_submit(&session, &target, &event);
        });
    }

    // ── Search ──
    search::bind(session);
    if let Some(form) = search::search_form() {
        let session = session.clone();
        on_event!(form, "submit", move |event: web_sys::Event| {
            let query = dom::query(".search-input")
                .and_then(|el| dom::as_input(&el))
                .map(|input| input.value())
                .unwrap_or_default();
            if !query_is_searchable(&query) {
                event.prevent_default();
                actions::show_notice(&session, &Notice::search_too_short(MIN_QUERY_CHARS));
            }
        });
    }

    // ── Other tabs ──
    {
        let session = session.clone();
        on_event!(gloo_utils::window(), "storage", move |event: web_sys::Event| {
            let Some(event) = event.dyn_ref::<web_sys::StorageEvent>() else {
                return;
            };
            let relevant = match event.key() {
                // `localStorage.clear()` in another tab
                None => true,
                Some(key) => session.with(|store| {
                    key == store.config().cart_key || key == store.config().wishlist_key
                }),
            };
            if relevant {
                actions::reload(&session);
            }
        });
    }
}

fn on_add_to_cart(session: &Session, button: &Element) {
    let input = ProductInput {
        id: dom::data(button, "product-id"),
        name: dom::data(button, "product-name"),
        price: dom::data(button, "product-price"),
        image: dom::data(button, "product-image"),
    };

    match input.into_line_item(1) {
        Ok(item) => {
            actions::add_to_cart(session, item);
        }
        Err(err) => {
            gloo_console::error!("add to cart failed:", err.to_string());
            actions::show_notice(session, &Notice::error("Something went wrong. Please try again."));
        }
    }
}

fn on_validated_submit(session: &Session, form: &Element, event: &web_sys::Event) {
    let Some(form) = form.dyn_ref::<HtmlFormElement>() else {
        return;
    };
    if !form.check_validity() {
        event.prevent_default();
        event.stop_propagation();
        actions::show_notice(session, &Notice::form_invalid());
    }
    dom::toggle_class(form, "was-validated", true);
}

fn on_remove_from_cart(session: &Session, button: &Element) {
    let mut id = dom::data(button, "product-id");
    if id.is_empty() {
        id = dom::data(button, "cart-id");
    }
    if id.is_empty() {
        return;
    }

    if session.config().confirm_removal
        && !dom::confirm("Are you sure you want to remove this item from your cart?")
    {
        return;
    }
    actions::remove_from_cart(session, &id);
}

fn bind_quantity_selector(session: &Session, selector: &Element) {
    let find = |class: &str| dom::query_all_within(selector, class).into_iter().next();
    let (Some(decrease), Some(increase), Some(input)) = (
        find(".quantity-decrease"),
        find(".quantity-increase"),
        find(".quantity-input").and_then(|el| dom::as_input(&el)),
    ) else {
        return;
    };

    let bounds = session.config().quantity.with_attributes(
        input.get_attribute("min").as_deref(),
        input.get_attribute("max").as_deref(),
    );

    {
        let session = session.clone();
        let input = input.clone();
        on_click!(decrease, move |_| {
            if let Some(value) = bounds.step_down(&input.value()) {
                input.set_value(&value.to_string());
                commit_quantity(&session, &input, value);
            }
        });
    }
    {
        let session = session.clone();
        let input = input.clone();
        on_click!(increase, move |_| {
            if let Some(value) = bounds.step_up(&input.value()) {
                input.set_value(&value.to_string());
                commit_quantity(&session, &input, value);
            }
        });
    }
    {
        let session = session.clone();
        let target = input.clone();
        on_event!(input, "change", move |_: web_sys::Event| {
            let value = bounds.coerce(&target.value());
            target.set_value(&value.to_string());
            commit_quantity(&session, &target, value);
        });
    }
}

fn commit_quantity(session: &Session, input: &HtmlInputElement, value: u32) {
    let id = input.get_attribute("data-cart-id").unwrap_or_default();
    if !id.is_empty() {
        actions::update_cart_quantity(session, &id, i64::from(value));
    }
}
