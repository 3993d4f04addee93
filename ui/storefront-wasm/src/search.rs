//! Search box suggestions dropdown.

use crate::dom;
use crate::session::Session;
use gloo_timers::callback::Timeout;
use mp_cart_core::search::{DEFAULT_SUGGESTIONS, query_is_searchable, suggest};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlFormElement, HtmlInputElement};

/// Pending debounce timer; replacing it cancels the previous one.
type Pending = Rc<RefCell<Option<Timeout>>>;

pub fn bind(session: &Session) {
    let Some(input) = dom::query(".search-input").and_then(|el| dom::as_input(&el)) else {
        return;
    };
    let pending: Pending = Rc::new(RefCell::new(None));
    let debounce_ms = session.config().search_debounce_ms;

    {
        let input2 = input.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            let query = input2.value().trim().to_owned();
            if !query_is_searchable(&query) {
                pending.borrow_mut().take();
                hide();
                return;
            }
            let input3 = input2.clone();
            let timer = Timeout::new(debounce_ms, move || show(&input3, &query));
            pending.borrow_mut().replace(timer);
        }) as Box<dyn FnMut(_)>);
        let _ = input.add_event_listener_with_callback("input", cb.as_ref().unchecked_ref());
        cb.forget();
    }

    // Clicking anywhere outside the box closes the dropdown.
    {
        let input2 = input.clone();
        let cb = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
            let target = event.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
            if !input2.contains(target.as_ref()) {
                hide();
            }
        }) as Box<dyn FnMut(_)>);
        let _ = gloo_utils::document().add_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
        cb.forget();
    }
}

fn show(input: &HtmlInputElement, query: &str) {
    let suggestions = suggest(query, DEFAULT_SUGGESTIONS);
    if suggestions.is_empty() {
        return;
    }
    hide();

    let Some(dropdown) = dom::create_element("div") else {
        return;
    };
    dropdown.set_class_name("search-suggestions position-absolute bg-white border rounded shadow-sm w-100");
    dom::set_style(&dropdown, "top", "100%");
    dom::set_style(&dropdown, "z-index", "1000");

    for suggestion in suggestions {
        if let Some(item) = suggestion_item(input, suggestion) {
            let _ = dropdown.append_child(&item);
        }
    }

    if let Some(parent) = input.parent_element() {
        dom::set_style(&parent, "position", "relative");
        let _ = parent.append_child(&dropdown);
    }
}

fn suggestion_item(input: &HtmlInputElement, suggestion: &'static str) -> Option<Element> {
    let item = dom::create_element("div")?;
    item.set_class_name("suggestion-item p-2 border-bottom");
    dom::set_style(&item, "cursor", "pointer");
    dom::set_text(&item, suggestion);

    let input2 = input.clone();
    let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
        input2.set_value(suggestion);
        hide();
        if let Some(form) = search_form() {
            let _ = form.submit();
        }
    }) as Box<dyn FnMut(_)>);
    let _ = item.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
    cb.forget();

    Some(item)
}

pub fn search_form() -> Option<HtmlFormElement> {
    dom::query(r#"form[action*="search"]"#)?.dyn_into::<HtmlFormElement>().ok()
}

pub fn hide() {
    if let Some(dropdown) = dom::query(".search-suggestions") {
        dropdown.remove();
    }
}
