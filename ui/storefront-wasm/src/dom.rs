//! DOM helpers shared by the event and render modules.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

fn doc() -> Document {
    gloo_utils::document()
}

pub fn query(selector: &str) -> Option<Element> {
    doc().query_selector(selector).ok()?
}

pub fn query_all(selector: &str) -> Vec<Element> {
    match doc().query_selector_all(selector) {
        Ok(nl) => collect_elements(&nl),
        Err(_) => Vec::new(),
    }
}

/// Query all matching elements within a parent element.
pub fn query_all_within(parent: &Element, selector: &str) -> Vec<Element> {
    match parent.query_selector_all(selector) {
        Ok(nl) => collect_elements(&nl),
        Err(_) => Vec::new(),
    }
}

fn collect_elements(nl: &web_sys::NodeList) -> Vec<Element> {
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

pub fn set_visible(el: &Element, visible: bool, display: &str) {
    set_style(el, "display", if visible { display } else { "none" });
}

pub fn create_element(tag: &str) -> Option<Element> {
    doc().create_element(tag).ok()
}

pub fn append_to_body(el: &Element) {
    if let Some(body) = doc().body() {
        let _ = body.append_child(el);
    }
}

pub fn data(el: &Element, name: &str) -> String {
    el.get_attribute(&format!("data-{name}")).unwrap_or_default()
}

pub fn as_input(el: &Element) -> Option<HtmlInputElement> {
    el.clone().dyn_into::<HtmlInputElement>().ok()
}

/// Escape a value for use inside a double-quoted attribute selector.
pub fn attr_selector_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

pub fn confirm(message: &str) -> bool {
    gloo_utils::window().confirm_with_message(message).unwrap_or(false)
}
