//! Toast notifications.
//!
//! Notices stack in a fixed `.notification-container` in the top-right corner
//! and remove themselves after the configured duration.

use crate::dom;
use gloo_timers::callback::Timeout;
use mp_cart_core::Notice;
use web_sys::Element;

fn container() -> Option<Element> {
    if let Some(existing) = dom::query(".notification-container") {
        return Some(existing);
    }

    let container = dom::create_element("div")?;
    container.set_class_name("notification-container position-fixed");
    dom::set_style(&container, "top", "100px");
    dom::set_style(&container, "right", "20px");
    dom::set_style(&container, "z-index", "9999");
    dom::append_to_body(&container);
    Some(container)
}

pub fn show(notice: &Notice, duration_ms: u32) {
    let Some(container) = container() else {
        gloo_console::warn!("notification container unavailable:", notice.message.clone());
        return;
    };
    let Some(toast) = dom::create_element("div") else {
        return;
    };

    toast.set_class_name(&format!(
        "alert alert-{} alert-dismissible fade show mb-2",
        notice.kind.css_class()
    ));
    let _ = toast.set_attribute("role", "alert");
    dom::set_style(&toast, "min-width", "300px");
    dom::set_inner_html(
        &toast,
        &format!(
            r#"<i class="fas fa-{} me-2"></i><span class="notification-message"></span><button type="button" class="btn-close" data-bs-dismiss="alert"></button>"#,
            notice.kind.icon()
        ),
    );
    // Message goes in as text so product names cannot inject markup.
    if let Ok(Some(slot)) = toast.query_selector(".notification-message") {
        dom::set_text(&slot, &notice.message);
    }

    let _ = container.append_child(&toast);

    Timeout::new(duration_ms, move || {
        if toast.parent_element().is_some() {
            toast.remove();
        }
    })
    .forget();
}
