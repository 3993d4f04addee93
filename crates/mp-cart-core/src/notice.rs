//! User-facing notices derived from store receipts.

use mp_api_types::{CartReceipt, CartSignal, WishlistReceipt, WishlistSignal};
use serde::{Deserialize, Serialize};

pub const DEFAULT_NOTICE_DURATION_MS: u32 = 3000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    #[serde(alias = "danger")]
    Error,
}

impl NoticeKind {
    pub fn css_class(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Info => "info",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "danger",
        }
    }

    /// Font Awesome icon name shown next to the message.
    pub fn icon(self) -> &'static str {
        match self {
            NoticeKind::Success => "check-circle",
            NoticeKind::Info => "info-circle",
            NoticeKind::Warning => "exclamation-circle",
            NoticeKind::Error => "exclamation-triangle",
        }
    }

    /// Unknown names fall back to `Info`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => NoticeKind::Success,
            "warning" => NoticeKind::Warning,
            "error" | "danger" => NoticeKind::Error,
            _ => NoticeKind::Info,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    /// `None` for receipts that changed nothing.
    pub fn for_cart(receipt: &CartReceipt) -> Option<Self> {
        let name = receipt.name.as_deref().unwrap_or("Item");
        match receipt.signal {
            CartSignal::Added => Some(Self::success(format!("{name} added to cart"))),
            CartSignal::QuantityUpdated => Some(Self::success(format!("Updated {name} quantity in cart"))),
            CartSignal::Removed => Some(Self::info("Item removed from cart")),
            CartSignal::Unchanged => None,
        }
    }

    pub fn for_wishlist(receipt: &WishlistReceipt) -> Self {
        match receipt.signal {
            WishlistSignal::Added => Self::success("Added to wishlist"),
            WishlistSignal::Removed => Self::info("Removed from wishlist"),
        }
    }

    pub fn cart_updated() -> Self {
        Self::success("Cart updated successfully!")
    }

    pub fn form_invalid() -> Self {
        Self::error("Please fill in all required fields correctly.")
    }

    /// `None` when the cart was already empty.
    pub fn cart_cleared(units_removed: u64) -> Option<Self> {
        (units_removed > 0).then(|| Self::info("Cart cleared"))
    }

    pub fn search_too_short(min_chars: usize) -> Self {
        Self::warning(format!("Please enter at least {min_chars} characters to search"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mp_api_types::ProductId;

    fn cart_receipt(signal: CartSignal, name: Option<&str>) -> CartReceipt {
        CartReceipt {
            signal,
            product_id: ProductId::from("p1"),
            name: name.map(str::to_owned),
            cart_count: 1,
        }
    }

    #[test]
    fn cart_notices_use_product_name() {
        let added = Notice::for_cart(&cart_receipt(CartSignal::Added, Some("Aloe Vera"))).unwrap();
        assert_eq!(added, Notice::success("Aloe Vera added to cart"));

        let updated = Notice::for_cart(&cart_receipt(CartSignal::QuantityUpdated, Some("Aloe Vera"))).unwrap();
        assert_eq!(updated.message, "Updated Aloe Vera quantity in cart");

        let removed = Notice::for_cart(&cart_receipt(CartSignal::Removed, None)).unwrap();
        assert_eq!(removed.kind, NoticeKind::Info);
    }

    #[test]
    fn unchanged_cart_produces_no_notice() {
        assert!(Notice::for_cart(&cart_receipt(CartSignal::Unchanged, None)).is_none());
    }

    #[test]
    fn wishlist_notices() {
        let receipt = WishlistReceipt {
            signal: WishlistSignal::Removed,
            product_id: ProductId::from("p1"),
            wishlist_count: 0,
        };
        assert_eq!(Notice::for_wishlist(&receipt), Notice::info("Removed from wishlist"));
    }

    #[test]
    fn form_and_clear_notices() {
        let invalid = Notice::form_invalid();
        assert_eq!(invalid.kind.css_class(), "danger");
        assert_eq!(invalid.message, "Please fill in all required fields correctly.");

        assert_eq!(Notice::cart_cleared(3), Some(Notice::info("Cart cleared")));
        assert!(Notice::cart_cleared(0).is_none());
    }

    #[test]
    fn kind_names_map_to_bootstrap_and_icons() {
        assert_eq!(NoticeKind::parse("danger"), NoticeKind::Error);
        assert_eq!(NoticeKind::parse("ERROR").css_class(), "danger");
        assert_eq!(NoticeKind::parse("whatever"), NoticeKind::Info);
        assert_eq!(NoticeKind::Success.icon(), "check-circle");
        assert_eq!(NoticeKind::Error.icon(), "exclamation-triangle");
    }
}
