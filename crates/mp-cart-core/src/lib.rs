pub mod config;
pub mod format;
pub mod notice;
pub mod quantity;
pub mod search;
pub mod store;

pub use config::{CART_STORAGE_KEY, StoreConfig, WISHLIST_STORAGE_KEY};
pub use format::format_inr;
pub use notice::{Notice, NoticeKind};
pub use quantity::QuantityBounds;
pub use store::{CartStore, load_state};
