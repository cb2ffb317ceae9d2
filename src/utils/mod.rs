//! Utility functions

pub mod crypto;
pub mod pagination;
pub mod time;
pub mod validation;

pub use crypto::hash_string;
pub use pagination::page_window;
pub use time::{format_milliseconds, now_utc, today_utc};
