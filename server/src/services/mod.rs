//! Services module
//!
//! Page data assembly that coordinates between page handlers and repository.

pub mod feed;

pub use feed::{FeedPage, FeedService, MemoView};
