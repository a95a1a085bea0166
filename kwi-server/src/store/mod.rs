//! In-memory stores
//!
//! Each store exclusively owns its records and id counter behind a
//! `tokio::sync::RwLock`. Instances are constructed by the application
//! context and injected; there is no global state.

pub mod history;
pub mod keywords;
pub mod waitlist;

pub use history::SearchHistoryStore;
pub use keywords::{CacheLookup, KeywordStore};
pub use waitlist::WaitlistStore;
