//! HTTP API handlers for kwi-server

pub mod health;
pub mod history;
pub mod keywords;
pub mod user;
pub mod waitlist;

pub use health::health_routes;
pub use history::history_routes;
pub use keywords::keyword_routes;
pub use user::UserId;
pub use waitlist::waitlist_routes;
