//! # Menu API
//! 
//! HTTP handlers, routing, the response envelope, and error mapping.

pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
