//! HTTP middleware.

pub mod logging;
pub mod request_id;

pub use request_id::request_id;
