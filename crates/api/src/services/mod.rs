//! Business logic services.

pub mod admin;
pub mod auth;
