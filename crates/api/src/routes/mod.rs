//! Route handlers.

pub mod admin;
pub mod auth;
pub mod devices;
pub mod health;
pub mod issues;
pub mod stores;
