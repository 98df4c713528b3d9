//! Shared utilities and common types for the StoreTrack backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Password and PIN hashing with bcrypt
//! - Credential policy validation (password, PIN, email domain)

pub mod password;
pub mod validation;
