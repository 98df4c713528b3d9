//! Domain layer for the StoreTrack backend.
//!
//! This crate contains:
//! - Domain models (Store, Issue, User, StoreDevice)
//! - The legacy-keyed wire payloads shared by server and client

pub mod models;
