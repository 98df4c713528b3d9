//! Domain models for StoreTrack.

pub mod device;
pub mod issue;
pub mod store;
pub mod user;

pub use device::StoreDevice;
pub use issue::Issue;
pub use store::Store;
pub use user::User;
