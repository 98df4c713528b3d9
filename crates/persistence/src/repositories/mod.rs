//! Repository implementations.

pub mod issue;
pub mod store;
pub mod store_device;
pub mod user;

pub use issue::{IssueRepository, IssueSearchFilter};
pub use store::StoreRepository;
pub use store_device::StoreDeviceRepository;
pub use user::UserRepository;
