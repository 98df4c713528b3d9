//! Entity definitions (database row mappings).

pub mod issue;
pub mod store;
pub mod store_device;
pub mod user;

pub use issue::IssueEntity;
pub use store::StoreEntity;
pub use store_device::StoreDeviceEntity;
pub use user::UserEntity;
