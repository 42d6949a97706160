pub mod error;
pub mod group_policy;
pub mod policy;
pub mod store;
pub mod types;
