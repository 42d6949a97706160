// Store adapters - re-exports all public interfaces

mod memory;
#[cfg(feature = "json_store")]
mod json;
#[cfg(feature = "json_store")]
mod locator;

pub use memory::*;
#[cfg(feature = "json_store")]
pub use json::*;
#[cfg(feature = "json_store")]
pub use locator::*;
