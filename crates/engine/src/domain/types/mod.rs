// Re-export all types so consumers can use `domain::types::*`.

pub use lookup::*;
pub use source::*;
pub use pinning::*;
pub use config::*;

// Module declarations
mod lookup;
mod source;
mod pinning;
mod config;
