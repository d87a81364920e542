//! Where year configurations come from.

mod source;
mod store;

pub use source::ConfigSource;
pub use store::InMemoryConfigStore;
