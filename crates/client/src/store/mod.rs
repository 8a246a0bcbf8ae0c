//! Test support: a document store that never leaves the process.

pub mod memory;

pub use memory::InMemoryStore;
