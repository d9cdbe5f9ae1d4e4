//! Shared test utilities for the NDFD archive workspace.
//!
//! Provides forecast-record fixtures, predictable grid generators, and a
//! fault-injecting object store for crash-ordering tests.
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod failing_store;
pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use failing_store::FailingStore;
pub use fixtures::*;
pub use generators::*;
