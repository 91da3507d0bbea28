//! Run store, item store and employee directory.
//!
//! The [`ports`](self) traits are what the engine and the reporting
//! aggregator depend on; the in-memory implementations back the binary and
//! the tests.

mod in_memory;
mod ports;

pub use in_memory::{InMemoryEmployeeDirectory, InMemoryItemStore, InMemoryRunStore};
pub use ports::{
    EmployeeDirectory, InsertOutcome, ItemStore, RunStore, SharedDirectory, SharedItemStore,
    SharedRunStore,
};
