//! Contains the trait and an in-memory implementation for the remote bill store.

mod bill;

pub mod memory;

pub use bill::{BillStore, CreatedBill, StoreError, UpdateRequest};
pub use memory::MemoryStore;
