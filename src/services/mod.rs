// Service exports
pub mod memory;
pub mod store;

pub use memory::{MemoryStore, SeedData};
pub use store::{MatchUpdate, StoreError, UserStore, UserUpdate};
