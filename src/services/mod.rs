// Service exports
pub mod profile_store;

pub use profile_store::{ProfileSession, ProfileStore, StoreError, StoreStats, SwipeOutcome};
