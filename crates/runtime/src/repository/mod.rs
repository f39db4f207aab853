//! Repository layer for person records.
//!
//! The engine itself is storage-free; repositories are the one place where
//! records outlive a request.

mod error;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use memory::InMemoryRecordRepo;
pub use traits::RecordRepository;
