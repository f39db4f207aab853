//! Runtime wiring for the size engine.
//!
//! `size-core` is pure; this crate supplies the pieces a host application
//! needs around it:
//! - [`repository`] stores records between requests
//! - [`SizeService`] runs one request at a time against a repository
//! - [`RuntimeConfig`] loads defaults from the environment
pub mod config;
pub mod repository;
pub mod service;

pub use config::RuntimeConfig;
pub use repository::{InMemoryRecordRepo, RecordRepository, RepositoryError};
pub use service::{ServiceError, SizeService};
