//! Request-level facade over the engine and a record repository.
//!
//! Each method is one request: load what it needs, run the pure engine,
//! and save the result only when the engine accepted it.

use size_core::{
    ChangeError, ErrorSeverity, PersonComparison, PersonRecord, PersonStats, RecordError,
    RecordId, SizeError, StatKind, apply_change,
};
use thiserror::Error;

use crate::config::RuntimeConfig;
use crate::repository::{RecordRepository, RepositoryError};

/// Errors returned by [`SizeService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Change(#[from] ChangeError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("record {0} already exists")]
    AlreadyRegistered(RecordId),

    #[error("{0} has no {1} to describe")]
    NoSuchStat(RecordId, StatKind),
}

impl SizeError for ServiceError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Repository(err) => err.severity(),
            Self::Change(err) => err.severity(),
            Self::Record(err) => err.severity(),
            Self::AlreadyRegistered(_) | Self::NoSuchStat(..) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Repository(err) => err.error_code(),
            Self::Change(err) => err.error_code(),
            Self::Record(err) => err.error_code(),
            Self::AlreadyRegistered(_) => "SERVICE_ALREADY_REGISTERED",
            Self::NoSuchStat(..) => "SERVICE_NO_SUCH_STAT",
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Registers, resizes, and describes records held in a repository.
pub struct SizeService<R> {
    repo: R,
    config: RuntimeConfig,
}

impl<R: RecordRepository> SizeService<R> {
    pub fn new(repo: R, config: RuntimeConfig) -> Self {
        Self { repo, config }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Create a record at the configured default size.
    pub fn register(&self, id: RecordId, nickname: &str) -> Result<PersonRecord> {
        if self.repo.exists(id) {
            return Err(self.reject(ServiceError::AlreadyRegistered(id)));
        }
        let record = PersonRecord::from_config(nickname, &self.config.size).with_id(id);
        self.repo.save(&record).map_err(|e| self.reject(e.into()))?;
        tracing::info!(
            %id,
            nickname,
            height = %record.height().magnitude(),
            "registered record"
        );
        Ok(record)
    }

    pub fn load(&self, id: RecordId) -> Result<PersonRecord> {
        self.repo.load(id).map_err(|e| self.reject(e.into()))
    }

    /// Apply a height change. A rejected change leaves the stored record untouched.
    pub fn change(&self, id: RecordId, style: &str, amount: &str) -> Result<PersonRecord> {
        let record = self.load(id)?;
        let updated = apply_change(&record, style, amount).map_err(|e| self.reject(e.into()))?;
        self.repo.save(&updated).map_err(|e| self.reject(e.into()))?;
        tracing::info!(
            %id,
            style,
            amount,
            old = %record.height().magnitude(),
            new = %updated.height().magnitude(),
            "changed record height"
        );
        Ok(updated)
    }

    pub fn stats(&self, id: RecordId) -> Result<PersonStats> {
        Ok(PersonStats::derive(&self.load(id)?))
    }

    pub fn compare(&self, first: RecordId, second: RecordId) -> Result<PersonComparison> {
        let first = self.load(first)?;
        let second = self.load(second)?;
        Ok(PersonComparison::new(&first, &second))
    }

    /// One stat sentence at the configured display precision.
    pub fn stat_sentence(&self, id: RecordId, kind: StatKind) -> Result<String> {
        self.stats(id)?
            .stat_sentence(kind, self.config.size.display_precision)
            .ok_or_else(|| self.reject(ServiceError::NoSuchStat(id, kind)))
    }

    fn reject(&self, err: ServiceError) -> ServiceError {
        tracing::warn!(
            code = err.error_code(),
            severity = err.severity().as_str(),
            "{err}"
        );
        err
    }
}
