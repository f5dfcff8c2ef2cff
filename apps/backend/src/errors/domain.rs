//! Domain-level error type used across services and adapters.
//!
//! This error type is HTTP- and DB-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! through `From<DomainError> for AppError`.

use thiserror::Error;

/// Validation kinds: bad input detected before the store is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InvalidHand,
    InvalidUsername,
    Other(String),
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    /// The store rejected a write on a foreign key.
    ForeignKey,
    /// The store rejected a write on a CHECK constraint.
    Check,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Player,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// Username already registered
    UniqueUsername,
    /// Player row changed between read and commit
    OptimisticLock,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Input validation or business rule violation
    #[error("validation error {0:?}: {1}")]
    Validation(ValidationKind, String),
    /// Semantic conflict
    #[error("conflict {0:?}: {1}")]
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    #[error("infra {0:?}: {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    pub fn player_not_found(detail: impl Into<String>) -> Self {
        Self::NotFound(NotFoundKind::Player, detail.into())
    }

    /// Stored data violates an invariant the schema should have enforced.
    pub fn corrupt(detail: impl Into<String>) -> Self {
        Self::Infra(InfraErrorKind::DataCorruption, detail.into())
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        crate::infra::db_errors::map_db_err(e)
    }
}
