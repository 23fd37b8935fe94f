//! Domain error types
//!
//! This module defines error types specific to domain operations,
//! currently remote path handling failures.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Remote path has no `/` to split a parent from its leaf
    #[error("Remote path has no parent: {0}")]
    NoParent(String),

    /// Invalid remote path component (empty or containing a separator)
    #[error("Invalid remote path component: {0}")]
    InvalidComponent(String),
}
