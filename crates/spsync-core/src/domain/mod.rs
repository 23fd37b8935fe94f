//! Domain entities and business logic
//!
//! This module contains the core domain types for spsync:
//! - Path newtypes and the normalization rules shared by both sides
//! - Remote item identities and checkout state
//! - Operation outcomes and failure aggregation
//! - Domain-specific error types

pub mod errors;
pub mod item;
pub mod newtypes;
pub mod outcome;

// Re-export commonly used types
pub use errors::DomainError;
pub use item::{CheckOutState, FileItem, FolderItem, ItemKind};
pub use newtypes::*;
pub use outcome::{aggregate, Failure, FailureCollector, FailureKind, Outcome};
