//! spsync Core - Domain logic and the tree synchronization engine
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain** - `RemotePath`, `LocalPath`, `FileItem`, `FolderItem`, `Outcome`, `Failure`
//! - **Use cases** - `TreeSyncUseCase`, `FileLockUseCase`, `SiteOperationsUseCase`
//! - **Port definitions** - `IRemoteStore`, implemented by the SharePoint adapter
//! - **Configuration** - YAML config with validation and a builder
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module has no I/O. Ports define trait interfaces that adapter
//! crates implement. Use cases orchestrate the remote store and local disk
//! through those interfaces and report results as [`domain::Outcome`] values.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
