//! Integration tests for the spsync-core use cases
//!
//! Drives the tree engine, the lock controller and the one-shot operations
//! against an in-memory remote store and real temporary directories.


mod test_download;
mod test_file_lock;
mod test_site_operations;
