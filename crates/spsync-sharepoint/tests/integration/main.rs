//! Integration tests for spsync-sharepoint
//!
//! Uses wiremock to simulate the SharePoint REST API and verifies
//! end-to-end behavior of the client, the remote store adapter, and the
//! core use cases running on top of it.


mod test_folders;
mod test_tree_sync;
