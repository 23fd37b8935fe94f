//! File checkout / checkin use case
//!
//! Guards edits to a single remote file with the store's pessimistic edit
//! lock. The controller keeps no memory between calls: every operation
//! fetches the file fresh, derives its [`LockState`], and only contacts the
//! store's lock operation when a transition is actually needed. Repeating
//! any operation is therefore harmless.
//!
//! ```text
//!            check_out                 check_in / undo_check_out
//!   Free ───────────────▶ CheckedOut ─────────────────────────────▶ Free
//!    ▲ │ check_in, undo_check_out: no-op      │ check_out: no-op
//!    └─┘                                      └──▶ CheckedOut
//! ```

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::domain::item::CheckOutState;
use crate::domain::newtypes::RemotePath;
use crate::domain::outcome::{Failure, Outcome};
use crate::ports::IRemoteStore;

use super::{timed, DEFAULT_REQUEST_TIMEOUT};

const CHECKOUT_ACTION: &str = "Fail to checkout the file";
const CHECKIN_ACTION: &str = "Fail to checkin the file";
const UNDO_CHECKOUT_ACTION: &str = "Fail to undo checkout the file";

/// Lock state of a file as seen by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Free,
    CheckedOut,
}

impl From<&CheckOutState> for LockState {
    fn from(state: &CheckOutState) -> Self {
        if state.is_checked_out() {
            LockState::CheckedOut
        } else {
            LockState::Free
        }
    }
}

/// Use case for the per-file edit lock
pub struct FileLockUseCase {
    store: Arc<dyn IRemoteStore>,
    timeout: Duration,
}

impl FileLockUseCase {
    /// Creates a new FileLockUseCase with the default per-call timeout
    pub fn new(store: Arc<dyn IRemoteStore>) -> Self {
        Self {
            store,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Overrides the bound on each remote call
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Current lock state of `path`, fetched fresh from the store
    ///
    /// # Errors
    /// Returns the classified failure if the path is missing, is a folder,
    /// or the store cannot be reached.
    pub async fn state(&self, path: &RemotePath) -> Result<LockState, Failure> {
        if !self.store.is_authenticated() {
            return Err(Failure::unauthenticated());
        }
        self.current_state(path, "Fail to get the file").await
    }

    /// Takes the edit lock unless the file is already checked out
    #[instrument(skip_all, fields(path = %path))]
    pub async fn check_out(&self, path: &RemotePath) -> Outcome {
        if !self.store.is_authenticated() {
            return Outcome::unauthenticated();
        }

        match self.current_state(path, CHECKOUT_ACTION).await {
            Ok(LockState::Free) => {
                if let Err(e) = timed(self.timeout, self.store.check_out(path)).await {
                    return e.into_failure(CHECKOUT_ACTION).into();
                }
                info!("file checked out");
            }
            Ok(LockState::CheckedOut) => debug!("already checked out, nothing to do"),
            Err(failure) => return failure.into(),
        }

        Outcome::success(format!("Checkout the file located on {path}"))
    }

    /// Commits pending edits and releases the lock, if the file is checked out
    ///
    /// An empty comment is allowed.
    #[instrument(skip_all, fields(path = %path))]
    pub async fn check_in(&self, path: &RemotePath, comment: &str) -> Outcome {
        if !self.store.is_authenticated() {
            return Outcome::unauthenticated();
        }

        match self.current_state(path, CHECKIN_ACTION).await {
            Ok(LockState::CheckedOut) => {
                if let Err(e) = timed(self.timeout, self.store.check_in(path, comment)).await {
                    return e.into_failure(CHECKIN_ACTION).into();
                }
                info!("file checked in");
            }
            Ok(LockState::Free) => debug!("not checked out, nothing to do"),
            Err(failure) => return failure.into(),
        }

        Outcome::success(format!("Checkin the file located on {path}"))
    }

    /// Discards pending edits and releases the lock, if the file is checked out
    #[instrument(skip_all, fields(path = %path))]
    pub async fn undo_check_out(&self, path: &RemotePath) -> Outcome {
        if !self.store.is_authenticated() {
            return Outcome::unauthenticated();
        }

        match self.current_state(path, UNDO_CHECKOUT_ACTION).await {
            Ok(LockState::CheckedOut) => {
                if let Err(e) = timed(self.timeout, self.store.undo_check_out(path)).await {
                    return e.into_failure(UNDO_CHECKOUT_ACTION).into();
                }
                info!("checkout undone");
            }
            Ok(LockState::Free) => debug!("not checked out, nothing to do"),
            Err(failure) => return failure.into(),
        }

        Outcome::success(format!("Undo Checkout the File located on {path}"))
    }

    async fn current_state(&self, path: &RemotePath, action: &str) -> Result<LockState, Failure> {
        let file = timed(self.timeout, self.store.get_file(path))
            .await
            .map_err(|e| e.into_failure(action))?;
        Ok(LockState::from(&file.checkout))
    }
}
