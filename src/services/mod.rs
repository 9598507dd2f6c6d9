//! Long-running services behind `classtop topbar` and `classtop remind`.
//!
//! Everything runs on a current-thread Tokio runtime; loops stop when the
//! shared [`CancellationToken`](tokio_util::sync::CancellationToken) fires.

pub mod bus;
pub mod clock;
pub mod notify;
pub mod reminder;
pub mod shutdown;
pub mod snapshot;
pub mod source;
pub mod topbar;
pub mod watch;

use crate::errors::AppResult;

/// Runtime used by the service commands.
pub fn runtime() -> AppResult<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
