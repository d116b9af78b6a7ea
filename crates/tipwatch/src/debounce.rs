//! Debouncing for node-change notifications.
//!
//! Node switches tend to arrive in bursts while a user edits settings.
//! [`next_change`] waits for the burst to settle and yields only the value
//! that stuck.

use std::time::Duration;

use tokio::sync::watch;

/// Wait for the next change on `rx`, then absorb further changes until
/// `quiet` passes without one. Returns the latest value.
///
/// A zero `quiet` period returns on the first change. Fails once the sender
/// is gone and no unseen change is pending.
pub async fn next_change<T: Clone>(
    rx: &mut watch::Receiver<T>,
    quiet: Duration,
) -> Result<T, watch::error::RecvError> {
    rx.changed().await?;

    if !quiet.is_zero() {
        // Stop on timeout or when the sender goes away mid-burst.
        while let Ok(Ok(())) = tokio::time::timeout(quiet, rx.changed()).await {}
    }

    Ok(rx.borrow_and_update().clone())
}
