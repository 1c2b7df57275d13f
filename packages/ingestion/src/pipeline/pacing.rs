//! Fixed-interval pacing between outbound provider calls.
//!
//! The external API is rate limited, so a run never issues two provider
//! calls closer together than the tier's interval: 10 seconds before
//! each priority-combination call, 2 seconds before everything else.
//! One pacer tracks the previous call across both tiers, so the minimum
//! gap also holds at the boundary between them. This is the run's only
//! explicit suspension point.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Gap before exhaustive-strategy and supplementary-sample calls.
pub const SUPPLEMENTARY_PACE: Duration = Duration::from_secs(2);

/// Gap before each priority-combination call.
pub const PRIORITY_PACE: Duration = Duration::from_secs(10);

/// Enforces a minimum delay between successive calls.
///
/// The first call goes through immediately; each later call waits until
/// the requested interval has passed since the previous one, whatever
/// tier that previous call belonged to.
pub struct Pacer {
    last_call: Mutex<Option<Instant>>,
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Pacer {
    /// Create a pacer with no call history.
    pub fn new() -> Self {
        Self {
            last_call: Mutex::new(None),
        }
    }

    /// Wait until `interval` has elapsed since the previous call, then
    /// mark this call. Lock is held across the sleep so overlapping
    /// callers are serialized rather than released in a burst.
    pub async fn wait(&self, interval: Duration) {
        let mut last_call = self.last_call.lock().await;
        if let Some(previous) = *last_call {
            tokio::time::sleep_until(previous + interval).await;
        }
        *last_call = Some(Instant::now());
    }
}
