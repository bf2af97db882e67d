// crates/qa-dashboard-server/src/clock.rs
// ============================================================================
// Module: Clock
// Description: Wall-clock source for timestamps.
// Purpose: Keep the data core free of ambient time.
// Dependencies: time
// ============================================================================

//! Clock abstraction used to stamp datasets, errors, and audit events.

use time::OffsetDateTime;

/// Time source.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> OffsetDateTime;
}

/// System UTC clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
