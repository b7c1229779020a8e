//! Request id allocation.
//!
//! Ids read like creation timestamps (Unix milliseconds) but are strictly
//! increasing, so two reports in the same millisecond never collide.

use chrono::Utc;
use flood_common::FloodError;

#[derive(Debug, Default)]
pub struct RequestIdGenerator {
    last: u64,
}

impl RequestIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue after the highest id already issued (e.g. found in the ledger)
    pub fn resume_after(last: u64) -> Self {
        Self { last }
    }

    /// Fails once `u64::MAX` has been issued rather than repeating it
    pub fn next_id(&mut self) -> Result<u64, FloodError> {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.next_at(now).ok_or(FloodError::IdsExhausted(self.last))
    }

    fn next_at(&mut self, now_ms: u64) -> Option<u64> {
        let id = now_ms.max(self.last.checked_add(1)?);
        self.last = id;
        Some(id)
    }
}
