use serde::{Deserialize, Serialize};

/// Daily quota usage for the AI assistant.
///
/// A single counter tracks consumption; the limit comes from configuration.
/// The counter resets when the calendar day changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct AssistantUsage {
    /// Messages consumed so far today.
    pub used: u32,
    /// Daily message limit in effect.
    pub limit: u32,
}

impl AssistantUsage {
    /// Percentage of the daily limit consumed, saturating at 100.
    ///
    /// A zero limit counts as fully consumed.
    pub fn percent_used(&self) -> u32 {
        if self.limit == 0 {
            return 100;
        }
        ((self.used as u64 * 100) / self.limit as u64).min(100) as u32
    }

    /// Whether the daily limit has been reached.
    pub fn exhausted(&self) -> bool {
        self.used >= self.limit
    }
}
