use classdeck_bridge::assistant::AssistantUsage;
use classdeck_bridge::session::Identity;
use chrono::NaiveDate;

/// Assistant consumption for the current calendar day.
///
/// One canonical counter; the day it belongs to is tracked alongside so the
/// counter can be reset lazily when the date changes.
#[derive(Debug, Clone, Copy)]
pub struct DailyUsage {
    /// Messages consumed on `day`.
    pub used: u32,
    /// The calendar day the counter belongs to.
    pub day: NaiveDate,
}

impl DailyUsage {
    pub fn new(day: NaiveDate) -> Self {
        Self { used: 0, day }
    }

    /// Resets the counter if `today` differs from the tracked day.
    pub fn roll_over(&mut self, today: NaiveDate) {
        if self.day != today {
            self.used = 0;
            self.day = today;
        }
    }

    /// Snapshot against the configured daily limit.
    pub fn against(&self, limit: u32) -> AssistantUsage {
        AssistantUsage {
            used: self.used,
            limit,
        }
    }
}

/// The core application state that holds configuration, the session, and
/// other shared resources.
///
/// This struct contains all the data that needs to be shared across async
/// tasks in the application.
///
/// It is designed to be wrapped in thread-safe, async-friendly concurrency
/// primitives (see [`SharedState`]) to allow safe concurrent reads and
/// occasional writes from multiple tasks.
#[derive(Debug, Clone)]
pub struct State {
    /// The loaded application configuration.
    pub config: classdeck_bridge::config::Config,
    /// Typed client for the learning platform's API.
    pub api: crate::api::ApiClient,
    /// The authenticated account, once a session is established.
    pub identity: Option<Identity>,
    /// Assistant quota consumption for the current day.
    pub assistant_usage: DailyUsage,
}

/// Thread-safe, async-friendly shared reference to the application [`State`].
///
/// This is the recommended way to pass state into async handlers, background
/// tasks, or any context where multiple tasks need read access (and occasional
/// write access).
pub type SharedState = std::sync::Arc<tokio::sync::RwLock<State>>;

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn roll_over_resets_on_a_new_day() {
        let mut usage = DailyUsage::new(date("2026-03-01"));
        usage.used = 12;
        usage.roll_over(date("2026-03-01"));
        assert_eq!(usage.used, 12);
        usage.roll_over(date("2026-03-02"));
        assert_eq!(usage.used, 0);
        assert_eq!(usage.day, date("2026-03-02"));
    }

    #[test]
    fn against_carries_the_configured_limit() {
        let mut usage = DailyUsage::new(date("2026-03-01"));
        usage.used = 40;
        let snapshot = usage.against(50);
        assert_eq!(snapshot.percent_used(), 80);
        assert!(!snapshot.exhausted());
        usage.used = 50;
        assert!(usage.against(50).exhausted());
    }
}
