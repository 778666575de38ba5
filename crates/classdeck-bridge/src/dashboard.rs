use serde::{Deserialize, Serialize};

/// A course as listed on a dashboard.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    /// Stable course identifier.
    pub id: String,
    /// Course title shown in the course list.
    pub title: String,
    /// Completion percentage in the 0..=100 range, as reported by the
    /// platform for the requesting account.
    pub progress_percent: u32,
}

/// A platform-wide or course-scoped announcement.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    /// Announcement headline.
    pub title: String,
    /// Announcement body text.
    pub body: String,
}

/// Dashboard summary for the signed-in identity.
///
/// The platform scopes the content to the account's role: students see
/// their enrolled courses, teachers the courses they run, and so on.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Courses relevant to the account.
    pub courses: Vec<CourseSummary>,
    /// Number of assignments awaiting action.
    pub pending_assignments: u32,
    /// Recent announcements, newest first.
    pub announcements: Vec<Announcement>,
}
