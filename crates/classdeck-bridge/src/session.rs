use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Coarse-grained identity category assigned by the learning platform.
///
/// Every account carries exactly one role; the role decides which dashboard
/// the account lands on and participates in route-level access checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Teacher,
    Admin,
    SuperAdmin,
}

/// Fine-grained capability token, independent of [`Role`].
///
/// Permissions are granted per account by the platform and checked by the
/// shell's route guard in addition to the role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    ReportsView,
    UsersRead,
    UsersWrite,
    CoursesManage,
    GradesEdit,
    AssistantUse,
    SettingsManage,
}

/// A signed-in account as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Stable account identifier.
    pub id: String,
    /// Name shown in the shell's header and greetings.
    pub display_name: String,
    /// The account's single role.
    pub role: Role,
    /// Capability tokens granted to the account.
    pub permissions: HashSet<Permission>,
}

/// The backend's settled view of the session, pushed to the shell.
///
/// Until the first update arrives the shell treats the session as still
/// resolving; every update after that is definitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// No session: sign-out, failed restore, or failed sign-in.
    SignedOut,
    /// An authenticated session for the given identity.
    SignedIn(Identity),
}
