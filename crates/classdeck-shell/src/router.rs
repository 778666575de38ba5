//! Client-side routes and guard-gated navigation.
//!
//! The router owns the current location, the recorded return-to hint, and
//! the policy each route declares for itself. Every navigation attempt runs
//! through [`classdeck_access::guard::evaluate`]; the router only commits
//! the decision.

use classdeck_access::SessionState;
use classdeck_access::guard::{self, AccessPolicy, GuardDecision};
use classdeck_bridge::session::{Permission, Role};

/// The closed set of client routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteId {
    /// Guest-only sign-in page.
    SignIn,
    StudentDashboard,
    TeacherDashboard,
    AdminDashboard,
    SuperAdminDashboard,
    /// AI assistant panel.
    Assistant,
    /// Reports, reachable by anyone holding the view permission.
    Reports,
    /// User management, admins with full user permissions only.
    Users,
    /// Terminal state for denied navigation.
    Unauthorized,
}

impl RouteId {
    /// Access requirements the route declares for itself.
    pub fn policy(self) -> AccessPolicy {
        match self {
            RouteId::SignIn => AccessPolicy::guest_only(),
            RouteId::StudentDashboard => AccessPolicy::authenticated().roles([Role::Student]),
            RouteId::TeacherDashboard => AccessPolicy::authenticated().roles([Role::Teacher]),
            RouteId::AdminDashboard => {
                AccessPolicy::authenticated().roles([Role::Admin, Role::SuperAdmin])
            }
            RouteId::SuperAdminDashboard => {
                AccessPolicy::authenticated().roles([Role::SuperAdmin])
            }
            RouteId::Assistant => {
                AccessPolicy::authenticated().permissions([Permission::AssistantUse])
            }
            RouteId::Reports => {
                AccessPolicy::authenticated().permissions([Permission::ReportsView])
            }
            RouteId::Users => AccessPolicy::authenticated()
                .roles([Role::Admin, Role::SuperAdmin])
                .permissions([Permission::UsersRead, Permission::UsersWrite])
                .require_all(),
            RouteId::Unauthorized => AccessPolicy::public(),
        }
    }
}

/// The dashboard a role lands on by default.
pub fn role_home(role: Role) -> RouteId {
    match role {
        Role::Student => RouteId::StudentDashboard,
        Role::Teacher => RouteId::TeacherDashboard,
        Role::Admin => RouteId::AdminDashboard,
        Role::SuperAdmin => RouteId::SuperAdminDashboard,
    }
}

/// Guard-gated navigation state.
#[derive(Debug)]
pub struct Router {
    current: RouteId,
    /// Requested route preserved across a sign-in redirect, consumed by the
    /// first guest-only bounce afterwards.
    return_to: Option<RouteId>,
    /// Navigation attempt parked while the session resolves.
    pending: Option<RouteId>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            current: RouteId::SignIn,
            return_to: None,
            pending: None,
        }
    }

    /// The route currently rendered.
    pub fn current(&self) -> RouteId {
        self.current
    }

    /// The recorded post-login destination, if any.
    pub fn return_to(&self) -> Option<RouteId> {
        self.return_to
    }

    /// Attempts to navigate to `target` under the given session and commits
    /// the guard's decision. Returns the route current afterwards; a pending
    /// decision leaves the current route untouched and parks the attempt.
    pub fn navigate(&mut self, target: RouteId, session: &SessionState) -> RouteId {
        match guard::evaluate(session, &target.policy()) {
            GuardDecision::Pending => {
                self.pending = Some(target);
            }
            GuardDecision::Allow => {
                self.current = target;
            }
            GuardDecision::RedirectToSignIn => {
                self.return_to = Some(target);
                self.current = RouteId::SignIn;
            }
            GuardDecision::RedirectToUnauthorized => {
                self.current = RouteId::Unauthorized;
            }
            GuardDecision::RedirectAway => {
                // The bounce destination gets no free pass: it runs through
                // the guard like any other navigation, so a recorded
                // return-to that the identity does not satisfy ends on the
                // unauthorized page, not on the protected content.
                let destination = self
                    .return_to
                    .take()
                    .unwrap_or_else(|| default_landing(session));
                self.navigate(destination, session);
            }
        }
        self.current
    }

    /// Re-evaluates navigation after a session change: completes a parked
    /// attempt if there is one, otherwise re-runs the guard for the current
    /// route (handles sign-out on a protected page and sign-in on the
    /// guest-only page alike).
    pub fn refresh(&mut self, session: &SessionState) -> RouteId {
        let target = self.pending.take().unwrap_or(self.current);
        self.navigate(target, session)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Landing route for an authenticated session bounced off a guest-only
/// route with no recorded destination.
fn default_landing(session: &SessionState) -> RouteId {
    match session.identity() {
        Some(identity) => role_home(identity.role),
        // Unreachable through the guard (the bounce implies a session), but
        // total anyway.
        None => RouteId::SignIn,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use classdeck_bridge::session::Identity;

    use super::*;

    fn signed_in(role: Role, permissions: &[Permission]) -> SessionState {
        SessionState::SignedIn(Identity {
            id: "u-9".to_string(),
            display_name: "Ada Olatunji".to_string(),
            role,
            permissions: permissions.iter().copied().collect::<HashSet<_>>(),
        })
    }

    #[test]
    fn protected_route_redirects_and_records_return_to() {
        let mut router = Router::new();
        let current = router.navigate(RouteId::Reports, &SessionState::SignedOut);
        assert_eq!(current, RouteId::SignIn);
        assert_eq!(router.return_to(), Some(RouteId::Reports));
    }

    #[test]
    fn sign_in_returns_to_the_originally_requested_route() {
        let mut router = Router::new();
        router.navigate(RouteId::Reports, &SessionState::SignedOut);

        let session = signed_in(Role::Teacher, &[Permission::ReportsView]);
        // The user is now on the guest-only sign-in page with a session.
        let current = router.refresh(&session);
        assert_eq!(current, RouteId::Reports);
        assert_eq!(router.return_to(), None);
    }

    #[test]
    fn bounce_destination_is_re_evaluated_by_the_guard() {
        let mut router = Router::new();
        // A signed-out deep link to the admin-only Users route records it
        // as the post-login destination.
        router.navigate(RouteId::Users, &SessionState::SignedOut);
        assert_eq!(router.return_to(), Some(RouteId::Users));

        // The account that then signs in holds neither the role nor the
        // permissions; the bounce must not hand it the recorded route.
        let session = signed_in(Role::Student, &[]);
        let current = router.refresh(&session);
        assert_ne!(current, RouteId::Users);
        assert_eq!(current, RouteId::Unauthorized);
        assert_eq!(router.return_to(), None);
    }

    #[test]
    fn bounce_destination_matching_the_identity_is_allowed() {
        let mut router = Router::new();
        router.navigate(RouteId::Users, &SessionState::SignedOut);

        let session = signed_in(Role::Admin, &[Permission::UsersRead, Permission::UsersWrite]);
        assert_eq!(router.refresh(&session), RouteId::Users);
    }

    #[test]
    fn guest_bounce_without_return_to_lands_on_the_role_home() {
        let mut router = Router::new();
        let student = signed_in(Role::Student, &[]);
        let current = router.navigate(RouteId::SignIn, &student);
        assert_eq!(current, RouteId::StudentDashboard);

        let admin = signed_in(Role::Admin, &[]);
        let current = router.navigate(RouteId::SignIn, &admin);
        assert_eq!(current, RouteId::AdminDashboard);
    }

    #[test]
    fn role_miss_lands_on_unauthorized() {
        let mut router = Router::new();
        let session = signed_in(Role::Teacher, &[]);
        let current = router.navigate(RouteId::AdminDashboard, &session);
        assert_eq!(current, RouteId::Unauthorized);
        // The denial is terminal: no return-to is recorded.
        assert_eq!(router.return_to(), None);
    }

    #[test]
    fn pending_navigation_completes_after_resolution() {
        let mut router = Router::new();
        let current = router.navigate(RouteId::TeacherDashboard, &SessionState::Resolving);
        assert_eq!(current, RouteId::SignIn, "current route must not move yet");

        let session = signed_in(Role::Teacher, &[]);
        let current = router.refresh(&session);
        assert_eq!(current, RouteId::TeacherDashboard);
    }

    #[test]
    fn sign_out_on_a_protected_page_falls_back_to_sign_in() {
        let mut router = Router::new();
        let session = signed_in(Role::Teacher, &[Permission::ReportsView]);
        router.navigate(RouteId::Reports, &session);

        let current = router.refresh(&SessionState::SignedOut);
        assert_eq!(current, RouteId::SignIn);
        assert_eq!(router.return_to(), Some(RouteId::Reports));
    }

    #[test]
    fn users_route_requires_every_listed_permission() {
        let mut router = Router::new();
        let partial = signed_in(Role::Admin, &[Permission::UsersRead]);
        assert_eq!(router.navigate(RouteId::Users, &partial), RouteId::Unauthorized);

        let full = signed_in(Role::Admin, &[Permission::UsersRead, Permission::UsersWrite]);
        assert_eq!(router.navigate(RouteId::Users, &full), RouteId::Users);
    }
}
