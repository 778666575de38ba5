//! Route guard evaluation.
//!
//! A route declares its requirements as an [`AccessPolicy`]; the guard
//! evaluates the policy against the current [`SessionState`] and yields a
//! [`GuardDecision`]. Rules are checked in a fixed order and the first
//! matching rule decides:
//!
//! 1. Public routes are always allowed, even while the session resolves.
//! 2. While the session resolves, every non-public route is pending.
//! 3. A guest-only route bounces an authenticated identity away.
//! 4. An unauthenticated visitor on a protected route goes to sign-in.
//! 5. A role miss or a permission miss (per the configured combinator)
//!    goes to the unauthorized terminal state.
//! 6. Otherwise the route is allowed.

use classdeck_bridge::session::{Permission, Role};

use crate::SessionState;

/// Who may reach a route at all, before role/permission checks apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Reachable by anyone, authenticated or not.
    Public,
    /// Requires an authenticated session.
    #[default]
    RequiresSession,
    /// Reachable only without a session (e.g., the sign-in page).
    GuestOnly,
}

/// Combinator applied over a route's required-permission set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionMode {
    /// At least one required permission must be held.
    #[default]
    Any,
    /// Every required permission must be held.
    All,
}

/// Access requirements a route declares for itself.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    /// Session requirement checked before role and permission rules.
    pub visibility: Visibility,
    /// Roles allowed on the route. `None` skips the role check.
    pub allowed_roles: Option<Vec<Role>>,
    /// Permissions required on the route. `None` skips the permission check.
    pub required_permissions: Option<Vec<Permission>>,
    /// Combinator over `required_permissions`.
    pub permission_mode: PermissionMode,
}

impl AccessPolicy {
    /// A route anyone may reach.
    pub fn public() -> Self {
        Self {
            visibility: Visibility::Public,
            ..Self::default()
        }
    }

    /// A route requiring only an authenticated session.
    pub fn authenticated() -> Self {
        Self::default()
    }

    /// A route reachable only without a session.
    pub fn guest_only() -> Self {
        Self {
            visibility: Visibility::GuestOnly,
            ..Self::default()
        }
    }

    /// Restricts the route to the given roles.
    pub fn roles(mut self, roles: impl Into<Vec<Role>>) -> Self {
        self.allowed_roles = Some(roles.into());
        self
    }

    /// Requires the given permissions under the current combinator.
    pub fn permissions(mut self, permissions: impl Into<Vec<Permission>>) -> Self {
        self.required_permissions = Some(permissions.into());
        self
    }

    /// Switches the permission combinator to require every listed permission.
    pub fn require_all(mut self) -> Self {
        self.permission_mode = PermissionMode::All;
        self
    }
}

/// Outcome of evaluating an [`AccessPolicy`] against a [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Identity resolution is in flight; render a loading fallback and
    /// decide nothing yet.
    Pending,
    /// Render the requested route.
    Allow,
    /// No session on a protected route; go to sign-in and remember the
    /// requested route for the post-login return.
    RedirectToSignIn,
    /// Role or permission check failed; go to the unauthorized terminal
    /// state.
    RedirectToUnauthorized,
    /// Authenticated identity on a guest-only route; bounce to the stored
    /// return-to destination if one is known, else the default landing.
    RedirectAway,
}

/// Evaluates `policy` against `session`. First matching rule decides.
pub fn evaluate(session: &SessionState, policy: &AccessPolicy) -> GuardDecision {
    if policy.visibility == Visibility::Public {
        return GuardDecision::Allow;
    }

    if session.is_resolving() {
        return GuardDecision::Pending;
    }

    if policy.visibility == Visibility::GuestOnly {
        return if session.is_authenticated() {
            GuardDecision::RedirectAway
        } else {
            GuardDecision::Allow
        };
    }

    if !session.is_authenticated() {
        return GuardDecision::RedirectToSignIn;
    }

    if let Some(roles) = &policy.allowed_roles
        && !session.has_any_role(roles)
    {
        return GuardDecision::RedirectToUnauthorized;
    }

    if let Some(permissions) = &policy.required_permissions {
        let satisfied = match policy.permission_mode {
            PermissionMode::Any => session.has_any_permission(permissions),
            PermissionMode::All => session.has_all_permissions(permissions),
        };
        if !satisfied {
            return GuardDecision::RedirectToUnauthorized;
        }
    }

    GuardDecision::Allow
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use classdeck_bridge::session::Identity;

    use super::*;

    fn signed_in(role: Role, permissions: &[Permission]) -> SessionState {
        SessionState::SignedIn(Identity {
            id: "u-1".to_string(),
            display_name: "Sam Okafor".to_string(),
            role,
            permissions: permissions.iter().copied().collect::<HashSet<_>>(),
        })
    }

    #[test]
    fn public_routes_skip_session_resolution() {
        let policy = AccessPolicy::public();
        assert_eq!(evaluate(&SessionState::Resolving, &policy), GuardDecision::Allow);
        assert_eq!(evaluate(&SessionState::SignedOut, &policy), GuardDecision::Allow);
    }

    #[test]
    fn protected_routes_wait_for_resolution() {
        let policy = AccessPolicy::authenticated();
        assert_eq!(evaluate(&SessionState::Resolving, &policy), GuardDecision::Pending);
        let guest = AccessPolicy::guest_only();
        assert_eq!(evaluate(&SessionState::Resolving, &guest), GuardDecision::Pending);
    }

    #[test]
    fn unauthenticated_visitor_is_sent_to_sign_in() {
        let policy = AccessPolicy::authenticated();
        assert_eq!(
            evaluate(&SessionState::SignedOut, &policy),
            GuardDecision::RedirectToSignIn
        );
    }

    #[test]
    fn role_miss_is_unauthorized() {
        let policy = AccessPolicy::authenticated().roles([Role::Admin, Role::SuperAdmin]);
        let session = signed_in(Role::Teacher, &[]);
        assert_eq!(evaluate(&session, &policy), GuardDecision::RedirectToUnauthorized);
    }

    #[test]
    fn role_match_is_allowed() {
        let policy = AccessPolicy::authenticated().roles([Role::Admin, Role::SuperAdmin]);
        let session = signed_in(Role::SuperAdmin, &[]);
        assert_eq!(evaluate(&session, &policy), GuardDecision::Allow);
    }

    #[test]
    fn require_any_accepts_a_single_held_permission() {
        let policy = AccessPolicy::authenticated()
            .permissions([Permission::ReportsView, Permission::UsersRead]);
        let session = signed_in(Role::Teacher, &[Permission::ReportsView]);
        assert_eq!(evaluate(&session, &policy), GuardDecision::Allow);
    }

    #[test]
    fn require_all_rejects_a_partial_permission_set() {
        let policy = AccessPolicy::authenticated()
            .permissions([Permission::ReportsView, Permission::UsersRead])
            .require_all();
        let session = signed_in(Role::Teacher, &[Permission::ReportsView]);
        assert_eq!(evaluate(&session, &policy), GuardDecision::RedirectToUnauthorized);
    }

    #[test]
    fn require_all_accepts_the_full_permission_set() {
        let policy = AccessPolicy::authenticated()
            .permissions([Permission::ReportsView, Permission::UsersRead])
            .require_all();
        let session = signed_in(Role::Admin, &[Permission::ReportsView, Permission::UsersRead]);
        assert_eq!(evaluate(&session, &policy), GuardDecision::Allow);
    }

    #[test]
    fn role_check_runs_before_permission_check() {
        let policy = AccessPolicy::authenticated()
            .roles([Role::Admin])
            .permissions([Permission::ReportsView]);
        // Holds the permission, misses the role.
        let session = signed_in(Role::Student, &[Permission::ReportsView]);
        assert_eq!(evaluate(&session, &policy), GuardDecision::RedirectToUnauthorized);
    }

    #[test]
    fn guest_only_bounces_authenticated_identities() {
        let policy = AccessPolicy::guest_only();
        assert_eq!(
            evaluate(&signed_in(Role::Student, &[]), &policy),
            GuardDecision::RedirectAway
        );
        assert_eq!(evaluate(&SessionState::SignedOut, &policy), GuardDecision::Allow);
    }
}
