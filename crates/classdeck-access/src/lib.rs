//! Session state and route authorization primitives.
//!
//! This crate provides the identity-side half of navigation gating: a
//! [`SessionState`] tracking whether an identity is known yet, pure
//! role/permission predicates over it, and the [`guard`] module that
//! evaluates a route's declared requirements against the current session.
//!
//! Everything here is a total function over its inputs. Authorization never
//! fails with an error; the worst outcome is a deny decision, and every
//! predicate fails closed when no identity is present.

pub mod guard;

use classdeck_bridge::session::{Identity, Permission, Role};

/// The shell's view of the session at any point in time.
///
/// The state starts as [`Resolving`](SessionState::Resolving) until the
/// backend settles the startup session restore, then tracks the definitive
/// signed-in/out status from there on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Identity resolution is still in flight.
    #[default]
    Resolving,
    /// Resolution finished and no identity is present.
    SignedOut,
    /// An authenticated identity is present.
    SignedIn(Identity),
}

impl SessionState {
    /// Whether identity resolution is still in flight.
    pub fn is_resolving(&self) -> bool {
        matches!(self, SessionState::Resolving)
    }

    /// Whether an authenticated identity is present.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::SignedIn(_))
    }

    /// The authenticated identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::SignedIn(identity) => Some(identity),
            _ => None,
        }
    }

    /// Whether the identity holds exactly the given role. Fails closed
    /// without an identity.
    pub fn has_role(&self, role: Role) -> bool {
        self.identity().is_some_and(|identity| identity.role == role)
    }

    /// Whether the identity's role is one of `roles`. Fails closed without
    /// an identity.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.identity()
            .is_some_and(|identity| roles.contains(&identity.role))
    }

    /// Whether the identity holds the given permission. Fails closed
    /// without an identity.
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.identity()
            .is_some_and(|identity| identity.permissions.contains(&permission))
    }

    /// Whether the identity holds at least one of `permissions`. Fails
    /// closed without an identity.
    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        self.identity().is_some_and(|identity| {
            permissions
                .iter()
                .any(|permission| identity.permissions.contains(permission))
        })
    }

    /// Whether the identity holds every one of `permissions`. Fails closed
    /// without an identity.
    pub fn has_all_permissions(&self, permissions: &[Permission]) -> bool {
        self.identity().is_some_and(|identity| {
            permissions
                .iter()
                .all(|permission| identity.permissions.contains(permission))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn teacher_identity() -> Identity {
        Identity {
            id: "u-17".to_string(),
            display_name: "Priya Nair".to_string(),
            role: Role::Teacher,
            permissions: HashSet::from([Permission::ReportsView, Permission::GradesEdit]),
        }
    }

    #[test]
    fn predicates_fail_closed_without_identity() {
        for state in [SessionState::Resolving, SessionState::SignedOut] {
            assert!(!state.has_role(Role::Student));
            assert!(!state.has_any_role(&[Role::Student, Role::Admin]));
            assert!(!state.has_permission(Permission::ReportsView));
            assert!(!state.has_any_permission(&[Permission::ReportsView]));
            assert!(!state.has_all_permissions(&[Permission::ReportsView]));
        }
    }

    #[test]
    fn role_predicates_match_exactly() {
        let state = SessionState::SignedIn(teacher_identity());
        assert!(state.has_role(Role::Teacher));
        assert!(!state.has_role(Role::Admin));
        assert!(state.has_any_role(&[Role::Admin, Role::Teacher]));
        assert!(!state.has_any_role(&[Role::Admin, Role::SuperAdmin]));
    }

    #[test]
    fn permission_predicates_check_membership() {
        let state = SessionState::SignedIn(teacher_identity());
        assert!(state.has_permission(Permission::GradesEdit));
        assert!(!state.has_permission(Permission::UsersWrite));
        assert!(state.has_any_permission(&[Permission::UsersWrite, Permission::ReportsView]));
        assert!(!state.has_any_permission(&[Permission::UsersWrite, Permission::UsersRead]));
        assert!(state.has_all_permissions(&[Permission::ReportsView, Permission::GradesEdit]));
        assert!(!state.has_all_permissions(&[Permission::ReportsView, Permission::UsersRead]));
    }
}
