//! End-to-end shell flows: backend events in, navigation and notification
//! state out.

use std::collections::HashSet;
use std::time::Duration;

use classdeck_bridge::MessageFromBackend;
use classdeck_bridge::notification::{NotificationKind, NotificationMessage};
use classdeck_bridge::session::{Identity, Permission, Role, SessionUpdate};
use classdeck_shell::Shell;
use classdeck_shell::router::RouteId;

fn identity(role: Role, permissions: &[Permission]) -> Identity {
    Identity {
        id: "u-42".to_string(),
        display_name: "Mo Haddad".to_string(),
        role,
        permissions: permissions.iter().copied().collect::<HashSet<_>>(),
    }
}

#[tokio::test(start_paused = true)]
async fn deep_link_is_honored_after_sign_in() {
    let mut shell = Shell::new();

    // Session still resolving: the deep link parks, the page shows loading.
    shell.navigate(RouteId::Reports);
    assert_eq!(shell.router.current(), RouteId::SignIn);

    // Restore settles as signed-out: the parked attempt redirects to
    // sign-in and records the destination.
    shell.apply(MessageFromBackend::SessionUpdate(SessionUpdate::SignedOut));
    assert_eq!(shell.router.current(), RouteId::SignIn);
    assert_eq!(shell.router.return_to(), Some(RouteId::Reports));

    // Sign-in succeeds: the guest-only page bounces to the recorded
    // destination.
    shell.apply(MessageFromBackend::SessionUpdate(SessionUpdate::SignedIn(
        identity(Role::Teacher, &[Permission::ReportsView]),
    )));
    assert_eq!(shell.router.current(), RouteId::Reports);
    assert_eq!(shell.router.return_to(), None);
}

#[tokio::test(start_paused = true)]
async fn denied_role_ends_on_unauthorized_and_errors_expire() {
    let mut shell = Shell::new();
    shell.apply(MessageFromBackend::SessionUpdate(SessionUpdate::SignedIn(
        identity(Role::Teacher, &[]),
    )));

    assert_eq!(shell.navigate(RouteId::AdminDashboard), RouteId::Unauthorized);

    shell.apply(MessageFromBackend::NotificationMessage(
        NotificationMessage::new(NotificationKind::Error, "You do not have access to this page"),
    ));
    assert_eq!(shell.notifications.len(), 1);

    // Error notifications default to an 8 second lifetime.
    tokio::time::sleep(Duration::from_millis(7900)).await;
    assert_eq!(shell.notifications.len(), 1);
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(shell.notifications.is_empty());
}

#[tokio::test(start_paused = true)]
async fn dismissal_from_the_presentation_layer_is_immediate() {
    let mut shell = Shell::new();
    shell.apply(MessageFromBackend::NotificationMessage(
        NotificationMessage::new(NotificationKind::Success, "Signed in as Mo Haddad"),
    ));

    let id = shell.notifications.snapshot()[0].id;
    shell.dismiss(id);
    assert!(shell.notifications.is_empty());

    // The dismissed entry's timer firing later must not disturb new ones.
    shell.apply(MessageFromBackend::NotificationMessage(
        NotificationMessage::new(NotificationKind::Info, "Welcome back"),
    ));
    tokio::time::sleep(Duration::from_millis(4900)).await;
    assert_eq!(shell.notifications.len(), 1);
}
