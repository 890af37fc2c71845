//! Route guard for protected views.

use crate::auth::session::AuthSnapshot;
use crate::routes::{Route, LOGIN_PATH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome<V> {
    Render(V),
    /// Identity is still resolving; show a loading indicator.
    Loading,
    /// Resolution finished without a user. `from` is the requested location,
    /// preserved so login can return there.
    Redirect { to: &'static str, from: String },
}

/// Decides what to show for `requested_path`.
///
/// Never redirects while resolution is pending. Unprotected routes always
/// render.
pub fn guard<V>(session: &AuthSnapshot, requested_path: &str, view: V) -> GuardOutcome<V> {
    let protected = Route::from_path(requested_path)
        .map(|route| route.is_protected())
        .unwrap_or(true);
    if !protected {
        return GuardOutcome::Render(view);
    }

    if session.is_resolving {
        return GuardOutcome::Loading;
    }
    match session.user {
        Some(_) => GuardOutcome::Render(view),
        None => GuardOutcome::Redirect {
            to: LOGIN_PATH,
            from: requested_path.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::User;
    use crate::routes::DASHBOARD_PATH;

    fn snapshot(user: bool, is_resolving: bool) -> AuthSnapshot {
        AuthSnapshot {
            user: user.then(|| User {
                id: 1,
                email: "ada@example.com".to_string(),
                usage_count: 0,
            }),
            is_resolving,
        }
    }

    #[test]
    fn test_renders_for_resolved_user() {
        assert_eq!(
            guard(&snapshot(true, false), DASHBOARD_PATH, "dashboard"),
            GuardOutcome::Render("dashboard")
        );
    }

    #[test]
    fn test_loading_while_resolving_never_redirects() {
        assert_eq!(
            guard(&snapshot(false, true), DASHBOARD_PATH, "dashboard"),
            GuardOutcome::Loading
        );
        assert_eq!(
            guard(&snapshot(true, true), DASHBOARD_PATH, "dashboard"),
            GuardOutcome::Loading
        );
    }

    #[test]
    fn test_redirects_to_login_preserving_location() {
        assert_eq!(
            guard(&snapshot(false, false), DASHBOARD_PATH, "dashboard"),
            GuardOutcome::Redirect {
                to: "/login",
                from: "/".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_paths_are_treated_as_protected() {
        assert!(matches!(
            guard(&snapshot(false, false), "/history", ()),
            GuardOutcome::Redirect { from, .. } if from == "/history"
        ));
    }

    #[test]
    fn test_public_routes_render_without_user() {
        assert_eq!(
            guard(&snapshot(false, true), LOGIN_PATH, "login"),
            GuardOutcome::Render("login")
        );
    }
}
