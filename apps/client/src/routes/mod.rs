pub mod guard;

use crate::auth::session::AuthSnapshot;

pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const DASHBOARD_PATH: &str = "/";

/// Views of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => LOGIN_PATH,
            Route::Signup => SIGNUP_PATH,
            Route::Dashboard => DASHBOARD_PATH,
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            LOGIN_PATH => Some(Route::Login),
            SIGNUP_PATH => Some(Route::Signup),
            DASHBOARD_PATH => Some(Route::Dashboard),
            _ => None,
        }
    }

    /// Only the dashboard requires a resolved user.
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Dashboard)
    }
}

/// The session control offered in the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Logout,
    Login,
}

pub fn nav_action(session: &AuthSnapshot) -> NavAction {
    if session.user.is_some() {
        NavAction::Logout
    } else {
        NavAction::Login
    }
}
