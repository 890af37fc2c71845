//! Auth controller — owns the session state machine, persists the token, and
//! drives identity resolution against the API.
//!
//! Consumers get the controller passed in (see `AppState`); there is no
//! ambient global session.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::api_client::ApiError;
use crate::auth::session::{AuthPhase, AuthSession, AuthSnapshot, ResolveTicket, Resolution};
use crate::auth::store::TokenStore;
use crate::errors::AuthError;
use crate::models::user::User;

/// Resolves a bearer token to a user (`GET /api/users/me`).
#[async_trait]
pub trait IdentityApi: Send + Sync {
    async fn fetch_current_user(&self, token: &str) -> Result<User, ApiError>;
}

pub struct AuthController {
    session: Mutex<AuthSession>,
    store: Arc<dyn TokenStore>,
    identity: Arc<dyn IdentityApi>,
}

impl AuthController {
    /// Builds the controller from whatever token is persisted. When a token is
    /// found the returned ticket must be passed to `resolve`.
    pub fn bootstrap(
        store: Arc<dyn TokenStore>,
        identity: Arc<dyn IdentityApi>,
    ) -> (Self, Option<ResolveTicket>) {
        let persisted = match store.load() {
            Ok(token) => token,
            Err(e) => {
                warn!("Ignoring unreadable token store: {e}");
                None
            }
        };
        debug!("Persisted token present: {}", persisted.is_some());

        let (session, ticket) = AuthSession::from_persisted(persisted);
        let controller = Self {
            session: Mutex::new(session),
            store,
            identity,
        };
        (controller, ticket)
    }

    fn session(&self) -> MutexGuard<'_, AuthSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Persists the token and moves the session to `Resolving`.
    pub fn begin_login(&self, token: String) -> Result<ResolveTicket, AuthError> {
        let mut session = self.session();
        self.store.save(&token)?;
        Ok(session.login(token))
    }

    pub fn begin_signup(&self, token: String) -> Result<ResolveTicket, AuthError> {
        let mut session = self.session();
        self.store.save(&token)?;
        Ok(session.signup(token))
    }

    /// Fetches the identity for a ticket and applies it.
    ///
    /// On failure the persisted token is removed as well. A stale ticket
    /// leaves both the session and the store untouched.
    pub async fn resolve(&self, ticket: ResolveTicket) -> Resolution {
        let outcome = self
            .identity
            .fetch_current_user(ticket.token())
            .await
            .map_err(AuthError::from);

        let mut session = self.session();
        let resolution = session.complete(ticket, outcome);
        if resolution == Resolution::Cleared {
            if let Err(e) = self.store.clear() {
                warn!("Failed to clear persisted token: {e}");
            }
        }
        resolution
    }

    pub async fn login(&self, token: String) -> Result<Resolution, AuthError> {
        let ticket = self.begin_login(token)?;
        Ok(self.resolve(ticket).await)
    }

    pub async fn signup(&self, token: String) -> Result<Resolution, AuthError> {
        let ticket = self.begin_signup(token)?;
        Ok(self.resolve(ticket).await)
    }

    /// Clears the persisted token and the session. No network call.
    pub fn logout(&self) -> Result<(), AuthError> {
        let mut session = self.session();
        session.logout();
        self.store.clear()?;
        Ok(())
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        self.session().snapshot()
    }

    pub fn phase(&self) -> AuthPhase {
        self.session().phase()
    }

    /// Token to attach as `Authorization: Bearer` on API calls.
    pub fn bearer_token(&self) -> Option<String> {
        self.session().token().map(String::from)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::auth::store::MemoryTokenStore;
    use crate::routes::guard::{guard, GuardOutcome};
    use crate::routes::{nav_action, NavAction, Route};

    /// Identity API fake: known tokens resolve to users after an optional
    /// delay, everything else is rejected with 401.
    #[derive(Default)]
    pub(crate) struct FakeIdentity {
        users: HashMap<String, (User, Duration)>,
        pub(crate) calls: AtomicUsize,
    }

    impl FakeIdentity {
        pub(crate) fn with_user(mut self, token: &str, email: &str, delay: Duration) -> Self {
            let user = User {
                id: self.users.len() as i64 + 1,
                email: email.to_string(),
                usage_count: 0,
            };
            self.users.insert(token.to_string(), (user, delay));
            self
        }
    }

    #[async_trait]
    impl IdentityApi for FakeIdentity {
        async fn fetch_current_user(&self, token: &str) -> Result<User, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.users.get(token) {
                Some((user, delay)) => {
                    tokio::time::sleep(*delay).await;
                    Ok(user.clone())
                }
                None => Err(ApiError::Status {
                    status: 401,
                    detail: Some("Could not validate credentials".to_string()),
                }),
            }
        }
    }

    fn controller(
        store: Arc<MemoryTokenStore>,
        identity: Arc<FakeIdentity>,
    ) -> (Arc<AuthController>, Option<ResolveTicket>) {
        let (controller, ticket) = AuthController::bootstrap(store, identity);
        (Arc::new(controller), ticket)
    }

    #[tokio::test]
    async fn test_bootstrap_without_token_is_unauthenticated() {
        let identity = Arc::new(FakeIdentity::default());
        let (auth, ticket) = controller(Arc::default(), identity.clone());
        assert!(ticket.is_none());
        assert_eq!(auth.phase(), AuthPhase::Unauthenticated);
        assert!(!auth.snapshot().is_resolving);
        assert_eq!(identity.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_expired_persisted_token_redirects_dashboard_to_login() {
        let store = Arc::new(MemoryTokenStore::with_token("expired"));
        let (auth, ticket) = controller(store.clone(), Arc::new(FakeIdentity::default()));

        // still resolving: the guard must hold rather than redirect
        assert_eq!(
            guard(&auth.snapshot(), Route::Dashboard.path(), "dashboard"),
            GuardOutcome::Loading
        );

        auth.resolve(ticket.unwrap()).await;
        assert_eq!(
            guard(&auth.snapshot(), Route::Dashboard.path(), "dashboard"),
            GuardOutcome::Redirect {
                to: "/login",
                from: "/".to_string(),
            }
        );
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(nav_action(&auth.snapshot()), NavAction::Login);
    }

    #[tokio::test]
    async fn test_bootstrap_with_valid_token_authenticates() {
        let store = Arc::new(MemoryTokenStore::with_token("good"));
        let identity =
            Arc::new(FakeIdentity::default().with_user("good", "ada@example.com", Duration::ZERO));
        let (auth, ticket) = controller(store, identity);
        assert_eq!(auth.phase(), AuthPhase::Resolving);

        assert_eq!(auth.resolve(ticket.unwrap()).await, Resolution::Applied);
        assert_eq!(auth.phase(), AuthPhase::Authenticated);
        assert_eq!(auth.bearer_token().as_deref(), Some("good"));
    }

    #[tokio::test]
    async fn test_failed_resolution_clears_store_and_fetches_once() {
        let store = Arc::new(MemoryTokenStore::with_token("expired"));
        let identity = Arc::new(FakeIdentity::default());
        let (auth, ticket) = controller(store.clone(), identity.clone());

        assert_eq!(auth.resolve(ticket.unwrap()).await, Resolution::Cleared);
        assert_eq!(auth.phase(), AuthPhase::Unauthenticated);
        assert!(auth.bearer_token().is_none());
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(identity.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_login_persists_token() {
        let store = Arc::new(MemoryTokenStore::default());
        let identity =
            Arc::new(FakeIdentity::default().with_user("t1", "ada@example.com", Duration::ZERO));
        let (auth, _) = controller(store.clone(), identity);

        let resolution = auth.login("t1".to_string()).await.unwrap();
        assert_eq!(resolution, Resolution::Applied);
        assert_eq!(store.load().unwrap().as_deref(), Some("t1"));
        assert_eq!(auth.snapshot().user.unwrap().email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_signup_persists_token() {
        let store = Arc::new(MemoryTokenStore::default());
        let identity =
            Arc::new(FakeIdentity::default().with_user("fresh", "new@example.com", Duration::ZERO));
        let (auth, _) = controller(store.clone(), identity);

        auth.signup("fresh".to_string()).await.unwrap();
        assert_eq!(auth.phase(), AuthPhase::Authenticated);
        assert_eq!(store.load().unwrap().as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_logout_clears_store_without_network() {
        let store = Arc::new(MemoryTokenStore::default());
        let identity =
            Arc::new(FakeIdentity::default().with_user("t1", "ada@example.com", Duration::ZERO));
        let (auth, _) = controller(store.clone(), identity.clone());
        auth.login("t1".to_string()).await.unwrap();

        auth.logout().unwrap();
        assert_eq!(auth.phase(), AuthPhase::Unauthenticated);
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(identity.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_stale_resolution_does_not_overwrite_newer_login() {
        let store = Arc::new(MemoryTokenStore::default());
        let identity = Arc::new(
            FakeIdentity::default()
                .with_user("slow", "old@example.com", Duration::from_secs(5))
                .with_user("fast", "new@example.com", Duration::from_millis(10)),
        );
        let (auth, _) = controller(store.clone(), identity);

        let slow_ticket = auth.begin_login("slow".to_string()).unwrap();
        let slow = tokio::spawn({
            let auth = auth.clone();
            async move { auth.resolve(slow_ticket).await }
        });
        tokio::task::yield_now().await;

        let fast_ticket = auth.begin_login("fast".to_string()).unwrap();
        assert_eq!(auth.resolve(fast_ticket).await, Resolution::Applied);

        assert_eq!(slow.await.unwrap(), Resolution::Stale);
        assert_eq!(auth.snapshot().user.unwrap().email, "new@example.com");
        assert_eq!(auth.bearer_token().as_deref(), Some("fast"));
        assert_eq!(store.load().unwrap().as_deref(), Some("fast"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_failure_keeps_newer_token_persisted() {
        let store = Arc::new(MemoryTokenStore::default());
        let identity = Arc::new(
            FakeIdentity::default().with_user("good", "ada@example.com", Duration::from_secs(1)),
        );
        let (auth, _) = controller(store.clone(), identity);

        let bad_ticket = auth.begin_login("revoked".to_string()).unwrap();
        let good_ticket = auth.begin_login("good".to_string()).unwrap();

        assert_eq!(auth.resolve(bad_ticket).await, Resolution::Stale);
        assert_eq!(store.load().unwrap().as_deref(), Some("good"));
        assert_eq!(auth.resolve(good_ticket).await, Resolution::Applied);
    }
}
