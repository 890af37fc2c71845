//! Auth session state machine.
//!
//! ```text
//!   Unauthenticated ──login/signup(token)──▶ Resolving ──fetch ok──▶ Authenticated
//!         ▲                                     │
//!         └──────── fetch failed / logout ──────┘
//! ```
//!
//! Every transition into `Resolving` issues a `ResolveTicket` stamped with a
//! generation number. A completion is applied only if its ticket is still the
//! current one, so a response for a superseded token can never overwrite
//! newer state.
#![allow(dead_code)]

use tracing::{debug, info, warn};

use crate::errors::AuthError;
use crate::models::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Unauthenticated,
    Resolving,
    Authenticated,
}

/// Permission to resolve one token's identity. Consumed by
/// `AuthSession::complete`.
#[derive(Debug, PartialEq, Eq)]
pub struct ResolveTicket {
    generation: u64,
    token: String,
}

impl ResolveTicket {
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// What `complete` did with a resolution outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Identity stored; session is authenticated.
    Applied,
    /// Identity fetch failed; token and user were cleared.
    Cleared,
    /// The ticket was superseded; the outcome was discarded.
    Stale,
}

/// Read-only view of the session handed to consumers such as the route guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub user: Option<User>,
    pub is_resolving: bool,
}

#[derive(Debug, Default)]
pub struct AuthSession {
    token: Option<String>,
    user: Option<User>,
    is_resolving: bool,
    generation: u64,
}

impl AuthSession {
    /// Initial state derived from a persisted token. A present token starts
    /// resolution; an absent one starts unauthenticated and not resolving.
    pub fn from_persisted(token: Option<String>) -> (Self, Option<ResolveTicket>) {
        let mut session = Self::default();
        let ticket = token.map(|token| session.begin_resolving(token));
        (session, ticket)
    }

    pub fn login(&mut self, token: String) -> ResolveTicket {
        info!("Login: resolving identity for new token");
        self.begin_resolving(token)
    }

    pub fn signup(&mut self, token: String) -> ResolveTicket {
        info!("Signup: resolving identity for new token");
        self.begin_resolving(token)
    }

    /// Clears the session immediately. Any resolution still in flight becomes
    /// stale.
    pub fn logout(&mut self) {
        self.generation += 1;
        self.token = None;
        self.user = None;
        self.is_resolving = false;
        info!("Logged out");
    }

    fn begin_resolving(&mut self, token: String) -> ResolveTicket {
        self.generation += 1;
        self.token = Some(token.clone());
        self.user = None;
        self.is_resolving = true;
        ResolveTicket {
            generation: self.generation,
            token,
        }
    }

    fn is_current(&self, ticket: &ResolveTicket) -> bool {
        ticket.generation == self.generation && self.token.as_deref() == Some(ticket.token.as_str())
    }

    /// Applies the outcome of an identity fetch.
    ///
    /// A failure clears the session without issuing a new ticket, so the
    /// clearing is terminal for that token.
    pub fn complete(
        &mut self,
        ticket: ResolveTicket,
        outcome: Result<User, AuthError>,
    ) -> Resolution {
        if !self.is_current(&ticket) {
            debug!(
                "Discarding stale identity resolution (generation {} != {})",
                ticket.generation, self.generation
            );
            return Resolution::Stale;
        }

        self.is_resolving = false;
        match outcome {
            Ok(user) => {
                info!("Authenticated as {}", user.email);
                self.user = Some(user);
                Resolution::Applied
            }
            Err(e) => {
                warn!("Failed to fetch user: {e}");
                self.token = None;
                self.user = None;
                Resolution::Cleared
            }
        }
    }

    pub fn phase(&self) -> AuthPhase {
        match (&self.token, &self.user, self.is_resolving) {
            (None, _, _) => AuthPhase::Unauthenticated,
            (Some(_), _, true) => AuthPhase::Resolving,
            (Some(_), Some(_), false) => AuthPhase::Authenticated,
            (Some(_), None, false) => AuthPhase::Unauthenticated,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_resolving(&self) -> bool {
        self.is_resolving
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            user: self.user.clone(),
            is_resolving: self.is_resolving,
        }
    }
}
