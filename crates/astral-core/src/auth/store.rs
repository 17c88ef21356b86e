//! The session store: who is signed in, plus their optional profile.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::AuthError;
use crate::models::{Identity, Profile};

use super::IdentityProvider;

/// Snapshot of the store's contents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<Identity>,
    pub profile: Option<Profile>,
}

impl AuthState {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

/// Session state shared by the whole application.
///
/// Construct one per application context and hand out `Arc<AuthStore>`.
/// Operations never hold the state across an `.await`, so overlapping
/// sign-in/sign-out calls are not serialized: whichever provider call
/// resolves last determines the final state.
pub struct AuthStore {
    provider: Arc<dyn IdentityProvider>,
    state: watch::Sender<AuthState>,
}

impl AuthStore {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self { provider, state }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn user(&self) -> Option<Identity> {
        self.state.borrow().user.clone()
    }

    pub fn profile(&self) -> Option<Profile> {
        self.state.borrow().profile.clone()
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.state.borrow().is_signed_in()
    }

    /// Watch for changes. Every write publishes, even one that stores an
    /// identical value.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    // =========================================================================
    // Direct setters
    // =========================================================================

    /// Replace the session identity. `None` clears it; the profile is left alone.
    pub fn set_user(&self, user: Option<Identity>) {
        self.state.send_modify(|state| state.user = user);
    }

    /// Replace the profile. Allowed whether or not anyone is signed in.
    pub fn set_profile(&self, profile: Option<Profile>) {
        self.state.send_modify(|state| state.profile = profile);
    }

    // =========================================================================
    // Provider-backed operations
    // =========================================================================

    /// Sign in with email and password.
    ///
    /// On success the returned identity becomes the session, replacing any
    /// existing one. On failure the provider's error is returned as-is and
    /// nothing changes.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        debug!(email, "Signing in");
        let identity = self.provider.sign_in_with_password(email, password).await?;
        info!(user_id = %identity.id, "Signed in");
        self.set_user(Some(identity.clone()));
        Ok(identity)
    }

    /// Create an account. Same state rules as [`AuthStore::sign_in`].
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        debug!(email, "Signing up");
        let identity = self.provider.sign_up(email, password).await?;
        info!(user_id = %identity.id, confirmed = identity.is_confirmed(), "Signed up");
        self.set_user(Some(identity.clone()));
        Ok(identity)
    }

    /// Ask the provider to end the session, then clear user and profile.
    ///
    /// The local clear happens even if the provider call fails; that
    /// failure is logged rather than returned.
    pub async fn sign_out(&self) {
        if let Err(e) = self.provider.sign_out().await {
            warn!(error = %e, status = ?e.status(), "Provider sign-out failed, clearing local session anyway");
        }
        self.state.send_modify(|state| {
            state.user = None;
            state.profile = None;
        });
        info!("Signed out");
    }
}

// ============================================================================
// Tests
// ============================================================================
