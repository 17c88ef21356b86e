use async_trait::async_trait;

use crate::api::AuthError;
use crate::models::Identity;

/// An external service that verifies credentials and manages accounts.
///
/// Implementations return identities that have already passed
/// [`Identity::validate`]; callers never see an unchecked record.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify an email/password pair and start a session
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Create an account
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Invalidate the provider-side session
    async fn sign_out(&self) -> Result<(), AuthError>;
}
