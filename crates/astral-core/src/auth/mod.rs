//! Authentication state for the application.
//!
//! This module provides:
//! - `AuthStore`: the session store holding the signed-in identity and profile
//! - `IdentityProvider`: the capability the store delegates credential checks to
//!
//! Nothing here is persisted; a session lives as long as the store does.

pub mod provider;
pub mod store;

pub use provider::IdentityProvider;
pub use store::{AuthState, AuthStore};
