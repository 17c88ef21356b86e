//! HTTP client for the Supabase GoTrue authentication API.
//!
//! `GoTrueClient` implements `IdentityProvider` over REST. The access token
//! it receives is held in memory only and is used solely to revoke the
//! session on sign-out.

pub mod client;
pub mod error;

pub use client::GoTrueClient;
pub use error::AuthError;
