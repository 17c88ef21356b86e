//! Core library for Astral Pips.
//!
//! - `auth`: the session store and the identity-provider capability it wraps
//! - `api`: a Supabase GoTrue implementation of that capability
//! - `models`: identity and profile records plus the landing page content
//! - `config`: where the identity provider lives

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod utils;

pub use api::{AuthError, GoTrueClient};
pub use auth::{AuthState, AuthStore, IdentityProvider};
pub use config::Config;
