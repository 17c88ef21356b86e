use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::AuthError;

/// A user record issued by the identity provider.
///
/// Field names follow GoTrue's JSON so the record can be deserialized
/// straight from a provider response and then checked with [`Identity::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    #[serde(default)]
    pub aud: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email_confirmed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_sign_in_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_metadata: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub app_metadata: serde_json::Map<String, serde_json::Value>,
}

impl Identity {
    /// Minimal identity with only an id and email set
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            aud: None,
            role: None,
            email: Some(email.into()),
            phone: None,
            email_confirmed_at: None,
            last_sign_in_at: None,
            created_at: None,
            updated_at: None,
            user_metadata: serde_json::Map::new(),
            app_metadata: serde_json::Map::new(),
        }
    }

    /// Reject records the provider should never have issued.
    pub fn validate(self) -> Result<Self, AuthError> {
        if !is_valid_uuid(&self.id) {
            return Err(AuthError::InvalidIdentity(format!(
                "user id is not a UUID: {:?}",
                self.id
            )));
        }
        if let Some(ref email) = self.email {
            // GoTrue sends "" for phone-only accounts
            if !email.is_empty() && !email.contains('@') {
                return Err(AuthError::InvalidIdentity(format!(
                    "malformed email address: {:?}",
                    email
                )));
            }
        }
        Ok(self)
    }

    pub fn is_confirmed(&self) -> bool {
        self.email_confirmed_at.is_some()
    }

    /// Name to greet the user by
    pub fn display_name(&self) -> String {
        self.user_metadata
            .get("full_name")
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .or_else(|| self.email.clone().filter(|e| !e.is_empty()))
            .unwrap_or_else(|| self.id.clone())
    }
}

/// Validate that a string looks like a UUID.
/// UUIDs should be 36 characters with dashes: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
pub fn is_valid_uuid(s: &str) -> bool {
    if s.len() != 36 {
        return false;
    }
    s.chars().enumerate().all(|(i, c)| {
        if i == 8 || i == 13 || i == 18 || i == 23 {
            c == '-'
        } else {
            c.is_ascii_hexdigit()
        }
    })
}
