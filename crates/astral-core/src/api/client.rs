//! Identity provider client for Supabase GoTrue.
//!
//! This module provides the `GoTrueClient` struct, which performs password
//! sign-in, sign-up and sign-out against a project's `/auth/v1` endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::auth::IdentityProvider;
use crate::models::Identity;

use super::AuthError;

// ============================================================================
// Constants
// ============================================================================

/// Path prefix of the GoTrue API within a Supabase project
const AUTH_PATH: &str = "/auth/v1";

/// HTTP request timeout in seconds.
/// Long enough for a cold project to wake up; the store itself never times out.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Header carrying the project's public (anon) key
const API_KEY_HEADER: &str = "apikey";

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Token grant returned by sign-in, and by sign-up on auto-confirm projects
#[derive(Debug, Deserialize)]
struct TokenSession {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    user: Identity,
}

/// Sign-up answers with a session when the project auto-confirms
/// and with the bare user when it waits for email confirmation.
#[derive(Debug)]
enum SignUpResponse {
    Session(TokenSession),
    User(Identity),
}

/// GoTrue client. The access token from the last successful grant is kept
/// in memory so sign-out can revoke it.
pub struct GoTrueClient {
    client: Client,
    base_url: String,
    anon_key: String,
    access_token: Mutex<Option<String>>,
}

impl GoTrueClient {
    /// Create a client for the project at `project_url` (e.g. `https://xyz.supabase.co`)
    pub fn new(project_url: &str, anon_key: &str) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self::with_client(client, project_url, anon_key))
    }

    fn with_client(client: Client, project_url: &str, anon_key: &str) -> Self {
        Self {
            client,
            base_url: format!("{}{}", project_url.trim_end_matches('/'), AUTH_PATH),
            anon_key: anon_key.to_string(),
            access_token: Mutex::new(None),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[cfg(test)]
    async fn has_session(&self) -> bool {
        self.access_token.lock().await.is_some()
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, AuthError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(AuthError::from_status(status, &body))
        }
    }

    fn parse<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, AuthError> {
        serde_json::from_str(body)
            .map_err(|e| AuthError::InvalidResponse(format!("Failed to parse {}: {}", what, e)))
    }

    /// The shape is decided by `access_token` so a malformed session
    /// reports its own field error instead of a generic mismatch.
    fn parse_sign_up(body: &str) -> Result<SignUpResponse, AuthError> {
        let value: serde_json::Value = Self::parse(body, "sign-up response")?;
        let parsed = if value.get("access_token").is_some() {
            serde_json::from_value(value).map(SignUpResponse::Session)
        } else {
            serde_json::from_value(value).map(SignUpResponse::User)
        };
        parsed.map_err(|e| {
            AuthError::InvalidResponse(format!("Failed to parse sign-up response: {}", e))
        })
    }

    async fn post<B: Serialize>(
        &self,
        url: &str,
        bearer: &str,
        body: &B,
    ) -> Result<String, AuthError> {
        debug!(url, "POST");
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.anon_key)
            .header(header::ACCEPT, "application/json")
            .bearer_auth(bearer)
            .json(body)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Ok(response.text().await?)
    }

    async fn retain(&self, session: &TokenSession) {
        debug!(
            token_type = session.token_type.as_deref().unwrap_or("bearer"),
            expires_in = session.expires_in,
            has_refresh_token = session.refresh_token.is_some(),
            "Provider session established"
        );
        *self.access_token.lock().await = Some(session.access_token.clone());
    }
}

#[async_trait]
impl IdentityProvider for GoTrueClient {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let url = self.endpoint("/token?grant_type=password");
        let body = self
            .post(&url, &self.anon_key, &Credentials { email, password })
            .await?;

        let session: TokenSession = Self::parse(&body, "token response")?;
        let identity = session.user.clone().validate()?;
        self.retain(&session).await;
        Ok(identity)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let url = self.endpoint("/signup");
        let body = self
            .post(&url, &self.anon_key, &Credentials { email, password })
            .await?;

        match Self::parse_sign_up(&body)? {
            SignUpResponse::Session(session) => {
                let identity = session.user.clone().validate()?;
                self.retain(&session).await;
                Ok(identity)
            }
            SignUpResponse::User(user) => {
                debug!("Sign-up awaiting email confirmation");
                user.validate()
            }
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        // Dropped up front so a failed revoke doesn't leave a stale token behind
        let token = self.access_token.lock().await.take();
        let Some(token) = token else {
            debug!("No provider session to revoke");
            return Ok(());
        };

        let url = self.endpoint("/logout");
        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.anon_key)
            .bearer_auth(&token)
            .send()
            .await?;

        Self::check_response(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    const USER_JSON: &str = r#"{
        "id": "8d2f1c9e-4b7a-4e51-9f0a-2c6b3d8e1a47",
        "aud": "authenticated",
        "role": "authenticated",
        "email": "trader@astralpips.com",
        "email_confirmed_at": null,
        "app_metadata": {"provider": "email"},
        "user_metadata": {},
        "created_at": "2024-03-02T10:14:00Z"
    }"#;

    fn session_json() -> String {
        format!(
            r#"{{"access_token":"eyJhbGciOi.token","token_type":"bearer","expires_in":3600,"expires_at":1709374440,"refresh_token":"r3fr3sh","user":{}}}"#,
            USER_JSON
        )
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = GoTrueClient::new("https://xyz.supabase.co/", "anon").expect("client");
        assert_eq!(client.endpoint("/signup"), "https://xyz.supabase.co/auth/v1/signup");
    }

    #[test]
    fn test_parse_token_session() {
        let session: TokenSession =
            GoTrueClient::parse(&session_json(), "token response").expect("parse session");
        assert_eq!(session.access_token, "eyJhbGciOi.token");
        assert_eq!(session.expires_in, Some(3600));
        assert_eq!(session.user.email.as_deref(), Some("trader@astralpips.com"));
    }

    #[test]
    fn test_parse_sign_up_with_session() {
        let response = GoTrueClient::parse_sign_up(&session_json()).expect("parse");
        assert!(matches!(response, SignUpResponse::Session(_)));
    }

    #[test]
    fn test_parse_sign_up_awaiting_confirmation() {
        let response = GoTrueClient::parse_sign_up(USER_JSON).expect("parse");
        match response {
            SignUpResponse::User(user) => {
                assert!(!user.is_confirmed());
                assert!(user.validate().is_ok());
            }
            SignUpResponse::Session(_) => panic!("expected a bare user"),
        }
    }

    #[test]
    fn test_parse_sign_up_session_without_user_names_the_field() {
        let body = r#"{"access_token":"eyJhbGciOi.token","token_type":"bearer","expires_in":3600}"#;
        match GoTrueClient::parse_sign_up(body) {
            Err(AuthError::InvalidResponse(msg)) => {
                assert!(msg.starts_with("Failed to parse sign-up response"));
                assert!(msg.contains("missing field `user`"), "got: {}", msg);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_garbage_is_invalid_response() {
        let result: Result<TokenSession, AuthError> = GoTrueClient::parse("<html>", "token response");
        match result {
            Err(AuthError::InvalidResponse(msg)) => assert!(msg.starts_with("Failed to parse token response")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_sign_out_without_session_skips_request() {
        // Unroutable URL: any request would fail, so Ok proves none was sent
        let client = GoTrueClient::new("http://127.0.0.1:9", "anon").expect("client");
        assert!(!client.has_session().await);
        assert!(client.sign_out().await.is_ok());
    }

    #[tokio::test]
    async fn test_retain_then_sign_out_drops_token_even_on_failure() {
        let client = GoTrueClient::new("http://127.0.0.1:9", "anon").expect("client");
        let session: TokenSession =
            GoTrueClient::parse(&session_json(), "token response").expect("parse session");
        client.retain(&session).await;
        assert!(client.has_session().await);

        assert!(client.sign_out().await.is_err());
        assert!(!client.has_session().await);
    }

    // -------------------------------------------------------------------------
    // Against a local server
    // -------------------------------------------------------------------------

    /// Read one request, headers and body, so the reply isn't cut off by a reset
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.expect("read request");
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
                let length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Answer a single request with `status` and a JSON `body`. Returns the
    /// project URL and a handle yielding the request as received.
    async fn serve_once(
        status: &'static str,
        body: String,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.expect("write response");
            let _ = socket.shutdown().await;
            request
        });
        (format!("http://{}", addr), handle)
    }

    fn local_client(project_url: &str) -> GoTrueClient {
        let client = Client::builder().no_proxy().build().expect("http client");
        GoTrueClient::with_client(client, project_url, "anon")
    }

    #[tokio::test]
    async fn test_sign_in_keeps_token_and_returns_identity() {
        let (url, server) = serve_once("200 OK", session_json()).await;
        let client = local_client(&url);

        let identity = client
            .sign_in_with_password("trader@astralpips.com", "hunter22")
            .await
            .expect("sign in");
        assert_eq!(identity.id, "8d2f1c9e-4b7a-4e51-9f0a-2c6b3d8e1a47");
        assert!(client.has_session().await);

        let request = server.await.expect("server");
        assert!(request.starts_with("POST /auth/v1/token?grant_type=password"));
        assert!(request.to_ascii_lowercase().contains("apikey: anon"));
    }

    #[tokio::test]
    async fn test_sign_in_with_malformed_user_id_keeps_no_token() {
        let body = session_json().replace("8d2f1c9e-4b7a-4e51-9f0a-2c6b3d8e1a47", "not-a-uuid");
        let (url, _server) = serve_once("200 OK", body).await;
        let client = local_client(&url);

        match client.sign_in_with_password("trader@astralpips.com", "hunter22").await {
            Err(AuthError::InvalidIdentity(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!client.has_session().await);
    }

    #[tokio::test]
    async fn test_sign_in_rejected_passes_provider_message_through() {
        let body = r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#;
        let (url, _server) = serve_once("400 Bad Request", body.to_string()).await;
        let client = local_client(&url);

        let err = client
            .sign_in_with_password("trader@astralpips.com", "wrong")
            .await
            .expect_err("rejected");
        assert_eq!(err.to_string(), "Invalid login credentials");
        assert_eq!(err.status(), Some(400));
        assert!(!client.has_session().await);
    }

    #[tokio::test]
    async fn test_sign_up_awaiting_confirmation_keeps_no_token() {
        let (url, server) = serve_once("200 OK", USER_JSON.to_string()).await;
        let client = local_client(&url);

        let identity = client
            .sign_up("trader@astralpips.com", "hunter22")
            .await
            .expect("sign up");
        assert_eq!(identity.email.as_deref(), Some("trader@astralpips.com"));
        assert!(!identity.is_confirmed());
        assert!(!client.has_session().await);

        let request = server.await.expect("server");
        assert!(request.starts_with("POST /auth/v1/signup"));
    }

    #[tokio::test]
    async fn test_sign_up_with_session_keeps_token() {
        let (url, _server) = serve_once("200 OK", session_json()).await;
        let client = local_client(&url);

        let identity = client
            .sign_up("trader@astralpips.com", "hunter22")
            .await
            .expect("sign up");
        assert_eq!(identity.id, "8d2f1c9e-4b7a-4e51-9f0a-2c6b3d8e1a47");
        assert!(client.has_session().await);
    }
}
