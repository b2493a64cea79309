//! Admin authentication.
//!
//! [`IdentityClient`] talks to the identity provider's REST API: password
//! sign-in, token lookup (the verification path) and refresh-token exchange.
//! [`AuthGate`] holds the resulting session for the admin panel.

mod error;

pub use error::AuthError;

use chrono::prelude::*;
use chrono::Duration;
use log::*;
use serde::Deserialize;
use serde_json::{json, Value};

/// The signed-in administrator.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub uid: String,
    pub email: String,
}

/// Tokens for a signed-in user.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user: CurrentUser,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    id_token: String,
    refresh_token: String,
    email: String,
    local_id: String,
    expires_in: String,
}

#[derive(Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    user_id: String,
    expires_in: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: String,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

fn expires_at(expires_in: &str) -> DateTime<Utc> {
    let seconds = expires_in.parse::<i64>().unwrap_or(3600);
    Utc::now() + Duration::seconds(seconds)
}

/// Makes requests to the identity provider.
///
pub struct IdentityClient {
    identity_url: String,
    token_url: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl IdentityClient {
    /// Returns a new instance for the given endpoints and API key.
    ///
    pub fn new(identity_url: &str, token_url: &str, api_key: &str) -> Self {
        IdentityClient {
            identity_url: identity_url.trim_end_matches('/').to_owned(),
            token_url: token_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            http_client: reqwest::Client::new(),
        }
    }

    async fn post(&self, request: reqwest::RequestBuilder) -> Result<Value, AuthError> {
        let response = request.query(&[("key", self.api_key.as_str())]).send().await?;
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        if status.is_success() {
            return Ok(body);
        }
        let code = body
            .pointer("/error/message")
            .and_then(Value::as_str)
            .unwrap_or("UNKNOWN");
        warn!("Identity request failed with status {}: {}", status, code);
        Err(AuthError::from_code(status.as_u16(), code))
    }

    /// Sign in with email and password.
    ///
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        debug!("Signing in {}...", email);
        let request = self
            .http_client
            .post(format!("{}/v1/accounts:signInWithPassword", self.identity_url))
            .json(&json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }));
        let data: SignInResponse = serde_json::from_value(self.post(request).await?)?;
        info!("Signed in as {}.", data.email);
        Ok(Session {
            user: CurrentUser {
                uid: data.local_id,
                email: data.email,
            },
            id_token: data.id_token,
            refresh_token: data.refresh_token,
            expires_at: expires_at(&data.expires_in),
        })
    }

    /// Verify an ID token and return the user it belongs to.
    ///
    pub async fn lookup(&self, id_token: &str) -> Result<CurrentUser, AuthError> {
        debug!("Verifying ID token...");
        let request = self
            .http_client
            .post(format!("{}/v1/accounts:lookup", self.identity_url))
            .json(&json!({ "idToken": id_token }));
        let data: LookupResponse = serde_json::from_value(self.post(request).await?)?;
        data.users
            .into_iter()
            .next()
            .map(|u| CurrentUser {
                uid: u.local_id,
                email: u.email,
            })
            .ok_or(AuthError::SessionExpired)
    }

    /// Exchange a refresh token for fresh tokens.
    ///
    pub async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        debug!("Refreshing session...");
        let request = self
            .http_client
            .post(format!("{}/v1/token", self.token_url))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ]);
        let data: RefreshResponse = serde_json::from_value(self.post(request).await?)?;
        Ok(Session {
            user: CurrentUser {
                uid: data.user_id,
                email: String::new(),
            },
            id_token: data.id_token,
            refresh_token: data.refresh_token,
            expires_at: expires_at(&data.expires_in),
        })
    }

    /// Restore a persisted session: refresh, then verify the new token.
    ///
    pub async fn restore(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let mut session = self.refresh(refresh_token).await?;
        session.user = self.lookup(&session.id_token).await?;
        info!("Restored session for {}.", session.user.email);
        Ok(session)
    }
}

/// Authentication state of the admin panel.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthState {
    /// Session restore in progress.
    Checking,
    SignedOut,
    SignedIn(CurrentUser),
}

/// User id of the development stand-in.
///
pub const DEV_USER_ID: &str = "dev-user";

/// Gate in front of the admin screens.
///
#[derive(Debug)]
pub struct AuthGate {
    state: AuthState,
    session: Option<Session>,
    dev_bypass: bool,
}

impl AuthGate {
    /// Returns a gate in the `Checking` state.
    ///
    pub fn new(dev_bypass: bool) -> Self {
        AuthGate {
            state: AuthState::Checking,
            session: None,
            dev_bypass,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_checking(&self) -> bool {
        self.state == AuthState::Checking
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.state, AuthState::SignedIn(_))
    }

    pub fn is_dev_bypass(&self) -> bool {
        self.dev_bypass
    }

    pub fn current_user(&self) -> Option<&CurrentUser> {
        match &self.state {
            AuthState::SignedIn(user) => Some(user),
            _ => None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn id_token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.id_token.as_str())
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.refresh_token.as_str())
    }

    /// Finish the startup check with whatever session could be restored.
    ///
    pub fn resolve(&mut self, session: Option<Session>) -> &mut Self {
        if self.dev_bypass {
            warn!("AUTH BYPASS ENABLED: admin panel is open without sign-in. Never use this outside development.");
            self.session = session;
            self.state = AuthState::SignedIn(CurrentUser {
                uid: DEV_USER_ID.to_string(),
                email: "admin@test.com".to_string(),
            });
            return self;
        }
        match session {
            Some(session) => self.signed_in(session),
            None => self.signed_out(),
        }
    }

    pub fn signed_in(&mut self, session: Session) -> &mut Self {
        self.state = AuthState::SignedIn(session.user.clone());
        self.session = Some(session);
        self
    }

    /// Clear the session.
    ///
    pub fn signed_out(&mut self) -> &mut Self {
        if self.session.is_some() {
            info!("Signed out.");
        }
        self.session = None;
        self.state = AuthState::SignedOut;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::uuid::UUIDv4;
    use fake::Fake;
    use httpmock::MockServer;
    use uuid::Uuid;

    fn client(server: &MockServer) -> IdentityClient {
        IdentityClient::new(&server.base_url(), &server.base_url(), "key")
    }

    #[tokio::test]
    async fn sign_in_success() -> Result<(), AuthError> {
        let email: String = SafeEmail().fake();
        let token: Uuid = UUIDv4.fake();
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/v1/accounts:signInWithPassword")
                    .query_param("key", "key")
                    .json_body(json!({
                        "email": email,
                        "password": "secret",
                        "returnSecureToken": true,
                    }));
                then.status(200).json_body(json!({
                    "idToken": token.to_string(),
                    "email": email,
                    "refreshToken": "refresh",
                    "expiresIn": "3600",
                    "localId": "uid-1",
                }));
            })
            .await;

        let session = client(&server).sign_in(&email, "secret").await?;
        mock.assert_async().await;
        assert_eq!(session.user.email, email);
        assert_eq!(session.user.uid, "uid-1");
        assert_eq!(session.id_token, token.to_string());
        assert!(!session.is_expired(Utc::now()));
        Ok(())
    }

    #[tokio::test]
    async fn sign_in_invalid_credentials() {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("POST").path("/v1/accounts:signInWithPassword");
                then.status(400).json_body(json!({
                    "error": { "code": 400, "message": "INVALID_LOGIN_CREDENTIALS" }
                }));
            })
            .await;

        let error = client(&server)
            .sign_in("me@example.com", "wrong")
            .await
            .unwrap_err();
        assert!(matches!(error, AuthError::InvalidCredentials));
        assert_eq!(error.user_message(), "Invalid email or password");
    }

    #[tokio::test]
    async fn restore_refreshes_then_verifies() -> Result<(), AuthError> {
        let server = MockServer::start();
        let refresh = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/v1/token")
                    .body_contains("grant_type=refresh_token")
                    .body_contains("refresh_token=stored");
                then.status(200).json_body(json!({
                    "id_token": "fresh",
                    "refresh_token": "rotated",
                    "user_id": "uid-1",
                    "expires_in": "3600",
                }));
            })
            .await;
        let lookup = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/v1/accounts:lookup")
                    .json_body(json!({ "idToken": "fresh" }));
                then.status(200).json_body(json!({
                    "users": [ { "localId": "uid-1", "email": "me@example.com" } ]
                }));
            })
            .await;

        let session = client(&server).restore("stored").await?;
        refresh.assert_async().await;
        lookup.assert_async().await;
        assert_eq!(session.refresh_token, "rotated");
        assert_eq!(session.user.email, "me@example.com");
        Ok(())
    }

    #[tokio::test]
    async fn lookup_without_users_is_expired() {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("POST").path("/v1/accounts:lookup");
                then.status(200).json_body(json!({}));
            })
            .await;

        assert!(matches!(
            client(&server).lookup("stale").await,
            Err(AuthError::SessionExpired)
        ));
    }

    fn session() -> Session {
        Session {
            user: CurrentUser {
                uid: "uid-1".to_string(),
                email: "me@example.com".to_string(),
            },
            id_token: "id".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    #[test]
    fn test_gate_starts_checking() {
        let gate = AuthGate::new(false);
        assert!(gate.is_checking());
        assert!(!gate.is_signed_in());
        assert!(gate.current_user().is_none());
    }

    #[test]
    fn test_gate_resolves_and_signs_out() {
        let mut gate = AuthGate::new(false);
        gate.resolve(Some(session()));
        assert!(gate.is_signed_in());
        assert_eq!(gate.id_token(), Some("id"));
        gate.signed_out();
        assert_eq!(gate.state(), &AuthState::SignedOut);
        assert_eq!(gate.refresh_token(), None);

        let mut gate = AuthGate::new(false);
        gate.resolve(None);
        assert_eq!(gate.state(), &AuthState::SignedOut);
    }

    #[test]
    fn test_gate_dev_bypass_signs_in_stub() {
        let mut gate = AuthGate::new(true);
        gate.resolve(None);
        assert!(gate.is_signed_in());
        assert_eq!(gate.current_user().map(|u| u.uid.as_str()), Some(DEV_USER_ID));
        assert!(gate.id_token().is_none());
    }
}
