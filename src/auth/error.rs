//! Identity provider error types.

/// Errors that can occur while signing in or restoring a session.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Unknown email, wrong password, or malformed email
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Stored session is no longer valid
    #[error("Session expired")]
    SessionExpired,

    /// Identity provider returned an error response
    #[error("Identity provider error (status {status}): {code}")]
    ApiError { status: u16, code: String },

    /// Failed to deserialize API response
    #[error("Failed to deserialize API response: {0}")]
    Deserialization(#[from] serde_json::Error),
}

impl AuthError {
    /// Message shown on the login form.
    ///
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials => "Invalid email or password".to_string(),
            AuthError::HttpRequest(_) => "Could not reach the sign-in service".to_string(),
            other => other.to_string(),
        }
    }

    /// Map an identity provider error code to an error.
    ///
    pub(crate) fn from_code(status: u16, code: &str) -> Self {
        // Codes may carry a detail suffix, e.g. "TOO_MANY_ATTEMPTS_TRY_LATER : ...".
        let code = code.split_whitespace().next().unwrap_or_default();
        match code {
            "INVALID_LOGIN_CREDENTIALS" | "INVALID_PASSWORD" | "EMAIL_NOT_FOUND"
            | "INVALID_EMAIL" => AuthError::InvalidCredentials,
            "TOKEN_EXPIRED" | "INVALID_ID_TOKEN" | "INVALID_REFRESH_TOKEN" | "USER_NOT_FOUND" => {
                AuthError::SessionExpired
            }
            other => AuthError::ApiError {
                status,
                code: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credential_codes() {
        for code in ["INVALID_LOGIN_CREDENTIALS", "INVALID_PASSWORD", "EMAIL_NOT_FOUND"] {
            assert!(matches!(
                AuthError::from_code(400, code),
                AuthError::InvalidCredentials
            ));
        }
        assert_eq!(
            AuthError::InvalidCredentials.user_message(),
            "Invalid email or password"
        );
    }

    #[test]
    fn test_code_with_detail_suffix() {
        let error = AuthError::from_code(400, "TOO_MANY_ATTEMPTS_TRY_LATER : Access disabled");
        assert!(error.to_string().contains("TOO_MANY_ATTEMPTS_TRY_LATER"));
        assert!(!error.to_string().contains("Access disabled"));
    }

    #[test]
    fn test_disabled_account_is_not_bad_credentials() {
        let error = AuthError::from_code(400, "USER_DISABLED");
        assert!(matches!(
            &error,
            AuthError::ApiError { status: 400, code } if code == "USER_DISABLED"
        ));
        assert_ne!(error.user_message(), "Invalid email or password");
    }

    #[test]
    fn test_expired_tokens() {
        assert!(matches!(
            AuthError::from_code(400, "TOKEN_EXPIRED"),
            AuthError::SessionExpired
        ));
    }
}
