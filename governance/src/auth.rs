//! Mock login.
//!
//! Every demo account shares one password and one one-time code. Tokens are
//! fixed strings per role and are never checked by the rest of the service.

use access_gov_core::GovernanceError;
use access_gov_core::model::RoleCategory;
use serde::{Deserialize, Serialize};

/// Shared credentials of the demo accounts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthConfig {
    /// Password accepted for every account
    pub shared_password: String,
    /// One-time code accepted for every account
    pub otp_code: String,
    /// Whether login stops at an OTP challenge
    pub require_otp: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            shared_password: "password123".to_string(),
            otp_code: "123456".to_string(),
            require_otp: true,
        }
    }
}

/// `POST /api/login` body.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Credentials {
    /// Account name
    pub username: Option<String>,
    /// Password
    pub password: Option<String>,
}

/// `POST /api/verify-otp` body.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct OtpSubmission {
    /// Account name
    pub username: Option<String>,
    /// One-time code
    pub otp: Option<String>,
}

/// A signed-in demo account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Dashboard role
    pub role: RoleCategory,
    /// Client route of the role's dashboard
    pub redirect: &'static str,
    /// Mock bearer token
    pub token: &'static str,
}

/// Result of a successful login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Password accepted; an OTP must follow
    OtpRequired,
    /// Signed in
    SignedIn(Session),
}

fn session_for(username: &str) -> Result<Session, GovernanceError> {
    let (role, redirect, token) = match username {
        "manager" => (RoleCategory::Manager, "/dashboard", "mock-jwt-manager"),
        "app_owner" => (RoleCategory::AppOwner, "/app-owner", "mock-jwt-app-owner"),
        "business" => (RoleCategory::BusinessOwner, "/business-owner", "mock-jwt-business"),
        "admin" => (RoleCategory::Admin, "/admin", "mock-jwt-admin"),
        _ => return Err(GovernanceError::UnknownUser),
    };
    Ok(Session {
        role,
        redirect,
        token,
    })
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Check a username/password pair.
///
/// # Errors
///
/// - [`GovernanceError::MissingField`] when either field is absent or empty
/// - [`GovernanceError::InvalidCredentials`] on a wrong password
/// - [`GovernanceError::UnknownUser`] when the username is no demo account
pub fn login(config: &AuthConfig, credentials: Credentials) -> Result<LoginOutcome, GovernanceError> {
    let (Some(username), Some(password)) =
        (present(credentials.username), present(credentials.password))
    else {
        return Err(GovernanceError::missing("Username and password required"));
    };

    if password != config.shared_password {
        tracing::debug!(%username, "Login refused: wrong password");
        return Err(GovernanceError::InvalidCredentials);
    }

    let session = session_for(&username)?;
    tracing::info!(%username, role = %session.role, "Login accepted");

    Ok(if config.require_otp {
        LoginOutcome::OtpRequired
    } else {
        LoginOutcome::SignedIn(session)
    })
}

/// Check the one-time code that follows a login.
///
/// # Errors
///
/// - [`GovernanceError::MissingField`] when either field is absent or empty
/// - [`GovernanceError::InvalidOtp`] on a wrong code
/// - [`GovernanceError::UnknownUser`] when the username is no demo account
pub fn verify_otp(config: &AuthConfig, submission: OtpSubmission) -> Result<Session, GovernanceError> {
    let (Some(username), Some(otp)) = (present(submission.username), present(submission.otp)) else {
        return Err(GovernanceError::missing("Username and OTP required"));
    };

    if otp != config.otp_code {
        return Err(GovernanceError::InvalidOtp);
    }

    session_for(&username)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        }
    }

    fn otp(username: &str, code: &str) -> OtpSubmission {
        OtpSubmission {
            username: Some(username.to_string()),
            otp: Some(code.to_string()),
        }
    }

    #[test]
    fn login_asks_for_otp_by_default() {
        let outcome = login(&AuthConfig::default(), credentials("manager", "password123")).unwrap();
        assert_eq!(outcome, LoginOutcome::OtpRequired);
    }

    #[test]
    fn login_signs_in_directly_without_otp() {
        let config = AuthConfig {
            require_otp: false,
            ..AuthConfig::default()
        };
        let outcome = login(&config, credentials("business", "password123")).unwrap();
        assert_eq!(
            outcome,
            LoginOutcome::SignedIn(Session {
                role: RoleCategory::BusinessOwner,
                redirect: "/business-owner",
                token: "mock-jwt-business",
            })
        );
    }

    #[test]
    fn login_failures() {
        let config = AuthConfig::default();

        let missing = login(&config, Credentials::default()).unwrap_err();
        assert_eq!(missing.to_string(), "Username and password required");

        let blank = login(&config, credentials("manager", "")).unwrap_err();
        assert!(blank.is_client_error());

        assert_eq!(
            login(&config, credentials("manager", "hunter2")).unwrap_err(),
            GovernanceError::InvalidCredentials
        );
        assert_eq!(
            login(&config, credentials("intruder", "password123")).unwrap_err(),
            GovernanceError::UnknownUser
        );
    }

    #[test]
    fn otp_maps_every_account() {
        let config = AuthConfig::default();
        for (username, role, redirect) in [
            ("manager", RoleCategory::Manager, "/dashboard"),
            ("app_owner", RoleCategory::AppOwner, "/app-owner"),
            ("business", RoleCategory::BusinessOwner, "/business-owner"),
            ("admin", RoleCategory::Admin, "/admin"),
        ] {
            let session = verify_otp(&config, otp(username, "123456")).unwrap();
            assert_eq!(session.role, role);
            assert_eq!(session.redirect, redirect);
            assert!(session.token.starts_with("mock-jwt-"));
        }
    }

    #[test]
    fn otp_failures() {
        let config = AuthConfig::default();
        assert!(verify_otp(&config, OtpSubmission::default()).unwrap_err().is_client_error());
        assert_eq!(
            verify_otp(&config, otp("admin", "000000")).unwrap_err(),
            GovernanceError::InvalidOtp
        );
        assert_eq!(
            verify_otp(&config, otp("nobody", "123456")).unwrap_err(),
            GovernanceError::UnknownUser
        );
    }
}
