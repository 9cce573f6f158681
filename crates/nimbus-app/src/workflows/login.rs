//! Login resolution.
//!
//! One round trip against the authority decides where a login attempt
//! goes next. [`classify_login`] turns the multi-branch response into
//! exactly one [`LoginOutcome`]; [`LoginFlow`] owns the login screen's
//! state, enforces the single-flight rule, and funnels the guest path
//! through the same creation classifier the setup flow uses.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

use nimbus_api::{AuthLoginResult, NetworkCreateArgs, SharedApi, AUTH_METHOD_PASSWORD};

use crate::credential::LoginCredential;
use crate::errors::AuthError;
use crate::views::LoginState;
use crate::workflows::network::{classify_creation, NetworkOutcome};
use crate::workflows::validation;

/// Session token issued by the authority on successful authentication.
///
/// Opaque to this core; it is handed to the external session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Borrow the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap the raw token.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// A login request the authority answered with "password required".
///
/// Holds the original request so the password screen can attach the
/// password and resolve again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLogin {
    credential: LoginCredential,
}

impl PendingLogin {
    fn new(credential: LoginCredential) -> Self {
        Self { credential }
    }

    /// The request as originally submitted.
    #[must_use]
    pub fn credential(&self) -> &LoginCredential {
        &self.credential
    }

    /// Attach the password for the retry.
    ///
    /// Only meaningful for password credentials; any other variant is
    /// returned unchanged.
    #[must_use]
    pub fn with_password(self, password: impl Into<String>) -> LoginCredential {
        match self.credential {
            LoginCredential::Password { user_auth, .. } => LoginCredential::Password {
                user_auth,
                password: Some(password.into()),
            },
            other => other,
        }
    }
}

/// Where a resolved login attempt goes next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The attempt authenticated outright.
    Authenticated {
        /// Token for the authenticated session
        session: SessionToken,
    },
    /// The identifier exists and wants a password on the retry.
    PasswordRequired(PendingLogin),
    /// The identifier is bound to other sign-in methods.
    AccountMismatch {
        /// The methods the account accepts
        auth_allowed: Vec<String>,
    },
    /// Nobody owns this identifier yet; proceed to account creation.
    NoAccount {
        /// The request to carry into creation
        original: LoginCredential,
    },
}

/// Classify a login response into exactly one outcome.
///
/// Every response shape lands in one `Ok` variant or one error; nothing
/// is silently dropped. An allowed-provider list that is present but
/// empty matches no branch and is reported as
/// [`AuthError::Unclassified`] rather than left unresolved.
pub fn classify_login(
    result: AuthLoginResult,
    original: LoginCredential,
) -> Result<LoginOutcome, AuthError> {
    if let Some(error) = result.error {
        return Err(nimbus_api::ApiError::rejected(error.message).into());
    }

    if let Some(network) = result.network {
        debug!("login resolved: authenticated");
        return Ok(LoginOutcome::Authenticated {
            session: SessionToken::new(network.by_jwt),
        });
    }

    if let Some(auth_allowed) = result.auth_allowed {
        if auth_allowed.iter().any(|method| method == AUTH_METHOD_PASSWORD) {
            debug!("login resolved: password required");
            return Ok(LoginOutcome::PasswordRequired(PendingLogin::new(original)));
        }
        if !auth_allowed.is_empty() {
            debug!(methods = ?auth_allowed, "login resolved: account mismatch");
            return Ok(LoginOutcome::AccountMismatch { auth_allowed });
        }
        return Err(AuthError::unclassified(
            "allowed-provider list present but empty",
        ));
    }

    debug!("login resolved: no account, proceed to creation");
    Ok(LoginOutcome::NoAccount { original })
}

struct LoginFlowInner {
    api: SharedApi,
    state: watch::Sender<LoginState>,
}

/// Orchestrates the login screen.
///
/// Owns a [`LoginState`] record exclusively; frontends read
/// [`snapshot`](Self::snapshot) or subscribe via [`watch`](Self::watch)
/// and drive the flow through its methods. Clones share the same state.
#[derive(Clone)]
pub struct LoginFlow {
    inner: Arc<LoginFlowInner>,
}

impl LoginFlow {
    /// Create a flow against an authority.
    #[must_use]
    pub fn new(api: SharedApi) -> Self {
        let (state, _) = watch::channel(LoginState::default());
        Self {
            inner: Arc::new(LoginFlowInner { api, state }),
        }
    }

    /// Current state of the login screen.
    #[must_use]
    pub fn snapshot(&self) -> LoginState {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<LoginState> {
        self.inner.state.subscribe()
    }

    /// Record the identifier input and its derived validity.
    pub fn set_user_auth(&self, value: impl Into<String>) {
        let value = value.into();
        self.inner.state.send_if_modified(|state| {
            if state.user_auth == value {
                return false;
            }
            state.user_auth = value;
            state.user_auth_valid = validation::is_valid_user_auth(&state.user_auth);
            true
        });
    }

    /// Record the terms checkbox on the guest sheet.
    pub fn set_terms_agreed(&self, agreed: bool) {
        self.inner.state.send_if_modified(|state| {
            if state.terms_agreed == agreed {
                return false;
            }
            state.terms_agreed = agreed;
            true
        });
    }

    /// Resolve the identifier currently in the form.
    ///
    /// Fails fast with [`AuthError::Invalid`] when the identifier is not
    /// a plausible email or phone number; otherwise normalizes it and
    /// resolves like any other credential.
    pub async fn get_started(&self) -> Result<LoginOutcome, AuthError> {
        let snapshot = self.snapshot();
        if !snapshot.user_auth_valid {
            return Err(AuthError::invalid(
                "identifier is not a valid email address or phone number",
            ));
        }
        self.resolve(LoginCredential::password(snapshot.user_auth.trim()))
            .await
    }

    /// Submit a credential and classify the authority's answer.
    ///
    /// Single-flight per flow instance: a second call while one is
    /// pending fails immediately with [`AuthError::Busy`] and leaves the
    /// first untouched. The checking flag clears on every exit path.
    pub async fn resolve(&self, credential: LoginCredential) -> Result<LoginOutcome, AuthError> {
        let engaged = self.inner.state.send_if_modified(|state| {
            if state.checking {
                return false;
            }
            state.checking = true;
            true
        });
        if !engaged {
            return Err(AuthError::busy("login resolution"));
        }

        let result = self.inner.api.auth_login(credential.to_login_args()).await;
        self.inner.state.send_modify(|state| state.checking = false);

        classify_login(result?, credential)
    }

    /// Create an anonymous guest network.
    ///
    /// No name, no credential, terms only. Single-flight with its own
    /// busy flag, classified like any other creation.
    pub async fn create_guest_network(&self) -> Result<NetworkOutcome, AuthError> {
        let engaged = self.inner.state.send_if_modified(|state| {
            if state.creating_guest {
                return false;
            }
            state.creating_guest = true;
            true
        });
        if !engaged {
            return Err(AuthError::busy("guest network creation"));
        }

        let args = NetworkCreateArgs {
            terms: true,
            guest_mode: true,
            ..Default::default()
        };
        let result = self.inner.api.network_create(args).await;
        self.inner.state.send_modify(|state| state.creating_guest = false);

        classify_creation(result?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_api::{ApiError, AuthNetwork, ResultError};

    fn result_with_jwt(jwt: &str) -> AuthLoginResult {
        AuthLoginResult {
            network: Some(AuthNetwork {
                by_jwt: jwt.to_string(),
            }),
            ..Default::default()
        }
    }

    fn result_with_methods(methods: &[&str]) -> AuthLoginResult {
        AuthLoginResult {
            auth_allowed: Some(methods.iter().map(ToString::to_string).collect()),
            ..Default::default()
        }
    }

    #[test]
    fn token_wins_over_everything_else() {
        let outcome = classify_login(
            result_with_jwt("jwt-1"),
            LoginCredential::password("user@example.com"),
        )
        .expect("classified");
        assert_eq!(
            outcome,
            LoginOutcome::Authenticated {
                session: SessionToken::new("jwt-1")
            }
        );
    }

    #[test]
    fn password_method_prompts_for_password() {
        let original = LoginCredential::password("user@example.com");
        let outcome =
            classify_login(result_with_methods(&["password"]), original.clone()).expect("classified");
        let LoginOutcome::PasswordRequired(pending) = outcome else {
            panic!("expected PasswordRequired, got {outcome:?}");
        };
        assert_eq!(pending.credential(), &original);
    }

    #[test]
    fn foreign_methods_surface_as_mismatch() {
        let outcome = classify_login(
            result_with_methods(&["google", "apple"]),
            LoginCredential::password("user@example.com"),
        )
        .expect("classified");
        assert_eq!(
            outcome,
            LoginOutcome::AccountMismatch {
                auth_allowed: vec!["google".into(), "apple".into()]
            }
        );
    }

    #[test]
    fn empty_method_list_is_a_terminal_failure() {
        let err = classify_login(
            result_with_methods(&[]),
            LoginCredential::password("user@example.com"),
        )
        .expect_err("must not resolve silently");
        assert!(matches!(err, AuthError::Unclassified { .. }));
    }

    #[test]
    fn bare_response_means_no_account() {
        let original = LoginCredential::google("id-token");
        let outcome =
            classify_login(AuthLoginResult::default(), original.clone()).expect("classified");
        assert_eq!(outcome, LoginOutcome::NoAccount { original });
    }

    #[test]
    fn remote_rejection_beats_classification() {
        let result = AuthLoginResult {
            network: Some(AuthNetwork {
                by_jwt: "jwt".into(),
            }),
            error: Some(ResultError {
                message: "account disabled".into(),
            }),
            ..Default::default()
        };
        let err = classify_login(result, LoginCredential::password("user@example.com"))
            .expect_err("rejected");
        assert_eq!(
            err,
            AuthError::Api(ApiError::rejected("account disabled"))
        );
    }

    #[test]
    fn pending_login_attaches_the_password() {
        let pending = PendingLogin::new(LoginCredential::password("user@example.com"));
        let retry = pending.with_password("correct horse battery");
        assert_eq!(
            retry,
            LoginCredential::Password {
                user_auth: "user@example.com".into(),
                password: Some("correct horse battery".into()),
            }
        );
    }
}
