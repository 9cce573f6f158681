//! Network setup: name validation, referral codes, creation, upgrade.
//!
//! [`NetworkSetup`] owns the setup screen's state for one credential.
//! Name edits schedule a debounced availability check; a generation
//! counter, bumped in the same transition that records the edit,
//! supersedes any scheduled or in-flight check so two checks can never
//! race for the same field and a stale result can never land. Creation
//! and guest upgrade share a single busy flag and funnel their
//! responses through [`classify_creation`].

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};
use uuid::Uuid;

use nimbus_api::{
    AuthProvider, NetworkCreateArgs, NetworkCreateResult, SharedApi, UpgradeGuestArgs,
    ValidateReferralCodeArgs, WalletAuthArgs,
};

use crate::config::AuthConfig;
use crate::credential::LoginCredential;
use crate::errors::AuthError;
use crate::views::{NameCheck, NetworkSetupState, ReferralCheck};
use crate::workflows::login::SessionToken;

/// Result of a network creation or guest upgrade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkOutcome {
    /// The network exists and a session was issued.
    Authenticated {
        /// Token embedded in the created network
        session: SessionToken,
    },
    /// The account exists but the identifier must be verified first.
    VerificationRequired,
}

/// Classify a creation response into exactly one outcome.
pub fn classify_creation(result: NetworkCreateResult) -> Result<NetworkOutcome, AuthError> {
    if let Some(error) = result.error {
        return Err(nimbus_api::ApiError::rejected(error.message).into());
    }

    if result.verification_required.is_some() {
        debug!("creation resolved: verification required");
        return Ok(NetworkOutcome::VerificationRequired);
    }

    match result.network {
        Some(network) => {
            debug!("creation resolved: authenticated");
            Ok(NetworkOutcome::Authenticated {
                session: SessionToken::new(network.by_jwt),
            })
        }
        None => Err(AuthError::unclassified("no network object in result")),
    }
}

/// The credential fields a creation request carries.
struct CredentialArgs {
    user_auth: Option<String>,
    password: Option<String>,
    auth_jwt: Option<String>,
    auth_jwt_type: Option<AuthProvider>,
    wallet_auth: Option<WalletAuthArgs>,
}

fn credential_args(credential: &LoginCredential, form_password: &str) -> CredentialArgs {
    let mut args = CredentialArgs {
        user_auth: None,
        password: None,
        auth_jwt: None,
        auth_jwt_type: None,
        wallet_auth: None,
    };
    match credential {
        LoginCredential::Password { user_auth, .. } => {
            args.user_auth = Some(user_auth.clone());
            args.password = Some(form_password.to_string());
        }
        LoginCredential::ExternalToken { token, provider } => {
            args.auth_jwt = Some(token.clone());
            args.auth_jwt_type = Some(*provider);
        }
        LoginCredential::WalletSignature {
            blockchain,
            message,
            signature,
            public_key,
        } => {
            args.wallet_auth = Some(WalletAuthArgs {
                blockchain: *blockchain,
                message: message.clone(),
                signature: signature.clone(),
                public_key: public_key.clone(),
            });
        }
    }
    args
}

fn recompute_form(state: &mut NetworkSetupState, credential: &LoginCredential, config: &AuthConfig) {
    let password_ok = !credential.requires_password()
        || state.password.chars().count() >= config.min_password_len;
    state.form_valid = state.name_check.is_available() && password_ok && state.terms_agreed;
}

struct SetupInner {
    api: SharedApi,
    config: AuthConfig,
    credential: LoginCredential,
    state: watch::Sender<NetworkSetupState>,
}

/// Orchestrates the network setup screen for one credential.
///
/// Owns a [`NetworkSetupState`] record exclusively; frontends read
/// [`snapshot`](Self::snapshot) or subscribe via [`watch`](Self::watch)
/// and drive the flow through its methods. Clones share the same state.
///
/// Scheduling the debounced name check spawns onto the current Tokio
/// runtime, so the flow must live inside one.
#[derive(Clone)]
pub struct NetworkSetup {
    inner: Arc<SetupInner>,
}

impl NetworkSetup {
    /// Create a setup flow for the credential that arrived at this screen.
    #[must_use]
    pub fn new(api: SharedApi, config: AuthConfig, credential: LoginCredential) -> Self {
        let (state, _) = watch::channel(NetworkSetupState::default());
        Self {
            inner: Arc::new(SetupInner {
                api,
                config,
                credential,
                state,
            }),
        }
    }

    /// The credential this screen will create the account with.
    #[must_use]
    pub fn credential(&self) -> &LoginCredential {
        &self.inner.credential
    }

    /// Current state of the setup screen.
    #[must_use]
    pub fn snapshot(&self) -> NetworkSetupState {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<NetworkSetupState> {
        self.inner.state.subscribe()
    }

    /// Record a name edit and reschedule the availability check.
    ///
    /// Names below the minimum length force [`NameCheck::TooShort`]
    /// without any network traffic. Otherwise the check fires after the
    /// configured quiet period; an edit during the quiet period (or
    /// while a check is in flight) supersedes it.
    pub fn set_network_name(&self, name: impl Into<String>) {
        let name = name.into();
        let mut scheduled = None;
        self.inner.state.send_if_modified(|state| {
            if state.network_name == name {
                return false;
            }
            state.network_name = name.clone();
            state.check_generation = state.check_generation.wrapping_add(1);
            if state.network_name.chars().count() < self.inner.config.min_network_name_len {
                state.name_check = NameCheck::TooShort;
            } else {
                state.name_check = NameCheck::Pending;
                scheduled = Some(state.check_generation);
            }
            recompute_form(state, &self.inner.credential, &self.inner.config);
            true
        });

        if let Some(generation) = scheduled {
            self.schedule_name_check(name, generation);
        }
    }

    fn schedule_name_check(&self, name: String, generation: u64) {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.config.name_check_debounce).await;
            if inner.state.borrow().check_generation != generation {
                // superseded during the quiet period
                return;
            }

            debug!(name = %name, "checking network name availability");
            let result = inner.api.network_check(&name).await;

            inner.state.send_modify(|state| {
                if state.check_generation != generation {
                    // superseded while the call was in flight
                    return;
                }
                state.name_check = match &result {
                    Ok(check) if check.available => NameCheck::Available,
                    Ok(_) => NameCheck::Taken,
                    Err(error) => {
                        warn!(%error, "network name check failed");
                        NameCheck::CheckFailed
                    }
                };
                recompute_form(state, &inner.credential, &inner.config);
            });
        });
    }

    /// Record a password edit.
    pub fn set_password(&self, password: impl Into<String>) {
        let password = password.into();
        self.inner.state.send_if_modified(|state| {
            if state.password == password {
                return false;
            }
            state.password = password;
            recompute_form(state, &self.inner.credential, &self.inner.config);
            true
        });
    }

    /// Record the terms checkbox.
    pub fn set_terms_agreed(&self, agreed: bool) {
        self.inner.state.send_if_modified(|state| {
            if state.terms_agreed == agreed {
                return false;
            }
            state.terms_agreed = agreed;
            recompute_form(state, &self.inner.credential, &self.inner.config);
            true
        });
    }

    /// Record a referral-code edit, resetting its validation.
    ///
    /// A validation still in flight keeps its busy marker; its result
    /// will be discarded on landing because the code no longer matches.
    pub fn set_referral_code(&self, code: impl Into<String>) {
        let code = code.into();
        self.inner.state.send_if_modified(|state| {
            if state.referral_code == code {
                return false;
            }
            state.referral_code = code;
            state.referral_complete = false;
            if state.referral_check != ReferralCheck::Validating {
                state.referral_check = ReferralCheck::Idle;
            }
            true
        });
    }

    /// Validate the referral code currently in the form.
    ///
    /// On-demand and single-flight; any error marks the code invalid
    /// while still recording that an attempt completed.
    pub async fn validate_referral_code(&self) -> Result<bool, AuthError> {
        let mut code = String::new();
        let engaged = self.inner.state.send_if_modified(|state| {
            if state.referral_check == ReferralCheck::Validating {
                return false;
            }
            state.referral_check = ReferralCheck::Validating;
            state.referral_complete = false;
            code = state.referral_code.clone();
            true
        });
        if !engaged {
            return Err(AuthError::busy("referral validation"));
        }

        let result = self
            .inner
            .api
            .validate_referral_code(ValidateReferralCodeArgs {
                referral_code: code.clone(),
            })
            .await;

        self.inner.state.send_modify(|state| {
            if state.referral_code != code {
                // the code changed while the call was in flight; this
                // result no longer describes the current input
                state.referral_check = ReferralCheck::Idle;
                return;
            }
            state.referral_check = match &result {
                Ok(validation) if validation.is_valid => ReferralCheck::Valid,
                _ => ReferralCheck::Invalid,
            };
            state.referral_complete = true;
        });

        match result {
            Ok(validation) => Ok(validation.is_valid),
            Err(error) => Err(error.into()),
        }
    }

    /// Create the network with the current form and credential.
    ///
    /// Requires a valid form and no creation in flight. The referral
    /// code rides along only when it was validated in this session and
    /// parses as an id; otherwise it is silently omitted.
    pub async fn create_network(&self) -> Result<NetworkOutcome, AuthError> {
        let snapshot = self.engage_creation()?;

        let fields = credential_args(&self.inner.credential, &snapshot.password);
        let referral_code = if snapshot.referral_check.is_valid() {
            Uuid::parse_str(snapshot.referral_code.trim()).ok()
        } else {
            None
        };
        let args = NetworkCreateArgs {
            user_name: String::new(),
            network_name: Some(snapshot.network_name.trim().to_string()),
            terms: snapshot.terms_agreed,
            guest_mode: false,
            verify_otp_numeric: true,
            user_auth: fields.user_auth,
            password: fields.password,
            auth_jwt: fields.auth_jwt,
            auth_jwt_type: fields.auth_jwt_type,
            wallet_auth: fields.wallet_auth,
            referral_code,
        };

        let result = self.inner.api.network_create(args).await;
        self.inner.state.send_modify(|state| state.creating = false);

        classify_creation(result?)
    }

    /// Upgrade the current guest network with the form and credential.
    ///
    /// Same preconditions, busy flag, and classification as
    /// [`create_network`](Self::create_network).
    pub async fn upgrade_guest(&self) -> Result<NetworkOutcome, AuthError> {
        let snapshot = self.engage_creation()?;

        let fields = credential_args(&self.inner.credential, &snapshot.password);
        let args = UpgradeGuestArgs {
            network_name: Some(snapshot.network_name.trim().to_string()),
            user_auth: fields.user_auth,
            password: fields.password,
            auth_jwt: fields.auth_jwt,
            auth_jwt_type: fields.auth_jwt_type,
            wallet_auth: fields.wallet_auth,
        };

        let result = self.inner.api.upgrade_guest(args).await;
        self.inner.state.send_modify(|state| state.creating = false);

        classify_creation(result?)
    }

    /// Check preconditions and set the creation busy flag atomically.
    fn engage_creation(&self) -> Result<NetworkSetupState, AuthError> {
        let snapshot = self.snapshot();
        if !snapshot.form_valid {
            return Err(AuthError::invalid("network setup form is invalid"));
        }
        let engaged = self.inner.state.send_if_modified(|state| {
            if state.creating {
                return false;
            }
            state.creating = true;
            true
        });
        if !engaged {
            return Err(AuthError::busy("network creation"));
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_api::{ApiError, Blockchain, CreatedNetwork, ResultError, VerificationRequired};

    #[test]
    fn creation_with_network_is_authenticated() {
        let result = NetworkCreateResult {
            network: Some(CreatedNetwork {
                by_jwt: "jwt-7".into(),
                network_name: Some("saturn".into()),
            }),
            ..Default::default()
        };
        assert_eq!(
            classify_creation(result).expect("classified"),
            NetworkOutcome::Authenticated {
                session: SessionToken::new("jwt-7")
            }
        );
    }

    #[test]
    fn verification_sentinel_wins_over_missing_network() {
        let result = NetworkCreateResult {
            verification_required: Some(VerificationRequired {
                user_auth: "user@example.com".into(),
            }),
            ..Default::default()
        };
        assert_eq!(
            classify_creation(result).expect("classified"),
            NetworkOutcome::VerificationRequired
        );
    }

    #[test]
    fn creation_error_is_a_rejection() {
        let result = NetworkCreateResult {
            error: Some(ResultError {
                message: "name reserved".into(),
            }),
            ..Default::default()
        };
        assert_eq!(
            classify_creation(result).expect_err("rejected"),
            AuthError::Api(ApiError::rejected("name reserved"))
        );
    }

    #[test]
    fn empty_creation_response_is_unclassified() {
        let err = classify_creation(NetworkCreateResult::default()).expect_err("no branch");
        assert!(matches!(err, AuthError::Unclassified { .. }));
    }

    #[test]
    fn credential_args_carry_the_form_password() {
        let fields = credential_args(
            &LoginCredential::password("user@example.com"),
            "a long password",
        );
        assert_eq!(fields.user_auth.as_deref(), Some("user@example.com"));
        assert_eq!(fields.password.as_deref(), Some("a long password"));
        assert!(fields.auth_jwt.is_none());
        assert!(fields.wallet_auth.is_none());
    }

    #[test]
    fn credential_args_map_tokens_and_wallets() {
        let fields = credential_args(&LoginCredential::apple("token"), "");
        assert_eq!(fields.auth_jwt.as_deref(), Some("token"));
        assert_eq!(fields.auth_jwt_type, Some(AuthProvider::Apple));
        assert!(fields.user_auth.is_none());

        let fields = credential_args(&LoginCredential::solana_wallet("m", "s", "pk"), "");
        let wallet = fields.wallet_auth.expect("wallet populated");
        assert_eq!(wallet.blockchain, Blockchain::Sol);
        assert!(fields.password.is_none());
    }
}
