//! Credential normalization.
//!
//! Four identity inputs reach the client: an email/phone identifier
//! with an eventual password, an Apple identity token, a Google
//! identity token, and a signed Solana wallet challenge. Each maps to
//! exactly one [`LoginCredential`] variant, and every remote request is
//! built from that one canonical value. Normalization is pure and
//! total: malformed provider payloads are rejected by the platform auth
//! provider before they get here.

use serde::{Deserialize, Serialize};

use nimbus_api::{AuthLoginArgs, AuthProvider, Blockchain, WalletAuthArgs};

/// Canonical, provider-agnostic representation of a login attempt.
///
/// Exactly one variant per attempt; variants are never mixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoginCredential {
    /// Email or phone identifier, with the password once one is required
    Password {
        /// The identifier as entered
        user_auth: String,
        /// Absent on the first round trip; attached for the retry after
        /// the authority asks for one
        password: Option<String>,
    },
    /// Identity token minted by an external provider
    ExternalToken {
        /// The provider's signed token
        token: String,
        /// Which provider minted it
        provider: AuthProvider,
    },
    /// Signed wallet challenge
    WalletSignature {
        /// Chain the signing key lives on
        blockchain: Blockchain,
        /// The message that was signed
        message: String,
        /// Signature over `message`
        signature: String,
        /// Public key of the signer
        public_key: String,
    },
}

impl LoginCredential {
    /// Normalize an identifier entered in the login form.
    pub fn password(user_auth: impl Into<String>) -> Self {
        Self::Password {
            user_auth: user_auth.into(),
            password: None,
        }
    }

    /// Normalize an Apple identity token.
    pub fn apple(token: impl Into<String>) -> Self {
        Self::ExternalToken {
            token: token.into(),
            provider: AuthProvider::Apple,
        }
    }

    /// Normalize a Google identity token.
    pub fn google(token: impl Into<String>) -> Self {
        Self::ExternalToken {
            token: token.into(),
            provider: AuthProvider::Google,
        }
    }

    /// Normalize a signed Solana wallet challenge.
    ///
    /// Polygon exists in the wire vocabulary but no flow constructs it;
    /// wallet sign-in is Solana-only for now.
    pub fn solana_wallet(
        message: impl Into<String>,
        signature: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self::WalletSignature {
            blockchain: Blockchain::Sol,
            message: message.into(),
            signature: signature.into(),
            public_key: public_key.into(),
        }
    }

    /// Whether form validity must include the password-length rule.
    #[must_use]
    pub fn requires_password(&self) -> bool {
        matches!(self, Self::Password { .. })
    }

    /// The identifier, when this is a password credential.
    #[must_use]
    pub fn user_auth(&self) -> Option<&str> {
        match self {
            Self::Password { user_auth, .. } => Some(user_auth),
            _ => None,
        }
    }

    /// Build the canonical login request for this credential.
    #[must_use]
    pub fn to_login_args(&self) -> AuthLoginArgs {
        match self {
            Self::Password {
                user_auth,
                password,
            } => AuthLoginArgs {
                user_auth: Some(user_auth.clone()),
                password: password.clone(),
                ..Default::default()
            },
            Self::ExternalToken { token, provider } => AuthLoginArgs {
                auth_jwt: Some(token.clone()),
                auth_jwt_type: Some(*provider),
                ..Default::default()
            },
            Self::WalletSignature {
                blockchain,
                message,
                signature,
                public_key,
            } => AuthLoginArgs {
                wallet_auth: Some(WalletAuthArgs {
                    blockchain: *blockchain,
                    message: message.clone(),
                    signature: signature.clone(),
                    public_key: public_key.clone(),
                }),
                ..Default::default()
            },
        }
    }
}
