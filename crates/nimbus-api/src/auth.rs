//! Login operation values.
//!
//! [`AuthLoginArgs`] is the canonical login request: one value for every
//! identity provider, with exactly one provider's fields populated. The
//! authority answers with [`AuthLoginResult`], whose branches (session
//! token, allowed-provider list, structured error, or none of those)
//! drive the client's outcome classification.

use serde::{Deserialize, Serialize};

/// The provider string the authority uses for password-based accounts.
pub const AUTH_METHOD_PASSWORD: &str = "password";

/// External identity providers the authority accepts a signed token from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// Apple identity token
    Apple,
    /// Google identity token
    Google,
}

impl AuthProvider {
    /// The wire name of the provider.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Apple => "apple",
            Self::Google => "google",
        }
    }
}

/// Blockchains the authority accepts wallet signatures from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Blockchain {
    /// Solana
    #[serde(rename = "SOL")]
    Sol,
    /// Polygon
    #[serde(rename = "POLY")]
    Poly,
}

impl Blockchain {
    /// The wire name of the chain.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sol => "SOL",
            Self::Poly => "POLY",
        }
    }
}

/// A signed wallet challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAuthArgs {
    /// Chain the signing key lives on
    pub blockchain: Blockchain,
    /// The message that was signed
    pub message: String,
    /// Signature over `message`
    pub signature: String,
    /// Public key of the signer
    pub public_key: String,
}

/// Canonical login request submitted to the authority.
///
/// Exactly one provider's fields are expected to be populated per
/// attempt; the client's credential normalizer guarantees this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthLoginArgs {
    /// Email or phone identifier (password accounts)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_auth: Option<String>,
    /// Password, when the identifier round already established one is needed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Identity token from an external provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_jwt: Option<String>,
    /// Which provider issued `auth_jwt`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_jwt_type: Option<AuthProvider>,
    /// Signed wallet challenge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_auth: Option<WalletAuthArgs>,
}

/// Structured error embedded in an otherwise-successful round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultError {
    /// The authority's message
    pub message: String,
}

/// The authenticated network identity inside a login response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthNetwork {
    /// Session token for the network
    pub by_jwt: String,
}

/// Response to [`auth_login`](crate::NetworkApi::auth_login).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthLoginResult {
    /// Present when the attempt authenticated outright
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<AuthNetwork>,
    /// Present when the identifier is known: the sign-in methods it accepts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_allowed: Option<Vec<String>>,
    /// Present when the authority rejected the attempt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ResultError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_args_omit_absent_providers() {
        let args = AuthLoginArgs {
            user_auth: Some("user@example.com".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&args).expect("serialize");
        assert_eq!(json, serde_json::json!({ "userAuth": "user@example.com" }));
    }

    #[test]
    fn wallet_args_use_wire_names() {
        let args = AuthLoginArgs {
            wallet_auth: Some(WalletAuthArgs {
                blockchain: Blockchain::Sol,
                message: "m".into(),
                signature: "s".into(),
                public_key: "pk".into(),
            }),
            ..Default::default()
        };
        let json = serde_json::to_value(&args).expect("serialize");
        assert_eq!(json["walletAuth"]["blockchain"], "SOL");
        assert_eq!(json["walletAuth"]["publicKey"], "pk");
    }

    #[test]
    fn login_result_parses_each_branch() {
        let authenticated: AuthLoginResult =
            serde_json::from_str(r#"{"network":{"byJwt":"jwt-1"}}"#).expect("parse");
        assert_eq!(
            authenticated.network.map(|n| n.by_jwt).as_deref(),
            Some("jwt-1")
        );

        let known: AuthLoginResult =
            serde_json::from_str(r#"{"authAllowed":["password","google"]}"#).expect("parse");
        assert_eq!(
            known.auth_allowed.as_deref(),
            Some(["password".to_string(), "google".to_string()].as_slice())
        );

        let unknown: AuthLoginResult = serde_json::from_str("{}").expect("parse");
        assert!(unknown.network.is_none());
        assert!(unknown.auth_allowed.is_none());
        assert!(unknown.error.is_none());
    }
}
