//! Network creation, guest upgrade, and validation operation values.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{AuthProvider, ResultError, WalletAuthArgs};

/// Request to create a network (a full account, or a guest one).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkCreateArgs {
    /// Display name; the client currently always sends it empty
    pub user_name: String,
    /// Chosen network name; absent for guest networks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_name: Option<String>,
    /// Whether the user accepted the terms of service
    pub terms: bool,
    /// Create an anonymous guest network instead of a full account
    pub guest_mode: bool,
    /// Ask the authority to issue a numeric verification code
    pub verify_otp_numeric: bool,
    /// Email or phone identifier (password accounts)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_auth: Option<String>,
    /// Password for `user_auth`
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
    /// Referral code id, attached only once validated client-side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<Uuid>,
}

/// Request to upgrade a guest network into a full account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpgradeGuestArgs {
    /// Chosen network name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_name: Option<String>,
    /// Email or phone identifier (password accounts)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_auth: Option<String>,
    /// Password for `user_auth`
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

/// The created (or upgraded) network inside a creation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedNetwork {
    /// Session token for the new network
    pub by_jwt: String,
    /// Canonical name the authority recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_name: Option<String>,
}

/// Sentinel: the account exists but the identifier must be verified first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequired {
    /// The identifier the verification code was sent to
    pub user_auth: String,
}

/// Response to [`network_create`](crate::NetworkApi::network_create) and
/// [`upgrade_guest`](crate::NetworkApi::upgrade_guest).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkCreateResult {
    /// Present when the network was created and a session issued
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<CreatedNetwork>,
    /// Present when the identifier still needs out-of-band verification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_required: Option<VerificationRequired>,
    /// Present when the authority rejected the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ResultError>,
}

/// Response to [`network_check`](crate::NetworkApi::network_check).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkCheckResult {
    /// Whether the candidate name is free to claim
    pub available: bool,
}

/// Request to validate a referral code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateReferralCodeArgs {
    /// The code as the user typed it
    pub referral_code: String,
}

/// Response to
/// [`validate_referral_code`](crate::NetworkApi::validate_referral_code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateReferralCodeResult {
    /// Whether the code is redeemable
    pub is_valid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_args_omit_unset_credentials() {
        let args = NetworkCreateArgs {
            network_name: Some("saturn".into()),
            terms: true,
            verify_otp_numeric: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&args).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "userName": "",
                "networkName": "saturn",
                "terms": true,
                "guestMode": false,
                "verifyOtpNumeric": true,
            })
        );
    }

    #[test]
    fn create_result_parses_verification_sentinel() {
        let result: NetworkCreateResult =
            serde_json::from_str(r#"{"verificationRequired":{"userAuth":"user@example.com"}}"#)
                .expect("parse");
        assert_eq!(
            result.verification_required.map(|v| v.user_auth).as_deref(),
            Some("user@example.com")
        );
        assert!(result.network.is_none());
    }
}
