//! The authority trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::{AuthLoginArgs, AuthLoginResult};
use crate::error::ApiError;
use crate::network::{
    NetworkCheckResult, NetworkCreateArgs, NetworkCreateResult, UpgradeGuestArgs,
    ValidateReferralCodeArgs, ValidateReferralCodeResult,
};

/// The five operations the client needs from the remote authority.
///
/// Each is a single request, single response round trip; there is no
/// streaming and no partial result. Implementations own transport,
/// serialization, and endpoint concerns entirely. The application core
/// never retries; a failed call surfaces to the caller as-is.
#[async_trait]
pub trait NetworkApi: Send + Sync {
    /// Submit a canonical login request.
    async fn auth_login(&self, args: AuthLoginArgs) -> Result<AuthLoginResult, ApiError>;

    /// Create a network (full account or guest).
    async fn network_create(&self, args: NetworkCreateArgs)
        -> Result<NetworkCreateResult, ApiError>;

    /// Upgrade a guest network into a full account.
    async fn upgrade_guest(&self, args: UpgradeGuestArgs)
        -> Result<NetworkCreateResult, ApiError>;

    /// Check whether a candidate network name is available.
    async fn network_check(&self, network_name: &str) -> Result<NetworkCheckResult, ApiError>;

    /// Check whether a referral code is redeemable.
    async fn validate_referral_code(
        &self,
        args: ValidateReferralCodeArgs,
    ) -> Result<ValidateReferralCodeResult, ApiError>;
}

/// Shared handle to an authority implementation.
pub type SharedApi = Arc<dyn NetworkApi>;
