//! # Test doubles for the authority boundary
//!
//! [`FakeApi`] implements [`NetworkApi`] with per-operation response
//! queues and recorded call arguments, so flow tests can script the
//! authority's side of a conversation and then assert on exactly what
//! the client sent.
//!
//! Responses are consumed front-to-back; when a queue runs dry the fake
//! falls back to a benign default (empty login result, available name,
//! invalid referral code, created network with a fixed token). An
//! optional latency is applied to every operation so tests running
//! under a paused Tokio clock can hold a call in flight while they
//! probe single-flight behavior.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use nimbus_api::{
    ApiError, AuthLoginArgs, AuthLoginResult, CreatedNetwork, NetworkApi, NetworkCheckResult,
    NetworkCreateArgs, NetworkCreateResult, UpgradeGuestArgs, ValidateReferralCodeArgs,
    ValidateReferralCodeResult,
};

/// Session token the fake issues when a creation queue is empty.
pub const DEFAULT_JWT: &str = "testkit-jwt";

#[derive(Default)]
struct Queues {
    login: VecDeque<Result<AuthLoginResult, ApiError>>,
    create: VecDeque<Result<NetworkCreateResult, ApiError>>,
    upgrade: VecDeque<Result<NetworkCreateResult, ApiError>>,
    check: VecDeque<Result<NetworkCheckResult, ApiError>>,
    referral: VecDeque<Result<ValidateReferralCodeResult, ApiError>>,
}

#[derive(Default)]
struct Recorded {
    login: Vec<AuthLoginArgs>,
    create: Vec<NetworkCreateArgs>,
    upgrade: Vec<UpgradeGuestArgs>,
    check: Vec<String>,
    referral: Vec<String>,
}

/// A programmable [`NetworkApi`] for tests.
#[derive(Default)]
pub struct FakeApi {
    queues: Mutex<Queues>,
    recorded: Mutex<Recorded>,
    latency: Mutex<Option<Duration>>,
}

impl FakeApi {
    /// Create a fake with empty queues and no latency.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an artificial delay to every operation.
    #[must_use]
    pub fn with_latency(self, latency: Duration) -> Self {
        *self.latency.lock() = Some(latency);
        self
    }

    /// Queue a login response.
    #[must_use]
    pub fn push_login(self, response: Result<AuthLoginResult, ApiError>) -> Self {
        self.queues.lock().login.push_back(response);
        self
    }

    /// Queue a network-create response.
    #[must_use]
    pub fn push_create(self, response: Result<NetworkCreateResult, ApiError>) -> Self {
        self.queues.lock().create.push_back(response);
        self
    }

    /// Queue a guest-upgrade response.
    #[must_use]
    pub fn push_upgrade(self, response: Result<NetworkCreateResult, ApiError>) -> Self {
        self.queues.lock().upgrade.push_back(response);
        self
    }

    /// Queue a name-check response.
    #[must_use]
    pub fn push_check(self, response: Result<NetworkCheckResult, ApiError>) -> Self {
        self.queues.lock().check.push_back(response);
        self
    }

    /// Queue a referral-validation response.
    #[must_use]
    pub fn push_referral(self, response: Result<ValidateReferralCodeResult, ApiError>) -> Self {
        self.queues.lock().referral.push_back(response);
        self
    }

    /// Login requests received, in order.
    #[must_use]
    pub fn login_calls(&self) -> Vec<AuthLoginArgs> {
        self.recorded.lock().login.clone()
    }

    /// Create requests received, in order.
    #[must_use]
    pub fn create_calls(&self) -> Vec<NetworkCreateArgs> {
        self.recorded.lock().create.clone()
    }

    /// Upgrade requests received, in order.
    #[must_use]
    pub fn upgrade_calls(&self) -> Vec<UpgradeGuestArgs> {
        self.recorded.lock().upgrade.clone()
    }

    /// Names checked, in order.
    #[must_use]
    pub fn checked_names(&self) -> Vec<String> {
        self.recorded.lock().check.clone()
    }

    /// Referral codes validated, in order.
    #[must_use]
    pub fn validated_codes(&self) -> Vec<String> {
        self.recorded.lock().referral.clone()
    }

    async fn pause(&self) {
        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl NetworkApi for FakeApi {
    async fn auth_login(&self, args: AuthLoginArgs) -> Result<AuthLoginResult, ApiError> {
        self.recorded.lock().login.push(args);
        self.pause().await;
        self.queues
            .lock()
            .login
            .pop_front()
            .unwrap_or_else(|| Ok(AuthLoginResult::default()))
    }

    async fn network_create(
        &self,
        args: NetworkCreateArgs,
    ) -> Result<NetworkCreateResult, ApiError> {
        self.recorded.lock().create.push(args);
        self.pause().await;
        self.queues
            .lock()
            .create
            .pop_front()
            .unwrap_or_else(|| Ok(created_network_result()))
    }

    async fn upgrade_guest(
        &self,
        args: UpgradeGuestArgs,
    ) -> Result<NetworkCreateResult, ApiError> {
        self.recorded.lock().upgrade.push(args);
        self.pause().await;
        self.queues
            .lock()
            .upgrade
            .pop_front()
            .unwrap_or_else(|| Ok(created_network_result()))
    }

    async fn network_check(&self, network_name: &str) -> Result<NetworkCheckResult, ApiError> {
        self.recorded.lock().check.push(network_name.to_string());
        self.pause().await;
        self.queues
            .lock()
            .check
            .pop_front()
            .unwrap_or(Ok(NetworkCheckResult { available: true }))
    }

    async fn validate_referral_code(
        &self,
        args: ValidateReferralCodeArgs,
    ) -> Result<ValidateReferralCodeResult, ApiError> {
        self.recorded.lock().referral.push(args.referral_code);
        self.pause().await;
        self.queues
            .lock()
            .referral
            .pop_front()
            .unwrap_or(Ok(ValidateReferralCodeResult { is_valid: false }))
    }
}

fn created_network_result() -> NetworkCreateResult {
    NetworkCreateResult {
        network: Some(CreatedNetwork {
            by_jwt: DEFAULT_JWT.to_string(),
            network_name: None,
        }),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn queued_responses_are_consumed_in_order() {
        let api = Arc::new(
            FakeApi::new()
                .push_check(Ok(NetworkCheckResult { available: false }))
                .push_check(Ok(NetworkCheckResult { available: true })),
        );

        let first = api.network_check("saturn").await.expect("first response");
        let second = api.network_check("saturn").await.expect("second response");
        assert!(!first.available);
        assert!(second.available);

        // Queue exhausted: falls back to the default.
        let third = api.network_check("rings").await.expect("default response");
        assert!(third.available);
        assert_eq!(api.checked_names(), vec!["saturn", "saturn", "rings"]);
    }

    #[tokio::test]
    async fn default_login_result_is_empty() {
        let api = FakeApi::new();
        let result = api
            .auth_login(AuthLoginArgs::default())
            .await
            .expect("default response");
        assert!(result.network.is_none());
        assert!(result.auth_allowed.is_none());
        assert!(result.error.is_none());
    }
}
