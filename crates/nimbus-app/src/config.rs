//! Tunable constants for the authentication flows.

use std::time::Duration;

/// Terms of service shown during signup.
pub const TERMS_URL: &str = "https://nimbus.network/terms";

/// Configuration for [`LoginFlow`](crate::workflows::login::LoginFlow)
/// and [`NetworkSetup`](crate::workflows::network::NetworkSetup).
///
/// The defaults are the production values; tests shrink the debounce to
/// keep the clock arithmetic obvious.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Quiet period before a name edit triggers a remote availability check
    pub name_check_debounce: Duration,
    /// Names shorter than this never reach the network
    pub min_network_name_len: usize,
    /// Minimum password length for password-based accounts
    pub min_password_len: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            name_check_debounce: Duration::from_millis(250),
            min_network_name_len: 6,
            min_password_len: 12,
        }
    }
}
