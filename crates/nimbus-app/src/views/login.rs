//! Login screen state.

use serde::{Deserialize, Serialize};

/// Observable state of the login screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginState {
    /// Identifier as typed (email or phone)
    pub user_auth: String,
    /// Whether `user_auth` currently parses as an email or phone number
    pub user_auth_valid: bool,
    /// A login resolution is in flight
    pub checking: bool,
    /// A guest network creation is in flight
    pub creating_guest: bool,
    /// Terms accepted on the guest-network sheet
    pub terms_agreed: bool,
}

impl LoginState {
    /// Whether the primary "get started" action should be enabled.
    #[must_use]
    pub fn can_get_started(&self) -> bool {
        self.user_auth_valid && !self.checking
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_started_requires_valid_identifier_and_idle_flow() {
        let mut state = LoginState {
            user_auth: "user@example.com".into(),
            user_auth_valid: true,
            ..Default::default()
        };
        assert!(state.can_get_started());

        state.checking = true;
        assert!(!state.can_get_started());

        state.checking = false;
        state.user_auth_valid = false;
        assert!(!state.can_get_started());
    }
}
