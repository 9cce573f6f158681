//! Network setup screen state.
//!
//! The name-availability indicator and the referral validator each get
//! a small state machine; [`NetworkSetupState`] bundles them with the
//! form fields and the derived validity flag the submit button binds to.

use serde::{Deserialize, Serialize};

/// Progress of the debounced network-name availability check.
///
/// Owned exclusively by the setup flow: transitions happen only through
/// the debounced remote check, or reset to the length guard when the
/// input changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameCheck {
    /// Nothing entered yet
    #[default]
    NotChecked,
    /// Name is below the minimum length; no remote call is made
    TooShort,
    /// A check is scheduled or in flight
    Pending,
    /// The authority reports the name available
    Available,
    /// The authority reports the name taken
    Taken,
    /// The availability check itself failed
    CheckFailed,
}

impl NameCheck {
    /// Whether the name passed the availability check.
    #[must_use]
    pub fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }

    /// Whether a scheduled or in-flight check will still move this state.
    #[must_use]
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The supporting text shown under the name field.
    #[must_use]
    pub fn supporting_text(self) -> &'static str {
        match self {
            Self::NotChecked | Self::TooShort => "Network names must be 6 characters or more",
            Self::Pending => "Checking availability...",
            Self::Available => "Nice! This network name is available",
            Self::Taken => "This network name is already taken",
            Self::CheckFailed => "There was an error checking the network name",
        }
    }
}

/// Progress of the on-demand referral-code validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferralCheck {
    /// No validation attempted for the current code
    #[default]
    Idle,
    /// A validation call is in flight
    Validating,
    /// The current code was validated as redeemable
    Valid,
    /// The current code was validated as not redeemable, or the call failed
    Invalid,
}

impl ReferralCheck {
    /// Whether the current code may be attached to a creation request.
    #[must_use]
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Observable state of the network setup screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSetupState {
    /// Network name as typed
    pub network_name: String,
    /// Availability of `network_name`
    pub name_check: NameCheck,
    /// Password as typed (password credentials only)
    pub password: String,
    /// Terms of service accepted
    pub terms_agreed: bool,
    /// Referral code as typed
    pub referral_code: String,
    /// Validation state of `referral_code`
    pub referral_check: ReferralCheck,
    /// Whether a validation attempt has completed for the current code,
    /// so the UI can tell "never tried" from "tried and failed"
    pub referral_complete: bool,
    /// A create or upgrade call is in flight
    pub creating: bool,
    /// Derived: the form may be submitted
    pub form_valid: bool,
    /// Supersession counter for scheduled name checks
    #[serde(skip)]
    pub(crate) check_generation: u64,
}

impl NetworkSetupState {
    /// The supporting text shown under the name field.
    #[must_use]
    pub fn name_supporting_text(&self) -> &'static str {
        self.name_check.supporting_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supporting_text_tracks_the_check_state() {
        assert_eq!(
            NameCheck::TooShort.supporting_text(),
            "Network names must be 6 characters or more"
        );
        assert_eq!(
            NameCheck::Taken.supporting_text(),
            "This network name is already taken"
        );
        assert_eq!(
            NameCheck::Available.supporting_text(),
            "Nice! This network name is available"
        );
        // The initial state reads as the length hint, matching an empty field.
        assert_eq!(
            NameCheck::NotChecked.supporting_text(),
            NameCheck::TooShort.supporting_text()
        );
    }

    #[test]
    fn only_available_unlocks_the_name() {
        assert!(NameCheck::Available.is_available());
        for check in [
            NameCheck::NotChecked,
            NameCheck::TooShort,
            NameCheck::Pending,
            NameCheck::Taken,
            NameCheck::CheckFailed,
        ] {
            assert!(!check.is_available());
        }
    }

    #[test]
    fn only_validated_codes_count() {
        assert!(ReferralCheck::Valid.is_valid());
        assert!(!ReferralCheck::Idle.is_valid());
        assert!(!ReferralCheck::Validating.is_valid());
        assert!(!ReferralCheck::Invalid.is_valid());
    }
}
