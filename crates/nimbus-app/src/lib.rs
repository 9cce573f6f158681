//! # Nimbus application core
//!
//! Portable, headless authentication core for the Nimbus network
//! client. Frontends (mobile, desktop, terminal) render and navigate;
//! this crate decides. It normalizes every identity input into one
//! canonical credential, resolves login attempts against the remote
//! authority, and walks the account-creation paths (new network,
//! guest upgrade) with debounced name validation along the way.
//!
//! ## Architecture
//!
//! ```text
//! identity input → credential normalizer → login resolver → outcome
//!                                                     │
//!                                         NoAccount ──┘→ network setup
//! ```
//!
//! - [`credential`]: pure normalization of the four identity inputs
//! - [`workflows::login`]: login resolution and the guest path
//! - [`workflows::network`]: name checks, referral codes, creation,
//!   guest upgrade
//! - [`views`]: the observable state records the screens bind to
//!
//! The remote authority is reached only through
//! [`nimbus_api::NetworkApi`]; nothing here owns transport, retry
//! policy, or session persistence.

pub mod config;
pub mod credential;
pub mod errors;
pub mod views;
pub mod workflows;

pub use config::{AuthConfig, TERMS_URL};
pub use credential::LoginCredential;
pub use errors::AuthError;
pub use views::{LoginState, NameCheck, NetworkSetupState, ReferralCheck};
pub use workflows::login::{LoginFlow, LoginOutcome, PendingLogin, SessionToken};
pub use workflows::network::{NetworkOutcome, NetworkSetup};
