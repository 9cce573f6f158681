//! # Remote authority boundary
//!
//! The Nimbus client talks to exactly one external collaborator: the
//! remote authority that owns accounts, networks and referral codes.
//! This crate defines that boundary and nothing else: the value types
//! each operation exchanges, the [`NetworkApi`] trait the application
//! core is written against, and the [`ApiError`] both sides of the
//! boundary agree on.
//!
//! No transport lives here. A production client implements
//! [`NetworkApi`] over whatever RPC stack the platform provides; tests
//! implement it with a scripted fake. The application core cannot tell
//! the difference, which is the point.

mod auth;
mod client;
mod error;
mod network;

pub use auth::{
    AuthLoginArgs, AuthLoginResult, AuthNetwork, AuthProvider, Blockchain, ResultError,
    WalletAuthArgs, AUTH_METHOD_PASSWORD,
};
pub use client::{NetworkApi, SharedApi};
pub use error::ApiError;
pub use network::{
    CreatedNetwork, NetworkCheckResult, NetworkCreateArgs, NetworkCreateResult, UpgradeGuestArgs,
    ValidateReferralCodeArgs, ValidateReferralCodeResult, VerificationRequired,
};
