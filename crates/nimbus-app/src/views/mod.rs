//! # View state
//!
//! Observable state records for the authentication screens. Each flow
//! owns one of these exclusively and mutates it only through its own
//! transition functions; frontends read snapshots or subscribe through
//! the flow's watch channel. The types are plain values (`Clone`,
//! `PartialEq`, serializable for debugging) so they cross FFI and
//! thread boundaries without ceremony.

pub mod login;
pub mod network;

pub use login::LoginState;
pub use network::{NameCheck, NetworkSetupState, ReferralCheck};
