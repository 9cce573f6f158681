//! # Workflows - Portable Business Logic
//!
//! The flows that sit between the authentication screens and the remote
//! authority. Everything here is frontend-agnostic: a flow owns its
//! view state, exposes snapshots and a watch channel, and performs the
//! remote round trips; rendering and navigation stay in the frontends.
//!
//! ## Design patterns
//!
//! - **State ownership**: each flow's state record is mutated only
//!   inside its own transition closures; frontends never write it.
//! - **Single-flight**: remote operations guard themselves with a busy
//!   flag set atomically in the same transition that reads it. Re-entry
//!   fails fast with [`AuthError::Busy`](crate::errors::AuthError)
//!   rather than queueing.
//! - **Error handling**: flows return `Result<T, AuthError>`; nothing
//!   is retried here, and busy flags are cleared on every exit path.

pub mod login;
pub mod network;
pub mod validation;
