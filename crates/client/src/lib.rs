//! Client for the VPS provider's signed RPC API.
//!
//! Every remote call is authenticated offline: the call's parameters and
//! per-call metadata are flattened into a canonical percent-encoded string,
//! digested with SHA-512, and signed with the account's RSA private key. The
//! signature travels as a transport cookie; the server rebuilds the same
//! canonical string and verifies it.
//!
//! # Modules
//!
//! - [`constants`]: Cookie names, metadata keys, and protocol constants
//! - [`context`]: Per-call signing metadata (timestamp, nonce, service, host)
//! - [`error`]: Error types and error handling utilities
//! - [`key`]: Private-key PEM normalization
//! - [`logging`]: Logging initialization
//! - [`params`]: Ordered parameter sets and canonical encoding
//! - [`session`]: Session lifecycle and the transport boundary
//! - [`settings`]: Configuration management and validation
//! - [`signing`]: SHA-512 digesting and RSA signing
//! - [`test_support`]: Testing utilities
//! - [`vps`]: Caller-facing remote operations

pub mod constants;
pub mod context;
pub mod error;
pub mod key;
pub mod logging;
pub mod params;
pub mod session;
pub mod settings;
pub mod signing;
pub mod test_support;
pub mod vps;
