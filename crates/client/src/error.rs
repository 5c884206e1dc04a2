use derive_more::{Display, Error};

/// Errors produced by the signing client.
///
/// Configuration and connectivity failures indicate the client itself is
/// misconfigured and are fatal for the session; remote faults are the
/// server rejecting an otherwise well-formed call and are left to the
/// caller to interpret. Nothing here is retried automatically.
#[derive(Debug, Display, Error)]
pub enum ApiError {
    /// Missing or unparseable credentials or private key material.
    #[display("configuration error: {message}")]
    Configuration { message: String },

    /// The transport could not be established against the endpoint.
    #[display("connectivity error: {message}")]
    Connectivity { message: String },

    /// The cryptographic signing primitive rejected the operation.
    #[display("signing error: {message}")]
    Signing { message: String },

    /// A parameter value is not representable in the canonical encoding.
    #[display("parameter encoding error: {message}")]
    Encoding { message: String },

    /// The remote side rejected the call, including signature verification
    /// failures detected server-side.
    #[display("remote fault: {message}")]
    Remote { message: String },
}
