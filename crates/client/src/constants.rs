//! Protocol constants shared across the signing path.
//!
//! The metadata keys and cookie names below are part of the wire contract:
//! the server rebuilds the canonical string from exactly these names, so they
//! must never change independently of the server.

/// Remote service name, appended to every signed request as `__service`.
pub const SERVICE: &str = "VpsService";

/// Client version reported with every call via the `clientVersion` cookie.
pub const CLIENT_VERSION: &str = "5.1";

// Static session cookies, set once when the transport is established.
pub const COOKIE_LOGIN: &str = "login";
pub const COOKIE_MODE: &str = "mode";

// Per-call cookies, overwritten before every call.
pub const COOKIE_TIMESTAMP: &str = "timestamp";
pub const COOKIE_NONCE: &str = "nonce";
pub const COOKIE_CLIENT_VERSION: &str = "clientVersion";
pub const COOKIE_SIGNATURE: &str = "signature";

// Metadata keys appended to the signed parameter set.
pub const META_METHOD: &str = "__method";
pub const META_SERVICE: &str = "__service";
pub const META_HOSTNAME: &str = "__hostname";
pub const META_TIMESTAMP: &str = "__timestamp";
pub const META_NONCE: &str = "__nonce";
