//! Session lifecycle and the transport boundary.
//!
//! The transport handle is created once, lazily, on the first call and
//! reused for the life of the process. Static cookies (`login`, `mode`) are
//! set when the handle is established; the four per-call cookies
//! (`timestamp`, `nonce`, `clientVersion`, `signature`) are recomputed and
//! overwritten before every call. The whole build-sign-set-delegate path
//! runs under one lock so concurrent callers can never transmit each
//! other's cookies.

use std::sync::{Mutex, PoisonError};

use cookie::Cookie;
use error_stack::Report;
use serde_json::Value;

use crate::constants::{
    CLIENT_VERSION, COOKIE_CLIENT_VERSION, COOKIE_LOGIN, COOKIE_MODE, COOKIE_NONCE,
    COOKIE_SIGNATURE, COOKIE_TIMESTAMP, SERVICE,
};
use crate::context::SigningContext;
use crate::error::ApiError;
use crate::key::normalize_private_key;
use crate::params::{percent_encode, ParamValue};
use crate::settings::Settings;
use crate::signing::RequestSigner;

/// An established RPC channel to the endpoint.
///
/// Implementations carry named cookies on every request and perform named
/// remote calls with positional arguments. Connection handling below this
/// trait (TCP/TLS, interface discovery) is not this crate's concern.
pub trait Transport {
    /// Attach or overwrite a named cookie on the channel.
    fn set_cookie(&mut self, cookie: Cookie<'static>);

    /// Invoke a remote method with positional arguments, returning the
    /// deserialized result or the remote fault as [`ApiError::Remote`].
    fn call(&mut self, method: &str, args: &[ParamValue]) -> Result<Value, Report<ApiError>>;
}

/// Builds a [`Transport`] against an endpoint hostname.
pub trait Connector {
    type Transport: Transport;

    /// Establish the channel. Called at most once per session.
    fn connect(&self, endpoint: &str) -> Result<Self::Transport, Report<ApiError>>;
}

enum SessionState<T> {
    Uninitialized,
    Connecting,
    Connected(T),
    Failed,
}

/// Owns the lazily-created transport handle and drives the signing path
/// for every call.
pub struct SessionClient<C: Connector> {
    settings: Settings,
    connector: C,
    signer: RequestSigner,
    state: Mutex<SessionState<C::Transport>>,
}

impl<C: Connector> SessionClient<C> {
    /// Normalize and parse the configured private key and prepare an
    /// unconnected session. No network activity happens here.
    ///
    /// # Errors
    ///
    /// [`ApiError::Configuration`] when no PEM block is found in the
    /// configured key material; [`ApiError::Signing`] when the key does not
    /// parse as an RSA private key.
    pub fn new(settings: Settings, connector: C) -> Result<Self, Report<ApiError>> {
        let pem_key = normalize_private_key(&settings.api.private_key)?;
        let signer = RequestSigner::from_pem(&pem_key)?;

        Ok(Self {
            settings,
            connector,
            signer,
            state: Mutex::new(SessionState::Uninitialized),
        })
    }

    /// Perform a signed remote call.
    ///
    /// Establishes the transport on first use, refreshes the per-call
    /// cookies, and delegates. The remote result or fault is propagated
    /// unchanged.
    ///
    /// # Errors
    ///
    /// [`ApiError::Connectivity`] when the transport cannot be established,
    /// or was already tried and failed (connection failures are sticky);
    /// [`ApiError::Signing`] when signing fails; [`ApiError::Remote`] when
    /// the server rejects the call.
    pub fn call(&self, method: &str, args: &[ParamValue]) -> Result<Value, Report<ApiError>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        match &*state {
            SessionState::Failed => {
                return Err(Report::new(ApiError::Connectivity {
                    message: format!(
                        "session previously failed to connect to '{}'",
                        self.settings.api.endpoint
                    ),
                }));
            }
            SessionState::Connected(_) => {}
            SessionState::Uninitialized | SessionState::Connecting => {
                *state = SessionState::Connecting;
                log::info!(
                    "establishing session against endpoint '{}'",
                    self.settings.api.endpoint
                );

                match self.connector.connect(&self.settings.api.endpoint) {
                    Ok(mut transport) => {
                        transport
                            .set_cookie(Cookie::new(COOKIE_LOGIN, self.settings.api.login.clone()));
                        transport
                            .set_cookie(Cookie::new(COOKIE_MODE, self.settings.api.mode.clone()));
                        *state = SessionState::Connected(transport);
                        log::info!("session established as '{}'", self.settings.api.login);
                    }
                    Err(report) => {
                        *state = SessionState::Failed;
                        return Err(report.change_context(ApiError::Connectivity {
                            message: format!(
                                "unable to connect to endpoint '{}'",
                                self.settings.api.endpoint
                            ),
                        }));
                    }
                }
            }
        }

        let SessionState::Connected(transport) = &mut *state else {
            return Err(Report::new(ApiError::Connectivity {
                message: "session is not connected".to_string(),
            }));
        };

        let context = SigningContext::new(SERVICE, &self.settings.api.endpoint);
        let canonical = context.signing_params(method, args).encode();
        let signature = self.signer.sign(&canonical)?;

        transport.set_cookie(Cookie::new(COOKIE_TIMESTAMP, context.timestamp.to_string()));
        transport.set_cookie(Cookie::new(COOKIE_NONCE, context.nonce.clone()));
        transport.set_cookie(Cookie::new(COOKIE_CLIENT_VERSION, CLIENT_VERSION));
        // Base64 is not cookie-safe; the signature travels percent-encoded.
        transport.set_cookie(Cookie::new(
            COOKIE_SIGNATURE,
            percent_encode(&signature).into_owned(),
        ));

        log::debug!(
            "calling {method} with {} positional argument(s), nonce {}",
            args.len(),
            context.nonce
        );
        transport.call(method, args)
    }

    /// The public half of the signing key, for verifier-side checks.
    pub fn public_key(&self) -> rsa::RsaPublicKey {
        self.signer.public_key()
    }
}
