// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Warmlink library.
//!
//! The cloud API reports most problems as empty payloads rather than error
//! responses, so the error surface here is small: transport failures,
//! missing authentication, and the "no password variant produced a token"
//! login failure that a polling cycle reports upward.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred while talking to the cloud API.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Login produced no token for any password variant.
    ///
    /// The coordinator surfaces this as an update failure; entities stay
    /// unavailable until a later cycle authenticates.
    #[error("authentication failed: no password variant yielded a token")]
    AuthenticationFailed,
}

/// Errors related to HTTP communication with the cloud API.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed (connection, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A call that requires a session token was made before login.
    #[error("not authenticated: no session token")]
    NotAuthenticated,
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_error_display() {
        let err = ProtocolError::NotAuthenticated;
        assert_eq!(err.to_string(), "not authenticated: no session token");
    }

    #[test]
    fn error_from_protocol_error() {
        let err: Error = ProtocolError::NotAuthenticated.into();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::NotAuthenticated)
        ));
    }

    #[test]
    fn authentication_failed_display() {
        let err = Error::AuthenticationFailed;
        assert!(err.to_string().contains("no password variant"));
    }
}
