// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Login helpers: password variants and token extraction.
//!
//! The cloud API accepts the password in one of three encodings depending
//! on account age — plaintext, MD5, or MD5-of-MD5. Login probes them in
//! that order and stops at the first response that yields a token. Token
//! placement in the response is equally inconsistent, so extraction checks
//! several key spellings inside and outside the `objectResult` envelope.

use std::fmt;

use md5::{Digest, Md5};
use serde_json::Value;

/// Computes the lowercase hex MD5 digest of a string.
#[must_use]
pub(crate) fn md5_hex(value: &str) -> String {
    use std::fmt::Write;

    let digest = Md5::digest(value.as_bytes());
    digest.iter().fold(
        String::with_capacity(digest.len() * 2),
        |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        },
    )
}

/// Password encoding variant tried during login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PasswordMode {
    /// Password sent as-is.
    Plain,
    /// Single MD5 hex digest.
    Md5,
    /// MD5 hex digest applied twice.
    DoubleMd5,
}

impl PasswordMode {
    /// All variants, in probe order.
    pub(crate) const ALL: [Self; 3] = [Self::Plain, Self::Md5, Self::DoubleMd5];

    /// Encodes the password for this variant.
    pub(crate) fn encode(self, password: &str) -> String {
        match self {
            Self::Plain => password.to_string(),
            Self::Md5 => md5_hex(password),
            Self::DoubleMd5 => md5_hex(&md5_hex(password)),
        }
    }
}

impl fmt::Display for PasswordMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Plain => "plain",
            Self::Md5 => "md5",
            Self::DoubleMd5 => "md5md5",
        };
        write!(f, "{name}")
    }
}

/// Key spellings the token has been observed under.
const TOKEN_KEYS: [&str; 4] = ["x-token", "xToken", "token", "x_token"];

/// Extracts a session token from a login response.
///
/// Looks inside the `objectResult` object first, then at the top level.
/// Only non-empty strings count; surrounding whitespace is stripped.
/// Returns `None` for non-object input.
#[must_use]
pub(crate) fn extract_token(data: &Value) -> Option<String> {
    let map = data.as_object()?;

    if let Some(obj) = map.get("objectResult").and_then(Value::as_object) {
        for key in TOKEN_KEYS {
            if let Some(token) = non_empty_str(obj.get(key)) {
                return Some(token);
            }
        }
    }
    for key in ["x-token", "xToken", "token"] {
        if let Some(token) = non_empty_str(map.get(key)) {
            return Some(token);
        }
    }
    None
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    let s = value?.as_str()?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn md5_hex_known_vector() {
        assert_eq!(md5_hex("password"), "5f4dcc3b5aa765d61d8327deb882cf99");
    }

    #[test]
    fn password_modes_in_probe_order() {
        assert_eq!(
            PasswordMode::ALL,
            [
                PasswordMode::Plain,
                PasswordMode::Md5,
                PasswordMode::DoubleMd5
            ]
        );
    }

    #[test]
    fn password_mode_encodings() {
        assert_eq!(PasswordMode::Plain.encode("secret"), "secret");
        assert_eq!(PasswordMode::Md5.encode("secret"), md5_hex("secret"));
        assert_eq!(
            PasswordMode::DoubleMd5.encode("secret"),
            md5_hex(&md5_hex("secret"))
        );
    }

    #[test]
    fn extract_token_from_object_result() {
        let data = json!({"objectResult": {"x-token": "T"}});
        assert_eq!(extract_token(&data), Some("T".to_string()));

        let data = json!({"objectResult": {"xToken": "T"}});
        assert_eq!(extract_token(&data), Some("T".to_string()));

        let data = json!({"objectResult": {"token": "T"}});
        assert_eq!(extract_token(&data), Some("T".to_string()));

        let data = json!({"objectResult": {"x_token": "T"}});
        assert_eq!(extract_token(&data), Some("T".to_string()));
    }

    #[test]
    fn extract_token_top_level() {
        let data = json!({"token": "T"});
        assert_eq!(extract_token(&data), Some("T".to_string()));
    }

    #[test]
    fn extract_token_trims_whitespace() {
        let data = json!({"objectResult": {"token": "  T  "}});
        assert_eq!(extract_token(&data), Some("T".to_string()));
    }

    #[test]
    fn extract_token_rejects_empty_and_non_string() {
        assert_eq!(extract_token(&json!({"objectResult": {}})), None);
        assert_eq!(extract_token(&json!({"objectResult": {"token": ""}})), None);
        assert_eq!(extract_token(&json!({"objectResult": {"token": 42}})), None);
        assert_eq!(extract_token(&json!("not a dict")), None);
        assert_eq!(extract_token(&Value::Null), None);
    }

    #[test]
    fn object_result_preferred_over_top_level() {
        let data = json!({"token": "outer", "objectResult": {"x-token": "inner"}});
        assert_eq!(extract_token(&data), Some("inner".to_string()));
    }
}
