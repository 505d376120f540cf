// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the Warmlink cloud API.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::auth::{self, PasswordMode};
use crate::config::{API_TIMEOUT, ApiConfig};
use crate::error::{Error, ProtocolError, Result};

/// Client for the Warmlink cloud API.
///
/// Stateless except for the session token acquired by [`login`](Self::login).
/// All calls return `Result` so callers can tell a transport failure from a
/// legitimately empty payload; the polling coordinator collapses failures to
/// empty records at the snapshot boundary.
///
/// A response that is not JSON, or whose `objectResult` has an unexpected
/// shape, is not an error — it decodes to the empty payload, matching the
/// vendor API's habit of answering garbage instead of error statuses.
///
/// # Examples
///
/// ```no_run
/// use warmlink_lib::{ApiConfig, CloudClient};
///
/// # async fn example() -> warmlink_lib::Result<()> {
/// let client = CloudClient::new(ApiConfig::new("user@example.com", "secret"))?;
/// client.login().await?;
/// for device in client.device_list().await? {
///     println!("{device:?}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CloudClient {
    config: ApiConfig,
    http: reqwest::Client,
    token: RwLock<Option<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    password: &'a str,
    login_source: &'a str,
    area_code: &'a str,
    app_id: &'a str,
    #[serde(rename = "type")]
    device_type: &'a str,
    user_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusRequest<'a> {
    app_id: &'a str,
    device_code: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DataByCodeRequest<'a> {
    device_code: &'a str,
    app_id: &'a str,
    // Misspelling is the vendor's, not ours.
    #[serde(rename = "protocalCodes")]
    protocal_codes: &'a [&'a str],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ControlRequest<'a> {
    app_id: &'a str,
    param: [ControlParam<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ControlParam<'a> {
    device_code: &'a str,
    protocol_code: &'a str,
    value: &'a str,
}

impl CloudClient {
    /// Creates a client for the given configuration.
    ///
    /// The per-request timeout ([`API_TIMEOUT`]) is set on the underlying
    /// HTTP client; there is no overall per-cycle timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: ApiConfig) -> std::result::Result<Self, ProtocolError> {
        let http = reqwest::Client::builder()
            .timeout(API_TIMEOUT)
            .build()
            .map_err(ProtocolError::Http)?;
        Ok(Self {
            config,
            http,
            token: RwLock::new(None),
        })
    }

    /// Returns the current session token, if logged in.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Returns the configuration this client was built from.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Logs in, probing the password as plaintext, MD5, then double MD5.
    ///
    /// Stops at the first response that yields a token and stores it for
    /// subsequent calls. A transport error during one probe only fails that
    /// probe.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthenticationFailed`] when no variant produced a
    /// token.
    pub async fn login(&self) -> Result<String> {
        for mode in PasswordMode::ALL {
            let password = mode.encode(self.config.password());
            let body = LoginRequest {
                password: &password,
                login_source: self.config.login_source(),
                area_code: self.config.area_code(),
                app_id: self.config.app_id(),
                device_type: self.config.device_type(),
                user_name: self.config.username(),
            };
            let data = match self.post_json("/user/login", true, None, &body).await {
                Ok(data) => data,
                Err(err) => {
                    tracing::debug!(%mode, error = %err, "login probe failed");
                    continue;
                }
            };
            if let Some(token) = auth::extract_token(&data) {
                tracing::info!(%mode, username = self.config.username(), "authenticated");
                *self.token.write() = Some(token.clone());
                return Ok(token);
            }
            tracing::debug!(%mode, "login response carried no token");
        }
        Err(Error::AuthenticationFailed)
    }

    /// Fetches the raw device records for the account.
    ///
    /// Non-object entries in the response list are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::NotAuthenticated`] without a token, or the
    /// transport error when the request itself fails.
    pub async fn device_list(&self) -> std::result::Result<Vec<Map<String, Value>>, ProtocolError> {
        let token = self.token().ok_or(ProtocolError::NotAuthenticated)?;
        let data = self
            .post_json(
                "/device/deviceList",
                false,
                Some(&token),
                &serde_json::json!({}),
            )
            .await?;
        Ok(object_result_list(&data))
    }

    /// Fetches the raw status record for one device.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::NotAuthenticated`] without a token, or the
    /// transport error when the request itself fails.
    pub async fn device_status(
        &self,
        device_code: &str,
    ) -> std::result::Result<Map<String, Value>, ProtocolError> {
        let token = self.token().ok_or(ProtocolError::NotAuthenticated)?;
        let body = StatusRequest {
            app_id: self.config.app_id(),
            device_code,
        };
        let data = self
            .post_json("/device/getDeviceStatus", true, Some(&token), &body)
            .await?;
        Ok(object_result_object(&data))
    }

    /// Fetches telemetry values for one device, keyed by protocol code.
    ///
    /// Entries with a missing, empty, or non-string `code` are dropped;
    /// duplicate codes resolve last-write-wins.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::NotAuthenticated`] without a token, or the
    /// transport error when the request itself fails.
    pub async fn data_by_code(
        &self,
        device_code: &str,
        codes: &[&str],
    ) -> std::result::Result<HashMap<String, Value>, ProtocolError> {
        let token = self.token().ok_or(ProtocolError::NotAuthenticated)?;
        let body = DataByCodeRequest {
            device_code,
            app_id: self.config.app_id(),
            protocal_codes: codes,
        };
        let data = self
            .post_json("/device/getDataByCode", true, Some(&token), &body)
            .await?;
        Ok(code_value_map(&data))
    }

    /// Sends a single control command to a device.
    ///
    /// Returns `Ok(true)` when the server answered with a non-empty body,
    /// `Ok(false)` for an empty or unparseable one.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::NotAuthenticated`] without a token, or the
    /// transport error when the request itself fails.
    pub async fn control(
        &self,
        device_code: &str,
        protocol_code: &str,
        value: &str,
    ) -> std::result::Result<bool, ProtocolError> {
        let token = self.token().ok_or(ProtocolError::NotAuthenticated)?;
        let body = ControlRequest {
            app_id: self.config.app_id(),
            param: [ControlParam {
                device_code,
                protocol_code,
                value,
            }],
        };
        let data = self
            .post_json("/device/control", true, Some(&token), &body)
            .await?;
        let accepted = non_empty(&data);
        tracing::debug!(device_code, protocol_code, value, accepted, "control command sent");
        Ok(accepted)
    }

    async fn post_json<B>(
        &self,
        path: &str,
        with_lang: bool,
        token: Option<&str>,
        body: &B,
    ) -> std::result::Result<Value, ProtocolError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{path}", self.config.base_url());
        tracing::debug!(%url, "sending cloud API request");

        let mut request = self.http.post(&url).json(body);
        if with_lang {
            request = request.query(&[("lang", self.config.lang())]);
        }
        if let Some(token) = token {
            request = request.header("x-token", token);
        }

        let response = request.send().await.map_err(ProtocolError::Http)?;
        match response.json::<Value>().await {
            Ok(data) => Ok(data),
            Err(err) => {
                tracing::debug!(%url, error = %err, "response body was not JSON, treating as empty");
                Ok(Value::Null)
            }
        }
    }
}

/// Reads `objectResult` as a list of objects, dropping everything else.
fn object_result_list(data: &Value) -> Vec<Map<String, Value>> {
    data.get("objectResult")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_object().cloned())
                .collect()
        })
        .unwrap_or_default()
}

/// Reads `objectResult` as an object, or empty when it is anything else.
fn object_result_object(data: &Value) -> Map<String, Value> {
    data.get("objectResult")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

/// Builds a code → value map from an `objectResult` list of `{code, value}`.
fn code_value_map(data: &Value) -> HashMap<String, Value> {
    let mut result = HashMap::new();
    let Some(items) = data.get("objectResult").and_then(Value::as_array) else {
        return result;
    };
    for item in items {
        let Some(obj) = item.as_object() else {
            continue;
        };
        let Some(code) = obj.get("code").and_then(Value::as_str) else {
            continue;
        };
        if code.is_empty() {
            continue;
        }
        result.insert(
            code.to_string(),
            obj.get("value").cloned().unwrap_or(Value::Null),
        );
    }
    result
}

/// Python-style truthiness for a JSON value, used for the control response.
fn non_empty(data: &Value) -> bool {
    match data {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
