// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration for the Warmlink cloud API and for registry entries.
//!
//! Only the username and password are required; every other field carries
//! the static default the vendor's mobile app uses. Reachability is not
//! validated here — the first coordinator refresh after setup is the
//! validation step.

use std::time::Duration;

/// Integration domain, used as the identifier namespace in [`crate::entity::DeviceInfo`].
pub const DOMAIN: &str = "warmlink";

/// Default cloud API base URL.
pub const DEFAULT_BASE_URL: &str = "https://cloud.linked-go.com:449/crmservice/api/app";
/// Default response language.
pub const DEFAULT_LANG: &str = "en";
/// Default login source reported to the API.
pub const DEFAULT_LOGIN_SOURCE: &str = "ANDROID";
/// Default area code.
pub const DEFAULT_AREA_CODE: &str = "en";
/// Default application id.
pub const DEFAULT_APP_ID: &str = "16";
/// Default device type.
pub const DEFAULT_DEVICE_TYPE: &str = "2";

/// Per-request timeout enforced by the HTTP client.
pub const API_TIMEOUT: Duration = Duration::from_secs(15);
/// Default interval between polling cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Connection parameters for the Warmlink cloud API.
///
/// Immutable once built. All optional fields default to the values the
/// vendor app ships with.
///
/// # Examples
///
/// ```
/// use warmlink_lib::ApiConfig;
///
/// let config = ApiConfig::new("user@example.com", "secret");
///
/// // With overrides
/// let config = ApiConfig::new("user@example.com", "secret")
///     .with_base_url("https://cloud.example.com/api/app")
///     .with_lang("de");
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    username: String,
    password: String,
    base_url: String,
    lang: String,
    login_source: String,
    area_code: String,
    app_id: String,
    device_type: String,
}

impl ApiConfig {
    /// Creates a configuration with the given credentials and all defaults.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: DEFAULT_LANG.to_string(),
            login_source: DEFAULT_LOGIN_SOURCE.to_string(),
            area_code: DEFAULT_AREA_CODE.to_string(),
            app_id: DEFAULT_APP_ID.to_string(),
            device_type: DEFAULT_DEVICE_TYPE.to_string(),
        }
    }

    /// Sets a custom base URL. A trailing `/` is stripped.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Sets the response language.
    #[must_use]
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Sets the login source.
    #[must_use]
    pub fn with_login_source(mut self, login_source: impl Into<String>) -> Self {
        self.login_source = login_source.into();
        self
    }

    /// Sets the area code.
    #[must_use]
    pub fn with_area_code(mut self, area_code: impl Into<String>) -> Self {
        self.area_code = area_code.into();
        self
    }

    /// Sets the application id.
    #[must_use]
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self
    }

    /// Sets the device type.
    #[must_use]
    pub fn with_device_type(mut self, device_type: impl Into<String>) -> Self {
        self.device_type = device_type.into();
        self
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the base URL, without trailing `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the response language.
    #[must_use]
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Returns the login source.
    #[must_use]
    pub fn login_source(&self) -> &str {
        &self.login_source
    }

    /// Returns the area code.
    #[must_use]
    pub fn area_code(&self) -> &str {
        &self.area_code
    }

    /// Returns the application id.
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Returns the device type.
    #[must_use]
    pub fn device_type(&self) -> &str {
        &self.device_type
    }
}

/// Configuration for one registry entry: API access plus polling cadence.
///
/// Entries are keyed by username — adding the same account twice replaces
/// nothing here, that policy belongs to the embedding application.
#[derive(Debug, Clone)]
pub struct EntryConfig {
    api: ApiConfig,
    poll_interval: Duration,
}

impl EntryConfig {
    /// Creates an entry configuration with the default poll interval.
    #[must_use]
    pub fn new(api: ApiConfig) -> Self {
        Self {
            api,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets the interval between polling cycles.
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Returns the API configuration.
    #[must_use]
    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    /// Returns the poll interval.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns the key identifying this entry: the account username.
    #[must_use]
    pub fn entry_key(&self) -> &str {
        self.api.username()
    }
}
