// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory snapshot of all devices on an account.
//!
//! A snapshot is rebuilt wholesale on every polling cycle and published
//! behind an `Arc`; entities only ever see a complete snapshot, never a
//! partially updated one.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// One polling cycle's view of every device on the account.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Per-device records, keyed by device code.
    pub devices: HashMap<String, DeviceSnapshot>,
    /// When this snapshot was assembled.
    pub taken_at: DateTime<Utc>,
}

impl Snapshot {
    /// Returns the device codes in this snapshot, sorted for stable iteration.
    #[must_use]
    pub fn device_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.devices.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Looks up one device by code.
    #[must_use]
    pub fn device(&self, code: &str) -> Option<&DeviceSnapshot> {
        self.devices.get(code)
    }
}

/// Raw cloud records for a single device.
#[derive(Debug, Clone, Default)]
pub struct DeviceSnapshot {
    /// The device code identifying this device.
    pub code: String,
    /// Raw device record from the device list.
    pub meta: Map<String, Value>,
    /// Raw status record (`status`, `isFault`, ...).
    pub status: Map<String, Value>,
    /// Telemetry values keyed by protocol code.
    pub values: HashMap<String, Value>,
}

impl DeviceSnapshot {
    /// Returns the raw telemetry value for a protocol code.
    #[must_use]
    pub fn value(&self, code: &str) -> Option<&Value> {
        self.values.get(code)
    }

    /// Returns the telemetry value for a protocol code as a display string.
    ///
    /// Numbers and booleans are coerced; `null` and absent values are `None`.
    #[must_use]
    pub fn value_display(&self, code: &str) -> Option<String> {
        self.values.get(code).and_then(display_value)
    }

    /// Returns a status field as a display string.
    #[must_use]
    pub fn status_display(&self, key: &str) -> Option<String> {
        self.status.get(key).and_then(display_value)
    }

    /// Returns the display name: the meta record's `deviceName` (or
    /// `device_name`), falling back to the device code.
    #[must_use]
    pub fn name(&self) -> &str {
        self.meta
            .get("deviceName")
            .or_else(|| self.meta.get("device_name"))
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.code)
    }

    /// Returns the model string from the meta record's `custModel`.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.meta.get("custModel").and_then(Value::as_str)
    }
}

/// Coerces a JSON scalar to a display string. `null` yields `None`.
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        // Structured values are not displayable readings.
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn device(meta: Value, status: Value, values: &[(&str, Value)]) -> DeviceSnapshot {
        DeviceSnapshot {
            code: "D1".to_string(),
            meta: meta.as_object().cloned().unwrap_or_default(),
            status: status.as_object().cloned().unwrap_or_default(),
            values: values
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn value_display_coerces_scalars() {
        let dev = device(
            json!({}),
            json!({}),
            &[
                ("T01", json!("22.1")),
                ("Power", json!(1)),
                ("Flag", json!(true)),
                ("Empty", Value::Null),
            ],
        );
        assert_eq!(dev.value_display("T01"), Some("22.1".to_string()));
        assert_eq!(dev.value_display("Power"), Some("1".to_string()));
        assert_eq!(dev.value_display("Flag"), Some("true".to_string()));
        assert_eq!(dev.value_display("Empty"), None);
        assert_eq!(dev.value_display("Absent"), None);
    }

    #[test]
    fn name_prefers_meta_then_falls_back_to_code() {
        let dev = device(json!({"deviceName": "Pump house"}), json!({}), &[]);
        assert_eq!(dev.name(), "Pump house");

        let dev = device(json!({"device_name": "Snake case"}), json!({}), &[]);
        assert_eq!(dev.name(), "Snake case");

        let dev = device(json!({"deviceName": ""}), json!({}), &[]);
        assert_eq!(dev.name(), "D1");

        let dev = device(json!({}), json!({}), &[]);
        assert_eq!(dev.name(), "D1");
    }

    #[test]
    fn model_reads_cust_model() {
        let dev = device(json!({"custModel": "WL-09"}), json!({}), &[]);
        assert_eq!(dev.model(), Some("WL-09"));
        let dev = device(json!({}), json!({}), &[]);
        assert_eq!(dev.model(), None);
    }

    #[test]
    fn device_codes_sorted() {
        let mut snapshot = Snapshot::default();
        for code in ["B", "A", "C"] {
            snapshot.devices.insert(
                code.to_string(),
                DeviceSnapshot {
                    code: code.to_string(),
                    ..DeviceSnapshot::default()
                },
            );
        }
        assert_eq!(snapshot.device_codes(), vec!["A", "B", "C"]);
        assert!(snapshot.device("A").is_some());
        assert!(snapshot.device("Z").is_none());
    }
}
