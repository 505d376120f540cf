// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binary sensor entities: fault and online, read from the status record.

use std::sync::Arc;

use crate::coordinator::Coordinator;
use crate::entity::{DeviceInfo, with_device};
use crate::snapshot::DeviceSnapshot;

/// Which status field a binary sensor reflects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinarySensorKind {
    /// Device reports a fault (`isFault` / `is_fault`).
    Fault,
    /// Device is reachable from the cloud (`status` == "ONLINE").
    Online,
}

/// Static description of one binary sensor kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinarySensorDescription {
    /// Short key, unique per device (`<device>_<key>`).
    pub key: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Which status field is read.
    pub kind: BinarySensorKind,
}

/// The two fixed binary sensors every device gets.
pub static BINARY_SENSORS: [BinarySensorDescription; 2] = [
    BinarySensorDescription {
        key: "fault",
        name: "Fault",
        kind: BinarySensorKind::Fault,
    },
    BinarySensorDescription {
        key: "online",
        name: "Online",
        kind: BinarySensorKind::Online,
    },
];

/// Binary sensor projection: one device, one status flag.
#[derive(Debug, Clone)]
pub struct BinarySensor {
    coordinator: Arc<Coordinator>,
    device_code: String,
    description: &'static BinarySensorDescription,
}

impl BinarySensor {
    /// Creates the binary sensor projection for one device and description.
    #[must_use]
    pub fn new(
        coordinator: Arc<Coordinator>,
        device_code: impl Into<String>,
        description: &'static BinarySensorDescription,
    ) -> Self {
        Self {
            coordinator,
            device_code: device_code.into(),
            description,
        }
    }

    /// Returns the sensor description.
    #[must_use]
    pub fn description(&self) -> &'static BinarySensorDescription {
        self.description
    }

    /// Returns the device code.
    #[must_use]
    pub fn device_code(&self) -> &str {
        &self.device_code
    }

    /// Returns the unique entity id.
    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("{}_{}", self.device_code, self.description.key)
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> String {
        format!("Warmlink {} {}", self.device_code, self.description.name)
    }

    /// Returns the identity of the underlying device.
    #[must_use]
    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo::lookup(&self.coordinator, &self.device_code)
    }

    /// Returns whether the coordinator currently has data to present.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.coordinator.is_available()
    }

    /// Returns the flag value. An absent device or status field reads as
    /// `false`, not unknown — matching the cloud's habit of omitting fields
    /// for healthy devices.
    #[must_use]
    pub fn is_on(&self) -> bool {
        with_device(&self.coordinator, &self.device_code, |device| {
            match self.description.kind {
                BinarySensorKind::Fault => is_fault(device),
                BinarySensorKind::Online => is_online(device),
            }
        })
        .unwrap_or(false)
    }
}

fn is_fault(device: &DeviceSnapshot) -> bool {
    let value = device
        .status_display("isFault")
        .or_else(|| device.status_display("is_fault"));
    matches!(
        value.map(|v| v.to_lowercase()).as_deref(),
        Some("true" | "1" | "yes")
    )
}

fn is_online(device: &DeviceSnapshot) -> bool {
    device
        .status_display("status")
        .is_some_and(|status| status.eq_ignore_ascii_case("ONLINE"))
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::coordinator::test_coordinator;
    use crate::snapshot::Snapshot;

    fn binary_sensor(key: &str, status: Value) -> BinarySensor {
        let description = BINARY_SENSORS
            .iter()
            .find(|description| description.key == key)
            .expect("known binary sensor key");
        let coordinator = test_coordinator();
        let mut snapshot = Snapshot::default();
        snapshot.devices.insert(
            "D1".to_string(),
            DeviceSnapshot {
                code: "D1".to_string(),
                status: status.as_object().cloned().unwrap_or_default(),
                ..DeviceSnapshot::default()
            },
        );
        coordinator.publish(Arc::new(snapshot));
        BinarySensor::new(coordinator, "D1", description)
    }

    #[test]
    fn fault_truthy_values_any_case() {
        for value in ["true", "True", "TRUE", "1", "yes", "YES"] {
            assert!(
                binary_sensor("fault", json!({"isFault": value})).is_on(),
                "expected fault for {value:?}"
            );
        }
    }

    #[test]
    fn fault_falsy_values_and_absent_key() {
        for value in ["false", "0", "no", ""] {
            assert!(
                !binary_sensor("fault", json!({"isFault": value})).is_on(),
                "expected no fault for {value:?}"
            );
        }
        assert!(!binary_sensor("fault", json!({})).is_on());
    }

    #[test]
    fn fault_reads_snake_case_fallback() {
        assert!(binary_sensor("fault", json!({"is_fault": "1"})).is_on());
    }

    #[test]
    fn fault_coerces_boolean_status() {
        assert!(binary_sensor("fault", json!({"isFault": true})).is_on());
        assert!(!binary_sensor("fault", json!({"isFault": false})).is_on());
    }

    #[test]
    fn online_matches_case_insensitively() {
        assert!(binary_sensor("online", json!({"status": "ONLINE"})).is_on());
        assert!(binary_sensor("online", json!({"status": "online"})).is_on());
        assert!(!binary_sensor("online", json!({"status": "OFFLINE"})).is_on());
        assert!(!binary_sensor("online", json!({})).is_on());
    }

    #[test]
    fn missing_device_reads_off() {
        let description = &BINARY_SENSORS[0];
        let sensor = BinarySensor::new(test_coordinator(), "GHOST", description);
        assert!(!sensor.is_on());
    }

    #[test]
    fn identity() {
        let sensor = binary_sensor("online", json!({}));
        assert_eq!(sensor.unique_id(), "D1_online");
        assert_eq!(sensor.name(), "Warmlink D1 Online");
    }
}
