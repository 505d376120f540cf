// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor entities: one telemetry point each, from a fixed table.

use std::sync::Arc;

use crate::coordinator::Coordinator;
use crate::entity::{DeviceInfo, with_device};
use crate::types::{SensorValue, Unit, codes};

/// Static description of one sensor kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorDescription {
    /// Short key, unique per device (`<device>_<key>`).
    pub key: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Protocol code this sensor reads.
    pub code: &'static str,
    /// Unit of measurement; unit-bearing sensors parse numerically.
    pub unit: Option<Unit>,
    /// Optional icon hint for frontends.
    pub icon: Option<&'static str>,
}

/// The fixed sensor table, one entry per supported telemetry point.
pub static SENSORS: [SensorDescription; 9] = [
    SensorDescription {
        key: "outside",
        name: "Outside",
        code: codes::OUTSIDE_TEMP,
        unit: Some(Unit::Celsius),
        icon: None,
    },
    SensorDescription {
        key: "inlet",
        name: "Inlet",
        code: codes::INLET_TEMP,
        unit: Some(Unit::Celsius),
        icon: None,
    },
    SensorDescription {
        key: "outlet",
        name: "Outlet",
        code: codes::OUTLET_TEMP,
        unit: Some(Unit::Celsius),
        icon: None,
    },
    SensorDescription {
        key: "flow",
        name: "Flow",
        code: codes::FLOW_RATE,
        unit: Some(Unit::CubicMetersPerHour),
        icon: Some("mdi:water-pump"),
    },
    SensorDescription {
        key: "current",
        name: "Current",
        code: codes::INPUT_CURRENT,
        unit: Some(Unit::Ampere),
        icon: None,
    },
    SensorDescription {
        key: "curve_slope",
        name: "Curve slope",
        code: codes::COMPENSATE_SLOPE,
        unit: None,
        icon: None,
    },
    SensorDescription {
        key: "curve_offset",
        name: "Curve offset",
        code: codes::COMPENSATE_OFFSET,
        unit: None,
        icon: None,
    },
    SensorDescription {
        key: "mode",
        name: "Mode",
        code: codes::MODE,
        unit: None,
        icon: None,
    },
    SensorDescription {
        key: "silent",
        name: "Silent",
        code: codes::MANUAL_MUTE,
        unit: None,
        icon: None,
    },
];

/// Sensor projection: one device, one telemetry point.
#[derive(Debug, Clone)]
pub struct Sensor {
    coordinator: Arc<Coordinator>,
    device_code: String,
    description: &'static SensorDescription,
}

impl Sensor {
    /// Creates the sensor projection for one device and description.
    #[must_use]
    pub fn new(
        coordinator: Arc<Coordinator>,
        device_code: impl Into<String>,
        description: &'static SensorDescription,
    ) -> Self {
        Self {
            coordinator,
            device_code: device_code.into(),
            description,
        }
    }

    /// Returns the sensor description.
    #[must_use]
    pub fn description(&self) -> &'static SensorDescription {
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

    /// Returns the current reading.
    ///
    /// Absent or empty values read as `None`. Unit-bearing sensors parse
    /// numerically (non-numeric → `None`); unit-less sensors pass the raw
    /// string through.
    #[must_use]
    pub fn native_value(&self) -> Option<SensorValue> {
        let raw = with_device(&self.coordinator, &self.device_code, |device| {
            device.value_display(self.description.code)
        })
        .flatten()?;
        if raw.is_empty() {
            return None;
        }
        if self.description.unit.is_some() {
            raw.trim().parse().ok().map(SensorValue::Number)
        } else {
            Some(SensorValue::Text(raw))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::coordinator::test_coordinator;
    use crate::snapshot::{DeviceSnapshot, Snapshot};

    fn description(key: &str) -> &'static SensorDescription {
        SENSORS
            .iter()
            .find(|description| description.key == key)
            .expect("known sensor key")
    }

    fn sensor_with_value(key: &str, code: &str, value: Value) -> Sensor {
        let coordinator = test_coordinator();
        let mut snapshot = Snapshot::default();
        snapshot.devices.insert(
            "D1".to_string(),
            DeviceSnapshot {
                code: "D1".to_string(),
                values: [(code.to_string(), value)].into_iter().collect(),
                ..DeviceSnapshot::default()
            },
        );
        coordinator.publish(Arc::new(snapshot));
        Sensor::new(coordinator, "D1", description(key))
    }

    #[test]
    fn numeric_sensor_parses_float() {
        let sensor = sensor_with_value("inlet", codes::INLET_TEMP, json!("23.5"));
        assert_eq!(sensor.native_value(), Some(SensorValue::Number(23.5)));
    }

    #[test]
    fn numeric_sensor_rejects_garbage() {
        let sensor = sensor_with_value("inlet", codes::INLET_TEMP, json!("ERR"));
        assert_eq!(sensor.native_value(), None);
    }

    #[test]
    fn empty_and_absent_values_are_unknown() {
        let sensor = sensor_with_value("inlet", codes::INLET_TEMP, json!(""));
        assert_eq!(sensor.native_value(), None);

        let sensor = sensor_with_value("inlet", codes::OUTLET_TEMP, json!("20"));
        assert_eq!(sensor.native_value(), None);

        let sensor = sensor_with_value("inlet", codes::INLET_TEMP, Value::Null);
        assert_eq!(sensor.native_value(), None);
    }

    #[test]
    fn unitless_sensor_passes_raw_string() {
        let sensor = sensor_with_value("mode", codes::MODE, json!("AUTO"));
        assert_eq!(
            sensor.native_value(),
            Some(SensorValue::Text("AUTO".to_string()))
        );
    }

    #[test]
    fn unitless_sensor_coerces_numbers_to_text() {
        let sensor = sensor_with_value("curve_slope", codes::COMPENSATE_SLOPE, json!(3));
        assert_eq!(
            sensor.native_value(),
            Some(SensorValue::Text("3".to_string()))
        );
    }

    #[test]
    fn missing_device_is_unknown() {
        let sensor = Sensor::new(test_coordinator(), "GHOST", description("inlet"));
        assert_eq!(sensor.native_value(), None);
    }

    #[test]
    fn identity_and_table() {
        let sensor = sensor_with_value("flow", codes::FLOW_RATE, json!("1.2"));
        assert_eq!(sensor.unique_id(), "D1_flow");
        assert_eq!(sensor.name(), "Warmlink D1 Flow");
        assert_eq!(sensor.description().icon, Some("mdi:water-pump"));
        assert_eq!(
            sensor.description().unit,
            Some(Unit::CubicMetersPerHour)
        );
        assert_eq!(SENSORS.len(), 9);
    }
}
