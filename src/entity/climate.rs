// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate entity: heating on/off plus target water temperature.

use std::sync::Arc;

use crate::coordinator::Coordinator;
use crate::entity::{DeviceInfo, with_device};
use crate::types::{HvacMode, Unit, codes};

/// Climate projection for one Warmlink device.
///
/// Reads heating state and temperatures from the snapshot; control actions
/// send a command and then refresh immediately so the next read reflects
/// the change. Actions return whether the cloud accepted the command and
/// never fail hard — a transport error logs and reads as `false`.
#[derive(Debug, Clone)]
pub struct Climate {
    coordinator: Arc<Coordinator>,
    device_code: String,
}

impl Climate {
    /// Lowest accepted target temperature, in °C.
    pub const MIN_TEMP: f64 = 15.0;
    /// Highest accepted target temperature, in °C.
    pub const MAX_TEMP: f64 = 75.0;

    /// Creates the climate projection for one device.
    #[must_use]
    pub fn new(coordinator: Arc<Coordinator>, device_code: impl Into<String>) -> Self {
        Self {
            coordinator,
            device_code: device_code.into(),
        }
    }

    /// Returns the device code.
    #[must_use]
    pub fn device_code(&self) -> &str {
        &self.device_code
    }

    /// Returns the unique entity id.
    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("{}_climate", self.device_code)
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> String {
        format!("Warmlink {}", self.device_code)
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

    /// Returns the current mode: [`HvacMode::Heat`] iff the power value is
    /// the string `"1"`.
    #[must_use]
    pub fn hvac_mode(&self) -> HvacMode {
        match self.value_display(codes::POWER) {
            Some(power) if power == "1" => HvacMode::Heat,
            _ => HvacMode::Off,
        }
    }

    /// Returns the modes this device supports.
    #[must_use]
    pub const fn hvac_modes(&self) -> [HvacMode; 2] {
        [HvacMode::Heat, HvacMode::Off]
    }

    /// Returns the temperature unit; always Celsius.
    #[must_use]
    pub const fn temperature_unit(&self) -> Unit {
        Unit::Celsius
    }

    /// Returns the inlet water temperature, or `None` when unknown or
    /// non-numeric.
    #[must_use]
    pub fn current_temperature(&self) -> Option<f64> {
        self.numeric_value(codes::INLET_TEMP)
    }

    /// Returns the target temperature setpoint, or `None` when unknown or
    /// non-numeric.
    #[must_use]
    pub fn target_temperature(&self) -> Option<f64> {
        self.numeric_value(codes::TARGET_TEMP)
    }

    /// Returns the lowest accepted target temperature.
    #[must_use]
    pub const fn min_temp(&self) -> f64 {
        Self::MIN_TEMP
    }

    /// Returns the highest accepted target temperature.
    #[must_use]
    pub const fn max_temp(&self) -> f64 {
        Self::MAX_TEMP
    }

    /// Sets the target temperature.
    ///
    /// Returns whether the cloud accepted the command.
    pub async fn set_temperature(&self, temperature: f64) -> bool {
        self.control(codes::TARGET_TEMP, &temperature.to_string())
            .await
    }

    /// Switches heating on or off.
    pub async fn set_hvac_mode(&self, mode: HvacMode) -> bool {
        match mode {
            HvacMode::Heat => self.turn_on().await,
            HvacMode::Off => self.turn_off().await,
        }
    }

    /// Turns heating on.
    pub async fn turn_on(&self) -> bool {
        self.control(codes::POWER, "1").await
    }

    /// Turns heating off.
    pub async fn turn_off(&self) -> bool {
        self.control(codes::POWER, "0").await
    }

    async fn control(&self, protocol_code: &str, value: &str) -> bool {
        let accepted = match self
            .coordinator
            .client()
            .control(&self.device_code, protocol_code, value)
            .await
        {
            Ok(accepted) => accepted,
            Err(err) => {
                tracing::warn!(
                    device_code = %self.device_code,
                    protocol_code,
                    error = %err,
                    "control command failed"
                );
                false
            }
        };
        self.coordinator.request_refresh().await;
        accepted
    }

    fn value_display(&self, code: &str) -> Option<String> {
        with_device(&self.coordinator, &self.device_code, |device| {
            device.value_display(code)
        })
        .flatten()
    }

    fn numeric_value(&self, code: &str) -> Option<f64> {
        self.value_display(code)
            .and_then(|value| value.trim().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::coordinator::test_coordinator;
    use crate::snapshot::{DeviceSnapshot, Snapshot};

    fn climate_with_values(values: &[(&str, Value)]) -> Climate {
        let coordinator = test_coordinator();
        let mut snapshot = Snapshot::default();
        snapshot.devices.insert(
            "D1".to_string(),
            DeviceSnapshot {
                code: "D1".to_string(),
                values: values
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), v.clone()))
                    .collect(),
                ..DeviceSnapshot::default()
            },
        );
        coordinator.publish(Arc::new(snapshot));
        Climate::new(coordinator, "D1")
    }

    #[test]
    fn hvac_mode_heat_only_for_string_one() {
        assert_eq!(
            climate_with_values(&[("Power", json!("1"))]).hvac_mode(),
            HvacMode::Heat
        );
        assert_eq!(
            climate_with_values(&[("Power", json!("0"))]).hvac_mode(),
            HvacMode::Off
        );
        assert_eq!(
            climate_with_values(&[("Power", json!("2"))]).hvac_mode(),
            HvacMode::Off
        );
        assert_eq!(climate_with_values(&[]).hvac_mode(), HvacMode::Off);
    }

    #[test]
    fn hvac_mode_coerces_numeric_power() {
        // The cloud sometimes reports the value as a JSON number.
        assert_eq!(
            climate_with_values(&[("Power", json!(1))]).hvac_mode(),
            HvacMode::Heat
        );
    }

    #[test]
    fn temperatures_parse_as_float() {
        let climate = climate_with_values(&[("T01", json!("22.1")), ("R02", json!("48"))]);
        assert_eq!(climate.current_temperature(), Some(22.1));
        assert_eq!(climate.target_temperature(), Some(48.0));
    }

    #[test]
    fn non_numeric_temperature_is_unknown() {
        let climate = climate_with_values(&[("T01", json!("--")), ("R02", json!(""))]);
        assert_eq!(climate.current_temperature(), None);
        assert_eq!(climate.target_temperature(), None);
    }

    #[test]
    fn missing_device_reads_as_off_and_unknown() {
        let climate = Climate::new(test_coordinator(), "GHOST");
        assert_eq!(climate.hvac_mode(), HvacMode::Off);
        assert_eq!(climate.current_temperature(), None);
    }

    #[test]
    fn fixed_range_and_identity() {
        let climate = climate_with_values(&[]);
        assert_eq!(climate.min_temp(), 15.0);
        assert_eq!(climate.max_temp(), 75.0);
        assert_eq!(climate.temperature_unit(), Unit::Celsius);
        assert_eq!(climate.unique_id(), "D1_climate");
        assert_eq!(climate.name(), "Warmlink D1");
        assert_eq!(climate.hvac_modes(), [HvacMode::Heat, HvacMode::Off]);
    }
}
