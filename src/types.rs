// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the entity projections.

use std::fmt;

/// Protocol codes understood by Warmlink devices.
///
/// A protocol code is the string key of one telemetry or control point,
/// as used by the `getDataByCode` and `control` endpoints.
pub mod codes {
    /// Power switch ("1" = on).
    pub const POWER: &str = "Power";
    /// Operating mode.
    pub const MODE: &str = "Mode";
    /// Silent mode flag.
    pub const MANUAL_MUTE: &str = "Manual-mute";
    /// Compressor input current, in amperes.
    pub const INPUT_CURRENT: &str = "InputCurrent1";
    /// Target water temperature setpoint.
    pub const TARGET_TEMP: &str = "R02";
    /// Inlet water temperature.
    pub const INLET_TEMP: &str = "T01";
    /// Outlet water temperature.
    pub const OUTLET_TEMP: &str = "T02";
    /// Coil temperature.
    pub const COIL_TEMP: &str = "T03";
    /// Outside air temperature.
    pub const OUTSIDE_TEMP: &str = "T04";
    /// Exhaust temperature.
    pub const EXHAUST_TEMP: &str = "T05";
    /// Suction temperature.
    pub const SUCTION_TEMP: &str = "T08";
    /// Water flow rate, in m³/h.
    pub const FLOW_RATE: &str = "T39";
    /// Heating-curve compensation slope.
    pub const COMPENSATE_SLOPE: &str = "compensate_slope";
    /// Heating-curve compensation offset.
    pub const COMPENSATE_OFFSET: &str = "compensate_offset";

    /// The fixed set of codes fetched on every polling cycle.
    pub const DEFAULT_CODES: &[&str] = &[
        POWER,
        MODE,
        MANUAL_MUTE,
        INPUT_CURRENT,
        TARGET_TEMP,
        INLET_TEMP,
        OUTLET_TEMP,
        COIL_TEMP,
        OUTSIDE_TEMP,
        EXHAUST_TEMP,
        SUCTION_TEMP,
        FLOW_RATE,
        COMPENSATE_SLOPE,
        COMPENSATE_OFFSET,
    ];
}

/// HVAC operating mode of a Warmlink climate device.
///
/// Warmlink heat pumps only distinguish "heating" from "off".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HvacMode {
    /// The device is heating.
    Heat,
    /// The device is off.
    Off,
}

impl HvacMode {
    /// Returns the lowercase mode name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Heat => "heat",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unit of measurement attached to a sensor description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Degrees Celsius.
    Celsius,
    /// Cubic meters per hour.
    CubicMetersPerHour,
    /// Amperes.
    Ampere,
}

impl Unit {
    /// Returns the display symbol for this unit.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::CubicMetersPerHour => "m³/h",
            Self::Ampere => "A",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A sensor reading: numeric when the sensor carries a unit, otherwise the
/// raw device string (mode names, flags).
#[derive(Debug, Clone, PartialEq)]
pub enum SensorValue {
    /// Parsed numeric reading.
    Number(f64),
    /// Raw textual reading.
    Text(String),
}

impl SensorValue {
    /// Returns the numeric reading, if this is a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    /// Returns the textual reading, if this is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(value) => Some(value),
        }
    }
}

impl fmt::Display for SensorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hvac_mode_as_str() {
        assert_eq!(HvacMode::Heat.as_str(), "heat");
        assert_eq!(HvacMode::Off.as_str(), "off");
        assert_eq!(HvacMode::Heat.to_string(), "heat");
    }

    #[test]
    fn unit_symbols() {
        assert_eq!(Unit::Celsius.symbol(), "°C");
        assert_eq!(Unit::CubicMetersPerHour.symbol(), "m³/h");
        assert_eq!(Unit::Ampere.symbol(), "A");
    }

    #[test]
    fn sensor_value_accessors() {
        assert_eq!(SensorValue::Number(23.5).as_f64(), Some(23.5));
        assert_eq!(SensorValue::Number(23.5).as_text(), None);
        let text = SensorValue::Text("AUTO".to_string());
        assert_eq!(text.as_f64(), None);
        assert_eq!(text.as_text(), Some("AUTO"));
        assert_eq!(text.to_string(), "AUTO");
    }

    #[test]
    fn default_codes_cover_all_points() {
        assert_eq!(codes::DEFAULT_CODES.len(), 14);
        assert!(codes::DEFAULT_CODES.contains(&codes::POWER));
        assert!(codes::DEFAULT_CODES.contains(&codes::TARGET_TEMP));
        assert!(codes::DEFAULT_CODES.contains(&codes::COMPENSATE_OFFSET));
    }
}
