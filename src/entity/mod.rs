// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity projections over the coordinator snapshot.
//!
//! Entities are passive value objects: a coordinator handle, a device code,
//! and for sensors a static description. Every reading goes through the
//! current snapshot; nothing is cached per entity. Only the climate entity
//! issues commands back through the API client.

pub mod binary_sensor;
pub mod climate;
pub mod sensor;

use std::sync::Arc;

pub use binary_sensor::{BINARY_SENSORS, BinarySensor, BinarySensorDescription, BinarySensorKind};
pub use climate::Climate;
pub use sensor::{SENSORS, Sensor, SensorDescription};

use crate::config::DOMAIN;
use crate::coordinator::Coordinator;
use crate::snapshot::DeviceSnapshot;

/// Identity of a physical device, shared by all its entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Namespaced identifier: the integration domain plus the device code.
    pub identifiers: (&'static str, String),
    /// Display name from the device record, falling back to the code.
    pub name: String,
    /// Always "Warmlink".
    pub manufacturer: &'static str,
    /// Model string, when the cloud reports one.
    pub model: Option<String>,
}

impl DeviceInfo {
    fn from_device(device: &DeviceSnapshot) -> Self {
        Self {
            identifiers: (DOMAIN, device.code.clone()),
            name: device.name().to_string(),
            manufacturer: "Warmlink",
            model: device.model().map(str::to_owned),
        }
    }

    fn unknown(device_code: &str) -> Self {
        Self {
            identifiers: (DOMAIN, device_code.to_string()),
            name: device_code.to_string(),
            manufacturer: "Warmlink",
            model: None,
        }
    }

    pub(crate) fn lookup(coordinator: &Coordinator, device_code: &str) -> Self {
        with_device(coordinator, device_code, DeviceInfo::from_device)
            .unwrap_or_else(|| DeviceInfo::unknown(device_code))
    }
}

/// Runs a closure against one device of the current snapshot.
pub(crate) fn with_device<T>(
    coordinator: &Coordinator,
    device_code: &str,
    f: impl FnOnce(&DeviceSnapshot) -> T,
) -> Option<T> {
    let snapshot = coordinator.snapshot()?;
    snapshot.device(device_code).map(f)
}

fn snapshot_device_codes(coordinator: &Coordinator) -> Vec<String> {
    coordinator
        .snapshot()
        .map(|snapshot| {
            snapshot
                .device_codes()
                .into_iter()
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// Builds one climate entity per device in the current snapshot.
#[must_use]
pub fn climates(coordinator: &Arc<Coordinator>) -> Vec<Climate> {
    snapshot_device_codes(coordinator)
        .into_iter()
        .map(|code| Climate::new(Arc::clone(coordinator), code))
        .collect()
}

/// Builds the full sensor set for every device in the current snapshot.
#[must_use]
pub fn sensors(coordinator: &Arc<Coordinator>) -> Vec<Sensor> {
    snapshot_device_codes(coordinator)
        .into_iter()
        .flat_map(|code| {
            SENSORS
                .iter()
                .map(move |description| {
                    Sensor::new(Arc::clone(coordinator), code.clone(), description)
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Builds the fault and online binary sensors for every device in the
/// current snapshot.
#[must_use]
pub fn binary_sensors(coordinator: &Arc<Coordinator>) -> Vec<BinarySensor> {
    snapshot_device_codes(coordinator)
        .into_iter()
        .flat_map(|code| {
            BINARY_SENSORS
                .iter()
                .map(move |description| {
                    BinarySensor::new(Arc::clone(coordinator), code.clone(), description)
                })
                .collect::<Vec<_>>()
        })
        .collect()
}
