// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Warmlink Lib - A Rust library for Warmlink heat pumps and water heaters.
//!
//! This library talks to the Warmlink vendor cloud API (the one behind the
//! mobile app) and exposes each device as a set of typed entity
//! projections: a climate entity for heating control, sensors for
//! temperatures, flow and current, and binary sensors for fault and online
//! state.
//!
//! # How it works
//!
//! A [`Coordinator`] polls the cloud on a fixed interval: login (only when
//! no session token is held), list devices, then fetch status and
//! telemetry per device. Each cycle publishes a complete [`Snapshot`];
//! entities are read-only views over the latest snapshot and never observe
//! a half-updated one. The cloud reports most failures as empty payloads,
//! so entities read "unknown" rather than erroring — only a failed login is
//! surfaced as an update failure.
//!
//! # Quick Start
//!
//! ```no_run
//! use warmlink_lib::{ApiConfig, EntryConfig, Registry, entity};
//!
//! #[tokio::main]
//! async fn main() -> warmlink_lib::Result<()> {
//!     let registry = Registry::new();
//!     let entry_id = registry
//!         .setup_entry(EntryConfig::new(ApiConfig::new("user@example.com", "secret")))
//!         .await?;
//!
//!     let coordinator = registry.coordinator(entry_id).await.expect("just set up");
//!     for climate in entity::climates(&coordinator) {
//!         println!(
//!             "{}: {} ({:?} °C)",
//!             climate.name(),
//!             climate.hvac_mode(),
//!             climate.current_temperature(),
//!         );
//!     }
//!
//!     registry.unload_entry(entry_id).await;
//!     Ok(())
//! }
//! ```
//!
//! # Direct client use
//!
//! The [`CloudClient`] can be used without the coordinator for one-off
//! calls:
//!
//! ```no_run
//! use warmlink_lib::{ApiConfig, CloudClient};
//! use warmlink_lib::types::codes;
//!
//! # async fn example() -> warmlink_lib::Result<()> {
//! let client = CloudClient::new(ApiConfig::new("user@example.com", "secret"))?;
//! client.login().await?;
//! for device in client.device_list().await.unwrap_or_default() {
//!     println!("{device:?}");
//! }
//! client.control("D1", codes::POWER, "1").await.ok();
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod coordinator;
pub mod entity;
pub mod error;
pub mod registry;
pub mod snapshot;
pub mod types;

pub use api::CloudClient;
pub use config::{
    API_TIMEOUT, ApiConfig, DEFAULT_BASE_URL, DEFAULT_POLL_INTERVAL, DOMAIN, EntryConfig,
};
pub use coordinator::Coordinator;
pub use entity::{
    BINARY_SENSORS, BinarySensor, BinarySensorDescription, BinarySensorKind, Climate, DeviceInfo,
    SENSORS, Sensor, SensorDescription,
};
pub use error::{Error, ProtocolError, Result};
pub use registry::{EntryId, Registry};
pub use snapshot::{DeviceSnapshot, Snapshot};
pub use types::{HvacMode, SensorValue, Unit};
