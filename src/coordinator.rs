// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polling coordinator: one per account, drives the refresh cycle.
//!
//! Each cycle runs ensure-authenticated → device list → per-device status
//! and telemetry, sequentially, then publishes a fresh [`Snapshot`] in one
//! atomic swap. Per-device fetch failures are collapsed to empty records
//! (the entities show "unknown"); only a failed login is reported upward as
//! an update failure.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use tokio::task::JoinHandle;

use crate::api::CloudClient;
use crate::error::Result;
use crate::snapshot::{DeviceSnapshot, Snapshot};
use crate::types::codes;

/// Polling coordinator for one Warmlink account.
///
/// Owns the [`CloudClient`] and the latest [`Snapshot`]; entity projections
/// hold an `Arc<Coordinator>` and read through [`snapshot`](Self::snapshot).
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use warmlink_lib::{ApiConfig, CloudClient, Coordinator};
///
/// # async fn example() -> warmlink_lib::Result<()> {
/// let client = Arc::new(CloudClient::new(ApiConfig::new("user", "pass"))?);
/// let coordinator = Arc::new(Coordinator::new(client, Duration::from_secs(60)));
/// coordinator.refresh().await?;
/// let handle = Arc::clone(&coordinator).spawn();
/// # handle.abort();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Coordinator {
    client: Arc<CloudClient>,
    poll_interval: Duration,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
    consecutive_failures: AtomicU32,
}

impl Coordinator {
    /// Creates a coordinator polling at the given interval.
    #[must_use]
    pub fn new(client: Arc<CloudClient>, poll_interval: Duration) -> Self {
        Self {
            client,
            poll_interval,
            snapshot: RwLock::new(None),
            consecutive_failures: AtomicU32::new(0),
        }
    }

    /// Returns the API client, for entity control actions.
    #[must_use]
    pub fn client(&self) -> &Arc<CloudClient> {
        &self.client
    }

    /// Returns the interval between polling cycles.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns the latest snapshot, if any cycle has completed.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.read().clone()
    }

    /// Returns whether entities should present data: a snapshot exists and
    /// the most recent refresh did not fail.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.snapshot.read().is_some() && self.consecutive_failures.load(Ordering::Relaxed) == 0
    }

    /// Returns how many refreshes in a row have failed.
    #[must_use]
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures.load(Ordering::Relaxed)
    }

    /// Runs one polling cycle and publishes the resulting snapshot.
    ///
    /// Logs and absorbs per-device fetch failures; the affected device gets
    /// empty status/values records. The previous snapshot stays published
    /// until the new one is complete.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::AuthenticationFailed`] when no session token
    /// exists and login fails.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>> {
        if self.client.token().is_none() {
            if let Err(err) = self.client.login().await {
                self.consecutive_failures.fetch_add(1, Ordering::Relaxed);
                return Err(err);
            }
        }

        let records = match self.client.device_list().await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "device list fetch failed, treating as empty");
                Vec::new()
            }
        };

        let mut devices = HashMap::new();
        for record in records {
            let Some(code) = device_code(&record) else {
                tracing::debug!("skipping device record without a device code");
                continue;
            };

            let status = self
                .client
                .device_status(&code)
                .await
                .unwrap_or_else(|err| {
                    tracing::warn!(device_code = %code, error = %err, "status fetch failed");
                    Map::new()
                });
            let values = self
                .client
                .data_by_code(&code, codes::DEFAULT_CODES)
                .await
                .unwrap_or_else(|err| {
                    tracing::warn!(device_code = %code, error = %err, "telemetry fetch failed");
                    HashMap::new()
                });

            devices.insert(
                code.clone(),
                DeviceSnapshot {
                    code,
                    meta: record,
                    status,
                    values,
                },
            );
        }

        let snapshot = Arc::new(Snapshot {
            devices,
            taken_at: Utc::now(),
        });
        self.publish(Arc::clone(&snapshot));
        self.consecutive_failures.store(0, Ordering::Relaxed);
        tracing::debug!(devices = snapshot.devices.len(), "snapshot published");
        Ok(snapshot)
    }

    /// Refreshes now, logging instead of propagating failures.
    ///
    /// Used by entity control actions to pick up the new device state right
    /// after a command.
    pub async fn request_refresh(&self) {
        if let Err(err) = self.refresh().await {
            tracing::warn!(error = %err, "requested refresh failed");
        }
    }

    /// Spawns the periodic polling task.
    ///
    /// The caller keeps the handle and aborts it on unload. The first tick
    /// is skipped: setup already performed the initial refresh.
    #[must_use]
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        let coordinator = self;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(coordinator.poll_interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            interval.tick().await;
            loop {
                interval.tick().await;
                if let Err(err) = coordinator.refresh().await {
                    tracing::warn!(error = %err, "scheduled refresh failed");
                }
            }
        })
    }

    pub(crate) fn publish(&self, snapshot: Arc<Snapshot>) {
        *self.snapshot.write() = Some(snapshot);
    }
}

/// Extracts the device code from a raw device record.
///
/// The cloud answers with either camelCase or snake_case keys and
/// occasionally only a name field; empty strings do not count.
fn device_code(record: &Map<String, Value>) -> Option<String> {
    ["deviceCode", "deviceName", "device_code", "device_name"]
        .iter()
        .find_map(|key| {
            record
                .get(*key)
                .and_then(Value::as_str)
                .filter(|code| !code.is_empty())
        })
        .map(str::to_owned)
}

#[cfg(test)]
pub(crate) fn test_coordinator() -> Arc<Coordinator> {
    let client = CloudClient::new(crate::config::ApiConfig::new("user", "pass"))
        .expect("client for tests");
    Arc::new(Coordinator::new(Arc::new(client), Duration::from_secs(60)))
}
