// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entry registry: explicit ownership of coordinators per account entry.
//!
//! The embedding application holds one [`Registry`]; `setup_entry` builds
//! the client and coordinator, performs the first refresh (so a bad
//! password fails setup instead of lingering), and spawns the polling
//! task. `unload_entry` aborts the task and drops the entry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::api::CloudClient;
use crate::config::EntryConfig;
use crate::coordinator::Coordinator;
use crate::error::Result;

/// Unique identifier for a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Generates a new random entry id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct RegistryEntry {
    key: String,
    coordinator: Arc<Coordinator>,
    poller: JoinHandle<()>,
}

/// Registry mapping entry ids to running coordinators.
///
/// # Examples
///
/// ```no_run
/// use warmlink_lib::{ApiConfig, EntryConfig, Registry};
///
/// # async fn example() -> warmlink_lib::Result<()> {
/// let registry = Registry::new();
/// let entry_id = registry
///     .setup_entry(EntryConfig::new(ApiConfig::new("user", "pass")))
///     .await?;
///
/// let coordinator = registry.coordinator(entry_id).await.unwrap();
/// println!("devices: {:?}", coordinator.snapshot());
///
/// registry.unload_entry(entry_id).await;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct Registry {
    entries: RwLock<HashMap<EntryId, RegistryEntry>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets up an entry: builds the client and coordinator, runs the first
    /// refresh, and starts polling.
    ///
    /// # Errors
    ///
    /// Returns the first refresh's error — in practice a failed login —
    /// without registering anything.
    pub async fn setup_entry(&self, config: EntryConfig) -> Result<EntryId> {
        let key = config.entry_key().to_string();
        let client = Arc::new(CloudClient::new(config.api().clone())?);
        let coordinator = Arc::new(Coordinator::new(client, config.poll_interval()));

        coordinator.refresh().await?;
        let poller = Arc::clone(&coordinator).spawn();

        let entry_id = EntryId::new();
        self.entries.write().await.insert(
            entry_id,
            RegistryEntry {
                key,
                coordinator,
                poller,
            },
        );
        tracing::info!(%entry_id, "entry set up");
        Ok(entry_id)
    }

    /// Unloads an entry, stopping its polling task.
    ///
    /// Returns `true` if the entry existed.
    pub async fn unload_entry(&self, entry_id: EntryId) -> bool {
        match self.entries.write().await.remove(&entry_id) {
            Some(entry) => {
                entry.poller.abort();
                tracing::info!(%entry_id, key = %entry.key, "entry unloaded");
                true
            }
            None => false,
        }
    }

    /// Returns the coordinator for an entry.
    pub async fn coordinator(&self, entry_id: EntryId) -> Option<Arc<Coordinator>> {
        self.entries
            .read()
            .await
            .get(&entry_id)
            .map(|entry| Arc::clone(&entry.coordinator))
    }

    /// Returns the entry key (username) for an entry.
    pub async fn entry_key(&self, entry_id: EntryId) -> Option<String> {
        self.entries
            .read()
            .await
            .get(&entry_id)
            .map(|entry| entry.key.clone())
    }

    /// Returns all registered entry ids.
    pub async fn entry_ids(&self) -> Vec<EntryId> {
        self.entries.read().await.keys().copied().collect()
    }

    /// Returns the number of registered entries.
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_ids_are_unique() {
        let a = EntryId::new();
        let b = EntryId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn entry_id_display_is_uuid() {
        let id = EntryId::new();
        assert_eq!(id.to_string().len(), 36);
    }

    #[tokio::test]
    async fn unload_unknown_entry_returns_false() {
        let registry = Registry::new();
        assert!(!registry.unload_entry(EntryId::new()).await);
        assert_eq!(registry.entry_count().await, 0);
        assert!(registry.coordinator(EntryId::new()).await.is_none());
    }
}
