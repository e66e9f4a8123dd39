// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-FigmaMcpRelay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of figma-mcp-relay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::model::{Connection, ConnectionStatus, FileId, PluginId};

/// At most one connection record per file; later writes overwrite earlier ones.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: BTreeMap<FileId, Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_id: &FileId) -> Option<&Connection> {
        self.connections.get(file_id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn upsert(
        &mut self,
        file_id: FileId,
        plugin_id: PluginId,
        status: ConnectionStatus,
        now: DateTime<Utc>,
    ) -> &Connection {
        let connection = Connection::new(plugin_id, status, now);
        match self.connections.entry(file_id) {
            Entry::Occupied(mut entry) => {
                entry.insert(connection);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(connection),
        }
    }

    /// Refreshes an existing record (its plugin id is kept) or creates a connected one.
    ///
    /// Returns `true` when a new record was created.
    pub fn touch(&mut self, file_id: &FileId, plugin_id: &PluginId, now: DateTime<Utc>) -> bool {
        if let Some(connection) = self.connections.get_mut(file_id) {
            connection.touch(now);
            return false;
        }
        self.upsert(file_id.clone(), plugin_id.clone(), ConnectionStatus::Connected, now);
        true
    }

    /// Seeds the `pending-connection` sentinel unless a record already exists.
    ///
    /// Returns `true` when the sentinel was inserted.
    pub fn seed_pending(&mut self, file_id: &FileId, now: DateTime<Utc>) -> bool {
        if self.connections.contains_key(file_id) {
            return false;
        }
        self.connections.insert(file_id.clone(), Connection::pending(now));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().expect("timestamp")
    }

    fn file(id: &str) -> FileId {
        FileId::new(id).expect("file id")
    }

    fn plugin(id: &str) -> PluginId {
        PluginId::new(id).expect("plugin id")
    }

    #[test]
    fn upsert_overwrites_previous_record() {
        let mut registry = ConnectionRegistry::new();
        registry.upsert(file("f"), plugin("p1"), ConnectionStatus::Connected, at(1));
        registry.upsert(file("f"), plugin("p2"), ConnectionStatus::Connected, at(2));

        let connection = registry.get(&file("f")).expect("connection");
        assert_eq!(connection.plugin_id(), &plugin("p2"));
        assert_eq!(connection.last_seen(), at(2));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn touch_keeps_plugin_id_of_existing_record() {
        let mut registry = ConnectionRegistry::new();
        assert!(registry.seed_pending(&file("f"), at(1)));

        let created = registry.touch(&file("f"), &plugin("p1"), at(5));
        assert!(!created);

        let connection = registry.get(&file("f")).expect("connection");
        assert_eq!(connection.status(), ConnectionStatus::Connected);
        assert!(connection.plugin_id().is_pending());
        assert_eq!(connection.last_seen(), at(5));
    }

    #[test]
    fn touch_creates_connected_record_when_absent() {
        let mut registry = ConnectionRegistry::new();
        assert!(registry.touch(&file("f"), &plugin("p1"), at(3)));

        let connection = registry.get(&file("f")).expect("connection");
        assert_eq!(connection.status(), ConnectionStatus::Connected);
        assert_eq!(connection.plugin_id(), &plugin("p1"));
    }

    #[test]
    fn seed_pending_never_downgrades_a_connected_record() {
        let mut registry = ConnectionRegistry::new();
        registry.upsert(file("f"), plugin("p1"), ConnectionStatus::Connected, at(1));

        assert!(!registry.seed_pending(&file("f"), at(2)));
        let connection = registry.get(&file("f")).expect("connection");
        assert_eq!(connection.status(), ConnectionStatus::Connected);
        assert_eq!(connection.last_seen(), at(1));
    }
}
