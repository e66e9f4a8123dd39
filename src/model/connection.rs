// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-FigmaMcpRelay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of figma-mcp-relay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::PluginId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    /// Only ever set for the `pending-connection` sentinel.
    Pending,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected => f.write_str("connected"),
            Self::Pending => f.write_str("pending"),
        }
    }
}

/// Last-known plugin attached to one file.
///
/// Records are never evicted; a dead plugin is only visible through an old `last_seen`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    plugin_id: PluginId,
    last_seen: DateTime<Utc>,
    status: ConnectionStatus,
}

impl Connection {
    pub fn new(plugin_id: PluginId, status: ConnectionStatus, last_seen: DateTime<Utc>) -> Self {
        Self {
            plugin_id,
            last_seen,
            status,
        }
    }

    pub fn pending(last_seen: DateTime<Utc>) -> Self {
        Self::new(PluginId::pending(), ConnectionStatus::Pending, last_seen)
    }

    pub fn plugin_id(&self) -> &PluginId {
        &self.plugin_id
    }

    pub fn last_seen(&self) -> DateTime<Utc> {
        self.last_seen
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == ConnectionStatus::Pending
    }

    /// Refreshes `last_seen` and marks the record connected, keeping the plugin id.
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.last_seen = now;
        self.status = ConnectionStatus::Connected;
    }
}
