// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-FigmaMcpRelay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of figma-mcp-relay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UpdateOperation;

/// All operations from one tool call, applied by the plugin in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBatch {
    pub updates: Vec<UpdateOperation>,
}

impl UpdateBatch {
    pub fn new(updates: Vec<UpdateOperation>) -> Self {
        Self { updates }
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Update,
}

/// One queued delivery for a file.
///
/// `id` is creation-time based and only meant for display; delivery order is queue order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub updates: UpdateBatch,
}

impl Message {
    pub fn update(id: u64, timestamp: DateTime<Utc>, updates: UpdateBatch) -> Self {
        Self {
            id,
            timestamp,
            kind: MessageKind::Update,
            updates,
        }
    }
}
