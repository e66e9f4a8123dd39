// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-FigmaMcpRelay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of figma-mcp-relay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::model::{FileId, Message, UpdateBatch};

/// Per-file FIFO of undelivered messages.
///
/// Queues are created on first use and never removed; draining leaves an empty queue behind.
#[derive(Debug, Default)]
pub struct MessageQueueStore {
    queues: BTreeMap<FileId, Vec<Message>>,
    last_id: u64,
}

impl MessageQueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, file_id: &FileId, updates: UpdateBatch, now: DateTime<Utc>) -> &Message {
        let id = self.next_id(now);
        let queue = self.queues.entry(file_id.clone()).or_default();
        queue.push(Message::update(id, now, updates));
        &queue[queue.len() - 1]
    }

    /// Takes every queued message for `file_id` in insertion order.
    pub fn drain_all(&mut self, file_id: &FileId) -> Vec<Message> {
        self.queues.get_mut(file_id).map(std::mem::take).unwrap_or_default()
    }

    pub fn len(&self, file_id: &FileId) -> usize {
        self.queues.get(file_id).map_or(0, Vec::len)
    }

    pub fn is_empty(&self, file_id: &FileId) -> bool {
        self.len(file_id) == 0
    }

    // Millisecond timestamps collide under bursts; bump past the last issued id.
    fn next_id(&mut self, now: DateTime<Utc>) -> u64 {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last_id.saturating_add(1));
        self.last_id = id;
        id
    }
}
