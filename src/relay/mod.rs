// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-FigmaMcpRelay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of figma-mcp-relay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Message relay between the MCP tool surface and the polling Figma plugin.
//!
//! The relay owns the connection registry and the per-file message queues behind one mutex.
//! Every public operation is a single short critical section, so "seed-then-append" on
//! enqueue and "touch-then-drain" on poll are linearizable against each other: a message is
//! either part of a drain or still queued for the next one, never both and never neither.
//!
//! Delivery is at-most-once. A drained message is gone from the relay whether or not the
//! plugin manages to apply it.

mod queue;
mod registry;

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::model::{Connection, ConnectionStatus, FileId, Message, PluginId, UpdateBatch};

pub use queue::MessageQueueStore;
pub use registry::ConnectionRegistry;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("relay state is unavailable: a previous operation panicked while holding it")]
    Poisoned,
}

#[derive(Debug, Default)]
struct RelayState {
    connections: ConnectionRegistry,
    queues: MessageQueueStore,
}

/// Process-scoped relay state; construct one per server and share it behind an `Arc`.
#[derive(Debug)]
pub struct Relay {
    state: Mutex<RelayState>,
    clock: fn() -> DateTime<Utc>,
}

impl Default for Relay {
    fn default() -> Self {
        Self::new()
    }
}

impl Relay {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    pub fn with_clock(clock: fn() -> DateTime<Utc>) -> Self {
        Self {
            state: Mutex::new(RelayState::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, RelayState>, RelayError> {
        self.state.lock().map_err(|_| RelayError::Poisoned)
    }

    /// Records `plugin_id` as the connected plugin for `file_id`, replacing any prior record.
    pub fn register(&self, file_id: FileId, plugin_id: PluginId) -> Result<Connection, RelayError> {
        let now = (self.clock)();
        let mut state = self.lock()?;
        let connection = state
            .connections
            .upsert(file_id.clone(), plugin_id, ConnectionStatus::Connected, now)
            .clone();
        let queued = state.queues.len(&file_id);
        drop(state);

        info!(
            file_id = %file_id,
            plugin_id = %connection.plugin_id(),
            queued,
            "plugin registered"
        );
        Ok(connection)
    }

    /// Marks the file's plugin as seen and hands over everything queued for it.
    pub fn poll(&self, file_id: &FileId, plugin_id: &PluginId) -> Result<Vec<Message>, RelayError> {
        let now = (self.clock)();
        let mut state = self.lock()?;
        let created = state.connections.touch(file_id, plugin_id, now);
        let messages = state.queues.drain_all(file_id);
        drop(state);

        if created {
            info!(file_id = %file_id, plugin_id = %plugin_id, "first poll created connection");
        }
        if messages.is_empty() {
            debug!(file_id = %file_id, plugin_id = %plugin_id, "poll: nothing queued");
        } else {
            info!(
                file_id = %file_id,
                plugin_id = %plugin_id,
                delivered = messages.len(),
                "poll: delivering messages"
            );
        }
        Ok(messages)
    }

    /// Appends one message for `file_id`.
    ///
    /// A missing plugin is not an error: the file gets a `pending` sentinel connection and the
    /// message waits for the first poll.
    pub fn enqueue(&self, file_id: &FileId, updates: UpdateBatch) -> Result<Message, RelayError> {
        let now = (self.clock)();
        let operations = updates.len();
        let mut state = self.lock()?;
        let seeded = state.connections.seed_pending(file_id, now);
        let message = state.queues.enqueue(file_id, updates, now).clone();
        let queued = state.queues.len(file_id);
        drop(state);

        if seeded {
            warn!(
                file_id = %file_id,
                "no plugin connected yet; message stays queued until the plugin polls"
            );
        }
        info!(
            file_id = %file_id,
            message_id = message.id,
            operations,
            queued,
            "message queued"
        );
        Ok(message)
    }

    /// Boolean form of [`Relay::enqueue`] for the tool layer; `false` only on internal faults.
    pub fn add_to_message_queue(&self, file_id: &FileId, updates: UpdateBatch) -> bool {
        match self.enqueue(file_id, updates) {
            Ok(_) => true,
            Err(err) => {
                error!(file_id = %file_id, error = %err, "failed to queue message");
                false
            }
        }
    }

    pub fn connection(&self, file_id: &FileId) -> Result<Option<Connection>, RelayError> {
        Ok(self.lock()?.connections.get(file_id).cloned())
    }

    pub fn pending_len(&self, file_id: &FileId) -> Result<usize, RelayError> {
        Ok(self.lock()?.queues.len(file_id))
    }

    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = self.state.lock();
            panic!("poisoning relay state");
        }));
    }
}
