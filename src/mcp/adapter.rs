// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-FigmaMcpRelay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of figma-mcp-relay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Turns an `update_file` call into one queued message and maps the outcome to a tool result.

use rmcp::model::{CallToolResult, Content};
use serde_json::{Map, Value};
use tracing::warn;

use crate::model::{FileId, UpdateBatch, UpdateOperation, UpdateValidationError};
use crate::relay::Relay;

/// Validates `updates` and queues them for `file_id` as a single message.
///
/// Validation failures and internal relay faults come back as `isError` results; a file with no
/// plugin attached yet is a success because the message is buffered until the plugin polls.
pub fn apply_updates(relay: &Relay, file_id: &str, updates: Option<Value>) -> CallToolResult {
    let (file_id, batch) = match validate_request(file_id, updates) {
        Ok(validated) => validated,
        Err(err) => {
            warn!(file_id, error = %err, "update_file rejected");
            return CallToolResult::error(vec![Content::text(format!("Error: {err}"))]);
        }
    };

    if relay.add_to_message_queue(&file_id, batch) {
        CallToolResult::success(vec![Content::text(format!(
            "Update request sent to Figma plugin for file {file_id}"
        ))])
    } else {
        CallToolResult::error(vec![Content::text(format!(
            "Warning: Could not find connected plugin for file {file_id}. Please open the file in Figma and run the plugin first."
        ))])
    }
}

/// Checks the request in list order and stops at the first failure.
pub fn validate_request(
    file_id: &str,
    updates: Option<Value>,
) -> Result<(FileId, UpdateBatch), UpdateValidationError> {
    let Some(Value::Array(items)) = updates else {
        return Err(UpdateValidationError::NoValidUpdates);
    };

    let mut operations = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let operation = decode_operation(index, item)?;
        operation.validate()?;
        operations.push(operation);
    }

    let file_id = FileId::new(file_id).map_err(UpdateValidationError::InvalidFileId)?;
    Ok((file_id, UpdateBatch::new(operations)))
}

fn decode_operation(index: usize, mut item: Value) -> Result<UpdateOperation, UpdateValidationError> {
    // An operation without `data` still decodes, so `createText` reports the missing text field.
    if let Value::Object(fields) = &mut item {
        let data = fields.entry("data").or_insert(Value::Null);
        if data.is_null() {
            *data = Value::Object(Map::new());
        }
    }
    serde_json::from_value(item)
        .map_err(|err| UpdateValidationError::InvalidOperation { index, reason: err.to_string() })
}
