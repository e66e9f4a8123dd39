// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-FigmaMcpRelay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of figma-mcp-relay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::model::UpdateOperation;

// Both params structs default every field so malformed calls still reach the handler and come
// back as `isError` tool results instead of JSON-RPC errors.

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFileParams {
    /// Figma file id, e.g. the `XXXXXXXXXXXX` in `https://www.figma.com/file/XXXXXXXXXXXX/Name`.
    #[serde(default)]
    pub file_id: String,
    /// Operations to apply, in order, as one batch.
    #[serde(default)]
    #[schemars(with = "Vec<UpdateOperation>")]
    pub updates: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolUsageParams {
    /// Name of the tool to describe, e.g. `update_file`.
    #[serde(default)]
    pub tool_name: String,
}
