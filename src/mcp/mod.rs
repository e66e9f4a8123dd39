// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-FigmaMcpRelay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of figma-mcp-relay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Model Context Protocol (MCP) server surface.
//!
//! Exposes `update_file`, which validates a batch of design operations and hands it to the
//! relay, and `get_mcp_tool_usage`, which serves markdown usage guides.

mod adapter;
mod server;
mod types;
mod usage;

pub use adapter::{apply_updates, validate_request};
pub use server::FigmaRelayMcp;
pub use types::{ToolUsageParams, UpdateFileParams};
pub use usage::{
    format_tool_usage, tool_usage, tool_usage_result, ToolUsage, UsageExample, TOOL_USAGE_TOOL,
    UPDATE_FILE_TOOL,
};
