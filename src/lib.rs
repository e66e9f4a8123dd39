// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-FigmaMcpRelay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of figma-mcp-relay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! figma-mcp-relay: an MCP server that queues design updates for a Figma plugin.
//!
//! Agents call the `update_file` MCP tool; the plugin running inside a Figma file registers
//! over HTTP and polls for the updates queued for that file.

pub mod config;
pub mod http;
pub mod mcp;
pub mod model;
pub mod relay;
