// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-FigmaMcpRelay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of figma-mcp-relay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler, ServiceExt};

use crate::relay::Relay;

use super::adapter::apply_updates;
use super::types::*;
use super::usage::tool_usage_result;

#[derive(Clone)]
pub struct FigmaRelayMcp {
    relay: Arc<Relay>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl FigmaRelayMcp {
    pub fn new(relay: Arc<Relay>) -> Self {
        Self {
            relay,
            tool_router: Self::tool_router(),
        }
    }

    pub fn relay(&self) -> &Arc<Relay> {
        &self.relay
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    /// Queue design updates (frames, text, shapes, images, components) for a Figma file; the
    /// Figma plugin applies them in order on its next poll. Every `createText` needs a non-empty
    /// `characters`. Call `get_mcp_tool_usage` with `update_file` for examples.
    #[tool(name = "update_file")]
    async fn update_file(
        &self,
        params: Parameters<UpdateFileParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let Parameters(UpdateFileParams { file_id, updates }) = params;
        Ok(apply_updates(&self.relay, &file_id, updates))
    }

    /// Get a usage guide (parameters, examples, notes) for a tool of this server.
    #[tool(name = "get_mcp_tool_usage")]
    async fn get_mcp_tool_usage(
        &self,
        params: Parameters<ToolUsageParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let Parameters(ToolUsageParams { tool_name }) = params;
        Ok(tool_usage_result(&tool_name))
    }
}

#[tool_handler]
impl ServerHandler for FigmaRelayMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Figma design relay (tools: update_file, get_mcp_tool_usage). Updates are queued per Figma file and picked up by the Figma plugin, which must be running in that file to apply them."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
