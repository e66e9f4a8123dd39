// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-FigmaMcpRelay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of figma-mcp-relay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Markdown usage guides served by `get_mcp_tool_usage`.

use std::fmt::Write as _;

use rmcp::model::{CallToolResult, Content};
use serde_json::{json, Value};

use super::types::{ToolUsageParams, UpdateFileParams};
use crate::model::TEXT_CONTENT_FIELD;

pub const UPDATE_FILE_TOOL: &str = "update_file";
pub const TOOL_USAGE_TOOL: &str = "get_mcp_tool_usage";

#[derive(Debug, Clone)]
pub struct UsageExample {
    pub title: &'static str,
    pub description: &'static str,
    pub arguments: Value,
}

#[derive(Debug, Clone)]
pub struct ToolUsage {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    pub examples: Vec<UsageExample>,
    pub notes: Vec<String>,
}

pub fn tool_usage(tool_name: &str) -> Option<ToolUsage> {
    match tool_name {
        UPDATE_FILE_TOOL => Some(update_file_usage()),
        TOOL_USAGE_TOOL => Some(tool_usage_usage()),
        _ => None,
    }
}

pub fn tool_usage_result(tool_name: &str) -> CallToolResult {
    match tool_usage(tool_name) {
        Some(usage) => CallToolResult::success(vec![Content::text(format_tool_usage(&usage))]),
        None => CallToolResult::error(vec![Content::text(format!(
            "Error: Tool \"{tool_name}\" not found or usage information not available."
        ))]),
    }
}

pub fn format_tool_usage(usage: &ToolUsage) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", usage.name);
    let _ = writeln!(out, "## Description\n{}\n", usage.description);

    let schema = serde_json::to_string_pretty(&usage.input_schema).unwrap_or_default();
    let _ = writeln!(out, "## Parameters\n```json\n{schema}\n```\n");

    out.push_str("## Examples\n");
    for (index, example) in usage.examples.iter().enumerate() {
        let arguments = serde_json::to_string_pretty(&example.arguments).unwrap_or_default();
        let _ = writeln!(out, "### {}. {}", index + 1, example.title);
        let _ = writeln!(out, "{}\n", example.description);
        let _ = writeln!(out, "```json\n{arguments}\n```\n");
    }

    if !usage.notes.is_empty() {
        out.push_str("## Notes\n");
        for note in &usage.notes {
            let _ = writeln!(out, "- {note}");
        }
    }
    out
}

fn schema_value<T: schemars::JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(T)).unwrap_or(Value::Null)
}

fn update_file_usage() -> ToolUsage {
    let solid = |r: f64, g: f64, b: f64| json!([{ "type": "SOLID", "color": { "r": r, "g": g, "b": b } }]);

    ToolUsage {
        name: UPDATE_FILE_TOOL,
        description: "Queues design updates for a Figma file. The Figma plugin running in that file \
            polls the relay and applies every operation of one call, in order. Calls made before \
            the plugin is running are buffered and delivered on its first poll.",
        input_schema: schema_value::<UpdateFileParams>(),
        examples: vec![
            UsageExample {
                title: "Creating a Frame",
                description: "A frame with auto layout and padding.",
                arguments: json!({
                    "fileId": "YOUR_FIGMA_FILE_ID",
                    "updates": [{
                        "type": "createFrame",
                        "data": {
                            "name": "Frame Name",
                            "width": 400,
                            "height": 300,
                            "fills": solid(0.9, 0.9, 0.9),
                            "cornerRadius": 8,
                            "x": 100,
                            "y": 100,
                            "layoutMode": "VERTICAL",
                            "primaryAxisSizingMode": "AUTO",
                            "counterAxisSizingMode": "AUTO",
                            "itemSpacing": 10,
                            "paddingLeft": 16,
                            "paddingRight": 16,
                            "paddingTop": 16,
                            "paddingBottom": 16
                        }
                    }]
                }),
            },
            UsageExample {
                title: "Creating Text",
                description: "Wrapped text with a fixed width and relative line height.",
                arguments: json!({
                    "fileId": "YOUR_FIGMA_FILE_ID",
                    "updates": [{
                        "type": "createText",
                        "data": {
                            "name": "Description",
                            "characters": "Long text wraps when width is set and textAutoResize is HEIGHT.",
                            "fontSize": 16,
                            "fills": solid(0.3, 0.3, 0.3),
                            "x": 120,
                            "y": 270,
                            "width": 260,
                            "textAutoResize": "HEIGHT",
                            "lineHeight": { "value": 150, "unit": "PERCENT" },
                            "paragraphSpacing": 10
                        }
                    }]
                }),
            },
            UsageExample {
                title: "Creating Shapes",
                description: "A stroked rectangle, an ellipse and an arrow in one batch.",
                arguments: json!({
                    "fileId": "YOUR_FIGMA_FILE_ID",
                    "updates": [
                        {
                            "type": "createRectangle",
                            "data": {
                                "name": "Rectangle",
                                "width": 200,
                                "height": 100,
                                "fills": solid(0.2, 0.6, 1.0),
                                "cornerRadius": 8,
                                "strokes": solid(0.0, 0.0, 0.0),
                                "strokeWeight": 2,
                                "x": 100,
                                "y": 100
                            }
                        },
                        {
                            "type": "createEllipse",
                            "data": {
                                "name": "Ellipse",
                                "width": 200,
                                "height": 100,
                                "fills": solid(1.0, 0.5, 0.0),
                                "x": 100,
                                "y": 240
                            }
                        },
                        {
                            "type": "createLine",
                            "data": {
                                "name": "Arrow",
                                "points": [{ "x": 100, "y": 400 }, { "x": 300, "y": 400 }],
                                "strokes": solid(0.0, 0.0, 0.0),
                                "strokeWeight": 2,
                                "strokeCap": "ARROW_EQUILATERAL"
                            }
                        }
                    ]
                }),
            },
            UsageExample {
                title: "Inserting an Image",
                description: "An image fetched from a URL by the plugin.",
                arguments: json!({
                    "fileId": "YOUR_FIGMA_FILE_ID",
                    "updates": [{
                        "type": "createImage",
                        "data": {
                            "name": "Hero",
                            "imageUrl": "https://example.com/image.jpg",
                            "width": 300,
                            "height": 200,
                            "x": 100,
                            "y": 100,
                            "scaleMode": "FILL"
                        }
                    }]
                }),
            },
            UsageExample {
                title: "Creating a Component",
                description: "A reusable component with a description.",
                arguments: json!({
                    "fileId": "YOUR_FIGMA_FILE_ID",
                    "updates": [{
                        "type": "createComponent",
                        "data": {
                            "name": "Card",
                            "description": "Product card",
                            "width": 300,
                            "height": 200,
                            "fills": solid(1.0, 1.0, 1.0),
                            "cornerRadius": 12,
                            "x": 100,
                            "y": 100
                        }
                    }]
                }),
            },
        ],
        notes: vec![
            format!(
                "Every `createText` operation needs a non-empty `{TEXT_CONTENT_FIELD}` field; the whole call is rejected otherwise."
            ),
            "All operations of one call are delivered together and applied in list order.".to_owned(),
            "Use `width` with `textAutoResize: \"HEIGHT\"` to wrap long text.".to_owned(),
            "`lineHeight` is a number of pixels, `{ \"value\": n, \"unit\": \"PIXELS\" | \"PERCENT\" }` or `{ \"unit\": \"AUTO\" }`.".to_owned(),
            "Color channels range from 0 to 1.".to_owned(),
            "Coordinates are measured from the top-left corner, including for ellipses.".to_owned(),
            "Delivery is fire-and-forget: the relay does not learn whether the plugin applied an update.".to_owned(),
        ],
    }
}

fn tool_usage_usage() -> ToolUsage {
    ToolUsage {
        name: TOOL_USAGE_TOOL,
        description: "Returns a usage guide (parameters, examples, notes) for one of this server's tools.",
        input_schema: schema_value::<ToolUsageParams>(),
        examples: vec![UsageExample {
            title: "Describe update_file",
            description: "Fetch the full guide for the update tool.",
            arguments: json!({ "toolName": UPDATE_FILE_TOOL }),
        }],
        notes: Vec::new(),
    }
}
