// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-FigmaMcpRelay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of figma-mcp-relay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Typed design-update operations.
//!
//! Every operation is `{ "type": "<kind>", "data": { .. } }` on the wire. Data fields are all
//! optional: the relay only validates `createText`, everything else is left to the plugin.
//! Keys we do not model are kept in `extra` so the plugin sees the operation as sent.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::IdError;

/// Field carrying the text content of a `createText` operation.
pub const TEXT_CONTENT_FIELD: &str = "characters";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum UpdateOperation {
    CreateFrame(FrameProps),
    CreateText(TextProps),
    CreateRectangle(RectangleProps),
    CreateEllipse(EllipseProps),
    CreateLine(LineProps),
    CreateImage(ImageProps),
    CreateComponent(ComponentProps),
}

impl UpdateOperation {
    pub const KINDS: [&'static str; 7] = [
        "createFrame",
        "createText",
        "createRectangle",
        "createEllipse",
        "createLine",
        "createImage",
        "createComponent",
    ];

    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateFrame(_) => "createFrame",
            Self::CreateText(_) => "createText",
            Self::CreateRectangle(_) => "createRectangle",
            Self::CreateEllipse(_) => "createEllipse",
            Self::CreateLine(_) => "createLine",
            Self::CreateImage(_) => "createImage",
            Self::CreateComponent(_) => "createComponent",
        }
    }

    pub fn node(&self) -> &NodeProps {
        match self {
            Self::CreateFrame(props) => &props.node,
            Self::CreateText(props) => &props.node,
            Self::CreateRectangle(props) => &props.node,
            Self::CreateEllipse(props) => &props.node,
            Self::CreateLine(props) => &props.node,
            Self::CreateImage(props) => &props.node,
            Self::CreateComponent(props) => &props.node,
        }
    }

    /// Checks the fields the relay is responsible for; only `createText` has any.
    pub fn validate(&self) -> Result<(), UpdateValidationError> {
        match self {
            Self::CreateText(text) => text.validate(),
            Self::CreateFrame(_)
            | Self::CreateRectangle(_)
            | Self::CreateEllipse(_)
            | Self::CreateLine(_)
            | Self::CreateImage(_)
            | Self::CreateComponent(_) => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateValidationError {
    #[error("No valid updates found in request")]
    NoValidUpdates,
    #[error("Invalid update at index {index}: {reason}")]
    InvalidOperation { index: usize, reason: String },
    #[error(
        "Missing required parameter \"{field}\" for createText element \"{element}\"",
        field = TEXT_CONTENT_FIELD
    )]
    MissingText { element: String },
    #[error(
        "Parameter \"{field}\" cannot be empty for createText element \"{element}\"",
        field = TEXT_CONTENT_FIELD
    )]
    EmptyText { element: String },
    #[error("Invalid fileId: {0}")]
    InvalidFileId(IdError),
}

/// Fields shared by every node kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodeProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fills: Option<Vec<Paint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strokes: Option<Vec<Paint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_weight: Option<f64>,
    /// `INSIDE`, `OUTSIDE` or `CENTER`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_align: Option<String>,
    /// `NONE`, `ROUND`, `SQUARE`, `ARROW_LINES` or `ARROW_EQUILATERAL`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_cap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_join: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blend_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<Effect>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl NodeProps {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

// Nested values keep only the members that were sent, plus any we do not model, so a decoded
// operation re-encodes to the same JSON.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Color {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Color {
    /// Channels range from 0 to 1.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: Some(r),
            g: Some(g),
            b: Some(b),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    /// `SOLID`, `GRADIENT_LINEAR`, `IMAGE`, ...
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blend_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Self {
            kind: Some("SOLID".to_owned()),
            color: Some(color),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Vector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    /// `DROP_SHADOW`, `INNER_SHADOW`, `LAYER_BLUR` or `BACKGROUND_BLUR`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blend_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<Vector>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FrameProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    /// `NONE`, `HORIZONTAL` or `VERTICAL`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_axis_sizing_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter_axis_sizing_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_spacing: Option<f64>,
    #[serde(flatten)]
    pub node: NodeProps,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum LineHeight {
    Pixels(f64),
    WithUnit {
        /// Absent for `AUTO`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<f64>,
        unit: LineHeightUnit,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum LineHeightUnit {
    Pixels,
    Percent,
    Auto,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FontName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    /// Text content; required and non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_name: Option<FontName>,
    /// `Regular`, `Bold`, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<LineHeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align_horizontal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align_vertical: Option<String>,
    /// `NONE`, `WIDTH_AND_HEIGHT` or `HEIGHT`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_auto_resize: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_case: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph_indent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph_spacing: Option<f64>,
    #[serde(flatten)]
    pub node: NodeProps,
}

impl TextProps {
    pub fn new(characters: impl Into<String>) -> Self {
        Self {
            characters: Some(characters.into()),
            ..Self::default()
        }
    }

    fn element_label(&self) -> String {
        match self.node.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => "unnamed".to_owned(),
        }
    }

    fn validate(&self) -> Result<(), UpdateValidationError> {
        match self.characters.as_deref() {
            None => Err(UpdateValidationError::MissingText {
                element: self.element_label(),
            }),
            Some("") => Err(UpdateValidationError::EmptyText {
                element: self.element_label(),
            }),
            Some(_) => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RectangleProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_left_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_right_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_left_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_right_radius: Option<f64>,
    #[serde(flatten)]
    pub node: NodeProps,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArcData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_radius: Option<f64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EllipseProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arc_data: Option<ArcData>,
    #[serde(flatten)]
    pub node: NodeProps,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Vector>>,
    #[serde(flatten)]
    pub node: NodeProps,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// `FILL`, `FIT`, `CROP` or `TILE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_mode: Option<String>,
    #[serde(flatten)]
    pub node: NodeProps,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(flatten)]
    pub node: NodeProps,
}
