// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-FigmaMcpRelay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of figma-mcp-relay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Files and plugins are identified by opaque ids; each file has at most one known plugin
//! connection and a FIFO of messages, each message carrying one batch of typed operations.

pub mod connection;
pub mod ids;
pub mod message;
pub mod update;

pub use connection::{Connection, ConnectionStatus};
pub use ids::{FileId, Id, IdError, PluginId, PENDING_PLUGIN_ID};
pub use message::{Message, MessageKind, UpdateBatch};
pub use update::{
    ArcData, Color, ComponentProps, Effect, EllipseProps, FontName, FrameProps, ImageProps,
    LineHeight, LineHeightUnit, LineProps, NodeProps, Paint, RectangleProps, TextProps,
    UpdateOperation, UpdateValidationError, Vector, TEXT_CONTENT_FIELD,
};
