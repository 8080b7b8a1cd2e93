// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Records and categories describe the loaded table; the selection describes
//! what the user currently wants to see; the snapshot types are the wire
//! surface handed to the rendering collaborator.

pub mod fixtures;
pub mod ids;
pub mod record;
pub mod selection;
pub mod snapshot;

pub use ids::{CodeError, LocationCode};
pub use record::{CategoryDefinition, Record};
pub use selection::{
    FlowMode, ParseFlowModeError, SelectionState, SourceTargetOperator, TopNSelector,
    MAX_LINK_COUNT,
};
pub use snapshot::{FlowSnapshot, Link, NodeTotal, TimeSeriesPoint};
