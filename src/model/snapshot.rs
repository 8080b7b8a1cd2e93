// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The wire surface consumed by the rendering collaborator.
//!
//! One `FlowSnapshot` is produced per recomputation. Codes travel as plain
//! strings here; the internal model types stay on the library side of the
//! boundary.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An aggregated directed flow between two location codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_name: Option<String>,
    pub target_name: Option<String>,
    pub weight: f64,
    pub directed: bool,
}

/// Per-node in/out totals over the filtered (pre-truncation) set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodeTotal {
    pub country_code: String,
    pub country_name: Option<String>,
    pub weight_in: f64,
    pub weight_out: f64,
}

/// One (node, year) total for the time-series chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub country_code: String,
    pub country_name: Option<String>,
    pub year: i32,
    pub weight: f64,
}

/// Everything the renderer needs for one frame of the flow map.
///
/// `nodes` lists only codes that survive top-N truncation; `totals` and
/// `time_series` cover the full filtered set. The min/max pairs feed two
/// independent scales (link width, node color). All sentinels are `0.0`
/// for empty sets so no `NaN` ever reaches a scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlowSnapshot {
    pub links: Vec<Link>,
    pub nodes: Vec<String>,
    pub totals: Vec<NodeTotal>,
    pub time_series: Vec<TimeSeriesPoint>,
    pub min_link_weight: f64,
    pub max_link_weight: f64,
    pub min_total_weight: f64,
    pub max_total_weight: f64,
    pub link_count_after_filtering: usize,
}

impl FlowSnapshot {
    pub fn empty() -> Self {
        Self {
            links: Vec::new(),
            nodes: Vec::new(),
            totals: Vec::new(),
            time_series: Vec::new(),
            min_link_weight: 0.0,
            max_link_weight: 0.0,
            min_total_weight: 0.0,
            max_total_weight: 0.0,
            link_count_after_filtering: 0,
        }
    }
}
