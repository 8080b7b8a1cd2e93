// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only derivations over (dataset, selection).
//!
//! Filtering picks the records the selection admits; views collapse them
//! into the link/node/time-series aggregates the renderer consumes.

pub mod filter;
pub mod views;

pub use filter::filter_records;
pub use views::{
    aggregate_by_link, aggregate_by_node, derive_snapshot, flow_weight, time_series,
};
