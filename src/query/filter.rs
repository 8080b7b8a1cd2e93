// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{FlowMode, Record, SelectionState, SourceTargetOperator};
use crate::store::Dataset;

/// Applies the selection to the partition the flow mode picks.
///
/// `SelfFlow` draws from the self-link partition, both directed modes from
/// the cross-link partition; the direction itself only matters downstream,
/// when views pick which column to emphasize. Total function: an impossible
/// combination yields an empty vector, never an error.
pub fn filter_records<'a>(dataset: &'a Dataset, selection: &SelectionState) -> Vec<&'a Record> {
    let base: Vec<&Record> = match selection.flow_mode() {
        FlowMode::SelfFlow => dataset.self_links().collect(),
        FlowMode::Inflow | FlowMode::Outflow => dataset.cross_links().collect(),
    };

    base.into_iter()
        .filter(|record| passes_selection(dataset, selection, record))
        .collect()
}

fn passes_selection(dataset: &Dataset, selection: &SelectionState, record: &Record) -> bool {
    let source_selected = selection.selected_sources().contains(record.source());
    let target_selected = selection.selected_targets().contains(record.target());
    let endpoints_pass = match selection.operator() {
        SourceTargetOperator::And => source_selected && target_selected,
        SourceTargetOperator::Or => source_selected || target_selected,
    };
    if !endpoints_pass {
        return false;
    }

    for (name, selected) in selection.selected_categories() {
        let Some(category) = dataset.category(name) else {
            // No such column in this dataset: nothing to filter on.
            continue;
        };
        if selected.len() == category.values().len() {
            // Full selection never excludes a row.
            continue;
        }
        match record.category_value(name) {
            Some(value) if selected.contains(value) => {}
            _ => return false,
        }
    }
    true
}
