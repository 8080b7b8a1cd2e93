// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The single state owner.
//!
//! A `FlowStore` holds the committed dataset and the live selection, each
//! with a revision counter. The derived snapshot is memoized on the
//! (dataset, selection) revision pair: readers get the same `Arc` until
//! something actually changed, and a change triggers one full recomputation
//! instead of incremental patching.

use std::sync::Arc;

use crate::model::{FlowSnapshot, LocationCode, SelectionState};
use crate::query::derive_snapshot;
use crate::store::Dataset;

#[derive(Debug, Default)]
pub struct FlowStore {
    dataset: Option<Arc<Dataset>>,
    dataset_rev: u64,
    selection: SelectionState,
    selection_rev: u64,
    cached: Option<CachedSnapshot>,
}

#[derive(Debug)]
struct CachedSnapshot {
    key: (u64, u64),
    snapshot: Arc<FlowSnapshot>,
}

impl FlowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        self.dataset.as_ref()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn dataset_rev(&self) -> u64 {
        self.dataset_rev
    }

    pub fn selection_rev(&self) -> u64 {
        self.selection_rev
    }

    /// Atomically replaces the committed dataset and resets the selection to
    /// the all-selected defaults of the new data. Only called with a fully
    /// built dataset, so a failed load can never leave the store half-swapped.
    pub fn commit_dataset(&mut self, dataset: Dataset) {
        self.selection = dataset.default_selection();
        self.dataset = Some(Arc::new(dataset));
        self.dataset_rev += 1;
        self.selection_rev += 1;
    }

    /// Applies one user action to the selection.
    pub fn update_selection(&mut self, mutate: impl FnOnce(&mut SelectionState)) {
        mutate(&mut self.selection);
        self.selection_rev += 1;
    }

    /// Moves the top-N control. The sticky decision needs the current
    /// pre-truncation link count, so the snapshot is brought up to date
    /// first.
    pub fn set_top_n(&mut self, value: usize) {
        let current_max = self.snapshot().link_count_after_filtering;
        self.update_selection(|selection| selection.top_n_mut().set(value, current_max));
    }

    pub fn focus_source(&mut self, code: LocationCode) {
        let Some(dataset) = self.dataset.clone() else {
            return;
        };
        self.update_selection(|selection| selection.focus_source(code, dataset.used_codes()));
    }

    pub fn focus_target(&mut self, code: LocationCode) {
        let Some(dataset) = self.dataset.clone() else {
            return;
        };
        self.update_selection(|selection| selection.focus_target(code, dataset.used_codes()));
    }

    /// The current derived snapshot, recomputed only when a revision moved.
    pub fn snapshot(&mut self) -> Arc<FlowSnapshot> {
        let key = (self.dataset_rev, self.selection_rev);
        if let Some(cached) = &self.cached {
            if cached.key == key {
                return cached.snapshot.clone();
            }
        }

        let snapshot = match &self.dataset {
            Some(dataset) => Arc::new(derive_snapshot(dataset, &self.selection)),
            None => Arc::new(FlowSnapshot::empty()),
        };
        self.cached = Some(CachedSnapshot {
            key,
            snapshot: snapshot.clone(),
        });
        snapshot
    }
}
