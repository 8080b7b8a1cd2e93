// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! User-facing selection state.
//!
//! The selection is the only mutable piece of the pipeline. Every derived
//! view is a pure function of (dataset, selection); mutating the selection
//! bumps a revision in the owning store so memoized views recompute.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use super::ids::LocationCode;
use super::record::CategoryDefinition;

/// Upper bound on the number of links any view will ever emit.
pub const MAX_LINK_COUNT: usize = 1000;

/// Which flow direction (or the self-link partition) is emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowMode {
    Inflow,
    Outflow,
    SelfFlow,
}

impl FlowMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inflow => "inflow",
            Self::Outflow => "outflow",
            Self::SelfFlow => "self",
        }
    }
}

impl fmt::Display for FlowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlowMode {
    type Err = ParseFlowModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inflow" => Ok(Self::Inflow),
            "outflow" => Ok(Self::Outflow),
            "self" => Ok(Self::SelfFlow),
            other => Err(ParseFlowModeError {
                value: other.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFlowModeError {
    value: String,
}

impl fmt::Display for ParseFlowModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown flow mode {:?} (expected inflow, outflow or self)",
            self.value
        )
    }
}

impl std::error::Error for ParseFlowModeError {}

/// How the source and target predicates combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceTargetOperator {
    And,
    Or,
}

/// Bounds how many of the heaviest links are visible.
///
/// The selector remembers the last requested value and whether that value
/// meant "everything": requesting exactly the current maximum (or the hard
/// cap) sticks the selector to the maximum, so the visible count follows the
/// filtered set as it grows or shrinks. A smaller explicit request is
/// preserved even while the set temporarily shrinks below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopNSelector {
    requested: usize,
    stick_to_max: bool,
}

impl Default for TopNSelector {
    fn default() -> Self {
        Self {
            requested: 20,
            stick_to_max: true,
        }
    }
}

impl TopNSelector {
    pub fn set(&mut self, value: usize, current_max: usize) {
        self.stick_to_max = value == current_max || value == MAX_LINK_COUNT;
        self.requested = value;
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn sticks_to_max(&self) -> bool {
        self.stick_to_max
    }

    /// The number of links to keep given the current pre-truncation count.
    ///
    /// Always within `[0, min(current_max, MAX_LINK_COUNT)]`; a count of zero
    /// yields zero visible links regardless of mode.
    pub fn effective(&self, current_max: usize) -> usize {
        let chosen = if self.stick_to_max {
            self.requested.max(current_max).min(MAX_LINK_COUNT)
        } else {
            self.requested.min(current_max)
        };
        chosen.min(current_max).min(MAX_LINK_COUNT)
    }
}

/// The complete, incrementally mutated selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    selected_sources: BTreeSet<LocationCode>,
    selected_targets: BTreeSet<LocationCode>,
    operator: SourceTargetOperator,
    selected_categories: BTreeMap<String, BTreeSet<String>>,
    flow_mode: FlowMode,
    top_n: TopNSelector,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected_sources: BTreeSet::new(),
            selected_targets: BTreeSet::new(),
            operator: SourceTargetOperator::And,
            selected_categories: BTreeMap::new(),
            flow_mode: FlowMode::Outflow,
            top_n: TopNSelector::default(),
        }
    }
}

impl SelectionState {
    /// The steady-state default right after a successful load: every
    /// observed location and every category value selected.
    pub fn all_selected<'a>(
        codes: impl IntoIterator<Item = &'a LocationCode>,
        categories: &[CategoryDefinition],
    ) -> Self {
        let all: BTreeSet<LocationCode> = codes.into_iter().cloned().collect();
        let selected_categories = categories
            .iter()
            .map(|category| {
                (
                    category.name().to_owned(),
                    category.values().iter().cloned().collect(),
                )
            })
            .collect();
        Self {
            selected_sources: all.clone(),
            selected_targets: all,
            selected_categories,
            ..Self::default()
        }
    }

    pub fn selected_sources(&self) -> &BTreeSet<LocationCode> {
        &self.selected_sources
    }

    pub fn selected_targets(&self) -> &BTreeSet<LocationCode> {
        &self.selected_targets
    }

    pub fn set_sources(&mut self, sources: BTreeSet<LocationCode>) {
        self.selected_sources = sources;
    }

    pub fn set_targets(&mut self, targets: BTreeSet<LocationCode>) {
        self.selected_targets = targets;
    }

    pub fn operator(&self) -> SourceTargetOperator {
        self.operator
    }

    pub fn set_operator(&mut self, operator: SourceTargetOperator) {
        self.operator = operator;
    }

    pub fn selected_categories(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.selected_categories
    }

    pub fn set_category_values(&mut self, name: impl Into<String>, values: BTreeSet<String>) {
        self.selected_categories.insert(name.into(), values);
    }

    pub fn flow_mode(&self) -> FlowMode {
        self.flow_mode
    }

    pub fn set_flow_mode(&mut self, flow_mode: FlowMode) {
        self.flow_mode = flow_mode;
    }

    pub fn top_n(&self) -> &TopNSelector {
        &self.top_n
    }

    pub fn top_n_mut(&mut self) -> &mut TopNSelector {
        &mut self.top_n
    }

    /// Context-menu action: show only flows leaving `code`.
    pub fn focus_source<'a>(
        &mut self,
        code: LocationCode,
        all_codes: impl IntoIterator<Item = &'a LocationCode>,
    ) {
        self.selected_sources = BTreeSet::from([code]);
        self.selected_targets = all_codes.into_iter().cloned().collect();
        self.flow_mode = FlowMode::Inflow;
    }

    /// Context-menu action: show only flows arriving at `code`.
    pub fn focus_target<'a>(
        &mut self,
        code: LocationCode,
        all_codes: impl IntoIterator<Item = &'a LocationCode>,
    ) {
        self.selected_targets = BTreeSet::from([code]);
        self.selected_sources = all_codes.into_iter().cloned().collect();
        self.flow_mode = FlowMode::Outflow;
    }
}
