// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Validation, normalization and aggregation of raw rows into a [`Dataset`].
//!
//! Processing order is fixed: validate → drop incomplete rows → merge
//! duplicates → partition. Weights are summed as-is, never normalized or
//! rescaled before aggregation.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io;
use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::format::rows::{Row, RowParseError};
use crate::geo::LocationLookup;
use crate::model::{CategoryDefinition, LocationCode, Record, SelectionState};

pub const COLUMN_SOURCE: &str = "source";
pub const COLUMN_TARGET: &str = "target";
pub const COLUMN_WEIGHT: &str = "weight";
pub const COLUMN_YEAR: &str = "year";

const FIXED_COLUMNS: [&str; 3] = [COLUMN_SOURCE, COLUMN_TARGET, COLUMN_WEIGHT];

/// The committed raw-data snapshot: canonical merged records, the self/cross
/// partition, the discovered category schema, and the observed locations.
///
/// A `Dataset` is immutable after construction; a new load builds a new one
/// and the owning store swaps it in atomically.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    self_rows: Vec<usize>,
    cross_rows: Vec<usize>,
    categories: Vec<CategoryDefinition>,
    used_locations: BTreeMap<LocationCode, Option<String>>,
}

impl Dataset {
    pub fn from_rows(rows: Vec<Row>, lookup: &dyn LocationLookup) -> Result<Self, LoadError> {
        let mut columns: BTreeSet<&str> = BTreeSet::new();
        for row in &rows {
            columns.extend(row.keys().map(String::as_str));
        }

        if rows.len() <= 1 && columns.len() <= 1 {
            return Err(LoadError::Empty);
        }
        let missing: Vec<String> = FIXED_COLUMNS
            .iter()
            .filter(|column| !columns.contains(**column))
            .map(|column| (*column).to_owned())
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns { missing });
        }

        let has_year = columns.contains(COLUMN_YEAR);
        let normalized: Vec<NormalizedRow> = rows
            .iter()
            .filter_map(|row| normalize_row(row, &columns, has_year))
            .collect();
        debug!(
            raw = rows.len(),
            retained = normalized.len(),
            "dropped incomplete rows"
        );

        let mut domains: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();
        for row in &normalized {
            for (name, value) in &row.categories {
                domains
                    .entry(name.as_str())
                    .or_default()
                    .insert(value.clone());
            }
        }
        let categories: Vec<CategoryDefinition> = domains
            .into_iter()
            .map(|(name, values)| CategoryDefinition::new(name, values.into_iter().collect()))
            .collect();

        // Merge duplicates: one record per distinct non-weight column tuple.
        let mut merged: BTreeMap<MergeKey, Record> = BTreeMap::new();
        for row in normalized {
            let key = (row.source.clone(), row.target.clone(), row.categories.clone());
            match merged.get_mut(&key) {
                Some(record) => record.add_weight(row.weight),
                None => {
                    let mut record = Record::new_with(
                        row.source,
                        row.target,
                        row.weight,
                        row.year,
                        row.categories,
                    );
                    record.set_names(
                        lookup.resolve_name(record.source()).map(str::to_owned),
                        lookup.resolve_name(record.target()).map(str::to_owned),
                    );
                    merged.insert(key, record);
                }
            }
        }
        let records: Vec<Record> = merged.into_values().collect();

        let mut self_rows = Vec::new();
        let mut cross_rows = Vec::new();
        for (index, record) in records.iter().enumerate() {
            if record.is_self_link() {
                self_rows.push(index);
            } else {
                cross_rows.push(index);
            }
        }

        let mut used_locations: BTreeMap<LocationCode, Option<String>> = BTreeMap::new();
        for record in &records {
            used_locations
                .entry(record.source().clone())
                .or_insert_with(|| record.source_name().map(str::to_owned));
            used_locations
                .entry(record.target().clone())
                .or_insert_with(|| record.target_name().map(str::to_owned));
        }

        debug!(
            merged = records.len(),
            self_links = self_rows.len(),
            cross_links = cross_rows.len(),
            "aggregated dataset"
        );

        Ok(Self {
            records,
            self_rows,
            cross_rows,
            categories,
            used_locations,
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn self_links(&self) -> impl Iterator<Item = &Record> {
        self.self_rows.iter().map(|&index| &self.records[index])
    }

    pub fn cross_links(&self) -> impl Iterator<Item = &Record> {
        self.cross_rows.iter().map(|&index| &self.records[index])
    }

    pub fn self_link_count(&self) -> usize {
        self.self_rows.len()
    }

    pub fn cross_link_count(&self) -> usize {
        self.cross_rows.len()
    }

    pub fn categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&CategoryDefinition> {
        self.categories
            .iter()
            .find(|category| category.name() == name)
    }

    /// Every code observed as source or target, with its resolved name.
    pub fn used_locations(&self) -> &BTreeMap<LocationCode, Option<String>> {
        &self.used_locations
    }

    pub fn used_codes(&self) -> impl Iterator<Item = &LocationCode> {
        self.used_locations.keys()
    }

    /// The steady-state selection right after this dataset is committed.
    pub fn default_selection(&self) -> SelectionState {
        SelectionState::all_selected(self.used_codes(), &self.categories)
    }
}

type MergeKey = (LocationCode, LocationCode, BTreeMap<String, String>);

struct NormalizedRow {
    source: LocationCode,
    target: LocationCode,
    weight: f64,
    year: Option<i32>,
    categories: BTreeMap<String, String>,
}

/// One row → one normalized row, or `None` when the row must be dropped:
/// missing value in any retained column, unstringifiable cell, a weight that
/// is not a finite non-negative number, or a `year` cell that is not an
/// integer.
fn normalize_row(row: &Row, columns: &BTreeSet<&str>, has_year: bool) -> Option<NormalizedRow> {
    let mut source = None;
    let mut target = None;
    let mut weight = None;
    let mut categories = BTreeMap::new();

    for &column in columns {
        let value = row.get(column)?;
        if value.is_null() {
            return None;
        }
        match column {
            COLUMN_SOURCE => source = Some(LocationCode::new(stringify(value)?).ok()?),
            COLUMN_TARGET => target = Some(LocationCode::new(stringify(value)?).ok()?),
            COLUMN_WEIGHT => weight = Some(weight_value(value)?),
            _ => {
                categories.insert(column.to_owned(), stringify(value)?);
            }
        }
    }

    let year = if has_year {
        Some(year_value(categories.get(COLUMN_YEAR)?)?)
    } else {
        None
    };

    Some(NormalizedRow {
        source: source?,
        target: target?,
        weight: weight?,
        year,
        categories,
    })
}

/// Stringifies a flat cell the way the filter facets expect; nested values
/// have no stringification and mark the row incomplete.
fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn weight_value(value: &Value) -> Option<f64> {
    let weight = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (weight.is_finite() && weight >= 0.0).then_some(weight)
}

fn year_value(text: &str) -> Option<i32> {
    if let Ok(year) = text.trim().parse::<i32>() {
        return Some(year);
    }
    let float = text.trim().parse::<f64>().ok()?;
    (float.fract() == 0.0 && (i32::MIN as f64..=i32::MAX as f64).contains(&float))
        .then_some(float as i32)
}

#[derive(Debug)]
pub enum LoadError {
    Empty,
    MissingColumns { missing: Vec<String> },
    Io { path: PathBuf, source: io::Error },
    Rows { path: PathBuf, source: RowParseError },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("no data found in the input"),
            Self::MissingColumns { missing } => {
                write!(
                    f,
                    "one or more required columns (source, target, weight) not found: "
                )?;
                for (index, column) in missing.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{column}")?;
                }
                Ok(())
            }
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Rows { path, source } => write!(f, "cannot parse rows from {path:?}: {source}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Rows { source, .. } => Some(source),
            _ => None,
        }
    }
}
