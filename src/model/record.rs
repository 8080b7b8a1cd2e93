// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::ids::LocationCode;

/// One canonical flow record after validation, normalization and duplicate
/// merging. Immutable once ingested.
///
/// `categories` holds every non-fixed column of the input table, stringified.
/// When the table has a `year` column its integer value is additionally
/// parsed into `year` so time-series views do not have to re-parse strings;
/// the stringified value stays in `categories` because `year` is also an
/// ordinary filter facet.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    source: LocationCode,
    target: LocationCode,
    source_name: Option<String>,
    target_name: Option<String>,
    weight: f64,
    year: Option<i32>,
    categories: BTreeMap<String, String>,
}

impl Record {
    pub fn new(source: LocationCode, target: LocationCode, weight: f64) -> Self {
        Self {
            source,
            target,
            source_name: None,
            target_name: None,
            weight,
            year: None,
            categories: BTreeMap::new(),
        }
    }

    pub fn new_with(
        source: LocationCode,
        target: LocationCode,
        weight: f64,
        year: Option<i32>,
        categories: BTreeMap<String, String>,
    ) -> Self {
        Self {
            source,
            target,
            source_name: None,
            target_name: None,
            weight,
            year,
            categories,
        }
    }

    pub fn set_names(&mut self, source_name: Option<String>, target_name: Option<String>) {
        self.source_name = source_name;
        self.target_name = target_name;
    }

    pub(crate) fn add_weight(&mut self, weight: f64) {
        self.weight += weight;
    }

    pub fn source(&self) -> &LocationCode {
        &self.source
    }

    pub fn target(&self) -> &LocationCode {
        &self.target
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    pub fn target_name(&self) -> Option<&str> {
        self.target_name.as_deref()
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn categories(&self) -> &BTreeMap<String, String> {
        &self.categories
    }

    pub fn category_value(&self, name: &str) -> Option<&str> {
        self.categories.get(name).map(String::as_str)
    }

    pub fn is_self_link(&self) -> bool {
        self.source == self.target
    }
}

/// The discovered domain of one category column: its name and the sorted set
/// of distinct stringified values across all retained rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDefinition {
    name: String,
    values: Vec<String>,
}

impl CategoryDefinition {
    pub fn new(name: impl Into<String>, mut values: Vec<String>) -> Self {
        values.sort();
        values.dedup();
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.binary_search_by(|v| v.as_str().cmp(value)).is_ok()
    }
}
