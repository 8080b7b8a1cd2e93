// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The static location table collaborator.
//!
//! The pipeline only ever asks three questions about a code: its display
//! name, its projected anchor coordinates, and the set of codes the table
//! knows at all. Unresolved codes are never an error; the pipeline carries
//! `None` and the renderer decides what to do with a nameless node.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde_json::Value;

use crate::model::LocationCode;

pub trait LocationLookup {
    fn resolve_name(&self, code: &LocationCode) -> Option<&str>;
    fn resolve_coordinates(&self, code: &LocationCode) -> Option<[f64; 2]>;
    fn known_codes(&self) -> BTreeSet<LocationCode>;
}

/// In-memory location table: code → name, code → `[longitude, latitude]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticLocations {
    names: BTreeMap<LocationCode, String>,
    coordinates: BTreeMap<LocationCode, [f64; 2]>,
}

impl StaticLocations {
    /// Adds one location. Rows with an empty code are skipped; a table entry
    /// without a code can never be resolved anyway.
    pub fn insert(&mut self, code: impl AsRef<str>, name: impl Into<String>, coordinates: [f64; 2]) {
        if let Ok(code) = LocationCode::new(code) {
            self.names.insert(code.clone(), name.into());
            self.coordinates.insert(code, coordinates);
        }
    }

    /// Parses a JSON array of location rows.
    ///
    /// Accepts both this crate's field names (`code`, `name`, `longitude`,
    /// `latitude`) and the column names of the common country-capitals table
    /// (`CountryCode`, `CountryName`, `CapitalLongitude`, `CapitalLatitude`,
    /// with coordinates as numbers or numeric strings). Incomplete rows are
    /// skipped.
    pub fn from_json_str(text: &str) -> Result<Self, GeoTableError> {
        let rows: Vec<BTreeMap<String, Value>> =
            serde_json::from_str(text).map_err(|source| GeoTableError::Json { source })?;

        let mut table = Self::default();
        for row in &rows {
            let code = string_field(row, &["code", "CountryCode"]);
            let name = string_field(row, &["name", "CountryName"]);
            let longitude = number_field(row, &["longitude", "CapitalLongitude"]);
            let latitude = number_field(row, &["latitude", "CapitalLatitude"]);
            if let (Some(code), Some(name), Some(longitude), Some(latitude)) =
                (code, name, longitude, latitude)
            {
                table.insert(code, name, [longitude, latitude]);
            }
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl LocationLookup for StaticLocations {
    fn resolve_name(&self, code: &LocationCode) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    fn resolve_coordinates(&self, code: &LocationCode) -> Option<[f64; 2]> {
        self.coordinates.get(code).copied()
    }

    fn known_codes(&self) -> BTreeSet<LocationCode> {
        self.names.keys().cloned().collect()
    }
}

fn string_field<'a>(row: &'a BTreeMap<String, Value>, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| row.get(*name)?.as_str())
}

fn number_field(row: &BTreeMap<String, Value>, names: &[&str]) -> Option<f64> {
    names.iter().find_map(|name| match row.get(*name)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    })
}

#[derive(Debug)]
pub enum GeoTableError {
    Json { source: serde_json::Error },
}

impl fmt::Display for GeoTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { source } => write!(f, "cannot parse location table: {source}"),
        }
    }
}

impl std::error::Error for GeoTableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source } => Some(source),
        }
    }
}
