// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Built-in demo data used by the CLI demo mode, tests and benches.

use serde_json::Value;

use crate::format::rows::Row;
use crate::geo::StaticLocations;
use crate::store::Dataset;

fn row(source: &str, target: &str, weight: f64, year: i32, product: &str) -> Row {
    Row::from([
        ("source".to_owned(), Value::from(source)),
        ("target".to_owned(), Value::from(target)),
        ("weight".to_owned(), Value::from(weight)),
        ("year".to_owned(), Value::from(year)),
        ("product".to_owned(), Value::from(product)),
    ])
}

/// A small trade table: duplicates, a reciprocal pair and a self-link
/// included so every pipeline stage has something to chew on.
pub fn demo_rows() -> Vec<Row> {
    vec![
        row("NL", "BE", 120.0, 2020, "tulips"),
        row("NL", "BE", 80.0, 2021, "tulips"),
        row("BE", "NL", 40.0, 2020, "cheese"),
        row("NL", "DE", 200.0, 2020, "tulips"),
        row("NL", "DE", 60.0, 2021, "cheese"),
        row("DE", "FR", 300.0, 2020, "machines"),
        row("FR", "FR", 50.0, 2020, "wine"),
        row("US", "NL", 150.0, 2021, "machines"),
        row("BR", "US", 90.0, 2020, "coffee"),
        // Duplicate of the row above: merged by summing weight.
        row("BR", "US", 10.0, 2020, "coffee"),
        row("AU", "NL", 30.0, 2021, "wool"),
    ]
}

/// Capitals of the countries appearing in [`demo_rows`].
pub fn demo_locations() -> StaticLocations {
    let mut locations = StaticLocations::default();
    for (code, name, longitude, latitude) in [
        ("NL", "Netherlands", 4.89, 52.37),
        ("BE", "Belgium", 4.35, 50.85),
        ("DE", "Germany", 13.40, 52.52),
        ("FR", "France", 2.35, 48.86),
        ("US", "United States", -77.04, 38.90),
        ("BR", "Brazil", -47.90, -15.78),
        ("AU", "Australia", 149.13, -35.28),
    ] {
        locations.insert(code, name, [longitude, latitude]);
    }
    locations
}

pub fn demo_dataset() -> Dataset {
    Dataset::from_rows(demo_rows(), &demo_locations()).expect("demo rows are well-formed")
}
