// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use serde_json::Value;

use thalassa::format::rows::Row;
use thalassa::geo::StaticLocations;
use thalassa::store::Dataset;

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// ~50 locations, 1k raw rows.
    Small,
    /// ~200 locations, 20k raw rows.
    Medium,
}

impl Case {
    fn location_count(self) -> usize {
        match self {
            Self::Small => 50,
            Self::Medium => 200,
        }
    }

    fn row_count(self) -> usize {
        match self {
            Self::Small => 1_000,
            Self::Medium => 20_000,
        }
    }
}

const PRODUCTS: [&str; 5] = ["tulips", "cheese", "machines", "coffee", "wool"];

fn code_for(index: usize) -> String {
    let first = b'A' + (index / 26 % 26) as u8;
    let second = b'A' + (index % 26) as u8;
    format!("{}{}", first as char, second as char)
}

pub fn rows(case: Case) -> Vec<Row> {
    let locations = case.location_count();
    (0..case.row_count())
        .map(|index| {
            let source = code_for(index % locations);
            let target = code_for((index * 7 + 3) % locations);
            let weight = ((index * 37) % 997 + 1) as f64;
            let year = 2015 + (index % 8) as i64;
            let product = PRODUCTS[index % PRODUCTS.len()];
            Row::from([
                ("source".to_owned(), Value::from(source)),
                ("target".to_owned(), Value::from(target)),
                ("weight".to_owned(), Value::from(weight)),
                ("year".to_owned(), Value::from(year)),
                ("product".to_owned(), Value::from(product)),
            ])
        })
        .collect()
}

pub fn locations(case: Case) -> StaticLocations {
    let mut table = StaticLocations::default();
    for index in 0..case.location_count() {
        let code = code_for(index);
        let longitude = (index as f64 * 3.7) % 360.0 - 180.0;
        let latitude = (index as f64 * 1.9) % 170.0 - 85.0;
        table.insert(&code, format!("Country {code}"), [longitude, latitude]);
    }
    table
}

pub fn dataset(case: Case) -> Dataset {
    Dataset::from_rows(rows(case), &locations(case)).expect("bench rows are well-formed")
}
