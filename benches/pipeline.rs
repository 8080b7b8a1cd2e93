// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use thalassa::query::derive_snapshot;
use thalassa::store::Dataset;

mod fixtures;
mod profiler;

use fixtures::Case;

// Benchmark identity (keep stable):
// - Group names in this file: `pipeline.load`, `pipeline.snapshot`
// - Case IDs (the string after the `/`) must remain stable across refactors
//   so results stay comparable over time (e.g. `small`, `medium`).
fn benches_pipeline(c: &mut Criterion) {
    let mut load = c.benchmark_group("pipeline.load");
    for (id, case) in [("small", Case::Small), ("medium", Case::Medium)] {
        let locations = fixtures::locations(case);
        load.bench_function(id, |b| {
            b.iter_batched(
                || fixtures::rows(case),
                |rows| {
                    black_box(Dataset::from_rows(rows, &locations).expect("from_rows"))
                },
                BatchSize::SmallInput,
            )
        });
    }
    load.finish();

    let mut snapshot = c.benchmark_group("pipeline.snapshot");
    for (id, case) in [("small", Case::Small), ("medium", Case::Medium)] {
        let dataset = fixtures::dataset(case);
        let selection = dataset.default_selection();
        snapshot.bench_function(id, |b| {
            b.iter(|| black_box(derive_snapshot(black_box(&dataset), black_box(&selection))))
        });
    }
    snapshot.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_pipeline
}
criterion_main!(benches);
