// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use fabula::query::{detect, project, suggest};

mod fixtures;

// Benchmark identity (keep stable):
// - Group names in this file: `detect.scan`, `detect.suggest`
// - Case IDs (the string after the `/`) must remain stable across refactors so
//   results stay comparable over time.
fn checksum_detections(detections: &[fabula::model::DetectedEntity]) -> u64 {
    let mut acc = 0u64;
    for detection in detections {
        acc = acc.wrapping_mul(131).wrapping_add(detection.start_index as u64);
        acc = acc.wrapping_mul(131).wrapping_add(detection.end_index as u64);
    }
    acc
}

fn benches_detect(c: &mut Criterion) {
    let roster = fixtures::roster();

    let mut group = c.benchmark_group("detect.scan");
    for case in [
        fixtures::Case::Small,
        fixtures::Case::Medium,
        fixtures::Case::LargeManyMentions,
    ] {
        let text = project(&fixtures::document(case)).text().to_owned();
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(case.id(), |b| {
            b.iter(|| {
                let detections = detect(black_box(&text), black_box(&roster));
                black_box(checksum_detections(&detections))
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("detect.suggest");
    group.bench_function("misspelled_name", |b| {
        b.iter(|| {
            let ranked = suggest(black_box("Theron Vale"), black_box(&roster), 5);
            black_box(ranked.len())
        })
    });
    group.finish();
}

criterion_group!(benches, benches_detect);
criterion_main!(benches);
