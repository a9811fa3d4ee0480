// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use fabula::ops::{apply_comment_anchor, apply_entity_link_at};
use fabula::query::{detect, project};

mod fixtures;

// Benchmark identity (keep stable):
// - Group names in this file: `marks.link_all`, `marks.anchor`
// - Case IDs (the string after the `/`) must remain stable across refactors so
//   results stay comparable over time.
fn benches_marks(c: &mut Criterion) {
    let roster = fixtures::roster();

    let mut group = c.benchmark_group("marks.link_all");
    for case in [fixtures::Case::Small, fixtures::Case::Medium] {
        let doc = fixtures::document(case);
        group.bench_function(case.id(), |b| {
            b.iter_batched(
                || doc.clone(),
                |mut doc| {
                    // Linking never changes projected text, so one scan's
                    // offsets stay valid across every apply.
                    let projection = project(&doc);
                    let detections = detect(projection.text(), &roster);
                    for hit in &detections {
                        let entity = roster
                            .iter()
                            .find(|entry| entry.entity_id() == &hit.entity_id)
                            .expect("roster entry");
                        let outcome =
                            apply_entity_link_at(&doc, hit.start_index, hit.end_index, entity)
                                .expect("valid range");
                        if outcome.applied {
                            doc = outcome.doc;
                        }
                    }
                    black_box(doc)
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();

    let mut group = c.benchmark_group("marks.anchor");
    let doc = fixtures::document(fixtures::Case::Medium);
    let text_len = project(&doc).text().len();
    let comment_id = fabula::model::CommentId::new("c1").expect("comment id");
    let thread_id = fabula::model::ThreadId::new("c1").expect("thread id");
    group.bench_function("cross_block_span", |b| {
        b.iter(|| {
            let outcome = apply_comment_anchor(
                black_box(&doc),
                text_len / 3,
                text_len / 2,
                &comment_id,
                &thread_id,
            )
            .expect("valid range");
            black_box(outcome.applied)
        })
    });
    group.finish();
}

criterion_group!(benches, benches_marks);
criterion_main!(benches);
