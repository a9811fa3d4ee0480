// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{
    apply_comment_anchor, apply_entity_link, apply_entity_link_at, remove_entity_link,
    strip_comment_anchors, ApplyError,
};
use crate::model::fixtures;
use crate::model::{CommentId, DocumentNode, EntityRosterEntry, Mark, ThreadId};
use crate::query::{detect, project};

fn roster() -> Vec<EntityRosterEntry> {
    fixtures::roster_aria_hollow()
}

fn entity_links(doc: &DocumentNode) -> Vec<(String, usize, usize)> {
    let projection = project(doc);
    let mut links = Vec::new();
    for span in projection.index().leaf_spans() {
        if let Some(Mark::EntityLink { entity_id, .. }) = leaf_entity_link(doc, span.path()) {
            links.push((entity_id.as_str().to_owned(), span.start(), span.end()));
        }
    }
    links
}

fn leaf_entity_link<'a>(doc: &'a DocumentNode, path: &[usize]) -> Option<&'a Mark> {
    let mut node = doc;
    for &index in path {
        let DocumentNode::Container { children, .. } = node else {
            return None;
        };
        node = children.get(index)?;
    }
    let DocumentNode::Leaf { marks, .. } = node else {
        return None;
    };
    marks.iter().find(|mark| mark.is_entity_link())
}

#[test]
fn apply_entity_link_splits_leaf_and_marks_middle() {
    let doc = fixtures::scenario_doc();
    let outcome = apply_entity_link(&doc, "Aria", &roster()[0]);

    assert!(outcome.applied);
    // Input tree untouched.
    assert_eq!(doc, fixtures::scenario_doc());

    let links = entity_links(&outcome.doc);
    assert_eq!(links, vec![("e1".to_owned(), 0, 4)]);
    // Projected text is unchanged by the split.
    assert_eq!(project(&outcome.doc).text(), project(&doc).text());
}

#[test]
fn scenario_a_links_both_entities_without_overlap() {
    let doc = fixtures::scenario_doc();
    let projection = project(&doc);
    let matches = detect(projection.text(), &roster());
    assert_eq!(matches.len(), 2);

    let mut current = doc;
    for candidate in &matches {
        let entry = roster()
            .into_iter()
            .find(|entry| entry.entity_id() == &candidate.entity_id)
            .expect("roster entry");
        let outcome = apply_entity_link(&current, &candidate.matched_text, &entry);
        assert!(outcome.applied);
        current = outcome.doc;
    }

    let links = entity_links(&current);
    assert_eq!(
        links,
        vec![("e1".to_owned(), 0, 4), ("e2".to_owned(), 17, 23)]
    );

    // No two entity links share an offset.
    for window in links.windows(2) {
        assert!(window[0].2 <= window[1].1);
    }

    // Re-running the scan and re-applying yields no new links.
    for candidate in detect(project(&current).text(), &roster()) {
        let entry = roster()
            .into_iter()
            .find(|entry| entry.entity_id() == &candidate.entity_id)
            .expect("roster entry");
        let retry = apply_entity_link(&current, &candidate.matched_text, &entry);
        assert!(!retry.applied);
        assert_eq!(retry.doc, current);
    }
}

#[test]
fn apply_entity_link_misses_when_text_moved() {
    let doc = fixtures::scenario_doc();
    let outcome = apply_entity_link(&doc, "Vanished Name", &roster()[0]);
    assert!(!outcome.applied);
    assert_eq!(outcome.doc, doc);
}

#[test]
fn apply_entity_link_is_case_insensitive() {
    let doc = fixtures::scenario_doc();
    let outcome = apply_entity_link(&doc, "ARIA", &roster()[0]);
    assert!(outcome.applied);
    assert_eq!(entity_links(&outcome.doc), vec![("e1".to_owned(), 0, 4)]);
}

#[test]
fn apply_entity_link_at_respects_leaf_bounds() {
    let doc = fixtures::scenario_doc();

    let outcome = apply_entity_link_at(&doc, 17, 23, &roster()[1]).expect("apply at range");
    assert!(outcome.applied);
    assert_eq!(entity_links(&outcome.doc), vec![("e2".to_owned(), 17, 23)]);

    // A range crossing the block separator covers no single leaf.
    let multi = fixtures::multi_block_doc();
    let projection = project(&multi);
    let boundary = projection.text().find('\n').expect("separator");
    let outcome = apply_entity_link_at(&multi, boundary - 2, boundary + 2, &roster()[0])
        .expect("apply across blocks");
    assert!(!outcome.applied);
    assert_eq!(outcome.doc, multi);
}

#[test]
fn apply_entity_link_at_rejects_invalid_ranges() {
    let doc = fixtures::scenario_doc();
    let text_len = project(&doc).text().len();

    let empty = apply_entity_link_at(&doc, 5, 5, &roster()[0]);
    assert_eq!(
        empty,
        Err(ApplyError::InvalidRange {
            start: 5,
            end: 5,
            text_len,
        })
    );

    let out_of_bounds = apply_entity_link_at(&doc, 0, text_len + 10, &roster()[0]);
    assert!(matches!(out_of_bounds, Err(ApplyError::InvalidRange { .. })));
}

#[test]
fn overlapping_entity_links_are_rejected_not_stacked() {
    let doc = fixtures::scenario_doc();
    let linked = apply_entity_link(&doc, "Aria", &roster()[0]).doc;

    // The same span, now carrying a link, rejects a second entity.
    let retry = apply_entity_link_at(&linked, 0, 4, &roster()[1]).expect("apply at range");
    assert!(!retry.applied);
    assert_eq!(entity_links(&retry.doc), vec![("e1".to_owned(), 0, 4)]);
}

#[test]
fn remove_entity_link_keeps_comment_anchors() {
    let doc = fixtures::scenario_doc();
    let comment_id = CommentId::new("c1").expect("comment id");
    let thread_id = ThreadId::new("c1").expect("thread id");

    let with_anchor =
        apply_comment_anchor(&doc, 0, 12, &comment_id, &thread_id).expect("anchor").doc;
    let with_link = apply_entity_link(&with_anchor, "Aria", &roster()[0]).doc;
    assert_eq!(entity_links(&with_link).len(), 1);

    let removed = remove_entity_link(&with_link, 0, 4).expect("remove");
    assert!(removed.applied);
    assert!(entity_links(&removed.doc).is_empty());

    // The anchor over the same text survives.
    let projection = project(&removed.doc);
    let anchored = projection
        .index()
        .leaf_spans()
        .iter()
        .filter(|span| span.start() < 12)
        .count();
    assert!(anchored > 0);
    let stripped = strip_comment_anchors(&removed.doc, &thread_id);
    assert!(stripped.applied);
}

#[test]
fn comment_anchor_spans_leaves_and_blocks() {
    let doc = fixtures::multi_block_doc();
    let projection = project(&doc);
    let comment_id = CommentId::new("c9").expect("comment id");
    let thread_id = ThreadId::new("c9").expect("thread id");

    let start = projection.text().find("the Emberglass").expect("start");
    let end = start + "the Emberglass north".len();
    let outcome = apply_comment_anchor(&doc, start, end, &comment_id, &thread_id).expect("anchor");
    assert!(outcome.applied);
    assert_eq!(project(&outcome.doc).text(), projection.text());

    let stripped = strip_comment_anchors(&outcome.doc, &thread_id);
    assert!(stripped.applied);
    let again = strip_comment_anchors(&stripped.doc, &thread_id);
    assert!(!again.applied);
}

#[test]
fn comment_anchor_on_separator_only_range_applies_nothing() {
    let doc = fixtures::multi_block_doc();
    let projection = project(&doc);
    let comment_id = CommentId::new("c2").expect("comment id");
    let thread_id = ThreadId::new("c2").expect("thread id");

    let separator = projection.text().find('\n').expect("separator");
    let outcome = apply_comment_anchor(&doc, separator, separator + 1, &comment_id, &thread_id)
        .expect("anchor");
    assert!(!outcome.applied);
    assert_eq!(outcome.doc, doc);
}

#[test]
fn comment_anchors_may_stack_on_linked_text() {
    let doc = fixtures::scenario_doc();
    let linked = apply_entity_link(&doc, "Hollow", &roster()[1]).doc;
    let comment_id = CommentId::new("c3").expect("comment id");
    let thread_id = ThreadId::new("c3").expect("thread id");

    let outcome =
        apply_comment_anchor(&linked, 17, 23, &comment_id, &thread_id).expect("anchor");
    assert!(outcome.applied);
    // Both marks coexist on the same span.
    assert_eq!(entity_links(&outcome.doc), vec![("e2".to_owned(), 17, 23)]);
}
