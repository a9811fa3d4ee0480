// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mark operations on document trees.
//!
//! Every operation re-projects the document it is handed and returns a new
//! tree; the input is never mutated. "Not found" and "already linked" are
//! expected outcomes (`applied: false`), not errors, because stored offsets
//! and matched text go stale the moment the author keeps typing.

use std::fmt;

use crate::model::{DocumentNode, EntityRosterEntry, Mark, ThreadId};
use crate::model::CommentId;
use crate::query::projection::{self, BLOCK_SEPARATOR};

/// Result of a mark operation: the (possibly unchanged) new tree and whether
/// anything was attached or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkOutcome {
    pub doc: DocumentNode,
    pub applied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    /// Zero-length, out-of-bounds, or not aligned to a character boundary.
    InvalidRange {
        start: usize,
        end: usize,
        text_len: usize,
    },
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange { start, end, text_len } => {
                write!(f, "invalid range [{start}, {end}) for text of length {text_len}")
            }
        }
    }
}

impl std::error::Error for ApplyError {}

/// Attaches an entity link to the first unlinked occurrence of `matched_text`.
///
/// The document is re-projected and leaves are scanned in document order; the
/// first leaf whose own text contains `matched_text` (case-insensitive) and
/// which does not already carry an entity link wins. The leaf is split into up
/// to three leaves and the middle one gets the mark; comment anchors on the
/// original leaf are preserved on every piece. No unmarked occurrence yields
/// `applied: false` — the text moved or was already linked.
pub fn apply_entity_link(
    doc: &DocumentNode,
    matched_text: &str,
    entity: &EntityRosterEntry,
) -> MarkOutcome {
    if matched_text.is_empty() {
        return MarkOutcome {
            doc: doc.clone(),
            applied: false,
        };
    }

    let Ok(pattern) = leaf_search_pattern(matched_text) else {
        return MarkOutcome {
            doc: doc.clone(),
            applied: false,
        };
    };

    let mut applied = false;
    let new_doc = rebuild_leaves(doc, &mut |leaf_text, marks, _leaf_start| {
        if applied || has_entity_link(marks) {
            return None;
        }
        let found = pattern.find(leaf_text)?;
        applied = true;
        Some(split_leaf(
            leaf_text,
            marks,
            found.start(),
            found.end(),
            Some(entity_link_mark(entity)),
        ))
    });

    MarkOutcome {
        doc: new_doc,
        applied,
    }
}

/// Attaches an entity link to an explicit projected range.
///
/// The range must be non-empty, in bounds, and character-aligned, otherwise
/// `InvalidRange`. It must also fall inside a single leaf that carries no
/// entity link yet; a range crossing leaves or landing on a linked span yields
/// `applied: false` (never a stacked mark).
pub fn apply_entity_link_at(
    doc: &DocumentNode,
    start: usize,
    end: usize,
    entity: &EntityRosterEntry,
) -> Result<MarkOutcome, ApplyError> {
    let projection = projection::project(doc);
    validate_range(projection.text(), start, end)?;

    let target = projection
        .index()
        .locate(start)
        .filter(|(span, _)| end <= span.end());
    let Some((span, _)) = target else {
        return Ok(MarkOutcome {
            doc: doc.clone(),
            applied: false,
        });
    };
    let (span_start, span_end) = (span.start(), span.end());

    let mut applied = false;
    let new_doc = rebuild_leaves(doc, &mut |leaf_text, marks, leaf_start| {
        if applied || leaf_start != span_start || leaf_start + leaf_text.len() != span_end {
            return None;
        }
        if has_entity_link(marks) {
            return None;
        }
        applied = true;
        Some(split_leaf(
            leaf_text,
            marks,
            start - leaf_start,
            end - leaf_start,
            Some(entity_link_mark(entity)),
        ))
    });

    Ok(MarkOutcome {
        doc: new_doc,
        applied,
    })
}

/// Removes entity links from every leaf overlapping the projected range.
pub fn remove_entity_link(
    doc: &DocumentNode,
    start: usize,
    end: usize,
) -> Result<MarkOutcome, ApplyError> {
    let projection = projection::project(doc);
    validate_range(projection.text(), start, end)?;

    let mut applied = false;
    let new_doc = rebuild_leaves(doc, &mut |leaf_text, marks, leaf_start| {
        let leaf_end = leaf_start + leaf_text.len();
        if leaf_start >= end || leaf_end <= start || !has_entity_link(marks) {
            return None;
        }
        applied = true;
        let kept: Vec<Mark> = marks
            .iter()
            .filter(|mark| !mark.is_entity_link())
            .cloned()
            .collect();
        Some(vec![DocumentNode::leaf_marked(leaf_text, kept)])
    });

    Ok(MarkOutcome {
        doc: new_doc,
        applied,
    })
}

/// Anchors a comment over a projected range.
///
/// Unlike entity links, comment anchors may span several leaves and blocks and
/// may coexist with any other mark; each covered leaf segment is split out and
/// marked. `applied` is false only when the range covers no leaf text at all
/// (e.g. it lies entirely on block separators).
pub fn apply_comment_anchor(
    doc: &DocumentNode,
    start: usize,
    end: usize,
    comment_id: &CommentId,
    thread_id: &ThreadId,
) -> Result<MarkOutcome, ApplyError> {
    let projection = projection::project(doc);
    validate_range(projection.text(), start, end)?;

    let mark = Mark::CommentAnchor {
        comment_id: comment_id.clone(),
        thread_id: thread_id.clone(),
    };

    let mut applied = false;
    let new_doc = rebuild_leaves(doc, &mut |leaf_text, marks, leaf_start| {
        let leaf_end = leaf_start + leaf_text.len();
        if leaf_start >= end || leaf_end <= start {
            return None;
        }
        let cut_start = start.max(leaf_start) - leaf_start;
        let cut_end = end.min(leaf_end) - leaf_start;
        if !leaf_text.is_char_boundary(cut_start) || !leaf_text.is_char_boundary(cut_end) {
            return None;
        }
        applied = true;
        Some(split_leaf(leaf_text, marks, cut_start, cut_end, Some(mark.clone())))
    });

    Ok(MarkOutcome {
        doc: new_doc,
        applied,
    })
}

/// Removes every comment anchor belonging to `thread_id`.
///
/// Used when a thread is deleted; losing the visual anchor never loses the
/// comment rows themselves.
pub fn strip_comment_anchors(doc: &DocumentNode, thread_id: &ThreadId) -> MarkOutcome {
    let mut applied = false;
    let new_doc = rebuild_leaves(doc, &mut |leaf_text, marks, _leaf_start| {
        let kept: Vec<Mark> = marks
            .iter()
            .filter(|mark| mark.thread_id() != Some(thread_id))
            .cloned()
            .collect();
        if kept.len() == marks.len() {
            return None;
        }
        applied = true;
        Some(vec![DocumentNode::leaf_marked(leaf_text, kept)])
    });

    MarkOutcome {
        doc: new_doc,
        applied,
    }
}

fn entity_link_mark(entity: &EntityRosterEntry) -> Mark {
    Mark::EntityLink {
        entity_id: entity.entity_id().clone(),
        entity_name: entity.name().to_owned(),
        entity_type: entity.entity_type(),
    }
}

fn has_entity_link(marks: &[Mark]) -> bool {
    marks.iter().any(Mark::is_entity_link)
}

fn validate_range(text: &str, start: usize, end: usize) -> Result<(), ApplyError> {
    let invalid = ApplyError::InvalidRange {
        start,
        end,
        text_len: text.len(),
    };
    if start >= end || end > text.len() {
        return Err(invalid);
    }
    if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
        return Err(invalid);
    }
    Ok(())
}

// Extracted leaf-walking and splitting implementation.
include!("ops_impl.rs");

#[cfg(test)]
mod tests;
