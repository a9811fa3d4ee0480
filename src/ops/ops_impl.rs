// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Leaf-walking and splitting helpers used by the public mark operations.
/// Keeps `ops::mod` focused on contracts and outcome shaping.
///
/// `rebuild_leaves` clones the tree, offering every leaf to `replace` along
/// with its projected start offset. The walk advances offsets exactly the way
/// projection does (leaf text verbatim, one separator after each textblock),
/// so leaf offsets here always agree with a fresh [`projection::project`].
fn rebuild_leaves<F>(doc: &DocumentNode, replace: &mut F) -> DocumentNode
where
    F: FnMut(&str, &[Mark], usize) -> Option<Vec<DocumentNode>>,
{
    if !doc.is_container() {
        // A document is a single container root; anything else passes through.
        return doc.clone();
    }
    let mut offset = 0usize;
    let mut rebuilt = rebuild_node(doc, &mut offset, replace);
    debug_assert_eq!(rebuilt.len(), 1);
    rebuilt.remove(0)
}

fn rebuild_node<F>(node: &DocumentNode, offset: &mut usize, replace: &mut F) -> Vec<DocumentNode>
where
    F: FnMut(&str, &[Mark], usize) -> Option<Vec<DocumentNode>>,
{
    match node {
        DocumentNode::Leaf { text, marks } => {
            let leaf_start = *offset;
            *offset += text.len();
            match replace(text, marks, leaf_start) {
                Some(replacement) => replacement,
                None => vec![node.clone()],
            }
        }
        DocumentNode::Rule => vec![DocumentNode::Rule],
        DocumentNode::Container { kind, children } => {
            let mut new_children = Vec::with_capacity(children.len());
            for child in children {
                new_children.extend(rebuild_node(child, offset, replace));
            }
            if projection::emits_separator(*kind) {
                *offset += BLOCK_SEPARATOR.len();
            }
            vec![DocumentNode::Container {
                kind: *kind,
                children: new_children,
            }]
        }
    }
}

/// Splits leaf text at `[cut_start, cut_end)` into up to three leaves.
///
/// The middle piece carries the original marks plus `extra`; the outer pieces
/// keep the original marks untouched, so anchors over the rest of the leaf
/// survive the split. Empty pieces are dropped.
fn split_leaf(
    text: &str,
    marks: &[Mark],
    cut_start: usize,
    cut_end: usize,
    extra: Option<Mark>,
) -> Vec<DocumentNode> {
    let mut pieces = Vec::with_capacity(3);

    if cut_start > 0 {
        pieces.push(DocumentNode::leaf_marked(&text[..cut_start], marks.to_vec()));
    }

    let mut mid_marks = marks.to_vec();
    if let Some(extra) = extra {
        mid_marks.push(extra);
    }
    pieces.push(DocumentNode::leaf_marked(
        &text[cut_start..cut_end],
        mid_marks,
    ));

    if cut_end < text.len() {
        pieces.push(DocumentNode::leaf_marked(&text[cut_end..], marks.to_vec()));
    }

    pieces
}

/// Case-insensitive literal search pattern for in-leaf text matching.
fn leaf_search_pattern(needle: &str) -> Result<regex::Regex, regex::Error> {
    regex::RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
}
