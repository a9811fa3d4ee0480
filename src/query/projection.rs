// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{BlockKind, DocumentNode};

/// Separator emitted after every textblock (paragraph, heading, list item).
///
/// Fixed so that structurally identical trees always project to identical
/// text. Wrapper containers (doc, blockquote, bullet list) emit nothing of
/// their own; their textblock children already did.
pub const BLOCK_SEPARATOR: &str = "\n";

/// Child-index path from the document root to a node.
pub type NodePath = Vec<usize>;

/// The flattened plain-text view of a document plus the offset index mapping
/// projected positions back into the tree.
///
/// All offsets are byte offsets into the UTF-8 projection text. They are
/// stable only until the next structural edit; every positional consumer must
/// re-project before trusting an offset for a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    text: String,
    index: OffsetIndex,
}

impl Projection {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn index(&self) -> &OffsetIndex {
        &self.index
    }

    pub fn into_parts(self) -> (String, OffsetIndex) {
        (self.text, self.index)
    }
}

/// Projected byte range of one non-empty leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafSpan {
    path: NodePath,
    start: usize,
    end: usize,
}

impl LeafSpan {
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// Maps projected offsets back to `(node path, intra-leaf offset)`.
///
/// Separator characters belong to no leaf; `locate` returns `None` for them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OffsetIndex {
    spans: Vec<LeafSpan>,
}

impl OffsetIndex {
    pub fn leaf_spans(&self) -> &[LeafSpan] {
        &self.spans
    }

    /// The leaf containing `offset`, with the offset rebased into that leaf.
    pub fn locate(&self, offset: usize) -> Option<(&LeafSpan, usize)> {
        let i = self
            .spans
            .partition_point(|span| span.end <= offset);
        let span = self.spans.get(i)?;
        span.contains(offset).then(|| (span, offset - span.start))
    }

    /// Leaf spans overlapping `[start, end)`, in document order.
    pub fn spans_in_range(&self, start: usize, end: usize) -> impl Iterator<Item = &LeafSpan> {
        self.spans
            .iter()
            .filter(move |span| span.start < end && span.end > start)
    }
}

/// Flattens a document depth-first into plain text plus an offset index.
///
/// Pure and deterministic: two projections of the same tree are identical.
pub fn project(doc: &DocumentNode) -> Projection {
    let mut text = String::new();
    let mut spans = Vec::new();
    let mut path = NodePath::new();
    visit(doc, &mut path, &mut text, &mut spans);
    Projection {
        text,
        index: OffsetIndex { spans },
    }
}

fn visit(node: &DocumentNode, path: &mut NodePath, text: &mut String, spans: &mut Vec<LeafSpan>) {
    match node {
        DocumentNode::Leaf { text: leaf_text, .. } => {
            if !leaf_text.is_empty() {
                spans.push(LeafSpan {
                    path: path.clone(),
                    start: text.len(),
                    end: text.len() + leaf_text.len(),
                });
                text.push_str(leaf_text);
            }
        }
        // Zero characters; still a tree position, so sibling paths stay true.
        DocumentNode::Rule => {}
        DocumentNode::Container { kind, children } => {
            for (i, child) in children.iter().enumerate() {
                path.push(i);
                visit(child, path, text, spans);
                path.pop();
            }
            if emits_separator(*kind) {
                text.push_str(BLOCK_SEPARATOR);
            }
        }
    }
}

pub(crate) fn emits_separator(kind: BlockKind) -> bool {
    match kind {
        BlockKind::Paragraph | BlockKind::Heading | BlockKind::ListItem => true,
        BlockKind::Doc | BlockKind::Blockquote | BlockKind::BulletList => false,
    }
}

/// Whitespace-separated word count of projected text.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::{project, word_count};
    use crate::model::fixtures;
    use crate::model::DocumentNode;

    #[test]
    fn projection_is_deterministic() {
        let doc = fixtures::multi_block_doc();
        let first = project(&doc);
        let second = project(&doc);
        assert_eq!(first, second);
    }

    #[test]
    fn blocks_are_separated_by_single_newlines() {
        let doc = fixtures::multi_block_doc();
        let projection = project(&doc);
        assert_eq!(
            projection.text(),
            "The Hollow\nAria entered the Hollow.\nShe carried the Emberglass north.\n"
        );
    }

    #[test]
    fn rule_contributes_no_characters() {
        let with_rule = DocumentNode::doc(vec![
            DocumentNode::paragraph(vec![DocumentNode::leaf("one")]),
            DocumentNode::Rule,
            DocumentNode::paragraph(vec![DocumentNode::leaf("two")]),
        ]);
        let without_rule = DocumentNode::doc(vec![
            DocumentNode::paragraph(vec![DocumentNode::leaf("one")]),
            DocumentNode::paragraph(vec![DocumentNode::leaf("two")]),
        ]);

        assert_eq!(
            project(&with_rule).text(),
            project(&without_rule).text()
        );
    }

    #[test]
    fn locate_maps_offsets_into_leaves() {
        let doc = fixtures::multi_block_doc();
        let projection = project(&doc);

        // Offset 0 is inside the heading leaf.
        let (span, intra) = projection.index().locate(0).expect("heading leaf");
        assert_eq!(span.path(), &[0, 0]);
        assert_eq!(intra, 0);

        // "Emberglass" lives in the second leaf of the last paragraph.
        let start = projection.text().find("Emberglass").expect("emberglass");
        let (span, intra) = projection.index().locate(start).expect("emberglass leaf");
        assert_eq!(span.path(), &[3, 1]);
        assert_eq!(intra, 0);
    }

    #[test]
    fn locate_returns_none_on_separators_and_out_of_bounds() {
        let doc = fixtures::scenario_doc();
        let projection = project(&doc);

        let separator = projection.text().len() - 1;
        assert_eq!(projection.text().as_bytes()[separator], b'\n');
        assert!(projection.index().locate(separator).is_none());
        assert!(projection.index().locate(projection.text().len()).is_none());
    }

    #[test]
    fn spans_in_range_cross_leaf_boundaries() {
        let doc = fixtures::multi_block_doc();
        let projection = project(&doc);

        let start = projection.text().find("the Emberglass").expect("range start");
        let end = start + "the Emberglass nor".len();
        let paths: Vec<&[usize]> = projection
            .index()
            .spans_in_range(start, end)
            .map(|span| span.path())
            .collect();
        assert_eq!(paths, vec![&[3, 0][..], &[3, 1][..], &[3, 2][..]]);
    }

    #[test]
    fn word_count_splits_on_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("Aria entered the Hollow.\n"), 4);
    }
}
