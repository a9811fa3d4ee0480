// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::entity::EntityType;
use super::ids::{CommentId, EntityId, ThreadId};

/// A node in the structured prose tree.
///
/// Containers nest; only leaves carry text and marks. `Rule` is a zero-width
/// leaf (horizontal rule): it occupies a tree position but contributes no
/// characters to the projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "NodeJson", try_from = "NodeJson")]
pub enum DocumentNode {
    Container {
        kind: BlockKind,
        children: Vec<DocumentNode>,
    },
    Leaf {
        text: String,
        marks: Vec<Mark>,
    },
    Rule,
}

impl DocumentNode {
    /// A document root with the given top-level blocks.
    pub fn doc(children: Vec<DocumentNode>) -> Self {
        Self::Container {
            kind: BlockKind::Doc,
            children,
        }
    }

    pub fn paragraph(children: Vec<DocumentNode>) -> Self {
        Self::Container {
            kind: BlockKind::Paragraph,
            children,
        }
    }

    pub fn heading(children: Vec<DocumentNode>) -> Self {
        Self::Container {
            kind: BlockKind::Heading,
            children,
        }
    }

    pub fn leaf(text: impl Into<String>) -> Self {
        Self::Leaf {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn leaf_marked(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self::Leaf {
            text: text.into(),
            marks,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container { .. })
    }
}

/// Block-level container tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Doc,
    Paragraph,
    Heading,
    Blockquote,
    BulletList,
    ListItem,
}

impl BlockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Doc => "doc",
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::Blockquote => "blockquote",
            Self::BulletList => "bullet_list",
            Self::ListItem => "list_item",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBlockKindError {
    value: String,
}

impl fmt::Display for ParseBlockKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown block kind {:?}", self.value)
    }
}

impl std::error::Error for ParseBlockKindError {}

impl FromStr for BlockKind {
    type Err = ParseBlockKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doc" => Ok(Self::Doc),
            "paragraph" => Ok(Self::Paragraph),
            "heading" => Ok(Self::Heading),
            "blockquote" => Ok(Self::Blockquote),
            "bullet_list" => Ok(Self::BulletList),
            "list_item" => Ok(Self::ListItem),
            _ => Err(ParseBlockKindError {
                value: s.to_owned(),
            }),
        }
    }
}

/// An inline, span-scoped annotation attached to leaf text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "attributes", rename_all = "camelCase")]
#[serde(rename_all_fields = "camelCase")]
pub enum Mark {
    EntityLink {
        entity_id: EntityId,
        entity_name: String,
        entity_type: EntityType,
    },
    CommentAnchor {
        comment_id: CommentId,
        thread_id: ThreadId,
    },
}

impl Mark {
    pub fn is_entity_link(&self) -> bool {
        matches!(self, Self::EntityLink { .. })
    }

    pub fn entity_id(&self) -> Option<&EntityId> {
        match self {
            Self::EntityLink { entity_id, .. } => Some(entity_id),
            Self::CommentAnchor { .. } => None,
        }
    }

    pub fn thread_id(&self) -> Option<&ThreadId> {
        match self {
            Self::EntityLink { .. } => None,
            Self::CommentAnchor { thread_id, .. } => Some(thread_id),
        }
    }
}

const LEAF_TYPE: &str = "text";
const RULE_TYPE: &str = "horizontal_rule";

/// Raw JSON shape of a node: `{"type", "text"?, "marks"?, "children"?}`.
///
/// This is the persisted contract with the store; the tagged-union model type
/// converts through it so malformed rows surface as deserialization errors
/// rather than panics.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeJson {
    #[serde(rename = "type")]
    node_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    marks: Option<Vec<Mark>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<Vec<NodeJson>>,
}

impl From<DocumentNode> for NodeJson {
    fn from(node: DocumentNode) -> Self {
        match node {
            DocumentNode::Container { kind, children } => NodeJson {
                node_type: kind.as_str().to_owned(),
                text: None,
                marks: None,
                children: Some(children.into_iter().map(NodeJson::from).collect()),
            },
            DocumentNode::Leaf { text, marks } => NodeJson {
                node_type: LEAF_TYPE.to_owned(),
                text: Some(text),
                marks: if marks.is_empty() { None } else { Some(marks) },
                children: None,
            },
            DocumentNode::Rule => NodeJson {
                node_type: RULE_TYPE.to_owned(),
                text: None,
                marks: None,
                children: None,
            },
        }
    }
}

impl TryFrom<NodeJson> for DocumentNode {
    type Error = String;

    fn try_from(raw: NodeJson) -> Result<Self, Self::Error> {
        match raw.node_type.as_str() {
            LEAF_TYPE => Ok(DocumentNode::Leaf {
                text: raw.text.unwrap_or_default(),
                marks: raw.marks.unwrap_or_default(),
            }),
            RULE_TYPE => Ok(DocumentNode::Rule),
            other => {
                let kind: BlockKind = other.parse().map_err(|err| format!("{err}"))?;
                if raw.text.is_some() || raw.marks.is_some() {
                    return Err(format!("container node {other:?} must not carry text or marks"));
                }
                let children = raw
                    .children
                    .unwrap_or_default()
                    .into_iter()
                    .map(DocumentNode::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(DocumentNode::Container { kind, children })
            }
        }
    }
}
