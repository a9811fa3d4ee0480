// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::document::DocumentNode;
use super::entity::{EntityRosterEntry, EntityType};
use super::ids::EntityId;

fn eid(value: &str) -> EntityId {
    EntityId::new(value).expect("entity id")
}

/// Single-paragraph document: "Aria entered the Hollow."
pub(crate) fn scenario_doc() -> DocumentNode {
    DocumentNode::doc(vec![DocumentNode::paragraph(vec![DocumentNode::leaf(
        "Aria entered the Hollow.",
    )])])
}

pub(crate) fn roster_aria_hollow() -> Vec<EntityRosterEntry> {
    vec![
        EntityRosterEntry::new(eid("e1"), "Aria", EntityType::Character),
        EntityRosterEntry::new(eid("e2"), "Hollow", EntityType::Location),
    ]
}

/// Heading, two paragraphs (the second with split leaves), and a rule.
pub(crate) fn multi_block_doc() -> DocumentNode {
    DocumentNode::doc(vec![
        DocumentNode::heading(vec![DocumentNode::leaf("The Hollow")]),
        DocumentNode::paragraph(vec![DocumentNode::leaf("Aria entered the Hollow.")]),
        DocumentNode::Rule,
        DocumentNode::paragraph(vec![
            DocumentNode::leaf("She carried the "),
            DocumentNode::leaf("Emberglass"),
            DocumentNode::leaf(" north."),
        ]),
    ])
}
