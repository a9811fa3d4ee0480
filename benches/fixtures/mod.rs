// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use fabula::model::{DocumentNode, EntityId, EntityRosterEntry, EntityType};

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    LargeManyMentions,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::LargeManyMentions => "large_many_mentions",
        }
    }

    fn paragraphs(self) -> usize {
        match self {
            Self::Small => 8,
            Self::Medium => 120,
            Self::LargeManyMentions => 1_200,
        }
    }
}

const SENTENCES: [&str; 4] = [
    "Aria crossed the ford before the bells of Vael fell silent. ",
    "The Emberglass shard pulsed once and went dark in her satchel. ",
    "Nobody in the Hollow spoke of the Sundering anymore. ",
    "Captain Theron Vael counted lanterns along the river wall. ",
];

/// Chapter-shaped document: a heading, then paragraphs of three leaves each so
/// mark application has real splits to do.
pub fn document(case: Case) -> DocumentNode {
    let mut children = vec![DocumentNode::heading(vec![DocumentNode::leaf(
        "The Road to Vael",
    )])];
    for idx in 0..case.paragraphs() {
        children.push(DocumentNode::paragraph(vec![
            DocumentNode::leaf(SENTENCES[idx % SENTENCES.len()]),
            DocumentNode::leaf(SENTENCES[(idx + 1) % SENTENCES.len()]),
            DocumentNode::leaf(SENTENCES[(idx + 2) % SENTENCES.len()]),
        ]));
    }
    DocumentNode::doc(children)
}

pub fn roster() -> Vec<EntityRosterEntry> {
    let mut aria = EntityRosterEntry::new(
        EntityId::new("e-aria").expect("entity id"),
        "Aria",
        EntityType::Character,
    );
    aria.aliases_mut().push("the wanderer".to_owned());

    let mut theron = EntityRosterEntry::new(
        EntityId::new("e-theron").expect("entity id"),
        "Theron Vael",
        EntityType::Character,
    );
    theron.aliases_mut().push("Captain Theron Vael".to_owned());

    let mut hollow = EntityRosterEntry::new(
        EntityId::new("e-hollow").expect("entity id"),
        "Hollow",
        EntityType::Location,
    );
    hollow.aliases_mut().push("the Hollow".to_owned());

    vec![
        aria,
        theron,
        hollow,
        EntityRosterEntry::new(
            EntityId::new("e-vael").expect("entity id"),
            "Vael",
            EntityType::Location,
        ),
        EntityRosterEntry::new(
            EntityId::new("e-emberglass").expect("entity id"),
            "Emberglass",
            EntityType::Artifact,
        ),
        EntityRosterEntry::new(
            EntityId::new("e-sundering").expect("entity id"),
            "Sundering",
            EntityType::Event,
        ),
    ]
}
