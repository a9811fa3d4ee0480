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

use super::ids::EntityId;

/// Category of a canon entity in the shared fictional universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Character,
    Location,
    Artifact,
    Faction,
    Event,
}

impl EntityType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Location => "location",
            Self::Artifact => "artifact",
            Self::Faction => "faction",
            Self::Event => "event",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEntityTypeError;

impl fmt::Display for ParseEntityTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid entity type")
    }
}

impl std::error::Error for ParseEntityTypeError {}

impl FromStr for EntityType {
    type Err = ParseEntityTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "character" => Ok(Self::Character),
            "location" => Ok(Self::Location),
            "artifact" => Ok(Self::Artifact),
            "faction" => Ok(Self::Faction),
            "event" => Ok(Self::Event),
            _ => Err(ParseEntityTypeError),
        }
    }
}

/// One known canon entity as served by the roster endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRosterEntry {
    entity_id: EntityId,
    name: String,
    aliases: Vec<String>,
    entity_type: EntityType,
}

impl EntityRosterEntry {
    pub fn new(entity_id: EntityId, name: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            entity_id,
            name: name.into(),
            aliases: Vec::new(),
            entity_type,
        }
    }

    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn aliases_mut(&mut self) -> &mut Vec<String> {
        &mut self.aliases
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    /// The primary name followed by every alias, in roster order.
    pub fn known_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// A candidate mention produced by a scan.
///
/// Transient: produced fresh on each scan, never persisted. Offsets are valid
/// only against the text the scan ran over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedEntity {
    pub entity_id: EntityId,
    pub entity_name: String,
    pub entity_type: EntityType,
    pub matched_text: String,
    pub start_index: usize,
    pub end_index: usize,
}

#[cfg(test)]
mod tests {
    use super::{EntityRosterEntry, EntityType};
    use crate::model::ids::EntityId;

    #[test]
    fn entity_type_roundtrips_via_str() {
        let cases = [
            EntityType::Character,
            EntityType::Location,
            EntityType::Artifact,
            EntityType::Faction,
            EntityType::Event,
        ];

        for entity_type in cases {
            let s = entity_type.as_str();
            let parsed: EntityType = s.parse().expect("parse");
            assert_eq!(parsed, entity_type);
            assert_eq!(parsed.to_string(), s);
        }
    }

    #[test]
    fn known_names_starts_with_primary_name() {
        let mut entry = EntityRosterEntry::new(
            EntityId::new("e1").expect("id"),
            "Aria",
            EntityType::Character,
        );
        entry.aliases_mut().push("the Stormcaller".to_owned());

        let names: Vec<&str> = entry.known_names().collect();
        assert_eq!(names, vec!["Aria", "the Stormcaller"]);
    }
}
