// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use regex::RegexBuilder;

use crate::model::{DetectedEntity, EntityRosterEntry};

/// Minimum normalized fuzzy ratio (0.0..=1.0) for a roster entry to appear in
/// suggestions.
const SUGGEST_SCORE_FLOOR: f64 = 0.55;

/// Scans `text` for mentions of roster entities.
///
/// Case-insensitive and whole-word: a name never matches inside a longer
/// alphanumeric run ("Aria" does not fire on "Ariadne"). Every known name and
/// alias of every entry is tried. Matches of a single entity never overlap
/// each other, but matches of *different* entities may: the scan surfaces all
/// candidates and leaves arbitration to the caller. Results ascend by start
/// offset, ties broken by entity name. Empty text yields an empty result,
/// never an error.
///
/// Offsets are byte offsets into `text`; they are a transient recommendation,
/// valid only until the document changes.
pub fn detect(text: &str, roster: &[EntityRosterEntry]) -> Vec<DetectedEntity> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut detected = Vec::new();

    for entry in roster {
        // Claimed byte ranges for this entity, to keep its own matches
        // non-overlapping even across its aliases.
        let mut claimed: Vec<(usize, usize)> = Vec::new();

        for name in entry.known_names() {
            if name.is_empty() {
                continue;
            }
            let Ok(pattern) = name_pattern(name) else {
                continue;
            };

            for found in pattern.find_iter(text) {
                let (start, end) = (found.start(), found.end());
                if claimed.iter().any(|&(s, e)| s < end && e > start) {
                    continue;
                }
                claimed.push((start, end));
                detected.push(DetectedEntity {
                    entity_id: entry.entity_id().clone(),
                    entity_name: entry.name().to_owned(),
                    entity_type: entry.entity_type(),
                    matched_text: found.as_str().to_owned(),
                    start_index: start,
                    end_index: end,
                });
            }
        }
    }

    detected.sort_by(|a, b| {
        a.start_index
            .cmp(&b.start_index)
            .then_with(|| a.entity_name.cmp(&b.entity_name))
    });
    detected
}

fn name_pattern(name: &str) -> Result<regex::Regex, regex::Error> {
    let escaped = regex::escape(name);
    RegexBuilder::new(&format!(r"\b{escaped}\b"))
        .case_insensitive(true)
        .build()
}

/// Ranks roster entries against a user selection for the manual-link picker.
///
/// Scores are normalized `rapidfuzz` ratios (0.0..=1.0) over the
/// best-matching known name; entries below the score floor are dropped.
/// Descending by score, ties broken by entity name.
pub fn suggest<'a>(
    selected_text: &str,
    roster: &'a [EntityRosterEntry],
    limit: usize,
) -> Vec<(f64, &'a EntityRosterEntry)> {
    let needle = selected_text.trim().to_lowercase();
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(f64, &EntityRosterEntry)> = roster
        .iter()
        .filter_map(|entry| {
            let best = entry
                .known_names()
                .map(|name| rapidfuzz::fuzz::ratio(needle.chars(), name.to_lowercase().chars()))
                .fold(0.0_f64, f64::max);
            (best >= SUGGEST_SCORE_FLOOR).then_some((best, entry))
        })
        .collect();

    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.name().cmp(b.1.name()))
    });
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::{detect, suggest};
    use crate::model::fixtures;
    use crate::model::{EntityId, EntityRosterEntry, EntityType};
    use crate::query::project;

    fn entry(id: &str, name: &str, entity_type: EntityType) -> EntityRosterEntry {
        EntityRosterEntry::new(EntityId::new(id).expect("entity id"), name, entity_type)
    }

    #[test]
    fn empty_text_yields_no_matches() {
        assert!(detect("", &fixtures::roster_aria_hollow()).is_empty());
    }

    #[test]
    fn scenario_doc_yields_both_entities_in_offset_order() {
        let projection = project(&fixtures::scenario_doc());
        let matches = detect(projection.text(), &fixtures::roster_aria_hollow());

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].entity_id.as_str(), "e1");
        assert_eq!(matches[0].matched_text, "Aria");
        assert_eq!(matches[0].start_index, 0);
        assert_eq!(matches[0].end_index, 4);
        assert_eq!(matches[1].entity_id.as_str(), "e2");
        assert_eq!(matches[1].matched_text, "Hollow");
        assert_eq!(matches[1].start_index, 17);
        assert_eq!(matches[1].end_index, 23);
    }

    #[test]
    fn matching_is_case_insensitive_and_reports_source_casing() {
        let roster = vec![entry("e1", "Aria", EntityType::Character)];
        let matches = detect("ARIA spoke. Then aria slept.", &roster);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].matched_text, "ARIA");
        assert_eq!(matches[0].entity_name, "Aria");
        assert_eq!(matches[1].matched_text, "aria");
    }

    #[test]
    fn short_names_require_word_boundaries() {
        let roster = vec![entry("e1", "Kai", EntityType::Character)];

        assert!(detect("The kaiju woke.", &roster).is_empty());
        let matches = detect("Kai woke the kaiju.", &roster);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].start_index, 0);
    }

    #[test]
    fn names_never_match_inside_longer_words() {
        let roster = vec![entry("e1", "Aria", EntityType::Character)];

        assert!(detect("Ariadne wept alone.", &roster).is_empty());
        assert!(detect("The malarial swamp.", &roster).is_empty());

        // Punctuation is still a boundary.
        let matches = detect("It was Aria's blade.", &roster);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched_text, "Aria");
    }

    #[test]
    fn aliases_match_and_own_matches_never_overlap() {
        let mut aria = entry("e1", "Aria", EntityType::Character);
        aria.aliases_mut().push("Aria the Stormcaller".to_owned());

        let matches = detect("Aria the Stormcaller arrived.", &roster_of(aria));
        // The primary name claims "Aria" first; the longer alias overlaps it
        // and is skipped for the same entity.
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched_text, "Aria");
    }

    #[test]
    fn different_entities_may_overlap() {
        let roster = vec![
            entry("e1", "Hollow", EntityType::Location),
            entry("e2", "the Hollow", EntityType::Location),
        ];
        let matches = detect("Deep in the Hollow.", &roster);

        assert_eq!(matches.len(), 2);
        assert!(matches[0].start_index <= matches[1].start_index);
    }

    #[test]
    fn ties_on_offset_break_by_entity_name() {
        let roster = vec![
            entry("e2", "Hollow Gate", EntityType::Location),
            entry("e1", "Hollow", EntityType::Location),
        ];
        let matches = detect("Hollow Gate stood open.", &roster);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].start_index, 0);
        assert_eq!(matches[0].entity_name, "Hollow");
        assert_eq!(matches[1].entity_name, "Hollow Gate");
    }

    #[test]
    fn suggest_ranks_close_names_and_drops_weak_ones() {
        let roster = vec![
            entry("e1", "Aria", EntityType::Character),
            entry("e2", "Arianwen", EntityType::Character),
            entry("e3", "Thornfield Keep", EntityType::Location),
        ];

        let suggestions = suggest("Arian", &roster, 5);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].1.name(), "Aria");
        assert_eq!(suggestions[1].1.name(), "Arianwen");
        assert!(suggestions[0].0 >= suggestions[1].0);
        // Ratios are normalized; "Arian" vs "Aria" is one edit in nine chars.
        assert!(suggestions[0].0 > 0.8 && suggestions[0].0 <= 1.0);

        assert!(suggest("", &roster, 5).is_empty());
        assert_eq!(suggest("Arian", &roster, 1).len(), 1);
    }

    fn roster_of(entry: EntityRosterEntry) -> Vec<EntityRosterEntry> {
        vec![entry]
    }
}
