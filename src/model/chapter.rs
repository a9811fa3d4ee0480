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

use super::document::DocumentNode;
use super::ids::{ChapterId, StoryId};

/// Author-facing lifecycle of a chapter.
///
/// Draft -> in progress -> complete, with a possible regression to revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChapterStatus {
    Draft,
    InProgress,
    Complete,
    Revision,
}

impl ChapterStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InProgress => "in_progress",
            Self::Complete => "complete",
            Self::Revision => "revision",
        }
    }
}

impl fmt::Display for ChapterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseChapterStatusError;

impl fmt::Display for ParseChapterStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid chapter status")
    }
}

impl std::error::Error for ParseChapterStatusError {}

impl FromStr for ChapterStatus {
    type Err = ParseChapterStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "in_progress" => Ok(Self::InProgress),
            "complete" => Ok(Self::Complete),
            "revision" => Ok(Self::Revision),
            _ => Err(ParseChapterStatusError),
        }
    }
}

/// One chapter row: the stored document tree plus editing metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    chapter_id: ChapterId,
    story_id: StoryId,
    title: String,
    content: DocumentNode,
    content_text: String,
    word_count: usize,
    word_target: Option<usize>,
    status: ChapterStatus,
    chapter_order: usize,
    created_at: u64,
    updated_at: u64,
}

impl Chapter {
    pub fn new(
        chapter_id: ChapterId,
        story_id: StoryId,
        title: impl Into<String>,
        chapter_order: usize,
        created_at: u64,
    ) -> Self {
        Self {
            chapter_id,
            story_id,
            title: title.into(),
            content: DocumentNode::doc(Vec::new()),
            content_text: String::new(),
            word_count: 0,
            word_target: None,
            status: ChapterStatus::Draft,
            chapter_order,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn chapter_id(&self) -> &ChapterId {
        &self.chapter_id
    }

    pub fn story_id(&self) -> &StoryId {
        &self.story_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn content(&self) -> &DocumentNode {
        &self.content
    }

    pub fn content_text(&self) -> &str {
        &self.content_text
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Replaces the stored document wholesale. Content is never merged.
    pub fn set_content(
        &mut self,
        content: DocumentNode,
        content_text: impl Into<String>,
        word_count: usize,
        updated_at: u64,
    ) {
        self.content = content;
        self.content_text = content_text.into();
        self.word_count = word_count;
        self.updated_at = updated_at;
    }

    pub fn word_target(&self) -> Option<usize> {
        self.word_target
    }

    pub fn set_word_target(&mut self, word_target: Option<usize>) {
        self.word_target = word_target;
    }

    pub fn status(&self) -> ChapterStatus {
        self.status
    }

    pub fn set_status(&mut self, status: ChapterStatus) {
        self.status = status;
    }

    pub fn chapter_order(&self) -> usize {
        self.chapter_order
    }

    pub fn set_chapter_order(&mut self, chapter_order: usize) {
        self.chapter_order = chapter_order;
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn updated_at(&self) -> u64 {
        self.updated_at
    }
}

/// Moves one chapter to `new_position` (0-based) and renumbers the whole
/// sequence densely. No-op when the chapter id is unknown.
///
/// `chapter_order` is presentation order, so the full renumber keeps the
/// sequence gap-free even if stored orders had drifted.
pub fn reorder_chapters(chapters: &mut [Chapter], chapter_id: &ChapterId, new_position: usize) {
    let Some(current) = chapters.iter().position(|ch| ch.chapter_id() == chapter_id) else {
        return;
    };

    chapters.sort_by_key(|ch| ch.chapter_order());
    let current = chapters
        .iter()
        .position(|ch| ch.chapter_id() == chapter_id)
        .unwrap_or(current);

    let target = new_position.min(chapters.len().saturating_sub(1));
    if current < target {
        chapters[current..=target].rotate_left(1);
    } else {
        chapters[target..=current].rotate_right(1);
    }

    for (index, chapter) in chapters.iter_mut().enumerate() {
        chapter.set_chapter_order(index);
    }
}

#[cfg(test)]
mod tests {
    use super::{reorder_chapters, Chapter, ChapterStatus};
    use crate::model::ids::{ChapterId, StoryId};

    fn chapter(id: &str, order: usize) -> Chapter {
        Chapter::new(
            ChapterId::new(id).expect("chapter id"),
            StoryId::new("s1").expect("story id"),
            format!("Chapter {id}"),
            order,
            1_000,
        )
    }

    fn orders(chapters: &[Chapter]) -> Vec<(&str, usize)> {
        chapters
            .iter()
            .map(|ch| (ch.chapter_id().as_str(), ch.chapter_order()))
            .collect()
    }

    #[test]
    fn chapter_status_roundtrips_via_str() {
        for status in [
            ChapterStatus::Draft,
            ChapterStatus::InProgress,
            ChapterStatus::Complete,
            ChapterStatus::Revision,
        ] {
            let parsed: ChapterStatus = status.as_str().parse().expect("parse");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn reorder_moves_and_renumbers_densely() {
        let mut chapters = vec![chapter("a", 0), chapter("b", 1), chapter("c", 2)];
        let b = ChapterId::new("b").expect("chapter id");

        reorder_chapters(&mut chapters, &b, 0);
        assert_eq!(orders(&chapters), vec![("b", 0), ("a", 1), ("c", 2)]);

        reorder_chapters(&mut chapters, &b, 2);
        assert_eq!(orders(&chapters), vec![("a", 0), ("c", 1), ("b", 2)]);
    }

    #[test]
    fn reorder_unknown_chapter_is_a_noop() {
        let mut chapters = vec![chapter("a", 0), chapter("b", 1)];
        let missing = ChapterId::new("zz").expect("chapter id");

        reorder_chapters(&mut chapters, &missing, 0);
        assert_eq!(orders(&chapters), vec![("a", 0), ("b", 1)]);
    }

    #[test]
    fn reorder_repairs_gapped_orders() {
        let mut chapters = vec![chapter("a", 0), chapter("b", 5), chapter("c", 9)];
        let c = ChapterId::new("c").expect("chapter id");

        reorder_chapters(&mut chapters, &c, 1);
        assert_eq!(orders(&chapters), vec![("a", 0), ("c", 1), ("b", 2)]);
    }
}
