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
use super::ids::{ChapterId, RevisionId, StoryId};

/// What triggered a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevisionType {
    Auto,
    Manual,
    Submit,
    Publish,
    Restore,
}

impl RevisionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
            Self::Submit => "submit",
            Self::Publish => "publish",
            Self::Restore => "restore",
        }
    }
}

impl fmt::Display for RevisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRevisionTypeError;

impl fmt::Display for ParseRevisionTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid revision type")
    }
}

impl std::error::Error for ParseRevisionTypeError {}

impl FromStr for RevisionType {
    type Err = ParseRevisionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "manual" => Ok(Self::Manual),
            "submit" => Ok(Self::Submit),
            "publish" => Ok(Self::Publish),
            "restore" => Ok(Self::Restore),
            _ => Err(ParseRevisionTypeError),
        }
    }
}

/// The (story, chapter) pair a revision belongs to.
///
/// Chapters and whole-story documents are versioned independently, so
/// `chapter_id: None` is a distinct scope, not a wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RevisionScope {
    story_id: StoryId,
    chapter_id: Option<ChapterId>,
}

impl RevisionScope {
    pub fn story(story_id: StoryId) -> Self {
        Self {
            story_id,
            chapter_id: None,
        }
    }

    pub fn chapter(story_id: StoryId, chapter_id: ChapterId) -> Self {
        Self {
            story_id,
            chapter_id: Some(chapter_id),
        }
    }

    pub fn story_id(&self) -> &StoryId {
        &self.story_id
    }

    pub fn chapter_id(&self) -> Option<&ChapterId> {
        self.chapter_id.as_ref()
    }
}

impl fmt::Display for RevisionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.chapter_id {
            Some(chapter_id) => write!(f, "story/{}/chapter/{chapter_id}", self.story_id),
            None => write!(f, "story/{}", self.story_id),
        }
    }
}

/// One immutable snapshot row in the ledger.
///
/// Append-only: once written, a revision's content and metadata never change.
/// Restore appends a new forward revision instead of touching history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    revision_id: RevisionId,
    scope: RevisionScope,
    revision_number: u64,
    revision_type: RevisionType,
    content: DocumentNode,
    content_text: String,
    word_count: usize,
    words_added: usize,
    words_removed: usize,
    change_summary: Option<String>,
    created_at: u64,
}

#[allow(clippy::too_many_arguments)]
impl Revision {
    pub fn new(
        revision_id: RevisionId,
        scope: RevisionScope,
        revision_number: u64,
        revision_type: RevisionType,
        content: DocumentNode,
        content_text: impl Into<String>,
        word_count: usize,
        words_added: usize,
        words_removed: usize,
        change_summary: Option<String>,
        created_at: u64,
    ) -> Self {
        Self {
            revision_id,
            scope,
            revision_number,
            revision_type,
            content,
            content_text: content_text.into(),
            word_count,
            words_added,
            words_removed,
            change_summary,
            created_at,
        }
    }

    pub fn revision_id(&self) -> &RevisionId {
        &self.revision_id
    }

    pub fn scope(&self) -> &RevisionScope {
        &self.scope
    }

    pub fn revision_number(&self) -> u64 {
        self.revision_number
    }

    pub fn revision_type(&self) -> RevisionType {
        self.revision_type
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

    pub fn words_added(&self) -> usize {
        self.words_added
    }

    pub fn words_removed(&self) -> usize {
        self.words_removed
    }

    pub fn change_summary(&self) -> Option<&str> {
        self.change_summary.as_deref()
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }
}
