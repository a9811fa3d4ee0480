// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Boundary contracts with excluded collaborators.
//!
//! The engine never talks to a database or network itself; it goes through
//! [`PersistentStore`] and [`CanonScorer`], and everything that crosses the
//! boundary round-trips through the JSON row shapes in [`rows`]. A store
//! failure is always recoverable locally: the caller keeps its in-memory
//! state and may retry.

pub mod memory;
pub mod rows;

use std::fmt;

use crate::model::{
    Chapter, ChapterId, Comment, CommentId, DocumentNode, EntityRosterEntry, IdError, Revision,
    RevisionScope, StoryId,
};

pub use memory::MemoryStore;
pub use rows::{ChapterRow, CommentRow, EntityRow, RevisionRow};

#[derive(Debug)]
pub enum StoreError {
    ChapterNotFound {
        chapter_id: ChapterId,
    },
    /// The backing service rejected or failed the call.
    Backend {
        operation: &'static str,
        message: String,
    },
    Json {
        operation: &'static str,
        source: serde_json::Error,
    },
    InvalidId {
        field: &'static str,
        value: String,
        source: IdError,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChapterNotFound { chapter_id } => {
                write!(f, "chapter not found (id={chapter_id})")
            }
            Self::Backend { operation, message } => {
                write!(f, "store call {operation} failed: {message}")
            }
            Self::Json { operation, source } => {
                write!(f, "json error during {operation}: {source}")
            }
            Self::InvalidId {
                field,
                value,
                source,
            } => write!(f, "invalid id for {field}: {value:?}: {source}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ChapterNotFound { .. } => None,
            Self::Backend { .. } => None,
            Self::Json { source, .. } => Some(source),
            Self::InvalidId { source, .. } => Some(source),
        }
    }
}

/// The persistence collaborator: chapter, revision, comment, and roster rows.
///
/// Every call is fallible; implementations must never panic on missing rows.
pub trait PersistentStore {
    fn load_chapter(&self, chapter_id: &ChapterId) -> Result<Chapter, StoreError>;

    fn save_chapter_content(
        &mut self,
        chapter_id: &ChapterId,
        title: &str,
        content: &DocumentNode,
        content_text: &str,
        word_count: usize,
    ) -> Result<(), StoreError>;

    fn create_revision_row(&mut self, revision: &Revision) -> Result<(), StoreError>;

    fn list_revision_rows(&self, scope: &RevisionScope) -> Result<Vec<Revision>, StoreError>;

    fn create_comment_row(&mut self, comment: &Comment) -> Result<(), StoreError>;

    fn update_comment_row(&mut self, comment: &Comment) -> Result<(), StoreError>;

    fn delete_comment_row(&mut self, comment_id: &CommentId) -> Result<(), StoreError>;

    fn fetch_entity_roster(&self, story_id: &StoryId) -> Result<Vec<EntityRosterEntry>, StoreError>;
}

/// Opaque verdict from the canon-consistency service.
///
/// The engine supplies projected plain text and hands the result straight to
/// the caller; it never interprets the score.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonCheck {
    pub score: f64,
    pub feedback: String,
    pub flagged_issues: Vec<String>,
}

pub trait CanonScorer {
    fn score(&self, title: &str, plain_text: &str) -> Result<CanonCheck, StoreError>;
}
