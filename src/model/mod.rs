// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Document trees carry prose and inline marks; chapters, comments, and
//! revisions are the persisted row shapes built around them.

pub mod chapter;
pub mod comment;
pub mod document;
pub mod entity;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod revision;

pub use chapter::{reorder_chapters, Chapter, ChapterStatus, ParseChapterStatusError};
pub use comment::{Comment, CommentThread, CommentType, ParseCommentTypeError};
pub use document::{BlockKind, DocumentNode, Mark, ParseBlockKindError};
pub use entity::{DetectedEntity, EntityRosterEntry, EntityType, ParseEntityTypeError};
pub use ids::{
    AuthorId, ChapterId, CommentId, EntityId, Id, IdError, RevisionId, StoryId, ThreadId,
};
pub use revision::{ParseRevisionTypeError, Revision, RevisionScope, RevisionType};
