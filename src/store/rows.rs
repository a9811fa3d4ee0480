// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Row shapes exchanged with the persistence boundary.
//!
//! These mirror the backend's camelCase JSON columns. Domain types stay
//! serde-free; a row is built from a model value on the way out and hydrated
//! back into one on the way in, losslessly.

use serde::{Deserialize, Serialize};

use crate::model::{
    AuthorId, Chapter, ChapterId, ChapterStatus, Comment, CommentId, CommentType, DocumentNode,
    EntityId, EntityRosterEntry, EntityType, Revision, RevisionId, RevisionScope, RevisionType,
    StoryId, ThreadId,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterRow {
    pub chapter_id: ChapterId,
    pub story_id: StoryId,
    pub title: String,
    pub content: DocumentNode,
    pub content_text: String,
    pub word_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_target: Option<usize>,
    pub status: ChapterStatus,
    pub chapter_order: usize,
    pub created_at: u64,
    pub updated_at: u64,
}

impl From<&Chapter> for ChapterRow {
    fn from(chapter: &Chapter) -> Self {
        Self {
            chapter_id: chapter.chapter_id().clone(),
            story_id: chapter.story_id().clone(),
            title: chapter.title().to_owned(),
            content: chapter.content().clone(),
            content_text: chapter.content_text().to_owned(),
            word_count: chapter.word_count(),
            word_target: chapter.word_target(),
            status: chapter.status(),
            chapter_order: chapter.chapter_order(),
            created_at: chapter.created_at(),
            updated_at: chapter.updated_at(),
        }
    }
}

impl From<ChapterRow> for Chapter {
    fn from(row: ChapterRow) -> Self {
        let mut chapter = Chapter::new(
            row.chapter_id,
            row.story_id,
            row.title,
            row.chapter_order,
            row.created_at,
        );
        chapter.set_content(row.content, row.content_text, row.word_count, row.updated_at);
        chapter.set_word_target(row.word_target);
        chapter.set_status(row.status);
        chapter
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRow {
    pub comment_id: CommentId,
    pub story_id: StoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_id: Option<ChapterId>,
    pub author_id: AuthorId,
    pub content: String,
    pub comment_type: CommentType,
    pub position_start: usize,
    pub position_end: usize,
    pub selected_text: String,
    pub thread_id: ThreadId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentId>,
    pub is_private: bool,
    pub is_resolved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<AuthorId>,
    pub created_at: u64,
    pub updated_at: u64,
}

impl From<&Comment> for CommentRow {
    fn from(comment: &Comment) -> Self {
        Self {
            comment_id: comment.comment_id().clone(),
            story_id: comment.story_id().clone(),
            chapter_id: comment.chapter_id().cloned(),
            author_id: comment.author_id().clone(),
            content: comment.content().to_owned(),
            comment_type: comment.comment_type(),
            position_start: comment.position_start(),
            position_end: comment.position_end(),
            selected_text: comment.selected_text().to_owned(),
            thread_id: comment.thread_id().clone(),
            parent_id: comment.parent_id().cloned(),
            is_private: comment.is_private(),
            is_resolved: comment.is_resolved(),
            resolved_at: comment.resolved_at(),
            resolved_by: comment.resolved_by().cloned(),
            created_at: comment.created_at(),
            updated_at: comment.updated_at(),
        }
    }
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        let mut comment = Comment::new(
            row.comment_id,
            row.story_id,
            row.chapter_id,
            row.author_id,
            row.content,
            row.comment_type,
            row.position_start,
            row.position_end,
            row.selected_text,
            row.thread_id,
            row.created_at,
        );
        comment.set_parent_id(row.parent_id);
        comment.restore_state(
            row.is_private,
            row.is_resolved,
            row.resolved_at,
            row.resolved_by,
            row.updated_at,
        );
        comment
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionRow {
    pub revision_id: RevisionId,
    pub story_id: StoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_id: Option<ChapterId>,
    pub revision_number: u64,
    pub revision_type: RevisionType,
    pub content: DocumentNode,
    pub content_text: String,
    pub word_count: usize,
    pub words_added: usize,
    pub words_removed: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_summary: Option<String>,
    pub created_at: u64,
}

impl From<&Revision> for RevisionRow {
    fn from(revision: &Revision) -> Self {
        Self {
            revision_id: revision.revision_id().clone(),
            story_id: revision.scope().story_id().clone(),
            chapter_id: revision.scope().chapter_id().cloned(),
            revision_number: revision.revision_number(),
            revision_type: revision.revision_type(),
            content: revision.content().clone(),
            content_text: revision.content_text().to_owned(),
            word_count: revision.word_count(),
            words_added: revision.words_added(),
            words_removed: revision.words_removed(),
            change_summary: revision.change_summary().map(str::to_owned),
            created_at: revision.created_at(),
        }
    }
}

impl From<RevisionRow> for Revision {
    fn from(row: RevisionRow) -> Self {
        let scope = match row.chapter_id {
            Some(chapter_id) => RevisionScope::chapter(row.story_id, chapter_id),
            None => RevisionScope::story(row.story_id),
        };
        Revision::new(
            row.revision_id,
            scope,
            row.revision_number,
            row.revision_type,
            row.content,
            row.content_text,
            row.word_count,
            row.words_added,
            row.words_removed,
            row.change_summary,
            row.created_at,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRow {
    pub entity_id: EntityId,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub entity_type: EntityType,
}

impl From<&EntityRosterEntry> for EntityRow {
    fn from(entry: &EntityRosterEntry) -> Self {
        Self {
            entity_id: entry.entity_id().clone(),
            name: entry.name().to_owned(),
            aliases: entry.aliases().to_vec(),
            entity_type: entry.entity_type(),
        }
    }
}

impl From<EntityRow> for EntityRosterEntry {
    fn from(row: EntityRow) -> Self {
        let mut entry = EntityRosterEntry::new(row.entity_id, row.name, row.entity_type);
        *entry.aliases_mut() = row.aliases;
        entry
    }
}
