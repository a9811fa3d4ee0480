// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-memory [`PersistentStore`] for tests and single-process use.
//!
//! Rows are kept in the same JSON shapes a remote backend would hold, so a
//! load always exercises the row conversions. `set_fail_next_save` makes the
//! next chapter write report a backend failure, which is how the chapter
//! switch guard is exercised without a real flaky service.

use std::collections::BTreeMap;

use crate::model::{
    Chapter, ChapterId, Comment, CommentId, DocumentNode, EntityRosterEntry, Revision,
    RevisionScope, StoryId,
};

use super::rows::{ChapterRow, CommentRow, EntityRow, RevisionRow};
use super::{PersistentStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    chapters: BTreeMap<ChapterId, ChapterRow>,
    comments: BTreeMap<CommentId, CommentRow>,
    revisions: Vec<RevisionRow>,
    rosters: BTreeMap<StoryId, Vec<EntityRow>>,
    fail_next_save: bool,
    fail_next_revision_write: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_chapter(&mut self, chapter: &Chapter) {
        self.chapters
            .insert(chapter.chapter_id().clone(), ChapterRow::from(chapter));
    }

    pub fn set_roster(&mut self, story_id: StoryId, roster: &[EntityRosterEntry]) {
        self.rosters
            .insert(story_id, roster.iter().map(EntityRow::from).collect());
    }

    /// Fail the next `save_chapter_content` call, then recover.
    pub fn set_fail_next_save(&mut self, fail: bool) {
        self.fail_next_save = fail;
    }

    /// Fail the next `create_revision_row` call, then recover.
    pub fn set_fail_next_revision_write(&mut self, fail: bool) {
        self.fail_next_revision_write = fail;
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn revision_count(&self) -> usize {
        self.revisions.len()
    }
}

impl PersistentStore for MemoryStore {
    fn load_chapter(&self, chapter_id: &ChapterId) -> Result<Chapter, StoreError> {
        let row = self
            .chapters
            .get(chapter_id)
            .cloned()
            .ok_or_else(|| StoreError::ChapterNotFound {
                chapter_id: chapter_id.clone(),
            })?;
        Ok(Chapter::from(row))
    }

    fn save_chapter_content(
        &mut self,
        chapter_id: &ChapterId,
        title: &str,
        content: &DocumentNode,
        content_text: &str,
        word_count: usize,
    ) -> Result<(), StoreError> {
        if self.fail_next_save {
            self.fail_next_save = false;
            return Err(StoreError::Backend {
                operation: "save_chapter_content",
                message: "simulated backend outage".to_owned(),
            });
        }
        let row = self
            .chapters
            .get_mut(chapter_id)
            .ok_or_else(|| StoreError::ChapterNotFound {
                chapter_id: chapter_id.clone(),
            })?;
        row.title = title.to_owned();
        row.content = content.clone();
        row.content_text = content_text.to_owned();
        row.word_count = word_count;
        Ok(())
    }

    fn create_revision_row(&mut self, revision: &Revision) -> Result<(), StoreError> {
        if self.fail_next_revision_write {
            self.fail_next_revision_write = false;
            return Err(StoreError::Backend {
                operation: "create_revision_row",
                message: "simulated backend outage".to_owned(),
            });
        }
        self.revisions.push(RevisionRow::from(revision));
        Ok(())
    }

    fn list_revision_rows(&self, scope: &RevisionScope) -> Result<Vec<Revision>, StoreError> {
        Ok(self
            .revisions
            .iter()
            .filter(|row| {
                &row.story_id == scope.story_id()
                    && row.chapter_id.as_ref() == scope.chapter_id()
            })
            .cloned()
            .map(Revision::from)
            .collect())
    }

    fn create_comment_row(&mut self, comment: &Comment) -> Result<(), StoreError> {
        self.comments
            .insert(comment.comment_id().clone(), CommentRow::from(comment));
        Ok(())
    }

    fn update_comment_row(&mut self, comment: &Comment) -> Result<(), StoreError> {
        self.comments
            .insert(comment.comment_id().clone(), CommentRow::from(comment));
        Ok(())
    }

    fn delete_comment_row(&mut self, comment_id: &CommentId) -> Result<(), StoreError> {
        self.comments.remove(comment_id);
        Ok(())
    }

    fn fetch_entity_roster(
        &self,
        story_id: &StoryId,
    ) -> Result<Vec<EntityRosterEntry>, StoreError> {
        Ok(self
            .rosters
            .get(story_id)
            .map(|rows| rows.iter().cloned().map(EntityRosterEntry::from).collect())
            .unwrap_or_default())
    }
}
