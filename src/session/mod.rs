// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editing session state and the chapter switch guard.
//!
//! The session exclusively owns the live document tree. Saving is serialized:
//! the store write happens first and a revision snapshot only after it
//! succeeds, so a backend failure never leaves a revision without a matching
//! chapter row. A failed save also blocks chapter switching with the session
//! state untouched, and a retry starts from exactly where the author left off.

use std::fmt;

use crate::ledger::RevisionLedger;
use crate::model::{
    Chapter, ChapterId, DetectedEntity, DocumentNode, EntityRosterEntry, RevisionScope,
    RevisionType, StoryId,
};
use crate::query::{detect, project, word_count};
use crate::store::{CanonCheck, CanonScorer, PersistentStore, StoreError};

#[derive(Debug)]
pub enum SessionError {
    NoActiveChapter,
    /// The store rejected a write during save; the session keeps its unsaved
    /// state and no partial history survives the failure.
    SaveFailed(StoreError),
    /// A read from the store failed (loading a chapter, scoring canon).
    Store(StoreError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActiveChapter => write!(f, "no chapter is open in this session"),
            Self::SaveFailed(source) => write!(f, "chapter save failed: {source}"),
            Self::Store(source) => write!(f, "store error: {source}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NoActiveChapter => None,
            Self::SaveFailed(source) | Self::Store(source) => Some(source),
        }
    }
}

pub struct EditorSession {
    story_id: StoryId,
    active_chapter: Option<Chapter>,
    document: DocumentNode,
    has_unsaved_changes: bool,
    detected_entities: Vec<DetectedEntity>,
    pending_canon_check: Option<CanonCheck>,
}

impl EditorSession {
    pub fn new(story_id: StoryId) -> Self {
        Self {
            story_id,
            active_chapter: None,
            document: DocumentNode::doc(Vec::new()),
            has_unsaved_changes: false,
            detected_entities: Vec::new(),
            pending_canon_check: None,
        }
    }

    pub fn story_id(&self) -> &StoryId {
        &self.story_id
    }

    pub fn active_chapter(&self) -> Option<&Chapter> {
        self.active_chapter.as_ref()
    }

    pub fn document(&self) -> &DocumentNode {
        &self.document
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.has_unsaved_changes
    }

    pub fn detected_entities(&self) -> &[DetectedEntity] {
        &self.detected_entities
    }

    pub fn pending_canon_check(&self) -> Option<&CanonCheck> {
        self.pending_canon_check.as_ref()
    }

    /// Replaces the live document wholesale.
    ///
    /// Cached detections and canon results address positions in the old
    /// content, so both are dropped here.
    pub fn set_document(&mut self, document: DocumentNode) {
        self.document = document;
        self.has_unsaved_changes = true;
        self.detected_entities.clear();
        self.pending_canon_check = None;
    }

    /// Flags the live document as changed without replacing it, for callers
    /// that mutate leaf content in place before handing the tree back.
    pub fn mark_dirty(&mut self) {
        self.has_unsaved_changes = true;
    }

    /// Scans the live document for roster mentions and caches the result.
    pub fn scan(&mut self, roster: &[EntityRosterEntry]) -> &[DetectedEntity] {
        let projection = project(&self.document);
        self.detected_entities = detect(projection.text(), roster);
        &self.detected_entities
    }

    /// Persists the live document and records a revision, in that order.
    ///
    /// The revision is only written once the store has accepted the chapter
    /// content, and a snapshot whose row write fails is discarded from the
    /// ledger again. On failure the session still holds the unsaved document
    /// and the call can simply be repeated without duplicating history.
    pub fn save(
        &mut self,
        store: &mut dyn PersistentStore,
        ledger: &mut RevisionLedger,
        revision_type: RevisionType,
        change_summary: Option<String>,
    ) -> Result<(), SessionError> {
        let chapter = self
            .active_chapter
            .as_mut()
            .ok_or(SessionError::NoActiveChapter)?;

        let projection = project(&self.document);
        let words = word_count(projection.text());

        store
            .save_chapter_content(
                chapter.chapter_id(),
                chapter.title(),
                &self.document,
                projection.text(),
                words,
            )
            .map_err(SessionError::SaveFailed)?;

        let scope = RevisionScope::chapter(self.story_id.clone(), chapter.chapter_id().clone());
        let revision = ledger.snapshot(
            scope.clone(),
            self.document.clone(),
            projection.text(),
            words,
            revision_type,
            change_summary,
        );
        let revision_number = revision.revision_number();
        let updated_at = revision.created_at();
        let row_write = store.create_revision_row(revision);
        if let Err(err) = row_write {
            // The store never saw the revision, so the in-memory history must
            // not keep it either; otherwise a retry would record it twice.
            ledger.discard_last(&scope);
            return Err(SessionError::SaveFailed(err));
        }

        tracing::debug!(
            chapter = %chapter.chapter_id(),
            revision = revision_number,
            kind = %revision_type,
            "saved chapter"
        );

        chapter.set_content(
            self.document.clone(),
            projection.text().to_owned(),
            words,
            updated_at,
        );
        self.has_unsaved_changes = false;
        Ok(())
    }

    /// Saves with an `Auto` revision if anything changed since the last save.
    ///
    /// Returns whether a save actually happened.
    pub fn autosave(
        &mut self,
        store: &mut dyn PersistentStore,
        ledger: &mut RevisionLedger,
    ) -> Result<bool, SessionError> {
        if !self.has_unsaved_changes || self.active_chapter.is_none() {
            return Ok(false);
        }
        self.save(store, ledger, RevisionType::Auto, None)?;
        Ok(true)
    }

    /// Opens `target_id`, guarding pending work first.
    ///
    /// Unsaved changes in the active chapter are saved (with a `Manual`
    /// revision) before anything else. If that save fails the switch is
    /// aborted: the active chapter, live document, and unsaved flag are all
    /// left exactly as they were and no revision exists for the attempt.
    pub fn switch_chapter(
        &mut self,
        store: &mut dyn PersistentStore,
        ledger: &mut RevisionLedger,
        target_id: &ChapterId,
    ) -> Result<(), SessionError> {
        if self.has_unsaved_changes && self.active_chapter.is_some() {
            self.save(store, ledger, RevisionType::Manual, None)?;
        }

        let chapter = store.load_chapter(target_id).map_err(SessionError::Store)?;
        tracing::debug!(chapter = %target_id, "switched chapter");

        self.document = chapter.content().clone();
        self.active_chapter = Some(chapter);
        self.has_unsaved_changes = false;
        self.detected_entities.clear();
        self.pending_canon_check = None;
        Ok(())
    }

    /// Projects the live document and asks the scorer for a canon verdict.
    ///
    /// The result is cached until the document changes; the engine never
    /// interprets it.
    pub fn request_canon_check(
        &mut self,
        scorer: &dyn CanonScorer,
    ) -> Result<&CanonCheck, SessionError> {
        let chapter = self
            .active_chapter
            .as_ref()
            .ok_or(SessionError::NoActiveChapter)?;
        let projection = project(&self.document);
        let check = scorer
            .score(chapter.title(), projection.text())
            .map_err(SessionError::Store)?;
        self.pending_canon_check = Some(check);
        Ok(self
            .pending_canon_check
            .as_ref()
            .unwrap_or_else(|| unreachable!("just assigned")))
    }
}
