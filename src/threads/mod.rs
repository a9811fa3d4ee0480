// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-memory comment thread store.
//!
//! Comments anchor to projected offset ranges and group into threads. The
//! store holds no reference into any document tree: anchoring marks are the
//! caller's job (via `ops::apply_comment_anchor`), so comment data survives
//! even when an unrelated edit strips the mark.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::{
    AuthorId, ChapterId, Comment, CommentId, CommentThread, CommentType, StoryId, ThreadId,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadError {
    /// Anchor range is empty or inverted; comments need a real selection.
    InvalidRange { start: usize, end: usize },
    ThreadNotFound { comment_id: CommentId },
    CommentNotFound { comment_id: CommentId },
}

impl fmt::Display for ThreadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange { start, end } => {
                write!(f, "invalid comment range [{start}, {end})")
            }
            Self::ThreadNotFound { comment_id } => {
                write!(f, "no thread rooted at comment {comment_id}")
            }
            Self::CommentNotFound { comment_id } => {
                write!(f, "comment not found (id={comment_id})")
            }
        }
    }
}

impl std::error::Error for ThreadError {}

#[derive(Debug, Clone, Default)]
pub struct CommentStore {
    comments: BTreeMap<CommentId, Comment>,
    next_seq: u64,
    last_timestamp: u64,
}

impl CommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrates the store from previously persisted rows.
    pub fn load(rows: Vec<Comment>) -> Self {
        let mut store = Self::new();
        for comment in rows {
            if let Some(seq) = numeric_suffix(comment.comment_id().as_str()) {
                store.next_seq = store.next_seq.max(seq);
            }
            store.last_timestamp = store.last_timestamp.max(comment.created_at());
            store
                .comments
                .insert(comment.comment_id().clone(), comment);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn get(&self, comment_id: &CommentId) -> Option<&Comment> {
        self.comments.get(comment_id)
    }

    /// Creates a new root comment anchored to `[position_start, position_end)`.
    ///
    /// The anchor is fixed here for the thread's lifetime; the range must be
    /// non-empty. The new comment's id doubles as its thread id.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &mut self,
        story_id: StoryId,
        chapter_id: Option<ChapterId>,
        author_id: AuthorId,
        content: impl Into<String>,
        comment_type: CommentType,
        position_start: usize,
        position_end: usize,
        selected_text: impl Into<String>,
        is_private: bool,
    ) -> Result<&Comment, ThreadError> {
        if position_start >= position_end {
            return Err(ThreadError::InvalidRange {
                start: position_start,
                end: position_end,
            });
        }

        let comment_id = self.next_comment_id();
        let thread_id = ThreadId::new(comment_id.as_str())
            .unwrap_or_else(|_| unreachable!("generated ids are valid segments"));
        let created_at = self.next_timestamp();

        let mut comment = Comment::new(
            comment_id.clone(),
            story_id,
            chapter_id,
            author_id,
            content,
            comment_type,
            position_start,
            position_end,
            selected_text,
            thread_id,
            created_at,
        );
        comment.set_private(is_private);

        self.comments.insert(comment_id.clone(), comment);
        Ok(&self.comments[&comment_id])
    }

    /// Appends a reply to the thread rooted at `thread_root_id`.
    ///
    /// Replies share the root's anchor and privacy, carry `CommentType::Note`,
    /// and can be added whether the thread is open or resolved.
    pub fn reply(
        &mut self,
        thread_root_id: &CommentId,
        author_id: AuthorId,
        content: impl Into<String>,
    ) -> Result<&Comment, ThreadError> {
        let root = self
            .comments
            .get(thread_root_id)
            .filter(|comment| comment.is_root())
            .ok_or_else(|| ThreadError::ThreadNotFound {
                comment_id: thread_root_id.clone(),
            })?;

        let story_id = root.story_id().clone();
        let chapter_id = root.chapter_id().cloned();
        let position_start = root.position_start();
        let position_end = root.position_end();
        let selected_text = root.selected_text().to_owned();
        let thread_id = root.thread_id().clone();
        let is_private = root.is_private();
        let is_resolved = root.is_resolved();
        let resolved_at = root.resolved_at();
        let resolved_by = root.resolved_by().cloned();

        let comment_id = self.next_comment_id();
        let created_at = self.next_timestamp();

        let mut comment = Comment::new(
            comment_id.clone(),
            story_id,
            chapter_id,
            author_id,
            content,
            CommentType::Note,
            position_start,
            position_end,
            selected_text,
            thread_id,
            created_at,
        );
        comment.set_parent_id(Some(thread_root_id.clone()));
        comment.set_private(is_private);
        // Mirror the thread's resolution for query convenience.
        comment.restore_state(is_private, is_resolved, resolved_at, resolved_by, created_at);

        self.comments.insert(comment_id.clone(), comment);
        Ok(&self.comments[&comment_id])
    }

    /// Edits a comment's content in place. The anchor never moves.
    pub fn edit_content(
        &mut self,
        comment_id: &CommentId,
        content: impl Into<String>,
    ) -> Result<(), ThreadError> {
        let at = self.next_timestamp();
        let comment = self
            .comments
            .get_mut(comment_id)
            .ok_or_else(|| ThreadError::CommentNotFound {
                comment_id: comment_id.clone(),
            })?;
        comment.set_content(content, at);
        Ok(())
    }

    /// Sets the resolution of the thread containing `comment_id`.
    ///
    /// Authoritative on the root, mirrored onto every reply. Resolving never
    /// locks a thread; replies stay welcome in both states.
    pub fn resolve(
        &mut self,
        comment_id: &CommentId,
        resolved: bool,
        actor_id: &AuthorId,
    ) -> Result<(), ThreadError> {
        let thread_id = self
            .comments
            .get(comment_id)
            .map(|comment| comment.thread_id().clone())
            .ok_or_else(|| ThreadError::CommentNotFound {
                comment_id: comment_id.clone(),
            })?;

        let at = self.next_timestamp();
        for comment in self.comments.values_mut() {
            if comment.thread_id() == &thread_id {
                comment.set_resolution(resolved, Some(actor_id.clone()), at);
            }
        }
        Ok(())
    }

    /// Deletes a comment.
    ///
    /// Deleting a root cascades to every reply in its thread; deleting a reply
    /// removes only that reply. Returns the removed ids so the caller can
    /// strip the matching anchors from the live document.
    pub fn delete(
        &mut self,
        comment_id: &CommentId,
        actor_id: &AuthorId,
    ) -> Result<Vec<CommentId>, ThreadError> {
        let target = self
            .comments
            .get(comment_id)
            .ok_or_else(|| ThreadError::CommentNotFound {
                comment_id: comment_id.clone(),
            })?;

        let removed: Vec<CommentId> = if target.is_root() {
            let thread_id = target.thread_id().clone();
            self.comments
                .values()
                .filter(|comment| comment.thread_id() == &thread_id)
                .map(|comment| comment.comment_id().clone())
                .collect()
        } else {
            vec![comment_id.clone()]
        };

        for id in &removed {
            self.comments.remove(id);
        }
        tracing::debug!(
            comment = %comment_id,
            actor = %actor_id,
            removed = removed.len(),
            "deleted comment"
        );
        Ok(removed)
    }

    /// Threads for one document scope, grouped and ordered for display:
    /// ascending by the root's anchor start, then by root creation time;
    /// replies ascend by creation time within each thread.
    pub fn list_for_document(
        &self,
        story_id: &StoryId,
        chapter_id: Option<&ChapterId>,
    ) -> Vec<CommentThread> {
        let mut roots: Vec<&Comment> = Vec::new();
        let mut replies: BTreeMap<&ThreadId, Vec<&Comment>> = BTreeMap::new();

        for comment in self.comments.values() {
            if comment.story_id() != story_id || comment.chapter_id() != chapter_id {
                continue;
            }
            if comment.is_root() {
                roots.push(comment);
            } else {
                replies.entry(comment.thread_id()).or_default().push(comment);
            }
        }

        roots.sort_by(|a, b| {
            a.position_start()
                .cmp(&b.position_start())
                .then_with(|| a.created_at().cmp(&b.created_at()))
        });

        roots
            .into_iter()
            .map(|root| {
                let mut thread_replies: Vec<Comment> = replies
                    .get(root.thread_id())
                    .map(|list| list.iter().map(|&c| c.clone()).collect())
                    .unwrap_or_default();
                thread_replies.sort_by_key(Comment::created_at);
                CommentThread::new(root.clone(), thread_replies)
            })
            .collect()
    }

    fn next_comment_id(&mut self) -> CommentId {
        self.next_seq += 1;
        CommentId::new(format!("c{}", self.next_seq))
            .unwrap_or_else(|_| unreachable!("generated ids are valid segments"))
    }

    // Wall-clock millis, bumped to stay strictly increasing so reply ordering
    // is total even within one millisecond.
    fn next_timestamp(&mut self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        self.last_timestamp = now.max(self.last_timestamp + 1);
        self.last_timestamp
    }
}

fn numeric_suffix(id: &str) -> Option<u64> {
    id.strip_prefix('c')?.parse().ok()
}
