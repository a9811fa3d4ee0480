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

use super::ids::{AuthorId, ChapterId, CommentId, StoryId, ThreadId};

/// Editorial intent of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentType {
    Note,
    Suggestion,
    Question,
    Issue,
}

impl CommentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Suggestion => "suggestion",
            Self::Question => "question",
            Self::Issue => "issue",
        }
    }
}

impl fmt::Display for CommentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCommentTypeError;

impl fmt::Display for ParseCommentTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid comment type")
    }
}

impl std::error::Error for ParseCommentTypeError {}

impl FromStr for CommentType {
    type Err = ParseCommentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "note" => Ok(Self::Note),
            "suggestion" => Ok(Self::Suggestion),
            "question" => Ok(Self::Question),
            "issue" => Ok(Self::Issue),
            _ => Err(ParseCommentTypeError),
        }
    }
}

/// One comment row, anchored to an offset range of a document.
///
/// A root comment (`parent_id == None`) defines its thread; replies share the
/// root's anchor fields and carry their own content and timestamps. Anchors
/// are fixed at creation time and advisory thereafter: an edit to the document
/// does not move them, and a fresh mark application must re-locate the span by
/// text rather than trust the stored offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    comment_id: CommentId,
    story_id: StoryId,
    chapter_id: Option<ChapterId>,
    author_id: AuthorId,
    content: String,
    comment_type: CommentType,
    position_start: usize,
    position_end: usize,
    selected_text: String,
    thread_id: ThreadId,
    parent_id: Option<CommentId>,
    is_private: bool,
    is_resolved: bool,
    resolved_at: Option<u64>,
    resolved_by: Option<AuthorId>,
    created_at: u64,
    updated_at: u64,
}

#[allow(clippy::too_many_arguments)]
impl Comment {
    pub fn new(
        comment_id: CommentId,
        story_id: StoryId,
        chapter_id: Option<ChapterId>,
        author_id: AuthorId,
        content: impl Into<String>,
        comment_type: CommentType,
        position_start: usize,
        position_end: usize,
        selected_text: impl Into<String>,
        thread_id: ThreadId,
        created_at: u64,
    ) -> Self {
        Self {
            comment_id,
            story_id,
            chapter_id,
            author_id,
            content: content.into(),
            comment_type,
            position_start,
            position_end,
            selected_text: selected_text.into(),
            thread_id,
            parent_id: None,
            is_private: false,
            is_resolved: false,
            resolved_at: None,
            resolved_by: None,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn comment_id(&self) -> &CommentId {
        &self.comment_id
    }

    pub fn story_id(&self) -> &StoryId {
        &self.story_id
    }

    pub fn chapter_id(&self) -> Option<&ChapterId> {
        self.chapter_id.as_ref()
    }

    pub fn author_id(&self) -> &AuthorId {
        &self.author_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>, updated_at: u64) {
        self.content = content.into();
        self.updated_at = updated_at;
    }

    pub fn comment_type(&self) -> CommentType {
        self.comment_type
    }

    pub fn position_start(&self) -> usize {
        self.position_start
    }

    pub fn position_end(&self) -> usize {
        self.position_end
    }

    pub fn selected_text(&self) -> &str {
        &self.selected_text
    }

    pub fn thread_id(&self) -> &ThreadId {
        &self.thread_id
    }

    pub fn parent_id(&self) -> Option<&CommentId> {
        self.parent_id.as_ref()
    }

    pub fn set_parent_id(&mut self, parent_id: Option<CommentId>) {
        self.parent_id = parent_id;
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_private(&self) -> bool {
        self.is_private
    }

    pub fn set_private(&mut self, is_private: bool) {
        self.is_private = is_private;
    }

    pub fn is_resolved(&self) -> bool {
        self.is_resolved
    }

    pub fn resolved_at(&self) -> Option<u64> {
        self.resolved_at
    }

    pub fn resolved_by(&self) -> Option<&AuthorId> {
        self.resolved_by.as_ref()
    }

    /// Records a resolution transition. Stamps `resolved_at`/`resolved_by` on
    /// open -> resolved; clears both on resolved -> open.
    pub fn set_resolution(&mut self, resolved: bool, actor_id: Option<AuthorId>, at: u64) {
        self.is_resolved = resolved;
        if resolved {
            self.resolved_at = Some(at);
            self.resolved_by = actor_id;
        } else {
            self.resolved_at = None;
            self.resolved_by = None;
        }
        self.updated_at = at;
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn updated_at(&self) -> u64 {
        self.updated_at
    }

    pub(crate) fn restore_state(
        &mut self,
        is_private: bool,
        is_resolved: bool,
        resolved_at: Option<u64>,
        resolved_by: Option<AuthorId>,
        updated_at: u64,
    ) {
        self.is_private = is_private;
        self.is_resolved = is_resolved;
        self.resolved_at = resolved_at;
        self.resolved_by = resolved_by;
        self.updated_at = updated_at;
    }
}

/// A root comment plus its replies ordered by creation time.
///
/// Derived view; never stored. Grouping key is the root's `thread_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThread {
    root: Comment,
    replies: Vec<Comment>,
}

impl CommentThread {
    pub fn new(root: Comment, replies: Vec<Comment>) -> Self {
        Self { root, replies }
    }

    pub fn root(&self) -> &Comment {
        &self.root
    }

    pub fn replies(&self) -> &[Comment] {
        &self.replies
    }

    pub fn thread_id(&self) -> &ThreadId {
        self.root.thread_id()
    }

    pub fn is_resolved(&self) -> bool {
        self.root.is_resolved()
    }

    pub fn len(&self) -> usize {
        1 + self.replies.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
