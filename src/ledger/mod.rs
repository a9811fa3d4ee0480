// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Append-only revision ledger.
//!
//! Snapshots are immutable once written and numbered monotonically per scope.
//! Restore never rewrites history: it appends a new forward revision carrying
//! a past snapshot's content.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::{DocumentNode, Revision, RevisionId, RevisionScope, RevisionType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The target revision exists but belongs to a different scope.
    ScopeMismatch {
        requested: RevisionScope,
        found: RevisionScope,
    },
    RevisionNotFound { revision_id: RevisionId },
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScopeMismatch { requested, found } => {
                write!(f, "revision belongs to {found}, not {requested}")
            }
            Self::RevisionNotFound { revision_id } => {
                write!(f, "revision not found (id={revision_id})")
            }
        }
    }
}

impl std::error::Error for LedgerError {}

#[derive(Debug, Clone, Default)]
pub struct RevisionLedger {
    scopes: BTreeMap<RevisionScope, Vec<Revision>>,
    next_seq: u64,
    last_timestamp: u64,
}

impl RevisionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrates the ledger from previously persisted rows.
    pub fn load(rows: Vec<Revision>) -> Self {
        let mut ledger = Self::new();
        for revision in rows {
            if let Some(seq) = numeric_suffix(revision.revision_id().as_str()) {
                ledger.next_seq = ledger.next_seq.max(seq);
            }
            ledger.last_timestamp = ledger.last_timestamp.max(revision.created_at());
            ledger
                .scopes
                .entry(revision.scope().clone())
                .or_default()
                .push(revision);
        }
        for revisions in ledger.scopes.values_mut() {
            revisions.sort_by_key(Revision::revision_number);
        }
        ledger
    }

    pub fn len(&self) -> usize {
        self.scopes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.values().all(Vec::is_empty)
    }

    /// Captures a snapshot as the next revision of `scope`.
    ///
    /// `words_added`/`words_removed` compare against the immediately preceding
    /// revision in the same scope as a word-multiset delta. This is a
    /// magnitude indicator, not a sequence diff: reordered words count zero in
    /// both directions, and a replacement counts once on each side.
    pub fn snapshot(
        &mut self,
        scope: RevisionScope,
        content: DocumentNode,
        content_text: impl Into<String>,
        word_count: usize,
        revision_type: RevisionType,
        change_summary: Option<String>,
    ) -> &Revision {
        let content_text = content_text.into();
        let revision_id = self.next_revision_id();
        let created_at = self.next_timestamp();

        let revisions = self.scopes.entry(scope.clone()).or_default();
        let previous = revisions.last();
        let revision_number = previous.map_or(1, |rev| rev.revision_number() + 1);
        let (words_added, words_removed) =
            word_delta(previous.map_or("", Revision::content_text), &content_text);

        tracing::debug!(
            scope = %scope,
            revision = revision_number,
            kind = %revision_type,
            words_added,
            words_removed,
            "captured snapshot"
        );

        revisions.push(Revision::new(
            revision_id,
            scope,
            revision_number,
            revision_type,
            content,
            content_text,
            word_count,
            words_added,
            words_removed,
            change_summary,
            created_at,
        ));
        revisions.last().unwrap_or_else(|| unreachable!("just pushed"))
    }

    /// Revisions of `scope`, most recent first.
    pub fn list(&self, scope: &RevisionScope, limit: usize) -> Vec<&Revision> {
        self.scopes
            .get(scope)
            .map(|revisions| revisions.iter().rev().take(limit).collect())
            .unwrap_or_default()
    }

    pub fn find(&self, revision_id: &RevisionId) -> Option<&Revision> {
        self.scopes
            .values()
            .flat_map(|revisions| revisions.iter())
            .find(|revision| revision.revision_id() == revision_id)
    }

    /// Appends a new revision whose content equals a past snapshot's content.
    ///
    /// The target must belong to `scope`; no existing revision is touched.
    /// The caller then replaces the live document wholesale with the returned
    /// revision's content.
    pub fn restore(
        &mut self,
        revision_id: &RevisionId,
        scope: &RevisionScope,
    ) -> Result<&Revision, LedgerError> {
        let target = self
            .find(revision_id)
            .ok_or_else(|| LedgerError::RevisionNotFound {
                revision_id: revision_id.clone(),
            })?;
        if target.scope() != scope {
            return Err(LedgerError::ScopeMismatch {
                requested: scope.clone(),
                found: target.scope().clone(),
            });
        }

        let content = target.content().clone();
        let content_text = target.content_text().to_owned();
        let word_count = target.word_count();
        let summary = format!("Restored from revision {}", target.revision_number());

        tracing::debug!(scope = %scope, from = %revision_id, "restoring snapshot");
        Ok(self.snapshot(
            scope.clone(),
            content,
            content_text,
            word_count,
            RevisionType::Restore,
            Some(summary),
        ))
    }

    /// Removes and returns the most recent revision of `scope`.
    ///
    /// For callers that snapshot first and persist second: when the persisted
    /// row write fails, the in-memory history must not run ahead of the store,
    /// or a retried save would record the same content twice.
    pub fn discard_last(&mut self, scope: &RevisionScope) -> Option<Revision> {
        let revisions = self.scopes.get_mut(scope)?;
        let discarded = revisions.pop();
        if revisions.is_empty() {
            self.scopes.remove(scope);
        }
        if let Some(revision) = &discarded {
            tracing::debug!(
                scope = %scope,
                revision = revision.revision_number(),
                "discarded unpersisted snapshot"
            );
        }
        discarded
    }

    fn next_revision_id(&mut self) -> RevisionId {
        self.next_seq += 1;
        RevisionId::new(format!("r{}", self.next_seq))
            .unwrap_or_else(|_| unreachable!("generated ids are valid segments"))
    }

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
    id.strip_prefix('r')?.parse().ok()
}

fn word_delta(old: &str, new: &str) -> (usize, usize) {
    let mut balance: HashMap<&str, i64> = HashMap::new();
    for word in new.split_whitespace() {
        *balance.entry(word).or_default() += 1;
    }
    for word in old.split_whitespace() {
        *balance.entry(word).or_default() -= 1;
    }

    let added = balance.values().filter(|&&count| count > 0).sum::<i64>();
    let removed = -balance.values().filter(|&&count| count < 0).sum::<i64>();
    (added as usize, removed as usize)
}
