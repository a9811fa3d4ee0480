// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Fabula — rich-document annotation engine for collaborative fiction.
//!
//! Chapters are trees of block containers over marked text leaves. The engine
//! projects a tree to offset-addressable plain text, detects canon entity
//! mentions in it, applies and removes inline marks without mutating input
//! trees, keeps comment threads and a revision ledger, and guards chapter
//! switches so a failed save never loses work.

pub mod ledger;
pub mod model;
pub mod ops;
pub mod query;
pub mod session;
pub mod store;
pub mod threads;

#[cfg(test)]
mod tests {
    #[test]
    fn sanity() {
        assert_eq!(2 + 2, 4);
    }
}
