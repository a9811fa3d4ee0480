// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over documents.
//!
//! Projection flattens the tree into offset-addressable text; detection scans
//! that text for canon entity mentions. Neither mutates anything.

pub mod detect;
pub mod projection;

pub use detect::{detect, suggest};
pub use projection::{project, word_count, LeafSpan, OffsetIndex, Projection, BLOCK_SEPARATOR};
