// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Errors reported when highlighting a target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HighlightError {
    /// The target does not exist in the tree or communication graph.
    #[error("highlight target does not exist")]
    UnknownTarget,
    /// The target exists but is not drawn.
    #[error("highlight target is not visible")]
    NotVisible,
}
