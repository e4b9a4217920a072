// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use skyline_comm::CommError;
use skyline_highlight::HighlightError;
use skyline_layout::LayoutError;
use skyline_tree::TreeError;

/// Errors reported by the views.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ViewError {
    /// Invalid tree operation.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// Invalid communication snapshot.
    #[error(transparent)]
    Comm(#[from] CommError),
    /// Invalid highlight target.
    #[error(transparent)]
    Highlight(#[from] HighlightError),
    /// Layout run failed.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// A remote target names model ids that do not exist here.
    #[error("remote target {0} does not resolve locally")]
    UnresolvedRemote(String),
}
