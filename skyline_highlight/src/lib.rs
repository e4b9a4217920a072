// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=skyline_highlight --heading-base-level=0

//! Skyline Highlight: focus one element and dim everything unrelated to it.
//!
//! A [`HighlightContext`] holds one [`FocalTarget`]: an entity, a routed edge (addressed by any
//! of its leaf edges), or a trace. Highlighting computes a [`HighlightMap`]:
//!
//! - The target is marked [`HighlightState::HIGHLIGHTED`].
//! - The leaves it contains, plus the leaves they communicate with, are *involved*. For an
//!   edge target only the edge's own endpoints are involved.
//! - Edges unrelated to the target and involved leaves are [`HighlightState::TRANSPARENT`].
//! - Uninvolved leaves are dimmed where drawn, and so are the containers above them up to
//!   the first container that also holds an involved leaf.
//!
//! Disclosure changes invalidate the map; [`HighlightContext::update`] recomputes it and
//! drops the highlight when the target is no longer drawn.
//!
//! Several contexts can coexist (for example the local user's and those of remote peers);
//! [`compose`] merges them. Remote peers name targets by model ids, see [`RemoteTarget`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod context;
mod error;
mod propagate;
mod state;
mod target;

pub use context::{HighlightContext, HighlightMode, compose};
pub use error::HighlightError;
pub use state::{HighlightMap, HighlightState};
pub use target::{FocalTarget, HighlightInput, RemoteTarget, TracePath};
