// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use crate::EntityId;

/// Errors reported by [`ContainmentTree`](crate::ContainmentTree) operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A disclosure operation was invoked on a leaf.
    #[error("entity {id} is a leaf and cannot be opened or closed")]
    InvalidOperand {
        /// The offending entity.
        id: EntityId,
    },
    /// The id does not address an entity of this tree.
    #[error("entity {0} does not exist in this tree")]
    UnknownEntity(EntityId),
    /// A child was inserted under a leaf.
    #[error("entity {0} is a leaf and cannot have children")]
    LeafParent(EntityId),
    /// Another entity already uses this model id.
    #[error("model id `{0}` is already used by another entity")]
    DuplicateModelId(String),
}
