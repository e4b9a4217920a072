// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use skyline_tree::EntityId;

use crate::CommunicationId;

/// Errors reported while loading communications.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommError {
    /// An endpoint is not part of the tree.
    #[error("{communication} references unknown entity {entity}")]
    UnknownEndpoint {
        /// The offending raw communication.
        communication: CommunicationId,
        /// The missing endpoint.
        entity: EntityId,
    },
    /// An endpoint is a container; communications connect leaves.
    #[error("{communication} has container endpoint {entity}")]
    NotALeaf {
        /// The offending raw communication.
        communication: CommunicationId,
        /// The container endpoint.
        entity: EntityId,
    },
}
