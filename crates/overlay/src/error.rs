use thiserror::Error;

use crate::node::NodeId;

/// Errors raised by the overlay element tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    /// Elements were created before [`Overlay::init`](crate::Overlay::init) or after
    /// [`Overlay::close`](crate::Overlay::close).
    #[error("hud elements cannot be created without initializing the overlay")]
    NotInitialized,
    /// The handle does not belong to this overlay's draw list.
    #[error("unknown hud element {0}")]
    UnknownNode(NodeId),
    /// The handle refers to an element of a different kind.
    #[error("hud element {node} is not a {expected}")]
    KindMismatch {
        /// Offending handle.
        node: NodeId,
        /// Kind the caller asked for.
        expected: &'static str,
    },
    /// Re-parenting would make an element its own ancestor.
    #[error("cannot parent {node} to {parent}: {parent} is {node} or one of its descendants")]
    ParentCycle {
        /// Element being re-parented.
        node: NodeId,
        /// Requested parent.
        parent: NodeId,
    },
}
