//! Element tree storage.
//!
//! Elements live in an arena owned by the [`Overlay`](crate::Overlay). Arena
//! order is registration order, which is also draw order. Parents are plain
//! [`NodeId`] handles, so a child never owns or keeps its parent alive.

use std::fmt;

use glam::{DVec2, IVec2};

use crate::components::{TextHudMessage, TexturedBox};
use crate::error::OverlayError;
use crate::host::HostRenderer;
use crate::transform::Projection;

/// Handle to an element registered with an overlay.
///
/// Handles carry the arena generation they were issued in, so a handle kept
/// across [`Overlay::close`](crate::Overlay::close) is rejected instead of
/// naming whatever element now sits at the same position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// Placement state shared by every element.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeBase {
    pub(crate) parent: Option<NodeId>,
    origin: IVec2,
    offset: IVec2,
    requested_scaled_pos: DVec2,
    scale: f64,
    visible: bool,
}

impl NodeBase {
    pub(crate) fn new(parent: Option<NodeId>) -> Self {
        Self {
            parent,
            origin: IVec2::ZERO,
            offset: IVec2::ZERO,
            requested_scaled_pos: DVec2::ZERO,
            scale: 1.0,
            visible: true,
        }
    }

    /// Parent element, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Position in pixels relative to the parent's origin + offset (or the
    /// screen center for roots).
    pub fn origin(&self) -> IVec2 {
        self.origin
    }

    /// Set the local origin.
    pub fn set_origin(&mut self, origin: IVec2) {
        self.origin = origin;
    }

    /// Displacement from the origin in pixels.
    pub fn offset(&self) -> IVec2 {
        self.offset
    }

    /// Set the offset.
    pub fn set_offset(&mut self, offset: IVec2) {
        self.offset = offset;
    }

    /// Scaled-space position requested by the caller.
    ///
    /// Only composites that place themselves in scaled space (the scroll menu)
    /// read it. It is never written back by drawing.
    pub fn requested_scaled_pos(&self) -> DVec2 {
        self.requested_scaled_pos
    }

    /// Set the requested scaled-space position.
    pub fn set_requested_scaled_pos(&mut self, pos: DVec2) {
        self.requested_scaled_pos = pos;
    }

    /// Uniform size multiplier.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the scale. Negative values saturate to zero.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.max(0.0);
    }

    /// The element's own visibility flag, ignoring ancestors.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Set the element's own visibility flag.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Box(TexturedBox),
    Text(TextHudMessage),
    /// Index into the overlay's scroll menu table.
    Menu(usize),
}

impl NodeKind {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            NodeKind::Box(_) => "textured box",
            NodeKind::Text(_) => "text message",
            NodeKind::Menu(_) => "scroll menu",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) base: NodeBase,
    pub(crate) kind: NodeKind,
}

/// Registration-ordered element storage.
#[derive(Debug, Default)]
pub(crate) struct NodeArena {
    nodes: Vec<Node>,
    generation: u32,
}

impl NodeArena {
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Drop every node and invalidate all handles issued so far.
    pub(crate) fn clear(&mut self) -> Vec<Node> {
        self.generation = self.generation.wrapping_add(1);
        std::mem::take(&mut self.nodes)
    }

    /// Handle of the node at draw-list position `index`.
    pub(crate) fn id_at(&self, index: usize) -> NodeId {
        NodeId {
            index,
            generation: self.generation,
        }
    }

    pub(crate) fn push(&mut self, parent: Option<NodeId>, kind: NodeKind) -> Result<NodeId, OverlayError> {
        if let Some(parent) = parent {
            self.node(parent)?;
        }
        let id = self.id_at(self.nodes.len());
        self.nodes.push(Node {
            base: NodeBase::new(parent),
            kind,
        });
        Ok(id)
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node, OverlayError> {
        if id.generation != self.generation {
            return Err(OverlayError::UnknownNode(id));
        }
        self.nodes.get(id.index).ok_or(OverlayError::UnknownNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, OverlayError> {
        if id.generation != self.generation {
            return Err(OverlayError::UnknownNode(id));
        }
        self.nodes.get_mut(id.index).ok_or(OverlayError::UnknownNode(id))
    }

    pub(crate) fn base(&self, id: NodeId) -> Result<&NodeBase, OverlayError> {
        Ok(&self.node(id)?.base)
    }

    pub(crate) fn base_mut(&mut self, id: NodeId) -> Result<&mut NodeBase, OverlayError> {
        Ok(&mut self.node_mut(id)?.base)
    }

    pub(crate) fn textured_box(&self, id: NodeId) -> Result<&TexturedBox, OverlayError> {
        match &self.node(id)?.kind {
            NodeKind::Box(textured_box) => Ok(textured_box),
            _ => Err(OverlayError::KindMismatch {
                node: id,
                expected: "textured box",
            }),
        }
    }

    pub(crate) fn textured_box_mut(&mut self, id: NodeId) -> Result<&mut TexturedBox, OverlayError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Box(textured_box) => Ok(textured_box),
            _ => Err(OverlayError::KindMismatch {
                node: id,
                expected: "textured box",
            }),
        }
    }

    pub(crate) fn text(&self, id: NodeId) -> Result<&TextHudMessage, OverlayError> {
        match &self.node(id)?.kind {
            NodeKind::Text(text) => Ok(text),
            _ => Err(OverlayError::KindMismatch {
                node: id,
                expected: "text message",
            }),
        }
    }

    pub(crate) fn text_mut(&mut self, id: NodeId) -> Result<&mut TextHudMessage, OverlayError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Text(text) => Ok(text),
            _ => Err(OverlayError::KindMismatch {
                node: id,
                expected: "text message",
            }),
        }
    }

    pub(crate) fn menu_slot(&self, id: NodeId) -> Result<usize, OverlayError> {
        match self.node(id)?.kind {
            NodeKind::Menu(slot) => Ok(slot),
            _ => Err(OverlayError::KindMismatch {
                node: id,
                expected: "scroll menu",
            }),
        }
    }

    /// Own origin plus every ancestor's origin + offset.
    pub(crate) fn effective_origin(&self, id: NodeId) -> Result<IVec2, OverlayError> {
        let node = self.node(id)?;
        let mut origin = node.base.origin;
        let mut parent = node.base.parent;

        while let Some(parent_id) = parent {
            let parent_base = self.base(parent_id)?;
            origin = origin.saturating_add(parent_base.origin.saturating_add(parent_base.offset));
            parent = parent_base.parent;
        }

        Ok(origin)
    }

    /// Where the node is drawn: effective origin plus its own offset.
    pub(crate) fn resolved_position(&self, id: NodeId) -> Result<IVec2, OverlayError> {
        let offset = self.base(id)?.offset;
        Ok(self.effective_origin(id)?.saturating_add(offset))
    }

    /// Own flag folded with every ancestor's flag.
    pub(crate) fn effective_visible(&self, id: NodeId) -> Result<bool, OverlayError> {
        let mut current = Some(id);

        while let Some(node_id) = current {
            let base = self.base(node_id)?;
            if !base.visible {
                return Ok(false);
            }
            current = base.parent;
        }

        Ok(true)
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub(crate) fn is_self_or_ancestor(&self, ancestor: NodeId, id: NodeId) -> Result<bool, OverlayError> {
        let mut current = Some(id);

        while let Some(node_id) = current {
            if node_id == ancestor {
                return Ok(true);
            }
            current = self.base(node_id)?.parent;
        }

        Ok(false)
    }

    /// Lazily create and re-measure a text element, returning its pixel size.
    pub(crate) fn measure_text(
        &mut self,
        id: NodeId,
        projection: &Projection,
        host: &mut dyn HostRenderer,
    ) -> Result<IVec2, OverlayError> {
        let node = self.node_mut(id)?;
        let host_scale = node.base.scale * projection.res_scale();
        match &mut node.kind {
            NodeKind::Text(text) => {
                text.prepare(host_scale, projection, host);
                Ok(text.text_size())
            }
            _ => Err(OverlayError::KindMismatch {
                node: id,
                expected: "text message",
            }),
        }
    }
}
