//! Overlay - owns every HUD element and drives them once per frame

use glam::{DVec2, IVec2};
use hudkit_camera::CameraFrame;

use crate::components::{ScrollMenu, ScrollMenuMut, TextHudMessage, TexturedBox};
use crate::error::OverlayError;
use crate::host::HostRenderer;
use crate::node::{NodeArena, NodeBase, NodeId, NodeKind};
use crate::test_pattern::UiTestPattern;
use crate::transform::Projection;
use crate::VERSION;

/// What one call to [`Overlay::draw`] emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Frame number, counting every draw call since init.
    pub frame: u64,
    /// Billboards handed to the host.
    pub boxes: usize,
    /// Text primitives drawn.
    pub texts: usize,
    /// Scroll menus laid out.
    pub menus: usize,
}

impl FrameStats {
    /// Whether nothing at all was emitted.
    pub fn is_empty(&self) -> bool {
        self.boxes == 0 && self.texts == 0 && self.menus == 0
    }
}

/// The HUD context: draw list, projection constants and lifecycle.
///
/// Elements are created through the `add_*` methods and addressed by
/// [`NodeId`]. They stay registered until [`close`](Self::close); hide them
/// instead of removing them.
#[derive(Debug, Default)]
pub struct Overlay {
    pub(crate) nodes: NodeArena,
    pub(crate) menus: Vec<ScrollMenu>,
    projection: Projection,
    initialized: bool,
    frame: u64,
    test_pattern: Option<UiTestPattern>,
}

impl Overlay {
    /// Create an overlay that still needs [`init`](Self::init).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and initialize an overlay.
    pub fn initialized() -> Result<Self, OverlayError> {
        let mut overlay = Self::new();
        overlay.init()?;
        Ok(overlay)
    }

    /// Prepare the overlay for use. Calling it again is a no-op.
    pub fn init(&mut self) -> Result<(), OverlayError> {
        if self.initialized {
            return Ok(());
        }

        tracing::info!("Initializing hudkit-overlay v{}", VERSION);
        self.initialized = true;
        self.frame = 0;
        self.test_pattern = Some(UiTestPattern::build(self)?);
        Ok(())
    }

    /// Release every host text primitive and drop all elements.
    ///
    /// Handles issued before closing are invalid afterwards, even once the
    /// overlay is initialized again: they fail with
    /// [`OverlayError::UnknownNode`].
    pub fn close(&mut self, host: &mut dyn HostRenderer) {
        if !self.initialized {
            return;
        }

        let mut released = 0usize;
        for node in self.nodes.clear() {
            if let NodeKind::Text(text) = node.kind {
                if let Some(handle) = text.host_handle() {
                    host.release_text(handle);
                    released += 1;
                }
            }
        }

        self.menus.clear();
        self.test_pattern = None;
        self.initialized = false;
        tracing::info!(released, frames = self.frame, "Closed hud overlay");
    }

    /// Whether [`init`](Self::init) has run and [`close`](Self::close) has not.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of registered elements, including the parts of composites.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Projection constants as of the last drawn frame.
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub(crate) fn register(&mut self, parent: Option<NodeId>, kind: NodeKind) -> Result<NodeId, OverlayError> {
        if !self.initialized {
            return Err(OverlayError::NotInitialized);
        }

        let id = self.nodes.push(parent, kind)?;
        tracing::trace!(node = %id, count = self.nodes.len(), "registered hud element");
        Ok(id)
    }

    /// Register a textured box.
    pub fn add_box(&mut self, parent: Option<NodeId>, textured_box: TexturedBox) -> Result<NodeId, OverlayError> {
        self.register(parent, NodeKind::Box(textured_box))
    }

    /// Register a text element.
    pub fn add_text(&mut self, parent: Option<NodeId>, text: TextHudMessage) -> Result<NodeId, OverlayError> {
        self.register(parent, NodeKind::Text(text))
    }

    /// Register a scroll menu with an initial pool of `capacity` body lines.
    pub fn add_scroll_menu(&mut self, parent: Option<NodeId>, capacity: usize) -> Result<NodeId, OverlayError> {
        let before = self.nodes.len();
        let slot = self.menus.len();
        let id = self.register(parent, NodeKind::Menu(slot))?;

        let menu = ScrollMenu::build(self, id, capacity)?;
        self.menus.push(menu);

        tracing::debug!(
            menu = %id,
            capacity,
            nodes = self.nodes.len() - before,
            "created scroll menu"
        );
        Ok(id)
    }

    /// Placement state of an element.
    pub fn base(&self, id: NodeId) -> Result<&NodeBase, OverlayError> {
        self.nodes.base(id)
    }

    /// Mutable placement state of an element.
    pub fn base_mut(&mut self, id: NodeId) -> Result<&mut NodeBase, OverlayError> {
        self.nodes.base_mut(id)
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, OverlayError> {
        Ok(self.nodes.base(id)?.parent())
    }

    /// Re-parent an element. `None` makes it a root.
    ///
    /// Rejects a parent that is the element itself or one of its descendants.
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) -> Result<(), OverlayError> {
        self.nodes.node(id)?;

        if let Some(parent) = parent {
            if self.nodes.is_self_or_ancestor(id, parent)? {
                return Err(OverlayError::ParentCycle { node: id, parent });
            }
        }

        self.nodes.base_mut(id)?.parent = parent;
        Ok(())
    }

    pub fn origin(&self, id: NodeId) -> Result<IVec2, OverlayError> {
        Ok(self.nodes.base(id)?.origin())
    }

    pub fn set_origin(&mut self, id: NodeId, origin: IVec2) -> Result<(), OverlayError> {
        self.nodes.base_mut(id)?.set_origin(origin);
        Ok(())
    }

    pub fn offset(&self, id: NodeId) -> Result<IVec2, OverlayError> {
        Ok(self.nodes.base(id)?.offset())
    }

    pub fn set_offset(&mut self, id: NodeId, offset: IVec2) -> Result<(), OverlayError> {
        self.nodes.base_mut(id)?.set_offset(offset);
        Ok(())
    }

    pub fn scale(&self, id: NodeId) -> Result<f64, OverlayError> {
        Ok(self.nodes.base(id)?.scale())
    }

    /// Set the scale. Negative values saturate to zero.
    pub fn set_scale(&mut self, id: NodeId, scale: f64) -> Result<(), OverlayError> {
        self.nodes.base_mut(id)?.set_scale(scale);
        Ok(())
    }

    /// The element's own visibility flag.
    pub fn visible(&self, id: NodeId) -> Result<bool, OverlayError> {
        Ok(self.nodes.base(id)?.visible())
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<(), OverlayError> {
        self.nodes.base_mut(id)?.set_visible(visible);
        Ok(())
    }

    pub fn requested_scaled_pos(&self, id: NodeId) -> Result<DVec2, OverlayError> {
        Ok(self.nodes.base(id)?.requested_scaled_pos())
    }

    pub fn set_requested_scaled_pos(&mut self, id: NodeId, pos: DVec2) -> Result<(), OverlayError> {
        self.nodes.base_mut(id)?.set_requested_scaled_pos(pos);
        Ok(())
    }

    /// Own origin plus every ancestor's origin and offset.
    pub fn effective_origin(&self, id: NodeId) -> Result<IVec2, OverlayError> {
        self.nodes.effective_origin(id)
    }

    /// Where the element is drawn: effective origin plus its own offset.
    pub fn resolved_position(&self, id: NodeId) -> Result<IVec2, OverlayError> {
        self.nodes.resolved_position(id)
    }

    /// Own flag folded with every ancestor's flag.
    pub fn effective_visible(&self, id: NodeId) -> Result<bool, OverlayError> {
        self.nodes.effective_visible(id)
    }

    pub fn textured_box(&self, id: NodeId) -> Result<&TexturedBox, OverlayError> {
        self.nodes.textured_box(id)
    }

    pub fn textured_box_mut(&mut self, id: NodeId) -> Result<&mut TexturedBox, OverlayError> {
        self.nodes.textured_box_mut(id)
    }

    pub fn text(&self, id: NodeId) -> Result<&TextHudMessage, OverlayError> {
        self.nodes.text(id)
    }

    pub fn text_mut(&mut self, id: NodeId) -> Result<&mut TextHudMessage, OverlayError> {
        self.nodes.text_mut(id)
    }

    pub fn scroll_menu(&self, id: NodeId) -> Result<&ScrollMenu, OverlayError> {
        let slot = self.nodes.menu_slot(id)?;
        self.menus.get(slot).ok_or(OverlayError::UnknownNode(id))
    }

    pub fn scroll_menu_mut(&mut self, id: NodeId) -> Result<ScrollMenuMut<'_>, OverlayError> {
        let slot = self.nodes.menu_slot(id)?;
        if slot >= self.menus.len() {
            return Err(OverlayError::UnknownNode(id));
        }
        Ok(ScrollMenuMut::new(self, id, slot))
    }

    /// The calibration pattern built during init.
    pub fn test_pattern(&self) -> Option<&UiTestPattern> {
        self.test_pattern.as_ref()
    }

    pub fn show_test_pattern(&mut self) -> Result<(), OverlayError> {
        self.set_test_pattern_visible(true)
    }

    pub fn hide_test_pattern(&mut self) -> Result<(), OverlayError> {
        self.set_test_pattern_visible(false)
    }

    pub fn toggle_test_pattern(&mut self) -> Result<(), OverlayError> {
        let visible = self
            .test_pattern
            .as_ref()
            .ok_or(OverlayError::NotInitialized)?
            .visible();
        self.set_test_pattern_visible(!visible)
    }

    fn set_test_pattern_visible(&mut self, visible: bool) -> Result<(), OverlayError> {
        let pattern = self
            .test_pattern
            .as_mut()
            .ok_or(OverlayError::NotInitialized)?;
        pattern.set_visible(&mut self.nodes, visible)
    }

    /// Draw one frame.
    ///
    /// Refreshes the projection from `camera`, then visits every element in
    /// registration order. Hidden elements (or elements under a hidden
    /// ancestor) are skipped. Scroll menus lay out their parts before those
    /// parts draw, since parts always register after their menu.
    pub fn draw(&mut self, camera: &CameraFrame, host: &mut dyn HostRenderer) -> Result<FrameStats, OverlayError> {
        if !self.initialized {
            return Err(OverlayError::NotInitialized);
        }

        self.frame += 1;
        let mut stats = FrameStats {
            frame: self.frame,
            ..Default::default()
        };

        if !host.heartbeat() {
            tracing::warn!(frame = self.frame, "Host text service is down, skipping hud frame");
            return Ok(stats);
        }

        if camera.viewport.x <= 0.0 || camera.viewport.y <= 0.0 {
            tracing::warn!(
                frame = self.frame,
                width = camera.viewport.x,
                height = camera.viewport.y,
                "Empty viewport, skipping hud frame"
            );
            return Ok(stats);
        }

        if self.projection.refresh(camera.viewport, camera.fov) {
            tracing::debug!(
                fov = camera.fov,
                fov_scale = self.projection.fov_scale(),
                "Field of view changed"
            );
        }
        let projection = self.projection;

        for index in 0..self.nodes.len() {
            let id = self.nodes.id_at(index);
            if !self.nodes.effective_visible(id)? {
                continue;
            }

            let resolved = self.nodes.resolved_position(id)?;
            let scale = self.nodes.base(id)?.scale();

            let menu_slot = match &mut self.nodes.node_mut(id)?.kind {
                NodeKind::Box(textured_box) => {
                    let quad = textured_box.billboard(scale, resolved, &projection, camera);
                    host.draw_billboard(&quad);
                    stats.boxes += 1;
                    None
                }
                NodeKind::Text(text) => {
                    if text.draw(resolved, scale * projection.res_scale(), &projection, host) {
                        stats.texts += 1;
                    }
                    None
                }
                NodeKind::Menu(slot) => Some(*slot),
            };

            if let Some(slot) = menu_slot {
                let menu = self.menus.get_mut(slot).ok_or(OverlayError::UnknownNode(id))?;
                if menu.layout(id, &mut self.nodes, &projection, host)? {
                    stats.menus += 1;
                }
            }
        }

        tracing::trace!(
            frame = stats.frame,
            boxes = stats.boxes,
            texts = stats.texts,
            menus = stats.menus,
            "Drew hud frame"
        );
        Ok(stats)
    }
}
