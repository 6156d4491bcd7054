//! Scroll menu - header, list body, footer and a selection highlight
//!
//! The menu owns a fixed set of boxes and texts plus a pool of body lines.
//! Every frame it is visible, it re-measures its texts and lays everything out
//! again: sizes bottom-up from the text content, then offsets top-down.

use glam::{DVec2, IVec2};

use super::{TextAlignment, TextHudMessage, TexturedBox};
use crate::color::Color;
use crate::error::OverlayError;
use crate::host::HostRenderer;
use crate::layout::{clamp_selection, list_size, scaled_px, scaled_px2, LineStack};
use crate::manager::Overlay;
use crate::node::{NodeArena, NodeId, NodeKind};
use crate::transform::{round_scaled, Projection};

/// Padding around the list body, at scale 1.
pub const PADDING: (f64, f64) = (72.0, 32.0);
/// Extra height of the header band over the header text.
pub const HEADER_MARGIN: f64 = 22.0;
/// Extra height of the footer band over the footer text.
pub const FOOTER_MARGIN: f64 = 12.0;
/// Extra width of the highlight box over the list width.
pub const HIGHLIGHT_MARGIN: f64 = 16.0;
/// Height of the highlight box.
pub const HIGHLIGHT_HEIGHT: f64 = 24.0;
/// Width of the tab on the highlight box's left edge.
pub const TAB_WIDTH: f64 = 4.0;
/// Header text is drawn slightly larger than the body.
pub const HEADER_TEXT_SCALE: f64 = 1.1;
/// Color of the selection tab.
pub const TAB_COLOR: Color = Color::new(225, 225, 240, 255);

/// The menu's requested position is rounded to this many decimals before
/// conversion to pixels so it does not jitter between frames.
const POSITION_DIGITS: i32 = 3;

/// Scrollable list menu; the highlight follows the selection index.
///
/// Element tree:
///
/// ```text
/// menu
/// └── background
///     ├── header band ── header text
///     ├── footer band ── footer left, footer right
///     ├── highlight ──── tab
///     └── body lines (pooled)
/// ```
#[derive(Debug, Clone)]
pub struct ScrollMenu {
    background: NodeId,
    header_bg: NodeId,
    header: NodeId,
    footer_bg: NodeId,
    footer_left: NodeId,
    footer_right: NodeId,
    highlight: NodeId,
    tab: NodeId,
    lines: Vec<NodeId>,
    line_sizes: Vec<IVec2>,
    list_text: Option<Vec<String>>,
    selection_index: usize,
    padding: IVec2,
    size: DVec2,
}

impl ScrollMenu {
    /// Register the menu's parts under `menu` with room for `capacity` lines.
    pub(crate) fn build(
        overlay: &mut Overlay,
        menu: NodeId,
        capacity: usize,
    ) -> Result<Self, OverlayError> {
        let background = overlay.register(Some(menu), NodeKind::Box(TexturedBox::new()))?;

        let header_bg = overlay.register(Some(background), NodeKind::Box(TexturedBox::new()))?;
        let header = overlay.register(
            Some(header_bg),
            NodeKind::Text(TextHudMessage::new(TextAlignment::Center)),
        )?;

        let footer_bg = overlay.register(Some(background), NodeKind::Box(TexturedBox::new()))?;
        let footer_left = overlay.register(
            Some(footer_bg),
            NodeKind::Text(TextHudMessage::new(TextAlignment::Left)),
        )?;
        let footer_right = overlay.register(
            Some(footer_bg),
            NodeKind::Text(TextHudMessage::new(TextAlignment::Right)),
        )?;

        let highlight = overlay.register(Some(background), NodeKind::Box(TexturedBox::new()))?;
        let tab = overlay.register(
            Some(highlight),
            NodeKind::Box(TexturedBox::new().with_color(TAB_COLOR)),
        )?;

        let mut lines = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            lines.push(overlay.register(
                Some(background),
                NodeKind::Text(TextHudMessage::new(TextAlignment::Left)),
            )?);
        }

        Ok(Self {
            background,
            header_bg,
            header,
            footer_bg,
            footer_left,
            footer_right,
            highlight,
            tab,
            lines,
            line_sizes: Vec::with_capacity(capacity),
            list_text: None,
            selection_index: 0,
            padding: IVec2::ZERO,
            size: DVec2::ZERO,
        })
    }

    /// Background box behind the list body.
    pub fn background(&self) -> NodeId {
        self.background
    }

    /// Header band box.
    pub fn header_band(&self) -> NodeId {
        self.header_bg
    }

    /// Header text.
    pub fn header(&self) -> NodeId {
        self.header
    }

    /// Footer band box.
    pub fn footer_band(&self) -> NodeId {
        self.footer_bg
    }

    /// Left-aligned footer text.
    pub fn footer_left(&self) -> NodeId {
        self.footer_left
    }

    /// Right-aligned footer text.
    pub fn footer_right(&self) -> NodeId {
        self.footer_right
    }

    /// Selection highlight box.
    pub fn highlight(&self) -> NodeId {
        self.highlight
    }

    /// Tab on the highlight's left edge.
    pub fn tab(&self) -> NodeId {
        self.tab
    }

    /// Body line elements, including hidden pooled ones.
    pub fn lines(&self) -> &[NodeId] {
        &self.lines
    }

    /// Number of pooled body lines. Only grows: this is the longest list the
    /// menu has ever shown (or its construction capacity).
    pub fn capacity(&self) -> usize {
        self.lines.len()
    }

    /// Current list content; `None` until assigned, and the menu is not laid
    /// out while it is `None`.
    pub fn list_text(&self) -> Option<&[String]> {
        self.list_text.as_deref()
    }

    /// Index of the highlighted line.
    pub fn selection_index(&self) -> usize {
        self.selection_index
    }

    /// Set the selection, saturating into the list's range.
    pub fn set_selection_index(&mut self, index: usize) {
        let len = self.list_text.as_ref().map_or(0, Vec::len);
        self.selection_index = clamp_selection(index, len);
    }

    /// Move the selection by `delta` lines, saturating at both ends.
    pub fn scroll_selection(&mut self, delta: isize) {
        let index = self.selection_index.saturating_add_signed(delta);
        self.set_selection_index(index);
    }

    /// Padding used by the last layout.
    pub fn padding(&self) -> IVec2 {
        self.padding
    }

    /// Scaled-space footprint of the whole menu, header and footer included,
    /// as of the last layout.
    pub fn size(&self) -> DVec2 {
        self.size
    }

    fn apply_scale(&self, nodes: &mut NodeArena, scale: f64) -> Result<(), OverlayError> {
        nodes.base_mut(self.header)?.set_scale(scale * HEADER_TEXT_SCALE);
        nodes.base_mut(self.footer_left)?.set_scale(scale);
        nodes.base_mut(self.footer_right)?.set_scale(scale);

        for &line in &self.lines {
            nodes.base_mut(line)?.set_scale(scale);
        }

        Ok(())
    }

    /// Recompute every part's size and offset for this frame.
    ///
    /// Without an assigned list the background (and with it every part) is
    /// hidden and `false` is returned.
    pub(crate) fn layout(
        &mut self,
        id: NodeId,
        nodes: &mut NodeArena,
        projection: &Projection,
        host: &mut dyn HostRenderer,
    ) -> Result<bool, OverlayError> {
        let Some(list_len) = self.list_text.as_ref().map(Vec::len) else {
            nodes.base_mut(self.background)?.set_visible(false);
            return Ok(false);
        };
        nodes.base_mut(self.background)?.set_visible(true);

        let base = nodes.base(id)?;
        let scale = base.scale();
        let requested_pos = base.requested_scaled_pos();

        self.apply_scale(nodes, scale)?;
        self.padding = scaled_px2(PADDING, scale);

        let header = nodes.measure_text(self.header, projection, host)?;
        let footer_left = nodes.measure_text(self.footer_left, projection, host)?;
        let footer_right = nodes.measure_text(self.footer_right, projection, host)?;

        self.line_sizes.clear();
        for &line in &self.lines[..list_len] {
            self.line_sizes
                .push(nodes.measure_text(line, projection, host)?);
        }

        let list = list_size(
            self.line_sizes.iter().copied(),
            header,
            footer_left,
            footer_right,
            self.padding,
        );

        nodes
            .base_mut(id)?
            .set_origin(projection.scaled_to_pixel(round_scaled(requested_pos, POSITION_DIGITS)));

        let background = list + self.padding;
        nodes.textured_box_mut(self.background)?.set_size(background);

        let header_band = IVec2::new(background.x, header.y + scaled_px(HEADER_MARGIN, scale));
        nodes.textured_box_mut(self.header_bg)?.set_size(header_band);
        nodes
            .base_mut(self.header_bg)?
            .set_offset(IVec2::new(0, (header_band.y + background.y) / 2));

        let mut stack = LineStack::new(list.y / 2);
        let mut selected_y = stack.edge();

        for (n, (&line, size)) in self.lines[..list_len]
            .iter()
            .zip(&self.line_sizes)
            .enumerate()
        {
            let y = stack.place(size.y);
            if n == self.selection_index {
                selected_y = y;
            }

            let line_base = nodes.base_mut(line)?;
            line_base.set_visible(true);
            line_base.set_offset(IVec2::new(-list.x / 2, y));
        }

        for &line in &self.lines[list_len..] {
            nodes.base_mut(line)?.set_visible(false);
        }

        let highlight = IVec2::new(
            list.x + scaled_px(HIGHLIGHT_MARGIN, scale),
            scaled_px(HIGHLIGHT_HEIGHT, scale),
        );
        nodes.textured_box_mut(self.highlight)?.set_size(highlight);
        let highlight_base = nodes.base_mut(self.highlight)?;
        // Nothing to select in an empty list.
        highlight_base.set_visible(list_len > 0);
        highlight_base.set_offset(IVec2::new(0, selected_y));

        let tab = IVec2::new(scaled_px(TAB_WIDTH, scale), highlight.y);
        nodes.textured_box_mut(self.tab)?.set_size(tab);
        nodes
            .base_mut(self.tab)?
            .set_offset(IVec2::new((-highlight.x + tab.x) / 2 - 1, 0));

        let footer_band = IVec2::new(background.x, footer_left.y + scaled_px(FOOTER_MARGIN, scale));
        nodes.textured_box_mut(self.footer_bg)?.set_size(footer_band);
        nodes
            .base_mut(self.footer_bg)?
            .set_offset(IVec2::new(0, -(background.y + footer_band.y) / 2));
        nodes
            .base_mut(self.footer_left)?
            .set_offset(IVec2::new((-footer_band.x + self.padding.x) / 2, 0));
        nodes
            .base_mut(self.footer_right)?
            .set_offset(IVec2::new((footer_band.x - self.padding.x) / 2, 0));

        nodes
            .base_mut(id)?
            .set_offset(IVec2::new(0, -(header_band.y - footer_band.y) / 2));
        self.size = projection
            .pixel_to_scaled(background + IVec2::new(0, header_band.y + footer_band.y));

        Ok(true)
    }
}

/// Mutable access to a scroll menu and the elements it owns.
///
/// Obtained from [`Overlay::scroll_menu_mut`].
pub struct ScrollMenuMut<'a> {
    overlay: &'a mut Overlay,
    id: NodeId,
    slot: usize,
}

impl<'a> ScrollMenuMut<'a> {
    pub(crate) fn new(overlay: &'a mut Overlay, id: NodeId, slot: usize) -> Self {
        Self { overlay, id, slot }
    }

    /// Handle of the menu element.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Read-only view of the menu state.
    pub fn menu(&self) -> &ScrollMenu {
        &self.overlay.menus[self.slot]
    }

    fn menu_mut(&mut self) -> &mut ScrollMenu {
        &mut self.overlay.menus[self.slot]
    }

    fn set_text(&mut self, id: NodeId, text: String) -> Result<(), OverlayError> {
        self.overlay.nodes.text_mut(id)?.set_message(text);
        Ok(())
    }

    /// Set the header text.
    pub fn set_header_text(&mut self, text: impl Into<String>) -> Result<(), OverlayError> {
        let id = self.menu().header;
        self.set_text(id, text.into())
    }

    /// Set the left footer text.
    pub fn set_footer_left_text(&mut self, text: impl Into<String>) -> Result<(), OverlayError> {
        let id = self.menu().footer_left;
        self.set_text(id, text.into())
    }

    /// Set the right footer text.
    pub fn set_footer_right_text(&mut self, text: impl Into<String>) -> Result<(), OverlayError> {
        let id = self.menu().footer_right;
        self.set_text(id, text.into())
    }

    /// Replace the list body.
    ///
    /// Grows the line pool when the list is longer than any list before it.
    /// The selection is clamped into the new list's range.
    pub fn set_list_text(&mut self, lines: Vec<String>) -> Result<(), OverlayError> {
        let background = self.menu().background;
        let before = self.menu().lines.len();

        while self.menu().lines.len() < lines.len() {
            let line = self.overlay.register(
                Some(background),
                NodeKind::Text(TextHudMessage::new(TextAlignment::Left)),
            )?;
            self.menu_mut().lines.push(line);
        }

        let after = self.menu().lines.len();
        if after > before {
            tracing::debug!(menu = %self.id, before, after, "grew scroll menu line pool");
        }

        for (n, text) in lines.iter().enumerate() {
            let line = self.menu().lines[n];
            self.overlay.nodes.text_mut(line)?.set_message(text.as_str());
        }

        let menu = self.menu_mut();
        menu.list_text = Some(lines);
        let selection = menu.selection_index;
        menu.set_selection_index(selection);
        Ok(())
    }

    /// Remove the list; the menu stops laying itself out until a new one is set.
    pub fn clear_list_text(&mut self) {
        let menu = self.menu_mut();
        menu.list_text = None;
        menu.selection_index = 0;
    }

    /// Set the selection, saturating into the list's range.
    pub fn set_selection_index(&mut self, index: usize) {
        self.menu_mut().set_selection_index(index);
    }

    /// Move the selection by `delta` lines, saturating at both ends.
    pub fn scroll_selection(&mut self, delta: isize) {
        self.menu_mut().scroll_selection(delta);
    }

    /// Place the menu at a scaled-space position.
    pub fn set_scaled_pos(&mut self, pos: DVec2) -> Result<(), OverlayError> {
        self.overlay.nodes.base_mut(self.id)?.set_requested_scaled_pos(pos);
        Ok(())
    }

    /// Scale the whole menu.
    pub fn set_scale(&mut self, scale: f64) -> Result<(), OverlayError> {
        self.overlay.nodes.base_mut(self.id)?.set_scale(scale);
        Ok(())
    }

    /// Show or hide the menu and everything in it.
    pub fn set_visible(&mut self, visible: bool) -> Result<(), OverlayError> {
        self.overlay.nodes.base_mut(self.id)?.set_visible(visible);
        Ok(())
    }

    /// Color of the list body background.
    pub fn set_body_color(&mut self, color: Color) -> Result<(), OverlayError> {
        let id = self.menu().background;
        self.overlay.nodes.textured_box_mut(id)?.color = color;
        Ok(())
    }

    /// Color of the selection highlight.
    pub fn set_selection_box_color(&mut self, color: Color) -> Result<(), OverlayError> {
        let id = self.menu().highlight;
        self.overlay.nodes.textured_box_mut(id)?.color = color;
        Ok(())
    }

    /// Color of both the header and footer bands.
    pub fn set_header_color(&mut self, color: Color) -> Result<(), OverlayError> {
        let (header_bg, footer_bg) = (self.menu().header_bg, self.menu().footer_bg);
        self.overlay.nodes.textured_box_mut(header_bg)?.color = color;
        self.overlay.nodes.textured_box_mut(footer_bg)?.color = color;
        Ok(())
    }
}
