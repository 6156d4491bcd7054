//! Text HUD message - pixel-precise wrapper around a host text primitive

use glam::{DVec2, IVec2};

use crate::host::{BlendMode, HostRenderer, TextHandle, TextPrimitive};
use crate::layout::alignment_offset;
use crate::transform::Projection;

/// Horizontal anchoring of a text element around its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlignment {
    /// Left edge at the position.
    Left,
    /// Centered on the position.
    #[default]
    Center,
    /// Right edge at the position.
    Right,
}

/// Inputs a measurement depends on besides the message itself.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MeasureKey {
    host_scale: f64,
    viewport: DVec2,
}

/// A single text element positioned in pixels.
///
/// The host primitive is created lazily on first use because the host can only
/// measure text through an existing primitive. Measurements are cached until
/// the message, the scale or the viewport change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextHudMessage {
    message: Option<String>,
    alignment: TextAlignment,
    handle: Option<TextHandle>,
    measured_for: Option<MeasureKey>,
    scaled_text_size: DVec2,
    text_size: IVec2,
    alignment_offset: IVec2,
    resolved_host_origin: DVec2,
}

impl TextHudMessage {
    /// Create an empty text element with the given alignment.
    pub fn new(alignment: TextAlignment) -> Self {
        Self {
            alignment,
            ..Default::default()
        }
    }

    /// Builder: Set the message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.set_message(message);
        self
    }

    /// Current message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Replace the message. The text is re-measured on the next layout or draw.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.measured_for = None;
    }

    /// Remove the message.
    pub fn clear_message(&mut self) {
        self.message = None;
        self.measured_for = None;
    }

    /// Alignment.
    pub fn alignment(&self) -> TextAlignment {
        self.alignment
    }

    /// Change the alignment.
    pub fn set_alignment(&mut self, alignment: TextAlignment) {
        self.alignment = alignment;
        self.alignment_offset = alignment_offset(self.text_size, alignment);
    }

    /// Measured size in scaled units.
    pub fn scaled_text_size(&self) -> DVec2 {
        self.scaled_text_size
    }

    /// Measured size in pixels.
    pub fn text_size(&self) -> IVec2 {
        self.text_size
    }

    /// Pixel shift applied so the text anchors according to its alignment.
    pub fn alignment_offset(&self) -> IVec2 {
        self.alignment_offset
    }

    /// Origin last written into the host primitive, in scaled space.
    ///
    /// This is the primitive's top-left anchor, not the element's nominal position.
    pub fn resolved_host_origin(&self) -> DVec2 {
        self.resolved_host_origin
    }

    /// Host handle, once the primitive exists.
    pub fn host_handle(&self) -> Option<TextHandle> {
        self.handle
    }

    /// Whether the cached measurement is current.
    pub fn is_measured(&self) -> bool {
        self.measured_for.is_some()
    }

    /// Record a measured scaled size and derive the pixel size and alignment shift.
    pub(crate) fn apply_measurement(&mut self, scaled_text_size: DVec2, projection: &Projection) {
        self.scaled_text_size = scaled_text_size;
        self.text_size = projection.scaled_to_pixel(scaled_text_size).abs();
        self.alignment_offset = alignment_offset(self.text_size, self.alignment);
    }

    fn primitive(&self, host_scale: f64) -> TextPrimitive<'_> {
        TextPrimitive {
            content: self.message.as_deref().unwrap_or_default(),
            origin: self.resolved_host_origin,
            scale: host_scale,
            visible: false,
            fixed: true,
            blend: BlendMode::Ldr,
        }
    }

    /// Create the host primitive if needed and refresh a stale measurement.
    pub(crate) fn prepare(
        &mut self,
        host_scale: f64,
        projection: &Projection,
        host: &mut dyn HostRenderer,
    ) {
        let handle = match self.handle {
            Some(handle) => handle,
            None => {
                let handle = host.create_text(&self.primitive(host_scale));
                self.handle = Some(handle);
                handle
            }
        };

        let key = MeasureKey {
            host_scale,
            viewport: projection.viewport(),
        };
        if self.measured_for == Some(key) {
            return;
        }

        let scaled = match self.message.as_deref() {
            Some(message) if !message.is_empty() => {
                host.measure_text(handle, &self.primitive(host_scale))
            }
            _ => DVec2::ZERO,
        };
        self.apply_measurement(scaled, projection);
        self.measured_for = Some(key);
    }

    /// Position the host primitive for this frame and draw it.
    ///
    /// Returns `false` when there is nothing to draw.
    pub(crate) fn draw(
        &mut self,
        resolved_pos: IVec2,
        host_scale: f64,
        projection: &Projection,
        host: &mut dyn HostRenderer,
    ) -> bool {
        self.prepare(host_scale, projection, host);

        self.resolved_host_origin =
            projection.pixel_to_scaled(resolved_pos.saturating_add(self.alignment_offset));

        match (self.handle, self.message.as_deref()) {
            (Some(handle), Some(message)) if !message.is_empty() => {
                host.draw_text(handle, &self.primitive(host_scale));
                true
            }
            _ => false,
        }
    }
}
