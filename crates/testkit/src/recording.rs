//! Recording host renderer for headless runs and tests.
//!
//! Text is measured with a fixed-width font so layouts are deterministic.

use glam::DVec2;
use hudkit_overlay::transform::REFERENCE_HEIGHT;
use hudkit_overlay::{BillboardQuad, HostRenderer, TextHandle, TextPrimitive};
use serde::Serialize;

/// Default glyph advance in pixels at a 1080-line viewport.
pub const DEFAULT_GLYPH_WIDTH: f64 = 10.0;
/// Default line height in pixels at a 1080-line viewport.
pub const DEFAULT_LINE_HEIGHT: f64 = 20.0;

/// Measurements are padded by this factor so that truncating them back to
/// pixels lands on the intended whole value.
const MEASURE_EPSILON: f64 = 1e-9;

/// One call the overlay made into the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCall {
    /// A text primitive drawn this frame.
    Text {
        /// Host handle.
        handle: u64,
        /// Text content.
        content: String,
        /// Top-left anchor in scaled space.
        origin: [f64; 2],
        /// Character scale.
        scale: f64,
    },
    /// A billboard quad drawn this frame.
    Billboard {
        /// Material name.
        material: String,
        /// RGBA tint.
        color: [u8; 4],
        /// World-space center.
        position: [f64; 3],
        /// Width along the camera's left vector.
        width: f64,
        /// Height along the camera's up vector.
        height: f64,
    },
}

/// Host that records every draw call instead of rendering it.
#[derive(Debug, Clone)]
pub struct RecordingHost {
    viewport: DVec2,
    glyph_width: f64,
    line_height: f64,
    alive: bool,
    next_handle: u64,
    live_texts: usize,
    measure_calls: usize,
    calls: Vec<DrawCall>,
}

impl RecordingHost {
    /// Create a host for a viewport in pixels.
    pub fn new(viewport: DVec2) -> Self {
        Self {
            viewport,
            glyph_width: DEFAULT_GLYPH_WIDTH,
            line_height: DEFAULT_LINE_HEIGHT,
            alive: true,
            next_handle: 1,
            live_texts: 0,
            measure_calls: 0,
            calls: Vec::new(),
        }
    }

    /// Builder: Set the monospace font metrics in pixels at a 1080-line viewport
    pub fn with_font(mut self, glyph_width: f64, line_height: f64) -> Self {
        self.glyph_width = glyph_width;
        self.line_height = line_height;
        self
    }

    /// Change the viewport. Must match the camera frame handed to the overlay.
    pub fn set_viewport(&mut self, viewport: DVec2) {
        self.viewport = viewport;
    }

    /// Simulate the host text service going down or coming back.
    pub fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    /// Text primitives created and not yet released.
    pub fn live_texts(&self) -> usize {
        self.live_texts
    }

    /// Number of measurement requests so far.
    pub fn measure_calls(&self) -> usize {
        self.measure_calls
    }

    /// Calls recorded since the last [`take_calls`](Self::take_calls).
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Drain the recorded calls, typically once per frame.
    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Pixel size of `content` at `scale` (already resolution-adjusted).
    pub fn text_pixels(&self, content: &str, scale: f64) -> DVec2 {
        let chars = content.chars().count() as f64;
        DVec2::new(self.glyph_width * chars, self.line_height)
            * scale
            * (self.viewport.y / REFERENCE_HEIGHT)
    }
}

impl HostRenderer for RecordingHost {
    fn heartbeat(&self) -> bool {
        self.alive
    }

    fn create_text(&mut self, _primitive: &TextPrimitive<'_>) -> TextHandle {
        let handle = TextHandle(self.next_handle);
        self.next_handle += 1;
        self.live_texts += 1;
        handle
    }

    fn measure_text(&mut self, _handle: TextHandle, primitive: &TextPrimitive<'_>) -> DVec2 {
        self.measure_calls += 1;
        let pixels = self.text_pixels(primitive.content, primitive.scale) * (1.0 + MEASURE_EPSILON);
        // Hosts report text height downward.
        DVec2::new(pixels.x, -pixels.y) * 2.0 / self.viewport
    }

    fn draw_text(&mut self, handle: TextHandle, primitive: &TextPrimitive<'_>) {
        self.calls.push(DrawCall::Text {
            handle: handle.0,
            content: primitive.content.to_string(),
            origin: primitive.origin.to_array(),
            scale: primitive.scale,
        });
    }

    fn release_text(&mut self, _handle: TextHandle) {
        self.live_texts = self.live_texts.saturating_sub(1);
    }

    fn draw_billboard(&mut self, quad: &BillboardQuad<'_>) {
        self.calls.push(DrawCall::Billboard {
            material: quad.material.name().to_string(),
            color: quad.color.to_array(),
            position: quad.position.to_array(),
            width: quad.width,
            height: quad.height,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hudkit_camera::CameraFrame;
    use hudkit_overlay::{Overlay, TextAlignment, TextHudMessage, TexturedBox};

    #[test]
    fn records_text_and_billboards() {
        let mut host = RecordingHost::new(DVec2::new(1920.0, 1080.0));
        let mut overlay = Overlay::initialized().unwrap();
        overlay
            .add_box(None, TexturedBox::new().with_size(glam::IVec2::new(50, 50)))
            .unwrap();
        overlay
            .add_text(None, TextHudMessage::new(TextAlignment::Left).with_message("hud"))
            .unwrap();

        overlay
            .draw(&CameraFrame::identity(1920, 1080, 1.0), &mut host)
            .unwrap();

        let calls = host.take_calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(&calls[0], DrawCall::Billboard { material, .. } if material == "Square"));
        assert!(matches!(&calls[1], DrawCall::Text { content, .. } if content == "hud"));
        assert!(host.calls().is_empty());
        assert_eq!(host.live_texts(), 1);

        overlay.close(&mut host);
        assert_eq!(host.live_texts(), 0);
    }

    #[test]
    fn monospace_measurement_scales_with_viewport() {
        let host = RecordingHost::new(DVec2::new(1280.0, 720.0)).with_font(8.0, 16.0);
        let pixels = host.text_pixels("abcd", 1.5);
        // 1.5 is the resolution factor at 720 lines, so the text keeps its
        // reference size.
        assert!((pixels - DVec2::new(32.0, 16.0)).abs().max_element() < 1e-9);
    }

    #[test]
    fn draw_calls_serialize_with_kind_tag() {
        let call = DrawCall::Text {
            handle: 3,
            content: "x".into(),
            origin: [0.0, 0.5],
            scale: 1.0,
        };
        let json = serde_json::to_string(&call).unwrap();
        assert!(json.starts_with(r#"{"kind":"text""#));
    }
}
