//! Host rendering primitives.
//!
//! The overlay never rasterizes anything itself. It hands text and billboard
//! quads to a [`HostRenderer`] supplied by the embedding application.

use glam::{DVec2, DVec3};

use crate::color::{Color, Material};

/// Blend mode requested for a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// Low dynamic range blending, drawn after tonemapping.
    #[default]
    Ldr,
    /// Regular alpha blending in the HDR pass.
    Standard,
}

/// Handle to a text primitive owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextHandle(pub u64);

/// State of a host text primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPrimitive<'a> {
    /// Text content.
    pub content: &'a str,
    /// Anchor position in scaled space.
    pub origin: DVec2,
    /// Character scale, already multiplied by the resolution factor.
    pub scale: f64,
    /// Whether the host should draw the text on its own every frame.
    pub visible: bool,
    /// Fixed-position mode: the origin is screen-locked instead of world-anchored.
    pub fixed: bool,
    /// Blend mode.
    pub blend: BlendMode,
}

/// A camera-facing quad placed in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillboardQuad<'a> {
    /// Texture to draw.
    pub material: &'a Material,
    /// Tint color.
    pub color: Color,
    /// Quad center in world space.
    pub position: DVec3,
    /// Camera left basis vector.
    pub left: DVec3,
    /// Camera up basis vector.
    pub up: DVec3,
    /// Width along `left`.
    pub width: f64,
    /// Height along `up`.
    pub height: f64,
    /// Blend mode.
    pub blend: BlendMode,
}

/// Rendering service provided by the host application.
pub trait HostRenderer {
    /// Whether the host's text service is alive. Frames are skipped while it is not.
    fn heartbeat(&self) -> bool {
        true
    }

    /// Create a text primitive.
    fn create_text(&mut self, primitive: &TextPrimitive<'_>) -> TextHandle;

    /// Update a text primitive and return its measured size in scaled units.
    fn measure_text(&mut self, handle: TextHandle, primitive: &TextPrimitive<'_>) -> DVec2;

    /// Update a text primitive and draw it for this frame.
    fn draw_text(&mut self, handle: TextHandle, primitive: &TextPrimitive<'_>);

    /// Release a text primitive. Called once per primitive when the overlay closes.
    fn release_text(&mut self, _handle: TextHandle) {}

    /// Draw an oriented billboard quad for this frame.
    fn draw_billboard(&mut self, quad: &BillboardQuad<'_>);
}
