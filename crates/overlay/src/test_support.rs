//! Minimal host used by unit tests.
//!
//! Text measures 10x20 pixels per character at scale 1 once the resolution
//! factor is applied, like a real host. `viewport` must match the frame's.

use glam::{DVec2, DVec3};

use crate::color::Color;
use crate::host::{BillboardQuad, HostRenderer, TextHandle, TextPrimitive};
use crate::transform::REFERENCE_HEIGHT;

pub(crate) const GLYPH_PX: DVec2 = DVec2::new(10.0, 20.0);

#[derive(Debug)]
pub(crate) struct FakeHost {
    pub viewport: DVec2,
    pub created: usize,
    pub measured: usize,
    pub released: usize,
    pub dead: bool,
    pub drawn_texts: Vec<(String, DVec2)>,
    pub billboards: Vec<(DVec3, f64, f64, Color)>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            viewport: DVec2::new(1920.0, 1080.0),
            created: 0,
            measured: 0,
            released: 0,
            dead: false,
            drawn_texts: Vec::new(),
            billboards: Vec::new(),
        }
    }
}

impl HostRenderer for FakeHost {
    fn heartbeat(&self) -> bool {
        !self.dead
    }

    fn create_text(&mut self, _primitive: &TextPrimitive<'_>) -> TextHandle {
        self.created += 1;
        TextHandle(self.created as u64)
    }

    fn measure_text(&mut self, _handle: TextHandle, primitive: &TextPrimitive<'_>) -> DVec2 {
        self.measured += 1;
        let chars = primitive.content.chars().count() as f64;
        // Nudge up so truncation back to pixels lands on the whole value.
        let pixels = DVec2::new(GLYPH_PX.x * chars, -GLYPH_PX.y)
            * primitive.scale
            * (self.viewport.y / REFERENCE_HEIGHT)
            * (1.0 + 1e-9);
        pixels * 2.0 / self.viewport
    }

    fn draw_text(&mut self, _handle: TextHandle, primitive: &TextPrimitive<'_>) {
        self.drawn_texts
            .push((primitive.content.to_string(), primitive.origin));
    }

    fn release_text(&mut self, _handle: TextHandle) {
        self.released += 1;
    }

    fn draw_billboard(&mut self, quad: &BillboardQuad<'_>) {
        self.billboards
            .push((quad.position, quad.width, quad.height, quad.color));
    }
}
