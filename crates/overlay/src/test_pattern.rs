//! Calibration pattern for checking box scaling and placement by eye.

use glam::IVec2;

use crate::color::Color;
use crate::components::TexturedBox;
use crate::error::OverlayError;
use crate::manager::Overlay;
use crate::node::{NodeArena, NodeId, NodeKind};

const RED: Color = Color::new(255, 0, 0, 255);
const GREEN: Color = Color::new(0, 255, 0, 255);
const BLUE: Color = Color::new(0, 0, 255, 255);
const PURPLE: Color = Color::new(170, 0, 210, 255);
const YELLOW: Color = Color::new(210, 190, 0, 255);

/// Edge length of every pattern box before scaling.
pub const PATTERN_BOX_SIZE: i32 = 100;

/// (color, origin, scale) for each box.
///
/// A cross of full-size boxes around a yellow center, then two rings of
/// smaller boxes on the diagonals. Each box in a ring sits at a distance where
/// its apparent size is easy to compare with its neighbours.
const PATTERN: [(Color, (i32, i32), f64); 13] = [
    (RED, (300, 0), 1.0),
    (GREEN, (-300, 0), 1.0),
    (BLUE, (0, 300), 1.0),
    (PURPLE, (0, -300), 1.0),
    (YELLOW, (0, 0), 1.0),
    (GREEN, (-200, -200), 0.5),
    (BLUE, (-200, 200), 0.5),
    (PURPLE, (200, 200), 0.5),
    (YELLOW, (200, -200), 0.5),
    (GREEN, (-400, -400), 0.25),
    (BLUE, (-400, 400), 0.25),
    (PURPLE, (400, 400), 0.25),
    (YELLOW, (400, -400), 0.25),
];

/// Thirteen root-level boxes, hidden until shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiTestPattern {
    boxes: Vec<NodeId>,
    visible: bool,
}

impl UiTestPattern {
    pub(crate) fn build(overlay: &mut Overlay) -> Result<Self, OverlayError> {
        let mut boxes = Vec::with_capacity(PATTERN.len());

        for (color, (x, y), scale) in PATTERN {
            let textured_box = TexturedBox::new()
                .with_color(color)
                .with_size(IVec2::splat(PATTERN_BOX_SIZE));
            let id = overlay.register(None, NodeKind::Box(textured_box))?;

            let base = overlay.nodes.base_mut(id)?;
            base.set_origin(IVec2::new(x, y));
            base.set_scale(scale);
            base.set_visible(false);
            boxes.push(id);
        }

        Ok(Self {
            boxes,
            visible: false,
        })
    }

    /// The pattern's boxes in draw order.
    pub fn boxes(&self) -> &[NodeId] {
        &self.boxes
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, nodes: &mut NodeArena, visible: bool) -> Result<(), OverlayError> {
        for &id in &self.boxes {
            nodes.base_mut(id)?.set_visible(visible);
        }
        self.visible = visible;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_starts_hidden() {
        let overlay = Overlay::initialized().unwrap();
        let pattern = overlay.test_pattern().unwrap();

        assert_eq!(pattern.boxes().len(), 13);
        assert!(!pattern.visible());
        for &id in pattern.boxes() {
            assert!(!overlay.effective_visible(id).unwrap());
        }
    }

    #[test]
    fn toggle_flips_every_box() {
        let mut overlay = Overlay::initialized().unwrap();
        overlay.toggle_test_pattern().unwrap();

        let boxes = overlay.test_pattern().unwrap().boxes().to_vec();
        assert!(boxes.iter().all(|&id| overlay.visible(id).unwrap()));

        overlay.toggle_test_pattern().unwrap();
        assert!(boxes.iter().all(|&id| !overlay.visible(id).unwrap()));
    }

    #[test]
    fn ring_scales() {
        let overlay = Overlay::initialized().unwrap();
        let scales: Vec<f64> = overlay
            .test_pattern()
            .unwrap()
            .boxes()
            .iter()
            .map(|&id| overlay.scale(id).unwrap())
            .collect();

        assert_eq!(&scales[..5], &[1.0; 5]);
        assert_eq!(&scales[5..9], &[0.5; 4]);
        assert_eq!(&scales[9..], &[0.25; 4]);
    }
}
