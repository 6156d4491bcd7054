//! Textured box - a colored or textured quad drawn as a screen-locked billboard

use glam::{DVec2, IVec2};
use hudkit_camera::CameraFrame;

use crate::color::{Color, Material};
use crate::host::{BillboardQuad, BlendMode};
use crate::transform::Projection;

/// A box of a given pixel size drawn with a material and tint.
///
/// The box is centered on its resolved position (origin + offset). The default
/// material is a plain color square.
#[derive(Debug, Clone, PartialEq)]
pub struct TexturedBox {
    size: IVec2,
    /// Tint color.
    pub color: Color,
    /// Host material handle.
    pub material: Material,
    scaled_size: DVec2,
    scaled_pos: DVec2,
}

impl Default for TexturedBox {
    fn default() -> Self {
        Self {
            size: IVec2::ZERO,
            color: Color::default(),
            material: Material::default(),
            scaled_size: DVec2::ZERO,
            scaled_pos: DVec2::ZERO,
        }
    }
}

impl TexturedBox {
    /// Create an empty, transparent box.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: Set color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Builder: Set size in pixels
    pub fn with_size(mut self, size: IVec2) -> Self {
        self.set_size(size);
        self
    }

    /// Builder: Set material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Size in pixels at scale 1. Never negative.
    pub fn size(&self) -> IVec2 {
        self.size
    }

    /// Set the size; negative components are flipped positive.
    pub fn set_size(&mut self, size: IVec2) {
        self.size = size.abs();
    }

    /// Width in pixels.
    pub fn width(&self) -> i32 {
        self.size.x
    }

    /// Height in pixels.
    pub fn height(&self) -> i32 {
        self.size.y
    }

    /// Set the width, keeping the height.
    pub fn set_width(&mut self, width: i32) {
        self.set_size(IVec2::new(width, self.size.y));
    }

    /// Set the height, keeping the width.
    pub fn set_height(&mut self, height: i32) {
        self.set_size(IVec2::new(self.size.x, height));
    }

    /// Size in scaled units as of the last draw.
    pub fn scaled_size(&self) -> DVec2 {
        self.scaled_size
    }

    /// Resolved scaled-space center as of the last draw.
    pub fn scaled_pos(&self) -> DVec2 {
        self.scaled_pos
    }

    /// Resolve this frame's geometry and build the quad to hand to the host.
    pub(crate) fn billboard(
        &mut self,
        scale: f64,
        resolved_pos: IVec2,
        projection: &Projection,
        camera: &CameraFrame,
    ) -> BillboardQuad<'_> {
        self.scaled_size = projection.pixel_size_to_scaled_size(self.size, scale);
        self.scaled_pos = projection.pixel_to_scaled(resolved_pos);

        let board_size = projection.billboard_size(self.scaled_size);

        BillboardQuad {
            material: &self.material,
            color: self.color,
            position: projection.billboard_position(self.scaled_pos, &camera.world),
            left: camera.left(),
            up: camera.up(),
            width: board_size.x,
            height: board_size.y,
            blend: BlendMode::Ldr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DMat4, DVec3};

    #[test]
    fn size_is_stored_as_absolute_value() {
        let mut textured_box = TexturedBox::new().with_size(IVec2::new(-30, 20));
        assert_eq!(textured_box.size(), IVec2::new(30, 20));

        textured_box.set_height(-5);
        assert_eq!(textured_box.size(), IVec2::new(30, 5));
        textured_box.set_width(12);
        assert_eq!((textured_box.width(), textured_box.height()), (12, 5));
    }

    #[test]
    fn default_box_uses_square_material() {
        let textured_box = TexturedBox::new();
        assert_eq!(textured_box.material, Material::default());
        assert_eq!(textured_box.color, Color::TRANSPARENT);
    }

    #[test]
    fn custom_material_reaches_the_quad() {
        let projection = Projection::default();
        let camera = CameraFrame::identity(1920, 1080, projection.fov());
        let mut textured_box = TexturedBox::new().with_material(Material::new("Crosshair"));

        let quad = textured_box.billboard(1.0, IVec2::ZERO, &projection, &camera);
        assert_eq!(quad.material.name(), "Crosshair");
    }

    #[test]
    fn billboard_follows_camera_basis() {
        let projection = Projection::new(DVec2::new(1920.0, 1080.0), std::f64::consts::FRAC_PI_2);
        let mut camera = CameraFrame::identity(1920, 1080, std::f64::consts::FRAC_PI_2);
        camera.world = DMat4::from_rotation_y(std::f64::consts::FRAC_PI_2);

        let mut textured_box = TexturedBox::new()
            .with_color(Color::rgb(255, 0, 0))
            .with_size(IVec2::new(100, 100));
        let quad = textured_box.billboard(1.0, IVec2::ZERO, &projection, &camera);

        // Rotated 90 degrees about Y the camera looks down -X.
        assert!((quad.position - DVec3::new(-0.1, 0.0, 0.0)).length() < 1e-12);
        assert!((quad.left - DVec3::new(0.0, 0.0, 1.0)).length() < 1e-12);
        assert!((quad.up - DVec3::Y).length() < 1e-12);
        assert_eq!(quad.color, Color::rgb(255, 0, 0));
        assert!((quad.width - quad.height).abs() < 1e-15);
        assert!((quad.width - 100.0 / 1080.0 * projection.fov_scale()).abs() < 1e-12);
    }

    #[test]
    fn quarter_scale_halves_billboard_size() {
        let projection = Projection::default();
        let camera = CameraFrame::identity(1920, 1080, projection.fov());
        let mut textured_box = TexturedBox::new().with_size(IVec2::new(100, 100));

        let full = textured_box.billboard(1.0, IVec2::ZERO, &projection, &camera).width;
        let quarter = textured_box.billboard(0.25, IVec2::ZERO, &projection, &camera).width;
        assert!((full / 2.0 - quarter).abs() < 1e-12);
    }
}
