//! Pixel space <-> scaled space conversions.
//!
//! Pixel space is integer pixels measured from the center of the screen, +Y up.
//! Scaled space is the host's normalized device space: the screen spans `-1..1`
//! on both axes regardless of resolution. Sizes use a separate scaled unit tied
//! to the viewport height so boxes and text agree on what "one unit" means.

use glam::{DMat4, DVec2, DVec3, IVec2};

/// Viewport height the layout constants are authored against.
pub const REFERENCE_HEIGHT: f64 = 1080.0;

/// Pixels per scaled size unit at `scale == 1`, relative to the viewport height.
pub const SIZE_UNITS_PER_HEIGHT: f64 = 16.0;

/// Distance in front of the camera at which HUD billboards are placed.
pub const BILLBOARD_DEPTH: f64 = 0.1;

/// Projection constants shared by every element during one frame.
///
/// Written once per frame by the frame driver, read by all elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    viewport: DVec2,
    aspect_ratio: f64,
    res_scale: f64,
    fov: f64,
    fov_scale: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(DVec2::new(1920.0, 1080.0), std::f64::consts::FRAC_PI_3)
    }
}

impl Projection {
    /// Build projection constants for a viewport (pixels) and vertical fov (radians).
    pub fn new(viewport: DVec2, fov: f64) -> Self {
        let mut projection = Self {
            viewport,
            aspect_ratio: 0.0,
            res_scale: 0.0,
            fov,
            fov_scale: fov_scale(fov),
        };
        projection.update_viewport(viewport);
        projection
    }

    /// Refresh from this frame's camera sample.
    ///
    /// The fov scale is only recomputed when the fov actually changed. Returns
    /// `true` in that case.
    pub fn refresh(&mut self, viewport: DVec2, fov: f64) -> bool {
        self.update_viewport(viewport);

        if fov != self.fov {
            self.fov = fov;
            self.fov_scale = fov_scale(fov);
            true
        } else {
            false
        }
    }

    fn update_viewport(&mut self, viewport: DVec2) {
        self.viewport = viewport;
        self.aspect_ratio = viewport.x / viewport.y;
        self.res_scale = REFERENCE_HEIGHT / viewport.y;
    }

    /// Viewport size in pixels.
    pub fn viewport(&self) -> DVec2 {
        self.viewport
    }

    /// Viewport width / height.
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Resolution-normalization factor, `1080 / height`.
    pub fn res_scale(&self) -> f64 {
        self.res_scale
    }

    /// Field of view in radians.
    pub fn fov(&self) -> f64 {
        self.fov
    }

    /// `0.1 * tan(fov / 2)`: half-height of the view frustum at billboard depth.
    pub fn fov_scale(&self) -> f64 {
        self.fov_scale
    }

    /// Whether conversions are meaningful (non-empty viewport).
    pub fn is_valid(&self) -> bool {
        self.viewport.x > 0.0 && self.viewport.y > 0.0
    }

    /// Convert a pixel position to the scaled coordinate system.
    pub fn pixel_to_scaled(&self, pixel_pos: IVec2) -> DVec2 {
        pixel_pos.as_dvec2() * 2.0 / self.viewport
    }

    /// Convert a scaled position to pixels, truncating toward zero.
    pub fn scaled_to_pixel(&self, scaled_pos: DVec2) -> IVec2 {
        let half = scaled_pos / 2.0;
        IVec2::new(
            (half.x * self.viewport.x) as i32,
            (half.y * self.viewport.y) as i32,
        )
    }

    /// Convert a pixel size to the scaled size unit used by billboards.
    pub fn pixel_size_to_scaled_size(&self, pixel_size: IVec2, scale: f64) -> DVec2 {
        pixel_size.as_dvec2() * (scale.sqrt() / self.viewport.y / SIZE_UNITS_PER_HEIGHT)
    }

    /// Convert a scaled size back to pixels, truncating toward zero.
    pub fn scaled_size_to_pixel_size(&self, scaled_size: DVec2, scale: f64) -> IVec2 {
        let factor = self.viewport.y * SIZE_UNITS_PER_HEIGHT / scale.sqrt();
        IVec2::new(
            (scaled_size.x * factor) as i32,
            (scaled_size.y * factor) as i32,
        )
    }

    /// Project a scaled position onto the plane just in front of the camera.
    pub fn billboard_position(&self, scaled_pos: DVec2, camera_world: &DMat4) -> DVec3 {
        let local = DVec3::new(
            scaled_pos.x * self.fov_scale * self.aspect_ratio,
            scaled_pos.y * self.fov_scale,
            -BILLBOARD_DEPTH,
        );
        camera_world.transform_point3(local)
    }

    /// World-space width/height of a billboard with the given scaled size.
    pub fn billboard_size(&self, scaled_size: DVec2) -> DVec2 {
        scaled_size * self.fov_scale * SIZE_UNITS_PER_HEIGHT
    }
}

fn fov_scale(fov: f64) -> f64 {
    BILLBOARD_DEPTH * (fov / 2.0).tan()
}

/// Round each component to `digits` decimal places.
pub fn round_scaled(value: DVec2, digits: i32) -> DVec2 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hd() -> Projection {
        Projection::new(DVec2::new(1920.0, 1080.0), std::f64::consts::FRAC_PI_2)
    }

    #[test]
    fn derived_constants() {
        let projection = Projection::new(DVec2::new(1280.0, 720.0), 1.0);
        assert!((projection.aspect_ratio() - 16.0 / 9.0).abs() < 1e-12);
        assert!((projection.res_scale() - 1.5).abs() < 1e-12);
        assert!((projection.fov_scale() - 0.1 * 0.5f64.tan()).abs() < 1e-12);
    }

    #[test]
    fn screen_edges_map_to_unit_square() {
        let projection = hd();
        assert_eq!(projection.pixel_to_scaled(IVec2::new(960, 540)), DVec2::ONE);
        assert_eq!(projection.pixel_to_scaled(IVec2::new(-960, 0)), DVec2::new(-1.0, 0.0));
        assert_eq!(projection.scaled_to_pixel(DVec2::new(1.0, -1.0)), IVec2::new(960, -540));
    }

    #[test]
    fn extreme_pixels_convert_without_overflow() {
        let projection = hd();
        let scaled = projection.pixel_to_scaled(IVec2::new(i32::MAX, i32::MIN));
        assert!((scaled.x - 2.0 * f64::from(i32::MAX) / 1920.0).abs() < 1e-6);
        assert!((scaled.y - 2.0 * f64::from(i32::MIN) / 1080.0).abs() < 1e-6);
        assert_eq!(
            projection.scaled_to_pixel(DVec2::new(1.0e12, -1.0e12)),
            IVec2::new(i32::MAX, i32::MIN)
        );
    }

    #[test]
    fn scaled_to_pixel_truncates_toward_zero() {
        let projection = hd();
        let scaled = DVec2::new(-3.9 * 2.0 / 1920.0, 3.9 * 2.0 / 1080.0);
        assert_eq!(projection.scaled_to_pixel(scaled), IVec2::new(-3, 3));
    }

    #[test]
    fn size_conversion_uses_sqrt_scale() {
        let projection = hd();
        let scaled = projection.pixel_size_to_scaled_size(IVec2::new(100, 100), 0.25);
        let expected = 100.0 * 0.5 / 1080.0 / 16.0;
        assert!((scaled.x - expected).abs() < 1e-15);
        let back = projection.scaled_size_to_pixel_size(scaled, 0.25);
        assert!((back - IVec2::new(100, 100)).abs().max_element() <= 1);
    }

    #[test]
    fn refresh_only_recomputes_on_fov_change() {
        let mut projection = hd();
        assert!(!projection.refresh(DVec2::new(2560.0, 1440.0), std::f64::consts::FRAC_PI_2));
        assert!((projection.res_scale() - 0.75).abs() < 1e-12);
        assert!(projection.refresh(DVec2::new(2560.0, 1440.0), 1.0));
        assert!((projection.fov_scale() - 0.1 * 0.5f64.tan()).abs() < 1e-12);
    }

    #[test]
    fn billboard_center_sits_in_front_of_camera() {
        let projection = hd();
        let position = projection.billboard_position(DVec2::ZERO, &DMat4::IDENTITY);
        assert_eq!(position, DVec3::new(0.0, 0.0, -0.1));

        let translated = DMat4::from_translation(DVec3::new(5.0, 1.0, 0.0));
        let position = projection.billboard_position(DVec2::ZERO, &translated);
        assert!((position - DVec3::new(5.0, 1.0, -0.1)).length() < 1e-12);
    }

    #[test]
    fn billboard_top_right_matches_frustum_corner() {
        // With a 90 degree fov the frustum half-height at depth 0.1 is 0.1.
        let projection = hd();
        let corner = projection.billboard_position(DVec2::ONE, &DMat4::IDENTITY);
        assert!((corner.y - 0.1).abs() < 1e-12);
        assert!((corner.x - 0.1 * 16.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn full_height_box_spans_frustum() {
        let projection = hd();
        let scaled = projection.pixel_size_to_scaled_size(IVec2::new(0, 1080), 1.0);
        let size = projection.billboard_size(scaled);
        // Host quads take half extents, so a full-height box reaches the frustum edge.
        assert!((size.y - projection.fov_scale()).abs() < 1e-12);
    }

    #[test]
    fn rounding_to_three_digits() {
        let rounded = round_scaled(DVec2::new(0.123_456, -0.987_65), 3);
        assert!((rounded.x - 0.123).abs() < 1e-12);
        assert!((rounded.y + 0.988).abs() < 1e-12);
    }
}
