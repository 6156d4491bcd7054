//! Property tests for pixel/scaled conversions
//!
//! Conversions truncate to whole pixels, so round trips may lose at most one
//! pixel per axis.

use glam::{DVec2, IVec2};
use hudkit_overlay::Projection;
use proptest::prelude::*;

fn viewport() -> impl Strategy<Value = DVec2> {
    (320u32..=7680, 240u32..=4320).prop_map(|(w, h)| DVec2::new(f64::from(w), f64::from(h)))
}

proptest! {
    /// Property: Positions survive a round trip through scaled space
    #[test]
    fn position_roundtrips(
        viewport in viewport(),
        x in -4000i32..=4000,
        y in -4000i32..=4000,
    ) {
        let projection = Projection::new(viewport, 1.0);
        let pixel = IVec2::new(x, y);

        let back = projection.scaled_to_pixel(projection.pixel_to_scaled(pixel));
        prop_assert!((back - pixel).abs().max_element() <= 1, "{pixel} -> {back}");
    }

    /// Property: Sizes survive a round trip for any positive scale
    #[test]
    fn size_roundtrips(
        viewport in viewport(),
        w in 0i32..=4000,
        h in 0i32..=4000,
        scale in 0.01f64..8.0,
    ) {
        let projection = Projection::new(viewport, 1.0);
        let size = IVec2::new(w, h);

        let scaled = projection.pixel_size_to_scaled_size(size, scale);
        let back = projection.scaled_size_to_pixel_size(scaled, scale);
        prop_assert!((back - size).abs().max_element() <= 1, "{size} -> {back}");
    }

    /// Property: Screen center is the origin in both spaces
    #[test]
    fn center_maps_to_origin(viewport in viewport()) {
        let projection = Projection::new(viewport, 1.0);
        prop_assert_eq!(projection.pixel_to_scaled(IVec2::ZERO), DVec2::ZERO);
        prop_assert_eq!(projection.scaled_to_pixel(DVec2::ZERO), IVec2::ZERO);
    }

    /// Property: Billboards stay at the fixed depth in front of an unrotated camera
    #[test]
    fn billboard_depth_is_constant(
        x in -1.0f64..1.0,
        y in -1.0f64..1.0,
        fov in 0.2f64..2.5,
    ) {
        let projection = Projection::new(DVec2::new(1920.0, 1080.0), fov);
        let position = projection.billboard_position(DVec2::new(x, y), &glam::DMat4::IDENTITY);
        prop_assert!((position.z + 0.1).abs() < 1e-12);
        prop_assert!(position.y.abs() <= projection.fov_scale() + 1e-12);
    }
}
