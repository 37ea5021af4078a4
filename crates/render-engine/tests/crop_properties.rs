use image::{DynamicImage, Rgba, RgbaImage};
use proptest::prelude::*;
use varta_clipping_model::Point2D;
use varta_render_engine::crop::{MAX_ZOOM, MIN_ZOOM};
use varta_render_engine::{CropConfig, CropPhase, CropTool};

fn tool(w: u32, h: u32) -> CropTool {
    let img = RgbaImage::from_pixel(w, h, Rgba([90, 120, 30, 255]));
    CropTool::with_image(CropConfig::default(), &DynamicImage::ImageRgba8(img))
}

proptest! {
    #[test]
    fn zoom_always_within_range(z in proptest::num::f64::ANY) {
        let mut t = tool(20, 20);
        let zoom = t.set_zoom(z);
        prop_assert!((MIN_ZOOM..=MAX_ZOOM).contains(&zoom));
    }

    #[test]
    fn drag_delta_is_exact(
        x0 in 0.0f64..400.0, y0 in 0.0f64..400.0,
        dx in -500.0f64..500.0, dy in -500.0f64..500.0,
    ) {
        let mut t = tool(30, 50);
        let before = t.state().pan;
        prop_assert!(t.pointer_down(Point2D::new(x0, y0)));
        t.pointer_move(Point2D::new(x0 + dx, y0 + dy));
        t.pointer_up();
        let after = t.state().pan;
        prop_assert!((after.x - before.x - dx).abs() < 1e-9);
        prop_assert!((after.y - before.y - dy).abs() < 1e-9);
        prop_assert_eq!(t.phase(), CropPhase::Idle);
    }

    #[test]
    fn commit_size_ignores_source_aspect(
        w in 1u32..120, h in 1u32..120,
        zoom in 1.0f64..3.0,
        dx in -200.0f64..200.0, dy in -200.0f64..200.0,
    ) {
        let mut t = tool(w, h);
        t.set_zoom(zoom);
        t.drag_by(Point2D::new(dx, dy));
        let out = t.commit().unwrap();
        prop_assert_eq!(out.dimensions(), (300, 300));
        prop_assert!(out.pixels().all(|p| p[3] == 255));
    }
}
