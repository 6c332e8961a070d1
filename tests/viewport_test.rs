//! Randomized checks of the cursor-anchored zoom

use modsim::viewport::DEFAULT_BASE_SCALE;
use modsim::{zoom, ViewportBounds, ZoomDirection};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use test_utils::assert_close;

fn random_bounds(rng: &mut StdRng) -> ViewportBounds {
    let x_min = rng.random_range(-1e3..1e3);
    let y_min = rng.random_range(-1e3..1e3);
    ViewportBounds::new(
        (x_min, x_min + rng.random_range(1e-2..1e3)),
        (y_min, y_min + rng.random_range(1e-2..1e3)),
    )
}

fn random_cursor(rng: &mut StdRng, bounds: &ViewportBounds) -> (f64, f64) {
    (
        bounds.x.min + bounds.x.span() * rng.random_range(0.0..1.0),
        bounds.y.min + bounds.y.span() * rng.random_range(0.0..1.0),
    )
}

#[test]
fn test_cursor_keeps_relative_position() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..1000 {
        let bounds = random_bounds(&mut rng);
        let cursor = random_cursor(&mut rng, &bounds);
        let direction = if rng.random_bool(0.5) { ZoomDirection::In } else { ZoomDirection::Out };
        let base_scale = rng.random_range(1.01..3.0);

        let zoomed = zoom(&bounds, cursor, direction, base_scale).unwrap();

        let before = bounds.relative_position(cursor);
        let after = zoomed.relative_position(cursor);
        assert_close(after.0, before.0, 1e-9);
        assert_close(after.1, before.1, 1e-9);

        let factor = direction.scale_factor(base_scale);
        assert_close(zoomed.x.span() / bounds.x.span(), factor, 1e-9);
        assert_close(zoomed.y.span() / bounds.y.span(), factor, 1e-9);
    }
}

#[test]
fn test_in_then_out_restores_bounds() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..500 {
        let bounds = random_bounds(&mut rng);
        let cursor = random_cursor(&mut rng, &bounds);
        let ticks = rng.random_range(1..8);

        let mut view = bounds;
        for _ in 0..ticks {
            view = zoom(&view, cursor, ZoomDirection::In, DEFAULT_BASE_SCALE).unwrap();
        }
        for _ in 0..ticks {
            view = zoom(&view, cursor, ZoomDirection::Out, DEFAULT_BASE_SCALE).unwrap();
        }

        let tolerance = 1e-9 * (1.0 + bounds.x.min.abs().max(bounds.x.max.abs()));
        assert_close(view.x.min, bounds.x.min, tolerance);
        assert_close(view.x.max, bounds.x.max, tolerance);
        let tolerance = 1e-9 * (1.0 + bounds.y.min.abs().max(bounds.y.max.abs()));
        assert_close(view.y.min, bounds.y.min, tolerance);
        assert_close(view.y.max, bounds.y.max, tolerance);
    }
}

#[test]
fn test_zoom_in_at_midpoint_of_ten_by_ten() {
    let bounds = ViewportBounds::new((0.0, 10.0), (0.0, 10.0));
    let zoomed = zoom(&bounds, (5.0, 5.0), ZoomDirection::In, 1.1).unwrap();

    let width = 10.0 / 1.1;
    assert_close(zoomed.x.min, 5.0 - width / 2.0, 1e-12);
    assert_close(zoomed.x.max, 5.0 + width / 2.0, 1e-12);
    assert_close(zoomed.y.min, 5.0 - width / 2.0, 1e-12);
    assert_close(zoomed.y.max, 5.0 + width / 2.0, 1e-12);
    assert_close(zoomed.x.span(), 9.0909, 1e-4);
}

#[test]
fn test_deep_zoom_is_not_clamped() {
    let mut view = ViewportBounds::new((0.0, 1.0), (0.0, 1.0));
    for _ in 0..200 {
        view = zoom(&view, (0.25, 0.75), ZoomDirection::In, DEFAULT_BASE_SCALE).unwrap();
    }
    // 1.1^-200 ≈ 5e-9
    assert!(view.x.span() < 1e-8);
    assert!(view.x.min < 0.25 && view.x.max > 0.25);
}
