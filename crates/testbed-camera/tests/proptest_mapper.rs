//! Property tests for the coordinate mapper.
//!
//! Random valid cameras and points are pushed through the conversion chain
//! in both directions; every round trip must come back to where it started.

use proptest::prelude::*;
use testbed_camera::prelude::*;

/// Relative tolerance for world-space round trips.
const TOL: f64 = 1e-9;

/// Tolerance for detours through world space with roll, where a rotation
/// and its inverse are applied on top of the direct conversion.
const ROUTE_TOL: f64 = 1e-7;

/// Finite coordinates in a range typical for a testbed scene.
fn coord() -> impl Strategy<Value = f64> {
    (-1_000_000i32..1_000_000i32).prop_map(|v| f64::from(v) * 0.001)
}

fn point() -> impl Strategy<Value = Point2> {
    (coord(), coord()).prop_map(|(x, y)| Point2::new(x, y))
}

/// Valid camera: positive extent, zoom and viewport, optional roll.
fn camera(with_roll: bool) -> impl Strategy<Value = CameraState> {
    (
        point(),
        50u32..10_000,
        50u32..20_000,
        64u32..4_000,
        64u32..4_000,
        -3_141i32..3_141,
    )
        .prop_map(move |(center, extent, zoom, width, height, roll)| {
            let config = CameraConfig {
                center: center * 0.1,
                extent: f64::from(extent) * 0.01,
                zoom: f64::from(zoom) * 0.001,
                width: f64::from(width),
                height: f64::from(height),
                roll: if with_roll { f64::from(roll) * 0.001 } else { 0.0 },
            };
            CameraState::from_config(&config).expect("strategy only yields valid cameras")
        })
}

/// Pixel points on or near the surface.
fn element_point() -> impl Strategy<Value = Point2> {
    (-2_000i32..6_000, -2_000i32..6_000)
        .prop_map(|(x, y)| Point2::new(f64::from(x) * 0.5, f64::from(y) * 0.5))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    #[test]
    fn world_round_trip(cam in camera(false), w in point()) {
        let back = cam.element_to_world(cam.world_to_element(w));
        prop_assert!(back.approx_eq(w, TOL), "{w:?} came back as {back:?}");
    }

    #[test]
    fn element_round_trip(cam in camera(false), e in element_point()) {
        let back = cam.world_to_element(cam.element_to_world(e));
        prop_assert!(back.approx_eq(e, TOL), "{e:?} came back as {back:?}");
    }

    #[test]
    fn rolled_world_round_trip(cam in camera(true), w in point()) {
        let back = cam.element_to_world(cam.world_to_element(w));
        prop_assert!(back.approx_eq(w, TOL), "{w:?} came back as {back:?}");
    }

    #[test]
    fn viewport_flip_round_trip_is_exact(cam in camera(false), e in element_point()) {
        // Half-pixel inputs and integer viewports keep every value exact.
        let v = cam.element_to_viewport(e);
        prop_assert_eq!(cam.viewport_to_element(v), e);
        prop_assert_eq!(cam.element_to_viewport(cam.viewport_to_element(v)), v);
    }

    #[test]
    fn center_only_translates(cam in camera(false), w in point(), shift in point()) {
        let mut moved = cam;
        moved.set_center(cam.center() + shift).unwrap();
        prop_assert_eq!(moved.world_to_projection(w), w - moved.center());
        let delta = cam.world_to_projection(w) - moved.world_to_projection(w);
        prop_assert!(delta.approx_eq(shift, TOL), "delta {delta:?} vs shift {shift:?}");
    }

    #[test]
    fn zoom_scaling_law(cam in camera(false), v in point(), k in 1u32..100) {
        let k = f64::from(k) * 0.25;
        let mut zoomed = cam;
        zoomed.set_zoom(cam.zoom() * k).unwrap();

        let p = cam.viewport_to_projection(v);
        prop_assert!(zoomed.viewport_to_projection(v).approx_eq(p * k, TOL));

        let back = cam.projection_to_viewport(v);
        prop_assert!(zoomed.projection_to_viewport(v).approx_eq(back * (1.0 / k), TOL));
    }

    #[test]
    fn convert_agrees_with_chain_walk(cam in camera(true), p in point()) {
        for from in Space::ALL {
            for to in Space::ALL {
                let direct = cam.convert(from, to, p);
                let via_world = cam.convert(Space::World, to, cam.convert(from, Space::World, p));
                prop_assert!(
                    direct.approx_eq(via_world, ROUTE_TOL),
                    "{from:?}->{to:?}: {direct:?} vs {via_world:?}"
                );
            }
        }
    }
}
