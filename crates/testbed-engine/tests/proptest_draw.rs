//! Property tests for pose composition and the recorder's transform stack.

use proptest::prelude::*;
use testbed_engine::prelude::*;

const TOL: f64 = 1e-9;

fn coord() -> impl Strategy<Value = f64> {
    (-100_000i32..100_000i32).prop_map(|v| f64::from(v) * 0.001)
}

fn point() -> impl Strategy<Value = Point2> {
    (coord(), coord()).prop_map(|(x, y)| Point2::new(x, y))
}

fn pose() -> impl Strategy<Value = Pose> {
    (point(), -3_141i32..3_141).prop_map(|(t, a)| Pose::new(t, f64::from(a) * 0.001))
}

/// Local endpoint of the single segment a test records.
fn recorded_segment_end(recorder: &CommandRecorder) -> Point2 {
    match recorder.commands().last() {
        Some(DrawCommand::Segment { b, .. }) => *b,
        other => panic!("expected a segment, got {other:?}"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1_000))]

    #[test]
    fn compose_matches_nested_apply(a in pose(), b in pose(), p in point()) {
        let composed = a.compose(&b).apply(p);
        let nested = a.apply(b.apply(p));
        prop_assert!(composed.approx_eq(nested, TOL), "{composed:?} != {nested:?}");
    }

    #[test]
    fn compose_is_associative(a in pose(), b in pose(), c in pose(), p in point()) {
        let left = a.compose(&b).compose(&c).apply(p);
        let right = a.compose(&b.compose(&c)).apply(p);
        prop_assert!(left.approx_eq(right, TOL), "{left:?} != {right:?}");
    }

    #[test]
    fn pushed_stack_maps_like_nested_poses(
        poses in prop::collection::vec(pose(), 0..6),
        p in point(),
    ) {
        let mut recorder = CommandRecorder::new(CameraState::default());
        for pose in &poses {
            recorder.push_transform(*pose);
        }
        prop_assert_eq!(recorder.depth(), poses.len());

        recorder.draw_segment(Point2::ZERO, p, Color::JOINT);
        let expected = poses.iter().rev().fold(p, |acc, pose| pose.apply(acc));
        let got = recorded_segment_end(&recorder);
        prop_assert!(got.approx_eq(expected, TOL), "{got:?} != {expected:?}");
    }

    #[test]
    fn balanced_pops_return_to_world_space(
        poses in prop::collection::vec(pose(), 0..6),
        extra_pops in 0usize..3,
        p in point(),
    ) {
        let mut recorder = CommandRecorder::new(CameraState::default());
        for pose in &poses {
            recorder.push_transform(*pose);
        }
        for _ in 0..poses.len() + extra_pops {
            recorder.pop_transform();
        }
        prop_assert_eq!(recorder.depth(), 0);

        recorder.draw_segment(Point2::ZERO, p, Color::JOINT);
        prop_assert_eq!(recorded_segment_end(&recorder), p);
    }
}
