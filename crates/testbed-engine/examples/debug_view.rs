//! Interactive testbed scene: a stack of boxes, a few balls, a wedge and a
//! motorised paddle wheel.
//!
//! Run with:
//!   cargo run --example debug_view --features renderer -p testbed-engine [-- config.json]
//!
//! Controls are listed in `testbed_engine::render::app`.

use testbed_engine::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => TestbedConfig::from_file(path)?,
        None => TestbedConfig::default(),
    };

    let physics = build_scene(&config)?;
    run_windowed(config, physics)
}

fn build_scene(config: &TestbedConfig) -> Result<PhysicsWorld, PhysicsError> {
    let mut physics = PhysicsWorld::new(config.physics.gravity);

    // Ground and side walls.
    physics.add_body(&BodyDesc::fixed(
        ColliderShape::Box {
            half_width: 40.0,
            half_height: 1.0,
        },
        Point2::new(0.0, -1.0),
    ))?;
    physics.add_body(&BodyDesc::fixed(
        ColliderShape::Polyline {
            points: vec![
                Point2::new(-40.0, 30.0),
                Point2::new(-40.0, 0.0),
                Point2::new(-30.0, 0.0),
            ],
        },
        Point2::ZERO,
    ))?;
    physics.add_body(&BodyDesc::fixed(
        ColliderShape::Segment {
            a: Point2::new(40.0, 0.0),
            b: Point2::new(40.0, 30.0),
        },
        Point2::ZERO,
    ))?;

    // Box pyramid.
    let rows = 6;
    for row in 0..rows {
        for col in 0..(rows - row) {
            let x = -12.0 + f64::from(col) * 1.05 + f64::from(row) * 0.525;
            let y = 0.5 + f64::from(row) * 1.0;
            physics.add_body(&BodyDesc::dynamic(
                ColliderShape::Box {
                    half_width: 0.5,
                    half_height: 0.5,
                },
                Point2::new(x, y),
            ))?;
        }
    }

    // Bouncing balls.
    for i in 0..4 {
        physics.add_body(
            &BodyDesc::dynamic(
                ColliderShape::Circle { radius: 0.6 },
                Point2::new(2.0 + f64::from(i) * 1.5, 10.0 + f64::from(i) * 2.0),
            )
            .with_restitution(0.6),
        )?;
    }

    // Wedge.
    physics.add_body(
        &BodyDesc::dynamic(
            ColliderShape::Polygon {
                points: vec![
                    Point2::new(-1.5, -1.0),
                    Point2::new(1.5, -1.0),
                    Point2::new(0.0, 1.5),
                ],
            },
            Point2::new(-4.0, 12.0),
        )
        .with_angle(0.3),
    )?;

    // Paddle wheel on a motorised hinge.
    // The hub overlaps the paddle, so it only reports contacts.
    let hub = physics.add_body(&BodyDesc {
        is_sensor: true,
        ..BodyDesc::fixed(ColliderShape::Circle { radius: 0.3 }, Point2::new(14.0, 6.0))
    })?;
    let paddle = physics.add_body(&BodyDesc::dynamic(
        ColliderShape::Box {
            half_width: 4.0,
            half_height: 0.25,
        },
        Point2::new(14.0, 6.0),
    ))?;
    physics.add_joint(&JointDesc {
        body_a: hub,
        body_b: paddle,
        kind: JointKind::Revolute {
            anchor_a: Point2::ZERO,
            anchor_b: Point2::ZERO,
            limits: None,
            motor: Some((1.5, 10.0)),
        },
    })?;

    Ok(physics)
}
