//! Host state for one testbed session, independent of any window.
//!
//! A [`Testbed`] owns the physics world, the camera controller and the
//! fixed-step clock. The windowed runner forwards input to it and asks it
//! for a frame's draw commands; tests drive it the same way without a GPU.

use std::time::Duration;

use testbed_camera::camera::CameraState;
use testbed_camera::controller::CameraController;
use testbed_camera::point::Point2;

use crate::config::TestbedConfig;
use crate::physics::{BodyId, CollisionPair, PhysicsWorld};
use crate::render::draw::{Color, DebugDraw, DrawFlags};
use crate::render::geometry::TEXT_CELL_PX;
use crate::render::recorder::{CommandRecorder, DrawCommand};
use crate::render::text::LINE_ADVANCE;
use crate::tick::FixedStepper;
use crate::ConfigError;

/// Left margin and first baseline of the HUD, in pixels.
const HUD_ORIGIN: Point2 = Point2::new(8.0, 8.0);

/// Physics, camera and clock for one session.
pub struct Testbed {
    physics: PhysicsWorld,
    controller: CameraController,
    stepper: FixedStepper,
    flags: DrawFlags,
    selected: Option<BodyId>,
    last_collisions: Vec<CollisionPair>,
}

impl Testbed {
    /// Build a session from validated configuration and a populated world.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration does not validate.
    pub fn new(config: &TestbedConfig, physics: PhysicsWorld) -> Result<Self, ConfigError> {
        config.validate()?;
        let controller = CameraController::new(config.camera_state()?, config.controller)?;
        let stepper = FixedStepper::new(config.physics.step)?;
        tracing::info!(
            bodies = physics.body_count(),
            joints = physics.joint_count(),
            hz = config.physics.step.hz,
            "testbed session created"
        );
        Ok(Self {
            physics,
            controller,
            stepper,
            flags: config.draw,
            selected: None,
            last_collisions: Vec::new(),
        })
    }

    /// Feed a frame's wall time; runs the owed physics steps and returns
    /// how many ran.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let steps = self.stepper.advance(elapsed);
        let dt = self.stepper.fixed_dt();
        if steps > 0 {
            self.last_collisions.clear();
        }
        for _ in 0..steps {
            let collisions = self.physics.step(dt);
            self.last_collisions.extend(collisions);
        }
        if self.selected.is_some_and(|id| !self.physics.has_body(id)) {
            self.selected = None;
        }
        steps
    }

    /// Record the world and the HUD for the current camera.
    pub fn record_frame(&self) -> Vec<DrawCommand> {
        let mut recorder = CommandRecorder::new(self.controller.snapshot());
        self.physics
            .debug_draw(&mut recorder, &self.flags, self.selected);
        let line_height = LINE_ADVANCE as f64 * TEXT_CELL_PX;
        for (i, line) in self.hud_lines().iter().enumerate() {
            recorder.draw_string(
                HUD_ORIGIN.x,
                HUD_ORIGIN.y + i as f64 * line_height,
                line,
                Color::TEXT,
            );
        }
        recorder.take_commands()
    }

    /// Status text shown in the corner of the window.
    pub fn hud_lines(&self) -> Vec<String> {
        let camera = self.controller.camera();
        let mut lines = vec![
            format!(
                "step {}  t {:.2}s{}",
                self.stepper.step_count(),
                self.stepper.sim_time(),
                if self.stepper.is_paused() { "  paused" } else { "" }
            ),
            format!(
                "bodies {}  joints {}  contacts {}",
                self.physics.body_count(),
                self.physics.joint_count(),
                self.last_collisions.len()
            ),
            format!(
                "zoom {:.3}  center ({:.2}, {:.2})",
                camera.zoom(),
                camera.center().x,
                camera.center().y
            ),
        ];
        if let Some(id) = self.selected {
            lines.push(format!("selected {id}"));
        }
        lines
    }

    /// Select the body under an element-space pixel, or clear the selection.
    pub fn pick(&mut self, screen: Point2) -> Option<BodyId> {
        let world = self.controller.camera().screen_to_world(screen);
        self.selected = self.physics.body_at_point(world);
        tracing::debug!(
            x = world.x,
            y = world.y,
            picked = ?self.selected,
            "pick"
        );
        self.selected
    }

    /// Pause or resume the clock.
    pub fn toggle_pause(&mut self) {
        self.stepper.toggle_pause();
    }

    /// Pause and run exactly one step on the next [`advance`](Self::advance).
    pub fn single_step(&mut self) {
        self.stepper.request_single_step();
    }

    // -- accessors ----------------------------------------------------------

    /// The physics world.
    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    /// Mutable access to the physics world, e.g. to add bodies mid-session.
    pub fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics
    }

    /// The camera controller.
    pub fn controller(&self) -> &CameraController {
        &self.controller
    }

    /// Mutable access to the camera controller, for input handlers.
    pub fn controller_mut(&mut self) -> &mut CameraController {
        &mut self.controller
    }

    /// Copy of the current camera.
    pub fn camera(&self) -> CameraState {
        self.controller.snapshot()
    }

    /// The fixed-step clock.
    pub fn stepper(&self) -> &FixedStepper {
        &self.stepper
    }

    /// Draw layers.
    pub fn flags(&self) -> &DrawFlags {
        &self.flags
    }

    /// Mutable draw layers, for toggling at runtime.
    pub fn flags_mut(&mut self) -> &mut DrawFlags {
        &mut self.flags
    }

    /// The picked body, if any.
    pub fn selected(&self) -> Option<BodyId> {
        self.selected
    }

    /// Collisions that started during the last frame that stepped.
    pub fn last_collisions(&self) -> &[CollisionPair] {
        &self.last_collisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{BodyDesc, ColliderShape};

    fn testbed_with_ball() -> (Testbed, BodyId) {
        let config = TestbedConfig::default();
        let mut physics = PhysicsWorld::new_zero_gravity();
        let ball = physics
            .add_body(&BodyDesc::dynamic(
                ColliderShape::Circle { radius: 1.0 },
                Point2::new(0.0, 20.0),
            ))
            .unwrap();
        (Testbed::new(&config, physics).unwrap(), ball)
    }

    #[test]
    fn advance_steps_physics() {
        let (mut tb, _) = testbed_with_ball();
        assert_eq!(tb.advance(Duration::from_millis(40)), 2);
        assert_eq!(tb.stepper().step_count(), 2);
    }

    #[test]
    fn pick_selects_and_clears() {
        let (mut tb, ball) = testbed_with_ball();
        assert_eq!(tb.pick(Point2::new(640.0, 400.0)), Some(ball));
        assert_eq!(tb.selected(), Some(ball));
        assert_eq!(tb.pick(Point2::new(10.0, 10.0)), None);
        assert_eq!(tb.selected(), None);
    }

    #[test]
    fn selection_dropped_when_body_removed() {
        let (mut tb, ball) = testbed_with_ball();
        tb.pick(Point2::new(640.0, 400.0));
        tb.physics_mut().remove_body(ball);
        tb.advance(Duration::ZERO);
        assert_eq!(tb.selected(), None);
    }

    #[test]
    fn hud_reports_pause_and_selection() {
        let (mut tb, _) = testbed_with_ball();
        tb.toggle_pause();
        tb.pick(Point2::new(640.0, 400.0));
        let hud = tb.hud_lines();
        assert!(hud[0].contains("paused"), "{hud:?}");
        assert!(hud[1].starts_with("bodies 1"), "{hud:?}");
        assert!(hud[2].starts_with("zoom 1.000"), "{hud:?}");
        assert_eq!(hud.last().map(String::as_str), Some("selected b0"));
    }

    #[test]
    fn record_frame_contains_world_and_hud() {
        let (tb, _) = testbed_with_ball();
        let commands = tb.record_frame();
        assert!(commands
            .iter()
            .any(|c| matches!(c, DrawCommand::SolidCircle { radius, .. } if *radius == 1.0)));
        let texts = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
            .count();
        assert_eq!(texts, tb.hud_lines().len());
    }
}
