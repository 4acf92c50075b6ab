//! Windowed application runner for the testbed.
//!
//! Provides [`run_windowed`], which takes a configuration and a populated
//! physics world and drives them inside a winit event loop. Each
//! `RedrawRequested` event advances the fixed-step clock by the wall time
//! since the last frame, records the world through the debug-draw seam and
//! renders it.
//!
//! # Controls
//!
//! | Input | Action |
//! |-------|--------|
//! | Right drag | Pan |
//! | Wheel | Zoom at the cursor |
//! | Left click | Select the body under the cursor |
//! | Arrows | Pan one step |
//! | `=` / `-` | Zoom in / out about the centre |
//! | `P` | Pause / resume |
//! | `Space` | Single step (pauses) |
//! | `R` | Reset the camera |
//! | `A` `C` `J` `M` `L` | Toggle AABBs, contacts, joints, centres of mass, labels |
//! | `Esc` | Quit |
//!
//! This module is feature-gated behind `renderer`.

use std::sync::Arc;
use std::time::Instant;

use testbed_camera::point::Point2;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{WindowAttributes, WindowId};

use super::renderer::DebugRenderer;
use crate::config::TestbedConfig;
use crate::physics::PhysicsWorld;
use crate::testbed::Testbed;

/// Trackpad pixels that count as one wheel notch.
const PIXELS_PER_NOTCH: f64 = 40.0;

/// Run the testbed in a window. Blocks until the window is closed.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the event loop cannot
/// be created, or the window or renderer fail to initialize.
pub fn run_windowed(config: TestbedConfig, physics: PhysicsWorld) -> Result<(), anyhow::Error> {
    let testbed = Testbed::new(&config, physics)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(winit::event_loop::ControlFlow::Poll);

    let mut app = App {
        state: AppState::Pending {
            testbed,
            title: config.window.title.clone(),
            width: config.window.width,
            height: config.window.height,
        },
        init_failed: false,
    };

    event_loop.run_app(&mut app)?;

    if app.init_failed {
        return Err(anyhow::anyhow!(
            "failed to initialize windowed renderer (see logs for details)"
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Internal state machine
// ---------------------------------------------------------------------------

/// Winit 0.30 creates windows inside `resumed`, so the app starts `Pending`
/// and becomes `Running` once the window and renderer exist.
enum AppState {
    Pending {
        testbed: Testbed,
        title: String,
        width: u32,
        height: u32,
    },
    Running(Box<Session>),
    /// Placeholder while moving out of `Pending`.
    Transitioning,
}

/// Everything alive while the window is open.
struct Session {
    testbed: Testbed,
    renderer: DebugRenderer,
    cursor: Point2,
    last_frame: Instant,
}

struct App {
    state: AppState,
    init_failed: bool,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let state = std::mem::replace(&mut self.state, AppState::Transitioning);
        let AppState::Pending {
            testbed,
            title,
            width,
            height,
        } = state
        else {
            // Already running (e.g. resumed after suspend); put state back.
            self.state = state;
            return;
        };

        let window_attrs = WindowAttributes::default()
            .with_title(title)
            .with_inner_size(winit::dpi::PhysicalSize::new(width, height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!(error = %e, "failed to create window -- exiting");
                self.init_failed = true;
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(DebugRenderer::new(window.clone())) {
            Ok(renderer) => {
                tracing::info!(width, height, "testbed window created");
                window.request_redraw();
                self.state = AppState::Running(Box::new(Session {
                    testbed,
                    renderer,
                    cursor: Point2::ZERO,
                    last_frame: Instant::now(),
                }));
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to initialize debug renderer -- exiting");
                self.init_failed = true;
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let AppState::Running(session) = &mut self.state else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!(
                    steps = session.testbed.stepper().step_count(),
                    "window close requested -- shutting down"
                );
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                session.renderer.resize(new_size);
                if new_size.width > 0 && new_size.height > 0 {
                    let resized = session
                        .testbed
                        .controller_mut()
                        .resize(f64::from(new_size.width), f64::from(new_size.height));
                    if let Err(e) = resized {
                        tracing::warn!(error = %e, "camera resize rejected");
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                session.cursor = Point2::new(position.x, position.y);
                let controller = session.testbed.controller_mut();
                if controller.is_dragging() {
                    controller.drag_update(session.cursor);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => match (button, state) {
                (MouseButton::Right, ElementState::Pressed) => {
                    session.testbed.controller_mut().drag_begin(session.cursor);
                }
                (MouseButton::Right, ElementState::Released) => {
                    session.testbed.controller_mut().drag_end();
                }
                (MouseButton::Left, ElementState::Pressed) => {
                    session.testbed.pick(session.cursor);
                }
                _ => {}
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => f64::from(y),
                    MouseScrollDelta::PixelDelta(p) => p.y / PIXELS_PER_NOTCH,
                };
                if let Err(e) = session.testbed.controller_mut().wheel(session.cursor, notches) {
                    tracing::warn!(error = %e, "wheel zoom rejected");
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if handle_key(&mut session.testbed, &event) == KeyOutcome::Quit {
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let elapsed = now - session.last_frame;
                session.last_frame = now;

                session.testbed.advance(elapsed);
                let commands = session.testbed.record_frame();
                let camera = session.testbed.camera();

                match session.renderer.render_commands(&commands, &camera) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let size = session.renderer.window().inner_size();
                        session.renderer.resize(size);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        tracing::error!("GPU out of memory -- exiting");
                        event_loop.exit();
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "surface error during render");
                    }
                }

                session.renderer.window().request_redraw();
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Keyboard
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
enum KeyOutcome {
    Continue,
    Quit,
}

fn handle_key(testbed: &mut Testbed, event: &KeyEvent) -> KeyOutcome {
    if event.state != ElementState::Pressed {
        return KeyOutcome::Continue;
    }
    let PhysicalKey::Code(code) = event.physical_key else {
        return KeyOutcome::Continue;
    };
    // Held keys repeat for panning and zooming only.
    if event.repeat
        && !matches!(
            code,
            KeyCode::ArrowLeft
                | KeyCode::ArrowRight
                | KeyCode::ArrowUp
                | KeyCode::ArrowDown
                | KeyCode::Equal
                | KeyCode::Minus
                | KeyCode::NumpadAdd
                | KeyCode::NumpadSubtract
        )
    {
        return KeyOutcome::Continue;
    }

    match code {
        KeyCode::Escape => return KeyOutcome::Quit,
        KeyCode::KeyP => testbed.toggle_pause(),
        KeyCode::Space => testbed.single_step(),
        KeyCode::KeyR => testbed.controller_mut().reset(),
        KeyCode::ArrowLeft => testbed.controller_mut().pan_steps(-1.0, 0.0),
        KeyCode::ArrowRight => testbed.controller_mut().pan_steps(1.0, 0.0),
        KeyCode::ArrowUp => testbed.controller_mut().pan_steps(0.0, 1.0),
        KeyCode::ArrowDown => testbed.controller_mut().pan_steps(0.0, -1.0),
        KeyCode::Equal | KeyCode::NumpadAdd => testbed.controller_mut().zoom_in(),
        KeyCode::Minus | KeyCode::NumpadSubtract => testbed.controller_mut().zoom_out(),
        KeyCode::KeyA => toggle(&mut testbed.flags_mut().aabbs, "aabbs"),
        KeyCode::KeyC => toggle(&mut testbed.flags_mut().contact_points, "contact_points"),
        KeyCode::KeyJ => toggle(&mut testbed.flags_mut().joints, "joints"),
        KeyCode::KeyM => toggle(&mut testbed.flags_mut().center_of_mass, "center_of_mass"),
        KeyCode::KeyL => toggle(&mut testbed.flags_mut().body_labels, "body_labels"),
        _ => {}
    }
    KeyOutcome::Continue
}

fn toggle(flag: &mut bool, name: &str) {
    *flag = !*flag;
    tracing::info!(layer = name, enabled = *flag, "draw layer toggled");
}
