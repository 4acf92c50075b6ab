//! Debug visualization: the draw seam, headless recording and GPU output.
//!
//! [`draw`], [`recorder`], [`text`] and [`geometry`] are plain CPU code and
//! always compiled, so everything up to the vertex list is testable without
//! a GPU. The wgpu [`renderer`] and the winit [`app`] runner are
//! feature-gated behind `renderer`.

pub mod draw;
pub mod geometry;
pub mod recorder;
pub mod text;

#[cfg(feature = "renderer")]
pub mod app;
#[cfg(feature = "renderer")]
pub mod renderer;

#[cfg(feature = "renderer")]
pub use renderer::DebugRenderer;
