//! Rendering collaborators
//!
//! The simulation never draws. A driver steps the `SimState` and then hands
//! a read-only view of it to a `Renderer`.

pub mod log_renderer;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use log_renderer::LogRenderer;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::error::Result;
use crate::sim::SimState;

/// Something that can present a simulation frame
pub trait Renderer {
    fn render(&mut self, state: &SimState) -> Result<()>;
}
