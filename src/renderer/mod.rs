//! Rendering module
//!
//! Renderers only ever see a [`GameSnapshot`]; they cannot reach back into
//! the simulation.

pub mod text;

pub use text::TextRenderer;

use crate::sim::state::GameSnapshot;

/// Draws one frame from a snapshot
pub trait Renderer {
    fn render(&mut self, snapshot: &GameSnapshot);
}
