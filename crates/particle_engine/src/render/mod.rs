//! Rendering collaborator boundary
//!
//! The engine performs no rasterization. Emitters describe what to draw
//! through [`ParticleRenderer`] and the host's backend does the rest.
//!
//! ```text
//! Emitter::draw ──► begin_blend_mode ──► draw_texture × active ──► end_blend_mode
//! ```

pub mod commands;

pub use commands::{CommandRecorder, DrawCommand};

use crate::foundation::color::Color;
use crate::foundation::math::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque texture handle owned by the host
///
/// Only the dimensions matter to the engine; `id` is passed straight back to
/// the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Texture {
    /// Backend-specific identity
    pub id: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Texture {
    /// Create a texture handle
    pub const fn new(id: u32, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    /// Half the texture size, used to center particles on their position
    ///
    /// Integer halving matches how pixel-aligned sprites are centered.
    pub fn half_extent(&self) -> Vec2 {
        Vec2::new((self.width / 2) as f32, (self.height / 2) as f32)
    }
}

/// Color blending mode applied to every particle of an emitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlendMode {
    /// Standard alpha blending
    #[default]
    Alpha,
    /// Additive blending
    Additive,
    /// Multiplied colors
    Multiplied,
    /// Add colors without alpha weighting
    AddColors,
    /// Subtract colors
    SubtractColors,
}

/// Draw primitive supplied by the host
pub trait ParticleRenderer {
    /// Start a batch of draws under `mode`
    fn begin_blend_mode(&mut self, mode: BlendMode);

    /// Draw `texture` with its top-left corner at `top_left`, tinted by `tint`
    fn draw_texture(&mut self, texture: &Texture, top_left: Vec2, tint: Color);

    /// Finish the batch started by `begin_blend_mode`
    fn end_blend_mode(&mut self);
}
