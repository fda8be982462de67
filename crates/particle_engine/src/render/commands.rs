//! Recorded draw commands
//!
//! [`CommandRecorder`] implements [`ParticleRenderer`] by storing every
//! request instead of drawing it. Headless hosts use it to inspect a frame,
//! GPU backends can replay it as one batch.

use crate::foundation::color::Color;
use crate::foundation::math::Vec2;
use crate::render::{BlendMode, ParticleRenderer, Texture};

/// A single textured-quad draw request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Texture identity
    pub texture_id: u32,
    /// Top-left corner in world space
    pub top_left: Vec2,
    /// Tint color
    pub tint: Color,
    /// Blend mode in effect when the draw was requested
    pub blend_mode: BlendMode,
}

/// Renderer that records draw requests
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
    current_blend: Option<BlendMode>,
    batch_count: usize,
}

impl CommandRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Commands recorded since the last `clear`
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded draws
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of begin/end blend batches seen
    pub fn batch_count(&self) -> usize {
        self.batch_count
    }

    /// Forget all recorded commands, keeping the allocation
    pub fn clear(&mut self) {
        self.commands.clear();
        self.current_blend = None;
        self.batch_count = 0;
    }
}

impl ParticleRenderer for CommandRecorder {
    fn begin_blend_mode(&mut self, mode: BlendMode) {
        self.current_blend = Some(mode);
        self.batch_count += 1;
    }

    fn draw_texture(&mut self, texture: &Texture, top_left: Vec2, tint: Color) {
        self.commands.push(DrawCommand {
            texture_id: texture.id,
            top_left,
            tint,
            blend_mode: self.current_blend.unwrap_or_default(),
        });
    }

    fn end_blend_mode(&mut self) {
        self.current_blend = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_blend_mode_of_batch() {
        let mut recorder = CommandRecorder::new();
        let texture = Texture::new(3, 8, 8);

        recorder.begin_blend_mode(BlendMode::Additive);
        recorder.draw_texture(&texture, Vec2::new(1.0, 2.0), Color::WHITE);
        recorder.end_blend_mode();
        recorder.draw_texture(&texture, Vec2::zeros(), Color::BLACK);

        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.batch_count(), 1);
        assert_eq!(recorder.commands()[0].blend_mode, BlendMode::Additive);
        assert_eq!(recorder.commands()[0].texture_id, 3);
        assert_eq!(recorder.commands()[1].blend_mode, BlendMode::Alpha);

        recorder.clear();
        assert!(recorder.is_empty());
        assert_eq!(recorder.batch_count(), 0);
    }
}
