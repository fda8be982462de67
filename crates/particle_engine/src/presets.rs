//! Ready-made effects
//!
//! Each preset returns an [`EffectConfig`] of three emitters. The view
//! bounds that retire particles are passed in explicitly; hosts usually
//! build them from their camera with [`ViewBoundsConfig::new`].

use crate::config::EffectConfig;
use crate::emitter::EmitterConfig;
use crate::foundation::color::Color;
use crate::foundation::math::Vec2;
use crate::foundation::random::FloatRange;
use crate::particle::{AnyOf, Edges, SharedPolicy, ViewBoundsConfig};
use crate::render::{BlendMode, Texture};
use std::rc::Rc;

/// Textures the presets draw with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetTextures {
    /// 8x8 soft circle
    pub small: Texture,
    /// 16x16 soft circle
    pub large: Texture,
}

impl Default for PresetTextures {
    fn default() -> Self {
        Self {
            small: Texture::new(1, 8, 8),
            large: Texture::new(2, 16, 16),
        }
    }
}

/// Falling particles leave through the bottom or the sides
fn falling_policy(view: ViewBoundsConfig) -> SharedPolicy {
    Rc::new(AnyOf::view_or_age(
        view.with_edges(Edges::BOTTOM | Edges::LEFT | Edges::RIGHT),
    ))
}

/// Rising particles leave through the top
fn rising_policy(view: ViewBoundsConfig) -> SharedPolicy {
    Rc::new(AnyOf::view_or_age(view.with_edges(Edges::TOP)))
}

/// Blue water jet pulled down by gravity
pub fn fountain(textures: PresetTextures, view: ViewBoundsConfig) -> EffectConfig {
    let base = EmitterConfig::default()
        .with_capacity(600)
        .with_emission_rate(200.0)
        .with_direction(Vec2::new(0.0, -1.0))
        .with_direction_angle(FloatRange::new(-6.0, 6.0))
        .with_velocity(FloatRange::new(700.0, 730.0))
        .with_external_acceleration(Vec2::new(0.0, 981.0))
        .with_colors(Color::new(0, 20, 255, 255), Color::new(0, 150, 100, 0))
        .with_age(FloatRange::new(1.0, 3.0))
        .with_texture(textures.large)
        .with_blend_mode(BlendMode::Additive)
        .with_deactivation(falling_policy(view));

    let core = base
        .clone()
        .with_direction_angle(FloatRange::new(-1.5, 1.5))
        .with_velocity(FloatRange::new(800.0, 850.0))
        .with_texture(textures.small);

    let spray = base
        .clone()
        .with_capacity(3000)
        .with_emission_rate(1000.0)
        .with_direction_angle(FloatRange::new(-20.0, 20.0))
        .with_velocity(FloatRange::new(500.0, 550.0))
        .with_age(FloatRange::new(0.0, 3.0));

    EffectConfig::new("fountain")
        .with_emitter(base)
        .with_emitter(core)
        .with_emitter(spray)
}

/// Three colored rings orbiting the origin
pub fn swirl(textures: PresetTextures, view: ViewBoundsConfig) -> EffectConfig {
    let red = EmitterConfig::default()
        .with_capacity(2500)
        .with_emission_rate(500.0)
        .with_origin_acceleration(FloatRange::new(400.0, 500.0))
        .with_offset(FloatRange::new(30.0, 40.0))
        .with_direction(Vec2::new(0.0, -1.0))
        .with_direction_angle(FloatRange::new(-180.0, 180.0))
        .with_velocity_angle(FloatRange::constant(90.0))
        .with_velocity(FloatRange::new(200.0, 500.0))
        .with_colors(Color::new(244, 20, 0, 255), Color::new(244, 20, 0, 0))
        .with_age(FloatRange::new(2.5, 5.0))
        .with_texture(textures.small)
        .with_blend_mode(BlendMode::Additive)
        .with_deactivation(rising_policy(view));

    let pink = red
        .clone()
        .with_capacity(1000)
        .with_emission_rate(200.0)
        .with_offset(FloatRange::new(40.0, 50.0))
        .with_colors(Color::new(244, 0, 111, 255), Color::new(244, 0, 111, 0));

    let yellow = pink
        .clone()
        .with_capacity(150)
        .with_emission_rate(30.0)
        .with_offset(FloatRange::new(20.0, 30.0))
        .with_velocity(FloatRange::new(100.0, 200.0))
        .with_colors(Color::new(255, 211, 0, 255), Color::new(255, 211, 0, 0));

    EffectConfig::new("swirl")
        .with_emitter(red)
        .with_emitter(pink)
        .with_emitter(yellow)
}

/// Flame with a white core and a trail of grey smoke
pub fn flame(textures: PresetTextures, view: ViewBoundsConfig) -> EffectConfig {
    let fire = EmitterConfig::default()
        .with_capacity(1000)
        .with_emission_rate(500.0)
        .with_origin_acceleration(FloatRange::new(50.0, 100.0))
        .with_offset(FloatRange::new(0.0, 10.0))
        .with_direction(Vec2::new(0.0, -1.0))
        .with_direction_angle(FloatRange::constant(-90.0))
        .with_velocity_angle(FloatRange::constant(90.0))
        .with_velocity(FloatRange::new(30.0, 150.0))
        .with_colors(Color::new(255, 20, 0, 255), Color::new(255, 20, 0, 0))
        .with_age(FloatRange::new(1.0, 2.0))
        .with_texture(textures.large)
        .with_blend_mode(BlendMode::Additive)
        .with_deactivation(falling_policy(view));

    let core = fire
        .clone()
        .with_capacity(20)
        .with_emission_rate(20.0)
        .with_colors(Color::WHITE, Color::WHITE.with_alpha(0))
        .with_age(FloatRange::new(0.5, 1.0));

    let smoke = core
        .clone()
        .with_capacity(500)
        .with_emission_rate(100.0)
        .with_direction_angle(FloatRange::new(-3.0, 3.0))
        .with_velocity_angle(FloatRange::constant(0.0))
        .with_origin_acceleration(FloatRange::constant(0.0))
        .with_colors(Color::new(125, 125, 125, 30), Color::new(125, 125, 125, 10))
        .with_age(FloatRange::new(3.0, 5.0));

    EffectConfig::new("flame")
        .with_emitter(fire)
        .with_emitter(core)
        .with_emitter(smoke)
}
