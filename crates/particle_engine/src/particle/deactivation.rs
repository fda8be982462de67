//! Pluggable particle deactivation policies
//!
//! A policy decides, once per active frame, whether a particle dies now. One
//! policy instance is shared by every particle of an emitter through a
//! [`SharedPolicy`] handle; particles never own it.
//!
//! Policies must be pure functions of the particle state. They are called
//! after the particle has aged for the frame and before it moves.

use crate::foundation::math::Vec2;
use crate::particle::Particle;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Decides when a particle should be deactivated
pub trait DeactivationPolicy {
    /// Return `true` to retire `particle` this frame
    fn should_deactivate(&self, particle: &Particle) -> bool;

    /// Short name used in debug output
    fn name(&self) -> &str {
        "custom"
    }
}

/// Shared, non-owning handle to a policy
pub type SharedPolicy = Rc<dyn DeactivationPolicy>;

/// The default policy: [`AgeDeactivation`]
pub fn default_policy() -> SharedPolicy {
    Rc::new(AgeDeactivation)
}

/// Retires a particle once its age exceeds its time to live
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeDeactivation;

impl DeactivationPolicy for AgeDeactivation {
    fn should_deactivate(&self, particle: &Particle) -> bool {
        particle.age() > particle.ttl()
    }

    fn name(&self) -> &str {
        "age"
    }
}

bitflags! {
    /// Edges of a view rectangle that a [`ViewBounds`] policy enforces
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Edges: u8 {
        /// Smallest y
        const TOP = 0b0001;
        /// Largest y
        const BOTTOM = 0b0010;
        /// Smallest x
        const LEFT = 0b0100;
        /// Largest x
        const RIGHT = 0b1000;
    }
}

/// Rectangle a particle must stay inside
///
/// Coordinates are y-down: `TOP` is the edge at `center.y - half_extent.y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBoundsConfig {
    /// Center of the view
    pub center: Vec2,
    /// Half the width and height of the view
    pub half_extent: Vec2,
    /// Edges that retire particles crossing them
    pub edges: Edges,
}

impl ViewBoundsConfig {
    /// View centered on `center` spanning `width` x `height`, all edges enforced
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            half_extent: Vec2::new(width * 0.5, height * 0.5),
            edges: Edges::all(),
        }
    }

    /// Restrict which edges are enforced
    pub fn with_edges(mut self, edges: Edges) -> Self {
        self.edges = edges;
        self
    }
}

/// Retires particles that leave a view rectangle
#[derive(Debug, Clone, Copy)]
pub struct ViewBounds {
    config: ViewBoundsConfig,
}

impl ViewBounds {
    /// Create the policy from explicit bounds
    pub fn new(config: ViewBoundsConfig) -> Self {
        Self { config }
    }

    /// Bounds this policy checks against
    pub fn config(&self) -> &ViewBoundsConfig {
        &self.config
    }
}

impl DeactivationPolicy for ViewBounds {
    fn should_deactivate(&self, particle: &Particle) -> bool {
        let ViewBoundsConfig { center, half_extent, edges } = self.config;
        let position = particle.position();

        (edges.contains(Edges::TOP) && position.y < center.y - half_extent.y)
            || (edges.contains(Edges::BOTTOM) && position.y > center.y + half_extent.y)
            || (edges.contains(Edges::LEFT) && position.x < center.x - half_extent.x)
            || (edges.contains(Edges::RIGHT) && position.x > center.x + half_extent.x)
    }

    fn name(&self) -> &str {
        "view-bounds"
    }
}

/// Fires when any of its policies fires
#[derive(Clone)]
pub struct AnyOf {
    policies: Vec<SharedPolicy>,
}

impl AnyOf {
    /// Combine policies
    pub fn new(policies: Vec<SharedPolicy>) -> Self {
        Self { policies }
    }

    /// The usual combination: leave the view or outlive the ttl
    pub fn view_or_age(view: ViewBoundsConfig) -> Self {
        Self::new(vec![Rc::new(ViewBounds::new(view)), default_policy()])
    }
}

impl DeactivationPolicy for AnyOf {
    fn should_deactivate(&self, particle: &Particle) -> bool {
        self.policies.iter().any(|policy| policy.should_deactivate(particle))
    }

    fn name(&self) -> &str {
        "any-of"
    }
}

impl fmt::Debug for AnyOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.policies.iter().map(|p| p.name()))
            .finish()
    }
}

/// Adapts a closure into a policy
pub struct FnDeactivation<F>(pub F);

impl<F> DeactivationPolicy for FnDeactivation<F>
where
    F: Fn(&Particle) -> bool,
{
    fn should_deactivate(&self, particle: &Particle) -> bool {
        (self.0)(particle)
    }
}
