//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - 2D math helpers (rotation, safe normalization)
//! - Colors and color-over-lifetime fading
//! - Random ranges and the seedable particle random source
//! - Handle-based collections
//! - Frame timing for hosts
//! - Logging utilities

pub mod math;
pub mod color;
pub mod random;
pub mod collections;
pub mod time;
pub mod logging;
