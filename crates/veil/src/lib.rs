//! # veil
//!
//! Presentation backend agnostic screen orchestration.
//!
//! This crate coordinates a set of visual "screens" (panels, pages, menus):
//! it enforces display-exclusivity rules, animates show/hide fades, and
//! keeps a navigable history of shown configurations so callers can go
//! back through them. It renders nothing itself — each screen drives an
//! opaque [`Surface`] the host implements over its own canvas primitive.
//!
//! ## Core Types
//!
//! - [`Screen`] - A single show/hide unit with its own fade animation
//! - [`ScreenGroup`] - Coordinator enforcing exclusivity and history
//! - [`ScreenId`] - Stable handle for a registered screen
//!
//! ## Transitions
//!
//! - [`FadeConfig`] - Per-screen fade directions, duration, and curve
//! - [`Easing`] - The available easing curves
//! - [`Clock`] / [`Tick`] - Scaled vs. unscaled time for fade scheduling
//!
//! ## Host Integration
//!
//! - [`Surface`] - Trait the host implements for opacity/input/stacking
//! - [`ScreenEvent`] - Commit notifications drained per screen or per group
//! - [`GroupError`] - Recoverable, logged error conditions
//!
//! Fades advance cooperatively: call [`ScreenGroup::tick`] (or
//! [`Screen::tick`] for standalone screens) once per frame with the frame
//! delta. Nothing runs between ticks, and starting a new transition on a
//! screen cancels its in-flight one deterministically.

mod clock;
mod error;
mod fade;
mod group;
mod screen;
mod surface;
pub mod easing;

// Core types
pub use clock::*;
pub use error::*;
pub use fade::*;
pub use group::*;
pub use screen::*;
pub use surface::*;

pub use easing::{ease_in_out_sine, ease_in_sine, ease_out_sine, linear, Easing, EasingFn};
