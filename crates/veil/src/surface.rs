//! Presentation seam between screen logic and the host's render layer.
//!
//! This module provides a backend-agnostic trait for the visual surface a
//! screen controls (opacity, interactivity, stacking order). It keeps the
//! core free of any rendering or input-routing dependency: hosts adapt their
//! canvas/panel primitive behind this trait.

/// Backend-agnostic visual surface of one screen.
///
/// Implementors apply opacity and interactivity changes to whatever the host
/// uses for compositing. The core never reads back from the surface; it only
/// pushes state, so implementations can be as thin as a couple of field
/// writes.
///
/// This trait is intentionally minimal: core screen logic must not depend on
/// any specific presentation layer. Hosts implement it over their own canvas
/// primitive; [`HeadlessSurface`] implements it for tests and headless use.
pub trait Surface {
    /// Set the surface opacity, in `0.0..=1.0`.
    ///
    /// Called once per tick while a fade is in flight, and with exactly
    /// `0.0` or `1.0` at commit.
    fn set_opacity(&mut self, opacity: f32);

    /// Enable or disable input on the surface.
    fn set_interactable(&mut self, interactable: bool);

    /// Control whether the surface blocks input from reaching what is
    /// behind it.
    fn set_blocks_input(&mut self, blocks: bool);

    /// Raise the surface above its siblings. Called at show commit when the
    /// screen is configured to come to the front.
    fn bring_to_front(&mut self) {}

    /// Move input focus to the surface's default target. Called at show
    /// commit when the screen is configured to grab focus. Hosts without
    /// focus handling keep the default no-op.
    fn select_default_target(&mut self) {}
}

/// A [`Surface`] that just records what was pushed to it.
///
/// Useful for tests and for hosts that drive presentation from polled state
/// instead of callbacks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeadlessSurface {
    /// Last opacity pushed to the surface
    pub opacity: f32,
    /// Whether the surface currently accepts input
    pub interactable: bool,
    /// Whether the surface currently blocks input behind it
    pub blocks_input: bool,
    /// How many times the surface was raised
    pub front_count: u32,
    /// How many times default focus was selected
    pub focus_count: u32,
}

impl HeadlessSurface {
    /// Create a surface with everything off and opacity 0
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for HeadlessSurface {
    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    fn set_interactable(&mut self, interactable: bool) {
        self.interactable = interactable;
    }

    fn set_blocks_input(&mut self, blocks: bool) {
        self.blocks_input = blocks;
    }

    fn bring_to_front(&mut self) {
        self.front_count += 1;
    }

    fn select_default_target(&mut self) {
        self.focus_count += 1;
    }
}
