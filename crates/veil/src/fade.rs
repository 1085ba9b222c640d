//! Fade configuration and the in-flight fade task.
//!
//! A fade is an explicit task value, not a coroutine: starting one replaces
//! the screen's `Option<Fade>` slot, and replacement IS cancellation — the
//! superseded task never advances again. The task interpolates opacity from
//! wherever it started toward exactly 0.0 or 1.0 and reports completion so
//! the owner can commit.

use crate::clock::Tick;
use crate::easing::{lerp_f32, Easing};

/// Fade configuration for a screen.
///
/// Defines whether each direction fades, how long a fade takes, what easing
/// curve it uses, and which time stream drives it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeConfig {
    /// Fade when showing (when off, shows commit immediately)
    pub fade_in: bool,
    /// Fade when hiding (when off, hides commit immediately)
    pub fade_out: bool,
    /// Duration in seconds; 0 commits immediately in both directions
    pub duration: f32,
    /// Easing curve to apply
    pub easing: Easing,
    /// Drive the fade from unscaled time so it keeps running while the
    /// host's scaled time is paused
    pub unscaled_time: bool,
}

impl FadeConfig {
    /// No fading: every visibility change commits immediately
    pub fn none() -> Self {
        Self {
            fade_in: false,
            fade_out: false,
            duration: 0.0,
            easing: Easing::default(),
            unscaled_time: false,
        }
    }

    /// Fade both directions over `duration` seconds with the standard curve
    pub fn fade(duration: f32) -> Self {
        Self {
            fade_in: true,
            fade_out: true,
            duration: duration.max(0.0),
            easing: Easing::default(),
            unscaled_time: false,
        }
    }

    /// Enable or disable the fade-in direction
    pub fn with_fade_in(mut self, enabled: bool) -> Self {
        self.fade_in = enabled;
        self
    }

    /// Enable or disable the fade-out direction
    pub fn with_fade_out(mut self, enabled: bool) -> Self {
        self.fade_out = enabled;
        self
    }

    /// Set the easing curve
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Drive fades from unscaled time
    pub fn with_unscaled_time(mut self, unscaled: bool) -> Self {
        self.unscaled_time = unscaled;
        self
    }

    /// Whether a transition in the given direction fades (rather than
    /// committing immediately)
    pub fn fades(&self, showing: bool) -> bool {
        self.duration > 0.0 && if showing { self.fade_in } else { self.fade_out }
    }
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self::none()
    }
}

/// Result of advancing a fade by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FadeStep {
    /// Still in flight; the opacity to apply this tick
    Running(f32),
    /// Reached the end; the exact final opacity (0.0 or 1.0)
    Done(f32),
}

/// An in-flight fade task.
///
/// Captures the opacity at start so a fade that replaces another mid-flight
/// continues from the partial value instead of jumping. Carries the
/// behavioral flags of the `set_shown` call that started it, so the commit
/// at completion runs with the same options.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fade {
    /// Committed `is_shown` value once the fade completes
    pub target_shown: bool,
    /// Opacity when the fade started
    from_opacity: f32,
    /// Seconds elapsed so far
    elapsed: f32,
    /// Total duration, always > 0
    duration: f32,
    easing: Easing,
    unscaled_time: bool,
    /// Whether the commit should notify the owning group
    pub notify_group: bool,
    /// Whether the commit should queue shown/hidden events
    pub send_events: bool,
}

impl Fade {
    pub(crate) fn new(
        target_shown: bool,
        from_opacity: f32,
        config: &FadeConfig,
        notify_group: bool,
        send_events: bool,
    ) -> Self {
        debug_assert!(config.duration > 0.0);
        Self {
            target_shown,
            from_opacity,
            elapsed: 0.0,
            duration: config.duration,
            easing: config.easing,
            unscaled_time: config.unscaled_time,
            notify_group,
            send_events,
        }
    }

    /// Opacity the fade is heading toward
    pub(crate) fn target_opacity(&self) -> f32 {
        if self.target_shown {
            1.0
        } else {
            0.0
        }
    }

    /// Advance by one tick, honoring the fade's time stream.
    pub(crate) fn advance(&mut self, tick: &Tick) -> FadeStep {
        self.elapsed += tick.delta(self.unscaled_time);
        if self.elapsed >= self.duration {
            // Snap to the exact endpoint; no floating drift at commit.
            FadeStep::Done(self.target_opacity())
        } else {
            let progress = self.elapsed / self.duration;
            let eased = self.easing.apply(progress);
            FadeStep::Running(lerp_f32(self.from_opacity, self.target_opacity(), eased))
        }
    }
}
