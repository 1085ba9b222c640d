//! Scaled and unscaled time for fade scheduling.
//!
//! Fades advance once per host tick. The host hands the raw frame delta to a
//! [`Clock`], which produces a [`Tick`] carrying both the scaled delta
//! (affected by `time_scale`, so it freezes while the host is paused) and the
//! raw unscaled delta (for menus that must keep fading while paused). Each
//! screen's fade configuration picks which of the two drives it.
//!
//! There is no ambient time source: whoever owns the clock decides what
//! "paused" means by setting the scale explicitly.

/// One step of time, as seen by fades.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Frame delta multiplied by the clock's time scale
    pub dt: f32,
    /// Raw frame delta, unaffected by the time scale
    pub unscaled_dt: f32,
}

impl Tick {
    /// Delta for a fade, honoring its unscaled-time flag
    pub fn delta(&self, unscaled: bool) -> f32 {
        if unscaled {
            self.unscaled_dt
        } else {
            self.dt
        }
    }
}

/// Converts raw frame deltas into [`Tick`]s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clock {
    time_scale: f32,
}

impl Clock {
    /// Create a clock running at normal speed
    pub fn new() -> Self {
        Self { time_scale: 1.0 }
    }

    /// Get the current time scale
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set the time scale. `0.0` freezes scaled time (pause); values are
    /// clamped to be non-negative.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Whether scaled time is currently frozen
    pub fn is_paused(&self) -> bool {
        self.time_scale == 0.0
    }

    /// Produce the tick for a raw frame delta
    pub fn advance(&self, raw_dt: f32) -> Tick {
        Tick {
            dt: raw_dt * self.time_scale,
            unscaled_dt: raw_dt,
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
