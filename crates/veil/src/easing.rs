use std::f32::consts::PI;

/// Easing function type: takes progress (0.0 to 1.0) and returns eased value (0.0 to 1.0)
pub type EasingFn = fn(f32) -> f32;

/// Linear interpolation (no easing)
pub fn linear(t: f32) -> f32 {
    t
}

/// Sine ease in - slow start, accelerating
pub fn ease_in_sine(t: f32) -> f32 {
    1.0 - (t * PI / 2.0).cos()
}

/// Sine ease out - fast start, decelerating
pub fn ease_out_sine(t: f32) -> f32 {
    (t * PI / 2.0).sin()
}

/// Sine ease in-out - slow start and end, fast middle
pub fn ease_in_out_sine(t: f32) -> f32 {
    -((t * PI).cos() - 1.0) / 2.0
}

/// Linearly interpolate between two f32 values
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Easing curve selected by fade configuration
///
/// Maps normalized fade progress to eased progress. Fades pick their curve
/// from configuration rather than holding a bare function pointer, so the
/// choice stays inspectable and serializable by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// No easing
    Linear,
    /// Slow start and end, fast middle (the standard fade curve)
    InOutSine,
    /// Slow start, accelerating
    InSine,
    /// Fast start, decelerating
    OutSine,
}

impl Easing {
    /// Get the underlying easing function
    pub fn function(self) -> EasingFn {
        match self {
            Easing::Linear => linear,
            Easing::InOutSine => ease_in_out_sine,
            Easing::InSine => ease_in_sine,
            Easing::OutSine => ease_out_sine,
        }
    }

    /// Apply the easing curve to normalized progress
    pub fn apply(self, t: f32) -> f32 {
        (self.function())(t)
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::InOutSine
    }
}
