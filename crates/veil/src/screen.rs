//! A single show/hide unit with fade animation and commit events.
//!
//! A [`Screen`] owns one [`Surface`] and drives its opacity through the
//! transition protocol: visibility changes go through [`Screen::set_shown`],
//! which either commits synchronously or starts a fade task that commits
//! when it completes. `is_shown` is authoritative only at commit —
//! intermediate opacity writes are visual, not state.
//!
//! Screens are usable standalone (tick them directly and drain their
//! events) or registered into a [`ScreenGroup`](crate::ScreenGroup), which
//! takes over ticking and layers exclusivity and history on top.

use log::trace;

use crate::clock::Tick;
use crate::fade::{Fade, FadeConfig, FadeStep};
use crate::surface::Surface;

/// Where a screen currently is in its show/hide state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Committed hidden, no fade in flight
    Hidden,
    /// Fade toward shown in flight (`is_shown` still false)
    FadingIn,
    /// Committed shown, no fade in flight
    Shown,
    /// Fade toward hidden in flight (`is_shown` still true)
    FadingOut,
}

/// Commit notification queued by a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    /// The screen committed shown
    Shown,
    /// The screen committed hidden
    Hidden,
}

/// Options for the canonical [`Screen::set_shown`] mutator.
///
/// The defaults match the public `show`/`hide` wrappers: fade if configured,
/// notify the owning group at commit, queue events at commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetShown {
    /// Allow a configured fade; when false the change commits synchronously
    pub allow_fade: bool,
    /// Run the group's commit notification (exclusivity + history)
    pub notify_group: bool,
    /// Queue a [`ScreenEvent`] at commit
    pub send_events: bool,
}

impl SetShown {
    /// Synchronous commit, group notified, events sent
    pub fn immediate() -> Self {
        Self {
            allow_fade: false,
            ..Self::default()
        }
    }

    /// Internal state correction: no fade, no group notification, no events
    pub(crate) fn correction() -> Self {
        Self {
            allow_fade: false,
            notify_group: false,
            send_events: false,
        }
    }

    /// Full behavior but without the group commit notification; used for
    /// batched group operations that update history exactly once themselves
    pub(crate) fn suppressed() -> Self {
        Self {
            notify_group: false,
            ..Self::default()
        }
    }
}

impl Default for SetShown {
    fn default() -> Self {
        Self {
            allow_fade: true,
            notify_group: true,
            send_events: true,
        }
    }
}

/// What a [`Screen::set_shown`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// Target equals the committed state and nothing was in flight;
    /// no events, no state change
    NoChange,
    /// The change committed synchronously
    Committed,
    /// A fade task was started (replacing any in-flight one);
    /// the commit arrives from a later tick
    FadeStarted,
}

/// A fade completion, reported from [`Screen::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeCommit {
    /// The committed `is_shown` value
    pub shown: bool,
    /// Whether the `set_shown` call that started the fade asked for the
    /// group commit notification
    pub notify_group: bool,
}

/// A single show/hide visual unit with its own fade animation.
pub struct Screen {
    surface: Box<dyn Surface>,
    fade: FadeConfig,
    /// Whether the screen accepts input when shown; independent of fade
    /// progress
    interactable: bool,
    select_on_show: bool,
    front_on_show: bool,
    is_shown: bool,
    opacity: f32,
    /// At most one fade in flight; replacing it cancels the previous task
    active_fade: Option<Fade>,
    events: Vec<ScreenEvent>,
}

impl Screen {
    /// Create a hidden screen over the given surface.
    ///
    /// The surface is immediately put into the hidden state (opacity 0,
    /// input off).
    pub fn new(surface: impl Surface + 'static) -> Self {
        let mut surface: Box<dyn Surface> = Box::new(surface);
        surface.set_opacity(0.0);
        surface.set_interactable(false);
        surface.set_blocks_input(false);
        Self {
            surface,
            fade: FadeConfig::none(),
            interactable: true,
            select_on_show: false,
            front_on_show: false,
            is_shown: false,
            opacity: 0.0,
            active_fade: None,
            events: Vec::new(),
        }
    }

    /// Set the fade configuration
    pub fn with_fade(mut self, fade: FadeConfig) -> Self {
        self.fade = fade;
        self
    }

    /// Set whether the screen accepts input when shown
    pub fn with_interactable(mut self, interactable: bool) -> Self {
        self.interactable = interactable;
        self
    }

    /// Select the surface's default focus target whenever the screen
    /// commits shown
    pub fn with_select_on_show(mut self, select: bool) -> Self {
        self.select_on_show = select;
        self
    }

    /// Bring the surface to the front whenever the screen commits shown
    pub fn with_front_on_show(mut self, front: bool) -> Self {
        self.front_on_show = front;
        self
    }

    /// Start in the committed shown state (opacity 1, input on, no events)
    pub fn with_shown(mut self, shown: bool) -> Self {
        if shown != self.is_shown {
            self.apply_committed(shown);
        }
        self
    }

    // ========== State Access ==========

    /// Current committed visibility
    pub fn is_shown(&self) -> bool {
        self.is_shown
    }

    /// Last opacity pushed to the surface
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Whether a fade is currently in flight
    pub fn is_fading(&self) -> bool {
        self.active_fade.is_some()
    }

    /// Current position in the show/hide state machine
    pub fn phase(&self) -> Phase {
        match &self.active_fade {
            Some(fade) if fade.target_shown => Phase::FadingIn,
            Some(_) => Phase::FadingOut,
            None if self.is_shown => Phase::Shown,
            None => Phase::Hidden,
        }
    }

    /// The fade configuration
    pub fn fade_config(&self) -> &FadeConfig {
        &self.fade
    }

    /// Whether the screen accepts input when shown
    pub fn interactable(&self) -> bool {
        self.interactable
    }

    /// Change input acceptance; takes effect on the surface right away if
    /// the screen is shown
    pub fn set_interactable(&mut self, interactable: bool) {
        self.interactable = interactable;
        if self.is_shown {
            self.surface.set_interactable(interactable);
        }
    }

    /// Drain the events queued by commits since the last call
    pub fn take_events(&mut self) -> Vec<ScreenEvent> {
        std::mem::take(&mut self.events)
    }

    // ========== Transition Protocol ==========

    /// The canonical mutator: request the target visibility with explicit
    /// options.
    ///
    /// Commits synchronously when fading is not allowed, not configured for
    /// this direction, or has zero duration; otherwise starts a fade task,
    /// cancelling any in-flight one. Requesting the already-committed state
    /// with nothing in flight is a committed no-op (no duplicate events).
    pub fn set_shown(&mut self, shown: bool, opts: SetShown) -> SetOutcome {
        if shown == self.is_shown && self.active_fade.is_none() {
            return SetOutcome::NoChange;
        }

        if opts.allow_fade && self.fade.fades(shown) {
            trace!(
                "starting {} fade from opacity {:.3}",
                if shown { "show" } else { "hide" },
                self.opacity
            );
            // Replacing the slot cancels any in-flight fade; the new task
            // picks up from the current partial opacity.
            self.active_fade = Some(Fade::new(
                shown,
                self.opacity,
                &self.fade,
                opts.notify_group,
                opts.send_events,
            ));
            SetOutcome::FadeStarted
        } else {
            self.active_fade = None;
            self.apply_committed(shown);
            if opts.send_events {
                self.queue_event(shown);
            }
            SetOutcome::Committed
        }
    }

    /// Show with full defaults (fade if configured, group notified, events)
    pub fn show(&mut self) -> SetOutcome {
        self.set_shown(true, SetShown::default())
    }

    /// Hide with full defaults
    pub fn hide(&mut self) -> SetOutcome {
        self.set_shown(false, SetShown::default())
    }

    /// Show or hide depending on the committed state
    pub fn toggle(&mut self) -> SetOutcome {
        let target = !self.is_shown;
        self.set_shown(target, SetShown::default())
    }

    /// Show committing synchronously, regardless of fade configuration
    pub fn show_immediate(&mut self) -> SetOutcome {
        self.set_shown(true, SetShown::immediate())
    }

    /// Hide committing synchronously, regardless of fade configuration
    pub fn hide_immediate(&mut self) -> SetOutcome {
        self.set_shown(false, SetShown::immediate())
    }

    /// Advance the in-flight fade, if any.
    ///
    /// Returns the commit when the fade reaches its end this tick, so the
    /// owner can run its commit notification. Intermediate steps only write
    /// opacity to the surface.
    pub fn tick(&mut self, tick: &Tick) -> Option<FadeCommit> {
        let fade = self.active_fade.as_mut()?;
        match fade.advance(tick) {
            FadeStep::Running(opacity) => {
                self.opacity = opacity;
                self.surface.set_opacity(opacity);
                None
            }
            FadeStep::Done(_) => {
                let shown = fade.target_shown;
                let notify_group = fade.notify_group;
                let send_events = fade.send_events;
                self.active_fade = None;
                self.apply_committed(shown);
                if send_events {
                    self.queue_event(shown);
                }
                Some(FadeCommit {
                    shown,
                    notify_group,
                })
            }
        }
    }

    /// Commit the state: exact endpoint opacity, input flags, and the
    /// show-side focus/stacking actions.
    fn apply_committed(&mut self, shown: bool) {
        self.is_shown = shown;
        self.opacity = if shown { 1.0 } else { 0.0 };
        self.surface.set_opacity(self.opacity);
        self.surface.set_blocks_input(shown);
        self.surface.set_interactable(shown && self.interactable);
        if shown {
            if self.select_on_show {
                self.surface.select_default_target();
            }
            if self.front_on_show {
                self.surface.bring_to_front();
            }
        }
        trace!("committed {}", if shown { "shown" } else { "hidden" });
    }

    fn queue_event(&mut self, shown: bool) {
        self.events.push(if shown {
            ScreenEvent::Shown
        } else {
            ScreenEvent::Hidden
        });
    }
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen")
            .field("is_shown", &self.is_shown)
            .field("opacity", &self.opacity)
            .field("phase", &self.phase())
            .field("interactable", &self.interactable)
            .field("fade", &self.fade)
            .finish()
    }
}
