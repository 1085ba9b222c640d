//! Screen group: exclusivity, commit notification, and back-navigation
//! history.
//!
//! A [`ScreenGroup`] owns its registered [`Screen`]s in a table keyed by
//! [`ScreenId`] and kept in registration order. All visibility changes for
//! grouped screens go through the group, which enforces the
//! single-shown invariant, drives every in-flight fade from [`ScreenGroup::tick`],
//! and records each committed configuration in a history stack that
//! [`ScreenGroup::go_back`] navigates.
//!
//! Batched operations hide screens with the group notification suppressed so
//! that exactly one history entry results per externally visible operation;
//! transient mid-batch states never pollute back-navigation.

use std::collections::BTreeSet;

use log::{debug, warn};

use crate::clock::Clock;
use crate::error::GroupError;
use crate::screen::{Phase, Screen, ScreenEvent, SetOutcome, SetShown};

/// Stable handle for a screen registered in a [`ScreenGroup`].
///
/// History entries and operations refer to screens by this identity, never
/// by value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScreenId(String);

impl ScreenId {
    /// Create a new ScreenId from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ScreenId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ScreenId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for ScreenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The set of screens committed as simultaneously shown at one point in
/// history.
///
/// Compared as an unordered set over screen identity; iterates in id order
/// for deterministic output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenSet(BTreeSet<ScreenId>);

impl ScreenSet {
    /// The empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the set contains the id
    pub fn contains(&self, id: &ScreenId) -> bool {
        self.0.contains(id)
    }

    /// Number of screens in the set
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the ids in id order
    pub fn iter(&self) -> impl Iterator<Item = &ScreenId> {
        self.0.iter()
    }
}

impl FromIterator<ScreenId> for ScreenSet {
    fn from_iter<T: IntoIterator<Item = ScreenId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Construction-time configuration for a [`ScreenGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupConfig {
    /// Allow more than one screen to be shown at once. When false the group
    /// enforces the exclusivity invariant: at most one shown screen after
    /// any completed operation.
    pub allow_multiple_shown: bool,
    /// Record committed configurations for back-navigation
    pub use_history: bool,
    /// [`ScreenGroup::start`] force-hides every screen before seeding the
    /// history
    pub hide_all_on_start: bool,
}

impl GroupConfig {
    /// Allow several screens shown at once
    pub fn with_multiple_shown(mut self, allow: bool) -> Self {
        self.allow_multiple_shown = allow;
        self
    }

    /// Enable or disable the history stack
    pub fn with_history(mut self, use_history: bool) -> Self {
        self.use_history = use_history;
        self
    }

    /// Force-hide everything in [`ScreenGroup::start`]
    pub fn with_hide_all_on_start(mut self, hide: bool) -> Self {
        self.hide_all_on_start = hide;
        self
    }
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            allow_multiple_shown: false,
            use_history: true,
            hide_all_on_start: false,
        }
    }
}

/// Coordinator enforcing exclusivity and history across a set of screens.
pub struct ScreenGroup {
    allow_multiple_shown: bool,
    use_history: bool,
    hide_all_on_start: bool,
    /// Registration order; the order of `screens()` and the "first shown"
    /// tie-break order
    screens: Vec<(ScreenId, Screen)>,
    /// Bottom-to-top stack of committed configurations; the top is the
    /// current one, not the previous one
    history: Vec<ScreenSet>,
    clock: Clock,
    events: Vec<(ScreenId, ScreenEvent)>,
}

impl ScreenGroup {
    /// Create an empty group
    pub fn new(config: GroupConfig) -> Self {
        Self {
            allow_multiple_shown: config.allow_multiple_shown,
            use_history: config.use_history,
            hide_all_on_start: config.hide_all_on_start,
            screens: Vec::new(),
            history: Vec::new(),
            clock: Clock::new(),
            events: Vec::new(),
        }
    }

    // ========== Registration ==========

    /// Register a screen under `id`, appending it to the registration order.
    ///
    /// Registering an id that is already present is rejected: the condition
    /// is logged, the group keeps the original screen, and the offered one
    /// is dropped.
    ///
    /// When the group disallows multiple shown screens and some other screen
    /// is already shown, a screen arriving in the shown state is forced
    /// hidden without a fade — a state correction, not a user-facing
    /// transition, so it queues no events and touches no history.
    pub fn register_screen(
        &mut self,
        id: impl Into<ScreenId>,
        mut screen: Screen,
    ) -> Result<(), GroupError> {
        let id = id.into();
        if self.contains(&id) {
            warn!("screen `{id}` is already registered; registration ignored");
            return Err(GroupError::DuplicateRegistration(id));
        }

        if !self.allow_multiple_shown && screen.is_shown() && !self.shown_set().is_empty() {
            screen.set_shown(false, SetShown::correction());
        }

        debug!("registered screen `{id}`");
        self.screens.push((id, screen));
        Ok(())
    }

    /// Remove the screen registered under `id` and hand it back.
    ///
    /// History entries naming the id are left as they are; [`Self::go_back`]
    /// skips ids that are no longer registered.
    pub fn unregister_screen(&mut self, id: &ScreenId) -> Result<Screen, GroupError> {
        match self.index_of(id) {
            Some(index) => {
                let (_, screen) = self.screens.remove(index);
                debug!("unregistered screen `{id}`");
                Ok(screen)
            }
            None => {
                warn!("screen `{id}` is not registered; unregistration ignored");
                Err(GroupError::UnknownScreen(id.clone()))
            }
        }
    }

    /// Apply start-up policy: force-hide everything if configured, then seed
    /// the history with the resulting committed set.
    pub fn start(&mut self) {
        if self.hide_all_on_start {
            for (_, screen) in &mut self.screens {
                screen.set_shown(false, SetShown::correction());
            }
        }
        self.update_history();
    }

    // ========== State Access ==========

    /// All registered screens, in registration order
    pub fn screens(&self) -> impl Iterator<Item = (&ScreenId, &Screen)> {
        self.screens.iter().map(|(id, screen)| (id, screen))
    }

    /// The screens whose committed state is shown, in registration order
    pub fn shown_screens(&self) -> impl Iterator<Item = (&ScreenId, &Screen)> {
        self.screens().filter(|(_, screen)| screen.is_shown())
    }

    /// The committed shown-set
    pub fn shown_set(&self) -> ScreenSet {
        self.shown_screens().map(|(id, _)| id.clone()).collect()
    }

    /// Look up a registered screen
    pub fn screen(&self, id: &ScreenId) -> Option<&Screen> {
        self.index_of(id).map(|index| &self.screens[index].1)
    }

    /// Whether `id` is registered
    pub fn contains(&self, id: &ScreenId) -> bool {
        self.index_of(id).is_some()
    }

    /// Number of registered screens
    pub fn len(&self) -> usize {
        self.screens.len()
    }

    /// Whether no screens are registered
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Number of committed configurations on the history stack
    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    /// The group's tick clock
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Set the scale applied to tick deltas; `0.0` pauses scaled-time fades
    pub fn set_time_scale(&mut self, scale: f32) {
        self.clock.set_time_scale(scale);
    }

    /// Drain the `(id, event)` pairs queued by commits since the last call,
    /// in registration order per operation
    pub fn take_events(&mut self) -> Vec<(ScreenId, ScreenEvent)> {
        std::mem::take(&mut self.events)
    }

    // ========== Visibility Operations ==========

    /// Show one screen.
    ///
    /// When the group disallows multiple shown screens, or `exclusively` is
    /// requested, every other shown screen is hidden first with history
    /// suppressed; the operation lands exactly one history update.
    pub fn show_screen(&mut self, id: &ScreenId, exclusively: bool) -> Result<(), GroupError> {
        let index = self.require(id)?;

        if !self.allow_multiple_shown || exclusively {
            self.hide_shown_suppressed(Some(index));
        }

        let outcome = self.screens[index].1.set_shown(true, SetShown::default());
        self.finish_single(index, true, outcome);
        self.collect_events();
        Ok(())
    }

    /// Hide one screen, then record the resulting configuration once.
    pub fn hide_screen(&mut self, id: &ScreenId) -> Result<(), GroupError> {
        let index = self.require(id)?;
        let outcome = self.screens[index].1.set_shown(false, SetShown::default());
        self.finish_single(index, false, outcome);
        self.collect_events();
        Ok(())
    }

    /// Show a set of screens.
    ///
    /// The general entry point: an empty set hides everything, a singleton
    /// delegates to [`Self::show_screen`], and a multi-screen request
    /// requires `allow_multiple_shown` (otherwise the operation is rejected
    /// with no state change). With `exclusively`, currently shown screens
    /// are hidden first with history suppressed. One history update results.
    pub fn show_screens(
        &mut self,
        targets: &[ScreenId],
        exclusively: bool,
    ) -> Result<(), GroupError> {
        // Validate before touching anything: unknown ids abort atomically.
        let mut indices = Vec::with_capacity(targets.len());
        for id in targets {
            let index = self.require(id)?;
            if !indices.contains(&index) {
                indices.push(index);
            }
        }

        match indices.len() {
            0 => {
                self.hide_all_screens();
                Ok(())
            }
            1 => self.show_screen(&targets[0], exclusively),
            requested if !self.allow_multiple_shown => {
                warn!(
                    "cannot show {requested} screens at once: group allows a single shown screen"
                );
                Err(GroupError::InvalidConfiguration { requested })
            }
            _ => {
                if exclusively {
                    self.hide_shown_suppressed(None);
                }
                // Notification suppressed per target so partial commits
                // cannot each push a history entry.
                for &index in &indices {
                    self.screens[index].1.set_shown(true, SetShown::suppressed());
                }
                self.update_history();
                self.collect_events();
                Ok(())
            }
        }
    }

    /// Hide every screen, then record the resulting configuration once.
    pub fn hide_all_screens(&mut self) {
        self.hide_shown_suppressed(None);
        self.update_history();
        self.collect_events();
    }

    // ========== History ==========

    /// Whether `go_back(steps)` can complete without underflow
    pub fn can_go_back(&self, steps: usize) -> bool {
        self.history.len() > steps
    }

    /// Navigate back through committed configurations.
    ///
    /// Pops the current entry plus `steps` more and restores the last set
    /// popped; the restore pushes one fresh entry, so the stack shrinks by
    /// exactly `steps`. If the stack runs out mid-way the deepest entry
    /// actually popped is restored instead — or, when nothing could be
    /// popped, every screen is hidden — and `HistoryUnderflow` is reported.
    ///
    /// No-op when the group does not use history.
    pub fn go_back(&mut self, steps: usize) -> Result<(), GroupError> {
        if !self.use_history {
            return Ok(());
        }

        let depth = self.history.len();
        let mut restore = None;
        let mut underflow = false;
        for _ in 0..=steps {
            match self.history.pop() {
                Some(set) => restore = Some(set),
                None => {
                    underflow = true;
                    break;
                }
            }
        }
        if underflow {
            warn!("cannot go back {steps} steps: history held {depth} entries");
        }

        match restore {
            Some(set) => {
                // Entries may name screens unregistered since they were
                // recorded; restore only what is still here, in
                // registration order.
                let mut live: Vec<ScreenId> = self
                    .screens
                    .iter()
                    .map(|(id, _)| id)
                    .filter(|id| set.contains(id))
                    .cloned()
                    .collect();
                // An exclusive group can restore at most one screen: take
                // the first in registration order rather than rejecting the
                // restore after the pops already happened.
                if !self.allow_multiple_shown && live.len() > 1 {
                    live.truncate(1);
                }
                if live.is_empty() {
                    self.hide_all_screens();
                } else {
                    self.show_screens(&live, true)?;
                }
            }
            None => self.hide_all_screens(),
        }

        if underflow {
            Err(GroupError::HistoryUnderflow {
                requested: steps,
                depth,
            })
        } else {
            Ok(())
        }
    }

    /// Empty the stack, then reseed it with the current committed set
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.update_history();
    }

    // ========== Ticking ==========

    /// Advance every in-flight fade by one frame.
    ///
    /// `raw_dt` is the frame delta in seconds; the group clock splits it
    /// into scaled and unscaled streams. Fades that complete this tick
    /// commit and run the group notification they were started with.
    pub fn tick(&mut self, raw_dt: f32) {
        let tick = self.clock.advance(raw_dt);

        let mut commits = Vec::new();
        for (index, (_, screen)) in self.screens.iter_mut().enumerate() {
            if let Some(commit) = screen.tick(&tick) {
                commits.push((index, commit));
            }
        }
        for (index, commit) in commits {
            if commit.notify_group {
                self.notify_screen_state(commit.shown, index);
            }
        }
        self.collect_events();
    }

    // ========== Internals ==========

    fn index_of(&self, id: &ScreenId) -> Option<usize> {
        self.screens.iter().position(|(sid, _)| sid == id)
    }

    fn require(&self, id: &ScreenId) -> Result<usize, GroupError> {
        self.index_of(id).ok_or_else(|| {
            warn!("screen `{id}` is not registered in this group");
            GroupError::UnknownScreen(id.clone())
        })
    }

    /// Hide every committed-shown screen except `keep`, with the group
    /// notification suppressed so the batch lands a single history entry
    fn hide_shown_suppressed(&mut self, keep: Option<usize>) {
        for (index, (_, screen)) in self.screens.iter_mut().enumerate() {
            if Some(index) == keep {
                continue;
            }
            if screen.is_shown() {
                screen.set_shown(false, SetShown::suppressed());
            }
        }
    }

    /// Wrap up a single-target show/hide: an immediate commit runs the
    /// notification now, a fade runs it at commit (the at-call history
    /// update still happens, deduplicated when nothing changed yet)
    fn finish_single(&mut self, index: usize, shown: bool, outcome: SetOutcome) {
        match outcome {
            SetOutcome::Committed => self.notify_screen_state(shown, index),
            SetOutcome::FadeStarted | SetOutcome::NoChange => self.update_history(),
        }
    }

    /// Commit notification: reached after any screen in the group commits a
    /// transition with notification enabled. Enforces exclusivity on show
    /// commits, then performs exactly one history update.
    fn notify_screen_state(&mut self, is_on: bool, index: usize) {
        if is_on && !self.allow_multiple_shown {
            self.hide_shown_suppressed(Some(index));
        }
        self.update_history();
    }

    /// The shown-set as history records it: committed-shown screens that
    /// are not mid-fade toward hidden. A screen whose hide fade is still in
    /// flight is already leaving the configuration; recording it would put
    /// a multi-screen entry into an exclusive group's history.
    fn settled_shown_set(&self) -> ScreenSet {
        self.shown_screens()
            .filter(|(_, screen)| screen.phase() != Phase::FadingOut)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Push the settled shown-set unless it equals the top entry
    fn update_history(&mut self) {
        if !self.use_history {
            return;
        }
        let current = self.settled_shown_set();
        if self.history.last() != Some(&current) {
            debug!(
                "history push {:?} (depth {})",
                current,
                self.history.len() + 1
            );
            self.history.push(current);
        }
    }

    /// Move queued per-screen events into the group queue, tagged with ids
    fn collect_events(&mut self) {
        for (id, screen) in &mut self.screens {
            for event in screen.take_events() {
                self.events.push((id.clone(), event));
            }
        }
    }
}

impl Default for ScreenGroup {
    fn default() -> Self {
        Self::new(GroupConfig::default())
    }
}

impl std::fmt::Debug for ScreenGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenGroup")
            .field("screens", &self.screens.len())
            .field("shown", &self.shown_set())
            .field("allow_multiple_shown", &self.allow_multiple_shown)
            .field("use_history", &self.use_history)
            .field("history_depth", &self.history.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::fade::FadeConfig;
    use crate::surface::HeadlessSurface;

    fn id(s: &str) -> ScreenId {
        ScreenId::new(s)
    }

    fn set(ids: &[&str]) -> ScreenSet {
        ids.iter().map(|s| ScreenId::new(*s)).collect()
    }

    fn plain_screen() -> Screen {
        Screen::new(HeadlessSurface::new())
    }

    fn fading_screen(duration: f32) -> Screen {
        Screen::new(HeadlessSurface::new())
            .with_fade(FadeConfig::fade(duration).with_easing(Easing::Linear))
    }

    /// Exclusive group with plain screens X and Y, history on.
    fn xy_group() -> ScreenGroup {
        let mut group = ScreenGroup::default();
        group.register_screen("x", plain_screen()).unwrap();
        group.register_screen("y", plain_screen()).unwrap();
        group
    }

    fn shown_ids(group: &ScreenGroup) -> Vec<&str> {
        group.shown_screens().map(|(id, _)| id.as_str()).collect()
    }

    #[test]
    fn test_exclusive_shows_stack_history() {
        let mut group = xy_group();
        group.show_screen(&id("x"), false).unwrap();
        group.show_screen(&id("y"), false).unwrap();

        assert_eq!(shown_ids(&group), vec!["y"]);
        assert_eq!(group.history, vec![set(&["x"]), set(&["y"])]);
        assert!(group.can_go_back(1));
    }

    #[test]
    fn test_go_back_restores_previous_screen() {
        let mut group = xy_group();
        group.show_screen(&id("x"), false).unwrap();
        group.show_screen(&id("y"), false).unwrap();

        group.go_back(1).unwrap();
        assert_eq!(shown_ids(&group), vec!["x"]);
        assert_eq!(group.history, vec![set(&["x"])]);
    }

    #[test]
    fn test_multi_show_single_history_entry() {
        let mut group =
            ScreenGroup::new(GroupConfig::default().with_multiple_shown(true));
        group.register_screen("x", plain_screen()).unwrap();
        group.register_screen("y", plain_screen()).unwrap();

        group
            .show_screens(&[id("x"), id("y")], false)
            .unwrap();
        assert_eq!(shown_ids(&group), vec!["x", "y"]);
        assert_eq!(group.history, vec![set(&["x", "y"])]);
    }

    #[test]
    fn test_multi_show_rejected_when_single_only() {
        let mut group = xy_group();
        let result = group.show_screens(&[id("x"), id("y")], true);

        assert_eq!(
            result,
            Err(GroupError::InvalidConfiguration { requested: 2 })
        );
        assert!(shown_ids(&group).is_empty());
        assert_eq!(group.history_depth(), 0);
    }

    #[test]
    fn test_exclusivity_invariant_after_operations() {
        // At most one shown screen after any completed operation.
        let mut group = xy_group();
        group.register_screen("z", plain_screen()).unwrap();

        group.show_screen(&id("x"), false).unwrap();
        assert!(group.shown_screens().count() <= 1);
        group.show_screen(&id("z"), true).unwrap();
        assert!(group.shown_screens().count() <= 1);
        group.show_screens(&[id("y")], false).unwrap();
        assert!(group.shown_screens().count() <= 1);
        group.go_back(1).unwrap();
        assert!(group.shown_screens().count() <= 1);
    }

    #[test]
    fn test_history_dedup() {
        // Identical committed sets never grow the history.
        let mut group = xy_group();
        group.show_screen(&id("x"), false).unwrap();
        assert_eq!(group.history_depth(), 1);

        group.update_history();
        group.update_history();
        assert_eq!(group.history_depth(), 1);

        // A no-change show also lands no new entry.
        group.show_screen(&id("x"), false).unwrap();
        assert_eq!(group.history_depth(), 1);
    }

    #[test]
    fn test_go_back_round_trip() {
        // go_back(steps) then go_back(0) reconstructs the same set.
        let mut group = xy_group();
        group.register_screen("z", plain_screen()).unwrap();
        group.show_screen(&id("x"), false).unwrap();
        group.show_screen(&id("y"), false).unwrap();
        group.show_screen(&id("z"), false).unwrap();

        group.go_back(1).unwrap();
        let after_back = group.shown_set();
        group.go_back(0).unwrap();
        assert_eq!(group.shown_set(), after_back);
        assert_eq!(after_back, set(&["y"]));
    }

    #[test]
    fn test_go_back_shrinks_by_steps() {
        let mut group = xy_group();
        group.register_screen("z", plain_screen()).unwrap();
        group.show_screen(&id("x"), false).unwrap();
        group.show_screen(&id("y"), false).unwrap();
        group.show_screen(&id("z"), false).unwrap();
        assert_eq!(group.history_depth(), 3);

        group.go_back(2).unwrap();
        assert_eq!(group.history_depth(), 1);
        assert_eq!(shown_ids(&group), vec!["x"]);
    }

    #[test]
    fn test_go_back_underflow_falls_back_to_deepest() {
        let mut group = xy_group();
        group.show_screen(&id("x"), false).unwrap();
        group.show_screen(&id("y"), false).unwrap();

        // Asks for more than the stack holds: the deepest popped entry
        // ({x}) is restored and the condition is reported.
        let result = group.go_back(5);
        assert_eq!(
            result,
            Err(GroupError::HistoryUnderflow {
                requested: 5,
                depth: 2
            })
        );
        assert_eq!(shown_ids(&group), vec!["x"]);
    }

    #[test]
    fn test_go_back_on_empty_history_hides_all() {
        let mut group = xy_group();
        // Shown without history entries: put X up, wipe the stack by hand.
        group.show_screen(&id("x"), false).unwrap();
        group.history.clear();

        let result = group.go_back(1);
        assert!(matches!(
            result,
            Err(GroupError::HistoryUnderflow {
                requested: 1,
                depth: 0
            })
        ));
        assert!(shown_ids(&group).is_empty());
    }

    #[test]
    fn test_can_go_back() {
        let mut group = xy_group();
        assert!(!group.can_go_back(0));
        group.show_screen(&id("x"), false).unwrap();
        assert!(group.can_go_back(0));
        assert!(!group.can_go_back(1));
        group.show_screen(&id("y"), false).unwrap();
        assert!(group.can_go_back(1));
    }

    #[test]
    fn test_clear_history_reseeds_with_current_set() {
        let mut group = xy_group();
        group.show_screen(&id("x"), false).unwrap();
        group.show_screen(&id("y"), false).unwrap();
        assert_eq!(group.history_depth(), 2);

        group.clear_history();
        assert_eq!(group.history, vec![set(&["y"])]);
    }

    #[test]
    fn test_history_disabled() {
        let mut group = ScreenGroup::new(GroupConfig::default().with_history(false));
        group.register_screen("x", plain_screen()).unwrap();
        group.register_screen("y", plain_screen()).unwrap();

        group.show_screen(&id("x"), false).unwrap();
        group.show_screen(&id("y"), false).unwrap();
        assert_eq!(group.history_depth(), 0);
        assert!(!group.can_go_back(0));

        // go_back is a silent no-op.
        group.go_back(1).unwrap();
        assert_eq!(shown_ids(&group), vec!["y"]);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut group = xy_group();
        let result = group.register_screen("x", plain_screen());
        assert_eq!(result, Err(GroupError::DuplicateRegistration(id("x"))));
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn test_unknown_screen_operations_rejected() {
        let mut group = xy_group();
        assert_eq!(
            group.show_screen(&id("ghost"), false),
            Err(GroupError::UnknownScreen(id("ghost")))
        );
        assert_eq!(
            group.hide_screen(&id("ghost")),
            Err(GroupError::UnknownScreen(id("ghost")))
        );
        assert!(group.unregister_screen(&id("ghost")).is_err());

        // An unknown id anywhere in a batch aborts it atomically.
        group.show_screen(&id("x"), false).unwrap();
        let before = group.shown_set();
        let result = group.show_screens(&[id("y"), id("ghost")], false);
        assert!(result.is_err());
        assert_eq!(group.shown_set(), before);
    }

    #[test]
    fn test_unregister_returns_screen_and_keeps_history() {
        let mut group = xy_group();
        group.show_screen(&id("x"), false).unwrap();
        group.show_screen(&id("y"), false).unwrap();

        let screen = group.unregister_screen(&id("x")).unwrap();
        assert!(!screen.is_shown());
        assert_eq!(group.len(), 1);
        // History still names x; unregistration does not edit it.
        assert_eq!(group.history, vec![set(&["x"]), set(&["y"])]);
    }

    #[test]
    fn test_go_back_skips_unregistered_screens() {
        let mut group = xy_group();
        group.show_screen(&id("x"), false).unwrap();
        group.show_screen(&id("y"), false).unwrap();
        group.unregister_screen(&id("x")).unwrap();

        // The {x} entry restores to nothing that exists: hide all.
        group.go_back(1).unwrap();
        assert!(shown_ids(&group).is_empty());
    }

    #[test]
    fn test_registration_correction_forces_hide() {
        let mut group = xy_group();
        group.show_screen(&id("x"), false).unwrap();
        group.take_events();
        let depth = group.history_depth();

        let shown = Screen::new(HeadlessSurface::new()).with_shown(true);
        group.register_screen("late", shown).unwrap();

        // Corrected without events or a history entry.
        let late = group.screen(&id("late")).unwrap();
        assert!(!late.is_shown());
        assert_eq!(group.history_depth(), depth);
        assert!(group.take_events().is_empty());
        assert_eq!(shown_ids(&group), vec!["x"]);
    }

    #[test]
    fn test_show_screens_empty_hides_all() {
        let mut group = xy_group();
        group.show_screen(&id("x"), false).unwrap();

        group.show_screens(&[], false).unwrap();
        assert!(shown_ids(&group).is_empty());
        assert_eq!(group.history, vec![set(&["x"]), set(&[])]);
    }

    #[test]
    fn test_hide_all_single_history_entry() {
        let mut group =
            ScreenGroup::new(GroupConfig::default().with_multiple_shown(true));
        group.register_screen("x", plain_screen()).unwrap();
        group.register_screen("y", plain_screen()).unwrap();
        group.show_screens(&[id("x"), id("y")], false).unwrap();
        assert_eq!(group.history_depth(), 1);

        // Two screens hide, exactly one new entry.
        group.hide_all_screens();
        assert_eq!(group.history, vec![set(&["x", "y"]), set(&[])]);
    }

    #[test]
    fn test_exclusive_show_with_fades_converges() {
        let mut group = ScreenGroup::default();
        group.register_screen("x", fading_screen(0.5)).unwrap();
        group.register_screen("y", fading_screen(0.5)).unwrap();

        group.show_screen(&id("x"), false).unwrap();
        group.tick(1.0);
        assert_eq!(shown_ids(&group), vec!["x"]);
        assert_eq!(group.history, vec![set(&[]), set(&["x"])]);

        // Showing Y fades X out and Y in; after the fades commit the
        // exclusivity invariant and history hold.
        group.show_screen(&id("y"), false).unwrap();
        group.tick(0.25);
        assert!(group.screen(&id("y")).unwrap().is_fading());
        group.tick(1.0);

        assert_eq!(shown_ids(&group), vec!["y"]);
        assert_eq!(group.history.last(), Some(&set(&["y"])));
        assert!(group.shown_screens().count() <= 1);
    }

    #[test]
    fn test_mixed_fade_durations_keep_history_exclusive() {
        let mut group = ScreenGroup::default();
        group.register_screen("x", fading_screen(0.5)).unwrap();
        group.register_screen("y", fading_screen(0.1)).unwrap();

        group.show_screen(&id("x"), false).unwrap();
        group.tick(1.0);

        // y commits while x's longer hide fade is still in flight; the
        // leaving screen must not be recorded alongside y.
        group.show_screen(&id("y"), false).unwrap();
        group.tick(0.2);
        assert!(group.screen(&id("y")).unwrap().is_shown());
        assert!(group.screen(&id("x")).unwrap().is_fading());
        assert!(group.history.iter().all(|entry| entry.len() <= 1));

        group.tick(1.0);
        assert_eq!(group.history.last(), Some(&set(&["y"])));

        // Back-navigation to the current entry is an identity.
        let before = group.shown_set();
        group.go_back(0).unwrap();
        assert_eq!(group.shown_set(), before);
        assert_eq!(group.history.last(), Some(&set(&["y"])));
    }

    #[test]
    fn test_go_back_multi_entry_in_exclusive_group_restores_first() {
        let mut group = xy_group();
        group.show_screen(&id("y"), false).unwrap();
        // A multi-screen entry (from an older recording) restores the
        // first of its screens in registration order instead of failing.
        group.history.push(set(&["x", "y"]));

        group.go_back(0).unwrap();
        assert_eq!(shown_ids(&group), vec!["x"]);
        assert_eq!(group.history.last(), Some(&set(&["x"])));
    }

    #[test]
    fn test_group_events_tagged_with_ids() {
        let mut group = xy_group();
        group.show_screen(&id("x"), false).unwrap();
        group.show_screen(&id("y"), false).unwrap();

        let events = group.take_events();
        assert!(events.contains(&(id("x"), ScreenEvent::Shown)));
        assert!(events.contains(&(id("x"), ScreenEvent::Hidden)));
        assert!(events.contains(&(id("y"), ScreenEvent::Shown)));
        assert!(group.take_events().is_empty());
    }

    #[test]
    fn test_start_seeds_history() {
        let mut group = ScreenGroup::new(
            GroupConfig::default().with_hide_all_on_start(true),
        );
        let shown = Screen::new(HeadlessSurface::new()).with_shown(true);
        group.register_screen("splash", shown).unwrap();

        group.start();
        assert!(shown_ids(&group).is_empty());
        assert_eq!(group.history, vec![set(&[])]);
        assert!(group.take_events().is_empty());
    }

    #[test]
    fn test_paused_group_still_runs_unscaled_fades() {
        let mut group = ScreenGroup::default();
        let menu = Screen::new(HeadlessSurface::new()).with_fade(
            FadeConfig::fade(0.5)
                .with_easing(Easing::Linear)
                .with_unscaled_time(true),
        );
        group.register_screen("menu", menu).unwrap();
        group.register_screen("hud", fading_screen(0.5)).unwrap();
        group.set_time_scale(0.0);

        group.show_screen(&id("menu"), false).unwrap();
        group.tick(1.0);
        assert_eq!(shown_ids(&group), vec!["menu"]);
    }
}
