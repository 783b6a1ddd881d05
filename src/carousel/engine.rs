use std::time::Duration;
use tracing::{debug, trace};

/// Horizontal distance a drag must exceed to count as a swipe.
pub const DRAG_THRESHOLD_PX: f64 = 50.0;

/// Per-instance carousel settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    /// Time between autoplay advances
    pub interval: Duration,
    /// Minimum |drag offset| in px that triggers navigation on release
    pub drag_threshold: f64,
    /// Whether the carousel starts playing when mounted
    pub autoplay: bool,
}

impl CarouselConfig {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            drag_threshold: DRAG_THRESHOLD_PX,
            autoplay: true,
        }
    }

    pub fn with_drag_threshold(mut self, threshold: f64) -> Self {
        self.drag_threshold = threshold;
        self
    }

    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Preset: testimonials slider (6s per quote)
    pub fn testimonials() -> Self {
        Self::new(Duration::from_millis(6000))
    }

    /// Preset: career-level cards (5s per level)
    pub fn career_levels() -> Self {
        Self::new(Duration::from_millis(5000))
    }

    /// Preset: image gallery, navigated by hand only
    pub fn gallery() -> Self {
        Self::new(Duration::from_millis(5000)).with_autoplay(false)
    }

    fn interval_ms(&self) -> u64 {
        u64::try_from(self.interval.as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::career_levels()
    }
}

/// Snapshot of a carousel.
///
/// Invariants: `current_index < item_count` when `item_count > 0`, otherwise
/// `current_index == 0`; `is_dragging` implies `!is_playing`.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState {
    pub current_index: usize,
    pub item_count: usize,
    pub is_playing: bool,
    pub is_hovered: bool,
    pub is_dragging: bool,
    pub drag_start_x: f64,
    pub drag_offset_x: f64,
}

impl CarouselState {
    fn new(item_count: usize, is_playing: bool) -> Self {
        Self {
            current_index: 0,
            item_count,
            is_playing,
            is_hovered: false,
            is_dragging: false,
            drag_start_x: 0.0,
            drag_offset_x: 0.0,
        }
    }
}

/// Navigation caused by releasing a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Dragged right: show the previous item
    Previous,
    /// Dragged left: show the next item
    Next,
}

/// Autoplay/drag/index state machine shared by every slider on the site.
///
/// Time is supplied by the caller as a monotonic millisecond clock
/// (`now_ms`). The engine owns a single autoplay timer slot: every change
/// to a gating input cancels the slot first and re-arms it only while
/// `is_playing && !is_hovered && !is_dragging && item_count > 1`, so a tick
/// can never apply an advance scheduled under a previous state.
#[derive(Debug, Clone)]
pub struct CarouselEngine {
    state: CarouselState,
    config: CarouselConfig,
    /// Deadline of the armed autoplay timer
    timer_due_ms: Option<u64>,
    mounted: bool,
}

impl CarouselEngine {
    /// Mount a carousel over `item_count` items at time `now_ms`.
    pub fn new(item_count: usize, config: CarouselConfig, now_ms: u64) -> Self {
        let mut engine = Self {
            state: CarouselState::new(item_count, config.autoplay && item_count > 0),
            config,
            timer_due_ms: None,
            mounted: true,
        };
        engine.reschedule(now_ms);
        engine
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Deadline of the pending autoplay advance, if one is armed.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.timer_due_ms
    }

    /// Nothing to render and nothing to transition.
    fn is_inert(&self) -> bool {
        !self.mounted || self.state.item_count == 0
    }

    fn gate_open(&self) -> bool {
        self.mounted
            && self.state.is_playing
            && !self.state.is_hovered
            && !self.state.is_dragging
            && self.state.item_count > 1
    }

    fn cancel_timer(&mut self) {
        if self.timer_due_ms.take().is_some() {
            trace!("Autoplay timer cancelled");
        }
    }

    fn reschedule(&mut self, now_ms: u64) {
        self.cancel_timer();
        if self.gate_open() {
            self.timer_due_ms = Some(now_ms.saturating_add(self.config.interval_ms()));
        }
    }

    // ==================== Index Transitions ====================

    /// Move to the next item, wrapping. Returns whether the index changed.
    pub fn advance(&mut self) -> bool {
        if self.is_inert() || self.state.item_count < 2 {
            return false;
        }
        self.state.current_index = (self.state.current_index + 1) % self.state.item_count;
        true
    }

    /// Move to the previous item, wrapping. Returns whether the index changed.
    pub fn retreat(&mut self) -> bool {
        if self.is_inert() || self.state.item_count < 2 {
            return false;
        }
        let count = self.state.item_count;
        self.state.current_index = (self.state.current_index + count - 1) % count;
        true
    }

    /// Jump to `index`; out-of-range indices are ignored.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if self.is_inert() || index >= self.state.item_count {
            debug!(
                "Ignoring jump to {} (item_count={})",
                index, self.state.item_count
            );
            return false;
        }
        let changed = self.state.current_index != index;
        self.state.current_index = index;
        changed
    }

    // ==================== Autoplay Gating ====================

    pub fn play(&mut self, now_ms: u64) {
        self.set_playing(true, now_ms);
    }

    pub fn pause(&mut self, now_ms: u64) {
        self.set_playing(false, now_ms);
    }

    pub fn toggle_play(&mut self, now_ms: u64) {
        let playing = !self.state.is_playing;
        self.set_playing(playing, now_ms);
    }

    fn set_playing(&mut self, playing: bool, now_ms: u64) {
        if self.is_inert() || self.state.is_playing == playing {
            return;
        }
        if playing && self.state.is_dragging {
            debug!("Ignoring play while dragging");
            return;
        }
        self.cancel_timer();
        self.state.is_playing = playing;
        self.reschedule(now_ms);
    }

    /// Pointer entered (`true`) or left (`false`) the carousel.
    pub fn set_hovered(&mut self, hovered: bool, now_ms: u64) {
        if self.is_inert() || self.state.is_hovered == hovered {
            return;
        }
        self.cancel_timer();
        self.state.is_hovered = hovered;
        self.reschedule(now_ms);
    }

    // ==================== Drag Transitions ====================

    /// Pointer down at `x`. Suspends autoplay.
    pub fn begin_drag(&mut self, x: f64, now_ms: u64) {
        if self.is_inert() {
            return;
        }
        self.cancel_timer();
        self.state.is_dragging = true;
        self.state.is_playing = false;
        self.state.drag_start_x = x;
        self.state.drag_offset_x = 0.0;
        self.reschedule(now_ms);
    }

    /// Pointer moved to `x` while dragging.
    pub fn update_drag(&mut self, x: f64) {
        if self.is_inert() || !self.state.is_dragging {
            return;
        }
        self.state.drag_offset_x = x - self.state.drag_start_x;
    }

    /// Pointer released. Navigates when the drag exceeded the threshold:
    /// a rightward drag shows the previous item, a leftward one the next.
    pub fn end_drag(&mut self, now_ms: u64) -> Option<Swipe> {
        if self.is_inert() || !self.state.is_dragging {
            return None;
        }

        let offset = self.state.drag_offset_x;
        let swipe = if offset.abs() > self.config.drag_threshold {
            if offset > 0.0 {
                self.retreat();
                Some(Swipe::Previous)
            } else {
                self.advance();
                Some(Swipe::Next)
            }
        } else {
            None
        };

        self.state.is_dragging = false;
        self.state.drag_offset_x = 0.0;
        self.reschedule(now_ms);
        swipe
    }

    // ==================== Lifecycle ====================

    /// Replace the item list length (e.g., after content loaded), clamping
    /// the index into range.
    pub fn set_item_count(&mut self, item_count: usize, now_ms: u64) {
        if !self.mounted {
            return;
        }
        self.cancel_timer();
        let was_empty = self.state.item_count == 0;
        if item_count == 0 {
            self.state = CarouselState::new(0, false);
        } else {
            self.state.item_count = item_count;
            if self.state.current_index >= item_count {
                self.state.current_index = item_count - 1;
            }
            if was_empty {
                // Same starting state as mounting with content
                self.state.is_playing = self.config.autoplay;
            }
        }
        self.reschedule(now_ms);
    }

    /// Fire the autoplay timer if it is due at `now_ms`.
    ///
    /// At most one advance per call; the timer re-arms one interval after
    /// `now_ms`. A tick without an armed timer (paused, hovered, dragging,
    /// unmounted) does nothing. Returns whether an advance was applied.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.timer_due_ms {
            Some(due) if now_ms >= due => {
                let advanced = self.advance();
                self.reschedule(now_ms);
                advanced
            }
            _ => false,
        }
    }

    /// Tear down: cancel the timer unconditionally and ignore all further
    /// input.
    pub fn unmount(&mut self) {
        self.cancel_timer();
        self.mounted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn engine(item_count: usize) -> CarouselEngine {
        CarouselEngine::new(item_count, CarouselConfig::career_levels(), 0)
    }

    // ==================== Index Tests ====================

    #[test]
    fn test_advance_wraps() {
        let mut carousel = engine(3);
        assert!(carousel.advance());
        assert!(carousel.advance());
        assert_eq!(carousel.current_index(), 2);
        assert!(carousel.advance());
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn test_retreat_wraps() {
        let mut carousel = engine(4);
        assert!(carousel.retreat());
        assert_eq!(carousel.current_index(), 3);
    }

    #[test]
    fn test_jump_to_bounds() {
        let mut carousel = engine(4);
        assert!(carousel.jump_to(3));
        assert_eq!(carousel.current_index(), 3);
        assert!(!carousel.jump_to(4));
        assert_eq!(carousel.current_index(), 3);
        assert!(!carousel.jump_to(3));
    }

    #[test]
    fn test_single_item_never_moves() {
        let mut carousel = engine(1);
        assert!(!carousel.advance());
        assert!(!carousel.retreat());
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.next_deadline_ms(), None);
    }

    #[test]
    fn test_empty_carousel_is_inert() {
        let mut carousel = engine(0);
        assert!(!carousel.state().is_playing);

        carousel.play(0);
        carousel.begin_drag(10.0, 0);
        carousel.update_drag(200.0);
        assert_eq!(carousel.end_drag(0), None);
        assert!(!carousel.jump_to(0));
        assert!(!carousel.tick(100_000));

        assert_eq!(carousel.current_index(), 0);
        assert!(!carousel.state().is_dragging);
        assert!(!carousel.state().is_playing);
    }

    // ==================== Autoplay Tests ====================

    #[test]
    fn test_autoplay_advances_after_interval() {
        let mut carousel = CarouselEngine::new(4, CarouselConfig::career_levels(), 0);
        assert!(carousel.state().is_playing);
        assert_eq!(carousel.next_deadline_ms(), Some(5000));

        assert!(!carousel.tick(4999));
        assert_eq!(carousel.current_index(), 0);

        assert!(carousel.tick(5000));
        assert_eq!(carousel.current_index(), 1);
        assert_eq!(carousel.next_deadline_ms(), Some(10_000));
    }

    #[test]
    fn test_hover_freezes_index() {
        let mut carousel = CarouselEngine::new(4, CarouselConfig::career_levels(), 0);
        carousel.set_hovered(true, 2500);
        assert_eq!(carousel.next_deadline_ms(), None);

        for now in (5000..60_000).step_by(1000) {
            assert!(!carousel.tick(now));
        }
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn test_unhover_restarts_full_interval() {
        let mut carousel = CarouselEngine::new(4, CarouselConfig::testimonials(), 0);
        carousel.set_hovered(true, 1000);
        carousel.set_hovered(false, 3000);

        assert_eq!(carousel.next_deadline_ms(), Some(9000));
        assert!(!carousel.tick(6000));
        assert!(carousel.tick(9000));
    }

    #[test]
    fn test_pause_discards_pending_advance() {
        let mut carousel = engine(4);
        carousel.pause(4999);
        assert!(!carousel.tick(5000));
        assert_eq!(carousel.current_index(), 0);

        carousel.play(6000);
        assert_eq!(carousel.next_deadline_ms(), Some(11_000));
    }

    #[test]
    fn test_toggle_play() {
        let mut carousel = engine(3);
        carousel.toggle_play(0);
        assert!(!carousel.state().is_playing);
        carousel.toggle_play(0);
        assert!(carousel.state().is_playing);
    }

    #[test]
    fn test_gallery_preset_does_not_autoplay() {
        let mut carousel = CarouselEngine::new(5, CarouselConfig::gallery(), 0);
        assert!(!carousel.state().is_playing);
        assert!(!carousel.tick(60_000));
    }

    #[test]
    fn test_unmount_cancels_timer_and_ignores_input() {
        let mut carousel = engine(4);
        carousel.unmount();

        assert_eq!(carousel.next_deadline_ms(), None);
        assert!(!carousel.tick(5000));
        carousel.play(5000);
        assert!(!carousel.advance());
        assert_eq!(carousel.next_deadline_ms(), None);
        assert_eq!(carousel.current_index(), 0);
    }

    // ==================== Drag Tests ====================

    #[test]
    fn test_swipe_left_advances() {
        let mut carousel = engine(4);
        carousel.begin_drag(100.0, 1000);
        carousel.update_drag(40.0);
        assert_eq!(carousel.state().drag_offset_x, -60.0);

        assert_eq!(carousel.end_drag(1200), Some(Swipe::Next));
        assert_eq!(carousel.current_index(), 1);
        assert!(!carousel.state().is_dragging);
        assert_eq!(carousel.state().drag_offset_x, 0.0);
    }

    #[test]
    fn test_swipe_right_retreats() {
        let mut carousel = engine(4);
        carousel.begin_drag(100.0, 0);
        carousel.update_drag(180.0);
        assert_eq!(carousel.end_drag(0), Some(Swipe::Previous));
        assert_eq!(carousel.current_index(), 3);
    }

    #[test]
    fn test_short_drag_does_not_navigate() {
        let mut carousel = engine(4);
        carousel.begin_drag(100.0, 0);
        carousel.update_drag(150.0);
        assert_eq!(carousel.end_drag(0), None);
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn test_drag_suspends_autoplay() {
        let mut carousel = engine(4);
        carousel.begin_drag(0.0, 4000);

        assert!(carousel.state().is_dragging);
        assert!(!carousel.state().is_playing);
        assert!(!carousel.tick(5000));

        carousel.play(4500);
        assert!(!carousel.state().is_playing);

        carousel.end_drag(4600);
        assert_eq!(carousel.next_deadline_ms(), None);
    }

    #[test]
    fn test_update_and_end_without_drag_are_ignored() {
        let mut carousel = engine(4);
        carousel.update_drag(300.0);
        assert_eq!(carousel.state().drag_offset_x, 0.0);
        assert_eq!(carousel.end_drag(0), None);
    }

    // ==================== Item Count Tests ====================

    #[test]
    fn test_set_item_count_clamps_index() {
        let mut carousel = engine(5);
        carousel.jump_to(4);
        carousel.set_item_count(2, 0);
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn test_content_arriving_starts_autoplay() {
        let mut carousel = CarouselEngine::new(0, CarouselConfig::testimonials(), 0);
        assert_eq!(carousel.next_deadline_ms(), None);

        carousel.set_item_count(3, 1000);
        assert!(carousel.state().is_playing);
        assert_eq!(carousel.next_deadline_ms(), Some(7000));

        carousel.set_item_count(0, 2000);
        assert_eq!(carousel.next_deadline_ms(), None);
        assert_eq!(carousel.current_index(), 0);
    }

    // ==================== Property Tests ====================

    #[derive(Debug, Clone)]
    enum Op {
        Advance,
        Retreat,
        JumpTo(usize),
        Play,
        Pause,
        Hover(bool),
        BeginDrag(f64),
        UpdateDrag(f64),
        EndDrag,
        Tick(u64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Advance),
            Just(Op::Retreat),
            (0usize..10).prop_map(Op::JumpTo),
            Just(Op::Play),
            Just(Op::Pause),
            any::<bool>().prop_map(Op::Hover),
            (-500.0f64..500.0).prop_map(Op::BeginDrag),
            (-500.0f64..500.0).prop_map(Op::UpdateDrag),
            Just(Op::EndDrag),
            (0u64..20_000).prop_map(Op::Tick),
        ]
    }

    fn apply(carousel: &mut CarouselEngine, op: &Op, now: u64) {
        match op {
            Op::Advance => {
                carousel.advance();
            }
            Op::Retreat => {
                carousel.retreat();
            }
            Op::JumpTo(i) => {
                carousel.jump_to(*i);
            }
            Op::Play => carousel.play(now),
            Op::Pause => carousel.pause(now),
            Op::Hover(h) => carousel.set_hovered(*h, now),
            Op::BeginDrag(x) => carousel.begin_drag(*x, now),
            Op::UpdateDrag(x) => carousel.update_drag(*x),
            Op::EndDrag => {
                carousel.end_drag(now);
            }
            Op::Tick(dt) => {
                carousel.tick(now + dt);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_advance_item_count_times_is_identity(
            item_count in 2usize..50,
            start in 0usize..50,
        ) {
            let mut carousel = engine(item_count);
            carousel.jump_to(start % item_count);
            let before = carousel.current_index();
            for _ in 0..item_count {
                carousel.advance();
            }
            prop_assert_eq!(carousel.current_index(), before);
        }

        #[test]
        fn prop_empty_carousel_stays_at_zero(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let mut carousel = engine(0);
            for (step, op) in ops.iter().enumerate() {
                apply(&mut carousel, op, step as u64 * 100);
                prop_assert_eq!(carousel.current_index(), 0);
            }
        }

        #[test]
        fn prop_invariants_hold(
            item_count in 1usize..8,
            ops in prop::collection::vec(op_strategy(), 0..60),
        ) {
            let mut carousel = engine(item_count);
            for (step, op) in ops.iter().enumerate() {
                apply(&mut carousel, op, step as u64 * 100);
                let state = carousel.state();
                prop_assert!(state.current_index < state.item_count);
                prop_assert!(!(state.is_dragging && state.is_playing));
                if state.is_hovered || state.is_dragging || !state.is_playing {
                    prop_assert_eq!(carousel.next_deadline_ms(), None);
                }
            }
        }
    }
}
