//! Carousel gesture physics
//!
//! Converts drag gestures into page transitions. The physics owns the
//! committed page cursor and the live drag session; layout geometry is
//! delegated to [`PageLayout`] and stays pure.
//!
//! The state machine is two-phase (`Idle` ⇄ `Dragging`):
//!
//! - drag-start opens a session and interrupts any settle animation
//! - drag updates move the row with the pointer and report an optimistic
//!   page index to the external binding
//! - drag-end resolves the momentum-adjusted translation to a destination
//!   page, commits it, and settles the row; the live translation never
//!   survives the session
//!
//! A drag abandoned by the host settles exactly like a release with no
//! velocity overshoot, so the carousel never freezes mid-offset.

use std::sync::{Arc, Mutex, Weak};

use glide_animation::{AnimationScheduler, Spring, SpringId};
use glide_core::events::event_types;
use glide_core::fsm::{DragPhase, StateTransitions};

use crate::binding::PageBinding;
use crate::config::{CarouselConfig, Motion};
use crate::layout::PageLayout;

/// Offsets closer than this to the resting position snap instead of animating
const SETTLE_SNAP_DISTANCE: f32 = 0.5;

/// Physics state for one carousel instance
pub struct CarouselPhysics {
    /// Committed, settled page
    page: usize,
    /// Last index pushed to the binding (optimistic during a drag)
    reported_page: usize,
    /// Live drag translation; 0 outside a drag session
    translation_x: f32,
    /// Current gesture phase
    pub state: DragPhase,
    /// Derived layout, recomputed on measure/config change
    layout: PageLayout,
    /// Configuration
    pub config: CarouselConfig,
    container_width: f32,
    item_count: usize,
    /// Optional external index mirror
    binding: Option<PageBinding>,
    /// Settle spring (None when not animating)
    settle_spring: Option<SpringId>,
    /// Rendered offset while a settle animation runs
    animated_offset: Option<f32>,
    /// Weak reference to the animation scheduler
    scheduler: Weak<Mutex<AnimationScheduler>>,
}

/// Shared handle to carousel physics for external access
pub type SharedCarouselPhysics = Arc<Mutex<CarouselPhysics>>;

impl Default for CarouselPhysics {
    fn default() -> Self {
        Self {
            page: 0,
            reported_page: 0,
            translation_x: 0.0,
            state: DragPhase::Idle,
            layout: PageLayout::default(),
            config: CarouselConfig::default(),
            container_width: 0.0,
            item_count: 0,
            binding: None,
            settle_spring: None,
            animated_offset: None,
            scheduler: Weak::new(),
        }
    }
}

impl CarouselPhysics {
    /// Create new physics with the given config
    pub fn new(config: CarouselConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Create new physics with a scheduler for spring-driven settling
    pub fn with_scheduler(
        config: CarouselConfig,
        scheduler: &Arc<Mutex<AnimationScheduler>>,
    ) -> Self {
        Self {
            config,
            scheduler: Arc::downgrade(scheduler),
            ..Default::default()
        }
    }

    /// Attach an animation scheduler for spring-driven settling
    pub fn set_scheduler(&mut self, scheduler: &Arc<Mutex<AnimationScheduler>>) {
        self.scheduler = Arc::downgrade(scheduler);
    }

    // =========================================================================
    // Layout inputs
    // =========================================================================

    /// Replace the configuration and re-derive layout
    pub fn set_config(&mut self, config: CarouselConfig) {
        self.config = config;
        self.relayout();
    }

    /// Record a container measurement
    pub fn measure(&mut self, width: f32) {
        let width = width.max(0.0);
        if width == self.container_width {
            return;
        }
        self.container_width = width;
        self.relayout();
    }

    /// Record the item count
    pub fn set_item_count(&mut self, count: usize) {
        if count == self.item_count {
            return;
        }
        self.item_count = count;
        self.relayout();
    }

    fn relayout(&mut self) {
        self.layout = PageLayout::derive(&self.config, self.container_width, self.item_count);
        self.cancel_settle();
        if self.page > self.layout.max_page {
            self.page = self.layout.max_page;
        }
        self.report(self.page);
        tracing::trace!(
            "layout item_width={:.1} peek={:.1} max_page={}",
            self.layout.item_width,
            self.layout.peek_px,
            self.layout.max_page
        );
    }

    /// Current derived layout
    pub fn layout(&self) -> PageLayout {
        self.layout
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    /// Committed page index
    pub fn page(&self) -> usize {
        self.page
    }

    /// Horizontal row offset for the current frame
    pub fn offset_x(&self) -> f32 {
        self.animated_offset
            .unwrap_or_else(|| self.layout.offset(self.page, self.translation_x))
    }

    /// Attach an external index mirror, adopting its seeded value
    pub fn bind(&mut self, binding: PageBinding) {
        let initial = binding.take_pending().unwrap_or_else(|| binding.get());
        let page = initial.min(self.layout.max_page);
        self.cancel_settle();
        self.page = page;
        self.reported_page = page;
        binding.publish(page);
        self.binding = Some(binding);
    }

    fn report(&mut self, page: usize) {
        if page == self.reported_page {
            return;
        }
        self.reported_page = page;
        if let Some(binding) = &self.binding {
            binding.publish(page);
        }
    }

    /// Apply a pending host write from the binding, if any.
    ///
    /// Writes arriving during a drag are discarded; the binding is never
    /// the source of truth while a gesture is in progress.
    pub fn apply_binding_writes(&mut self) {
        let Some(pending) = self.binding.as_ref().and_then(|b| b.take_pending()) else {
            return;
        };
        if self.state.is_active() {
            tracing::trace!("binding write {} discarded during drag", pending);
            return;
        }
        self.set_page(pending);
    }

    /// Jump to a page (clamped), settling from the current offset.
    ///
    /// Ignored while a drag is in progress.
    pub fn set_page(&mut self, page: usize) {
        if self.state.is_active() {
            return;
        }
        let page = page.min(self.layout.max_page);
        let from = self.offset_x();
        self.page = page;
        self.report(page);
        self.start_settle(from);
    }

    /// Advance to the next page
    pub fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1));
    }

    /// Return to the previous page
    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    // =========================================================================
    // Gesture input
    // =========================================================================

    /// Called when a drag gesture begins
    pub fn on_drag_start(&mut self) {
        let Some(next) = self.state.on_event(event_types::DRAG_START) else {
            return;
        };
        self.state = next;
        self.cancel_settle();
        self.translation_x = 0.0;
    }

    /// Called for each drag update with the live translation from the
    /// drag origin.
    ///
    /// Moves the row with the pointer and reports the optimistic
    /// destination to the binding; the committed page is untouched.
    pub fn on_drag(&mut self, translation_x: f32) {
        if !self.state.is_active() {
            // An update with no preceding start still opens a session
            self.on_drag_start();
        }
        self.translation_x = translation_x;
        let optimistic = self.layout.resolve_page(self.page, translation_x);
        tracing::trace!(
            "drag translation={:.1} page={} optimistic={}",
            translation_x,
            self.page,
            optimistic
        );
        self.report(optimistic);
    }

    /// Called when the drag is released.
    ///
    /// `predicted_translation_x` is the release translation adjusted for
    /// velocity; it alone decides the destination page. The final live
    /// translation seeds the settle animation's starting offset.
    pub fn on_drag_end(&mut self, translation_x: f32, predicted_translation_x: f32) {
        let Some(next) = self.state.on_event(event_types::DRAG_END) else {
            return;
        };
        self.state = next;
        self.finish_drag(translation_x, predicted_translation_x);
    }

    /// Called when the host abandons the drag (gesture interruption).
    ///
    /// Equivalent to a release with `predicted == live`: no velocity
    /// overshoot, and the carousel always settles to a valid page.
    pub fn on_drag_cancel(&mut self) {
        let translation = self.translation_x;
        let Some(next) = self.state.on_event(event_types::DRAG_CANCEL) else {
            return;
        };
        self.state = next;
        self.finish_drag(translation, translation);
    }

    fn finish_drag(&mut self, translation_x: f32, predicted_translation_x: f32) {
        let from = self.layout.offset(self.page, translation_x);
        let new_page = self.layout.resolve_page(self.page, predicted_translation_x);
        tracing::debug!(
            "drag end predicted={:.1} page {} -> {}",
            predicted_translation_x,
            self.page,
            new_page
        );
        self.translation_x = 0.0;
        self.page = new_page;
        self.report(new_page);
        self.start_settle(from);
    }

    // =========================================================================
    // Settling
    // =========================================================================

    fn start_settle(&mut self, from: f32) {
        self.cancel_settle();
        let target = self.layout.offset(self.page, 0.0);
        if (from - target).abs() < SETTLE_SNAP_DISTANCE {
            return;
        }
        // Eased settling is applied entirely by the renderer via the
        // frame hint; only springs are driven here
        let Motion::Spring(config) = self.config.settle else {
            return;
        };
        let Some(scheduler_arc) = self.scheduler.upgrade() else {
            // No scheduler - snap to the resting offset immediately
            return;
        };

        let mut spring = Spring::new(config, from);
        spring.set_target(target);
        let id = scheduler_arc.lock().unwrap().add_spring(spring);
        self.settle_spring = Some(id);
        self.animated_offset = Some(from);
    }

    fn cancel_settle(&mut self) {
        self.animated_offset = None;
        let Some(id) = self.settle_spring.take() else {
            return;
        };
        if let Some(scheduler) = self.scheduler.upgrade() {
            scheduler.lock().unwrap().remove_spring(id);
        }
    }

    /// Read the settle spring after the host advances the scheduler.
    ///
    /// Returns true while the settle animation is still running.
    pub fn tick(&mut self) -> bool {
        let Some(id) = self.settle_spring else {
            return false;
        };
        let Some(scheduler_arc) = self.scheduler.upgrade() else {
            // Scheduler dropped mid-animation; snap to rest
            self.cancel_settle();
            return false;
        };

        let scheduler = scheduler_arc.lock().unwrap();
        let Some(spring) = scheduler.get_spring(id) else {
            drop(scheduler);
            self.settle_spring = None;
            self.animated_offset = None;
            return false;
        };

        if spring.is_settled() {
            drop(scheduler);
            self.cancel_settle();
            false
        } else {
            self.animated_offset = Some(spring.value());
            true
        }
    }

    /// Check if a settle animation is active
    pub fn is_animating(&self) -> bool {
        self.settle_spring.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Peek;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn reference_physics() -> CarouselPhysics {
        // 7 items, 2 per page, no spacing, no peek, 300px wide:
        // max_page = 5, item_width = 150
        let config = CarouselConfig {
            items_per_page: 2,
            spacing: 0.0,
            peek: Peek::Constant(0.0),
            ..Default::default()
        };
        let mut physics = CarouselPhysics::new(config);
        physics.set_item_count(7);
        physics.measure(300.0);
        physics
    }

    #[test]
    fn test_drag_cycle_commits_page() {
        let mut physics = reference_physics();

        physics.on_drag_start();
        assert!(physics.state.is_active());
        physics.on_drag(-80.0);
        // Live translation tracks the pointer raw
        assert_eq!(physics.offset_x(), -80.0);
        assert_eq!(physics.page(), 0);

        physics.on_drag_end(-150.0, -170.0);
        assert!(!physics.state.is_active());
        assert_eq!(physics.page(), 1);
        // Without a scheduler the offset snaps to rest
        assert_eq!(physics.offset_x(), -150.0);
    }

    #[test]
    fn test_short_drag_stays_on_page() {
        let mut physics = reference_physics();
        physics.on_drag_start();
        physics.on_drag(-70.0);
        physics.on_drag_end(-70.0, -70.0);
        assert_eq!(physics.page(), 0);
        assert_eq!(physics.offset_x(), 0.0);
    }

    #[test]
    fn test_extreme_fling_is_limited_to_items_per_page() {
        let mut physics = reference_physics();
        physics.on_drag_start();
        physics.on_drag_end(-50.0, -10_000.0);
        assert_eq!(physics.page(), 2);
    }

    #[test]
    fn test_cancel_matches_end_without_overshoot() {
        let mut a = reference_physics();
        a.on_drag_start();
        a.on_drag(-160.0);
        a.on_drag_cancel();

        let mut b = reference_physics();
        b.on_drag_start();
        b.on_drag(-160.0);
        b.on_drag_end(-160.0, -160.0);

        assert_eq!(a.page(), b.page());
        assert_eq!(a.offset_x(), b.offset_x());
        assert_eq!(a.page(), 1);
    }

    #[test]
    fn test_page_invariant_after_drag_sequences() {
        let mut physics = reference_physics();
        let translations = [-400.0, -9000.0, 320.0, -10.0, 5000.0, -260.0, -260.0, -260.0];
        for t in translations {
            physics.on_drag_start();
            physics.on_drag(t / 2.0);
            physics.on_drag_end(t / 2.0, t);
            assert!(physics.page() <= physics.layout().max_page);
            assert_eq!(physics.offset_x(), physics.layout().offset(physics.page(), 0.0));
        }
    }

    #[test]
    fn test_optimistic_index_reported_during_drag() {
        let mut physics = reference_physics();
        let binding = PageBinding::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        binding.on_change(move |page| s.lock().unwrap().push(page));
        physics.bind(binding.clone());

        physics.on_drag_start();
        physics.on_drag(-40.0); // optimistic 0, unchanged
        physics.on_drag(-160.0); // optimistic 1
        physics.on_drag(-20.0); // back to 0
        physics.on_drag_end(-160.0, -170.0); // committed 1

        assert_eq!(*seen.lock().unwrap(), vec![1, 0, 1]);
        assert_eq!(binding.get(), 1);
    }

    #[test]
    fn test_bind_adopts_seeded_initial_page() {
        let mut physics = reference_physics();
        physics.bind(PageBinding::with_initial(3));
        assert_eq!(physics.page(), 3);

        // Out-of-range seeds clamp
        let mut physics = reference_physics();
        physics.bind(PageBinding::with_initial(99));
        assert_eq!(physics.page(), 5);
    }

    #[test]
    fn test_binding_write_applies_next_frame_and_loses_to_drag() {
        let mut physics = reference_physics();
        let binding = PageBinding::new();
        physics.bind(binding.clone());

        binding.set(4);
        physics.apply_binding_writes();
        assert_eq!(physics.page(), 4);
        assert_eq!(binding.get(), 4);

        physics.on_drag_start();
        binding.set(0);
        physics.apply_binding_writes();
        assert_eq!(physics.page(), 4);
        physics.on_drag_end(0.0, 0.0);
        assert_eq!(physics.page(), 4);
    }

    #[test]
    fn test_set_page_clamps_and_navigates() {
        let mut physics = reference_physics();
        physics.set_page(99);
        assert_eq!(physics.page(), 5);

        physics.prev_page();
        assert_eq!(physics.page(), 4);
        physics.next_page();
        assert_eq!(physics.page(), 5);
        physics.next_page();
        assert_eq!(physics.page(), 5);

        physics.set_page(0);
        physics.prev_page();
        assert_eq!(physics.page(), 0);
    }

    #[test]
    fn test_set_page_ignored_during_drag() {
        let mut physics = reference_physics();
        physics.on_drag_start();
        physics.set_page(3);
        assert_eq!(physics.page(), 0);
    }

    #[test]
    fn test_shrinking_item_count_clamps_cursor() {
        let mut physics = reference_physics();
        physics.set_page(5);
        physics.set_item_count(4);
        // 4 items, 2 per page -> max_page = 2
        assert_eq!(physics.layout().max_page, 2);
        assert_eq!(physics.page(), 2);
    }

    #[test]
    fn test_zero_width_drag_keeps_index() {
        let config = CarouselConfig::default();
        let mut physics = CarouselPhysics::new(config);
        physics.set_item_count(5);
        physics.measure(0.0);

        physics.on_drag_start();
        physics.on_drag_end(-500.0, -500.0);
        assert_eq!(physics.page(), 0);
        assert!(physics.offset_x().is_finite());
    }

    #[test]
    fn test_spring_settle_with_scheduler() {
        let scheduler = Arc::new(Mutex::new(AnimationScheduler::new()));
        let config = CarouselConfig {
            items_per_page: 2,
            spacing: 0.0,
            peek: Peek::Constant(0.0),
            ..Default::default()
        };
        let mut physics = CarouselPhysics::with_scheduler(config, &scheduler);
        physics.set_item_count(7);
        physics.measure(300.0);

        // A flick: released at -80 but momentum projects past one page
        physics.on_drag_start();
        physics.on_drag(-80.0);
        physics.on_drag_end(-80.0, -170.0);
        assert!(physics.is_animating());
        // The animation starts from where the row was released
        assert_eq!(physics.offset_x(), -80.0);

        let mut frames = 0;
        while physics.tick() && frames < 600 {
            scheduler.lock().unwrap().advance(1.0 / 60.0);
            frames += 1;
        }
        assert!(frames < 600, "settle did not finish");
        assert!(!physics.is_animating());
        assert_eq!(physics.offset_x(), -150.0);
        assert_eq!(scheduler.lock().unwrap().spring_count(), 0);
    }

    #[test]
    fn test_drag_start_interrupts_settle() {
        let scheduler = Arc::new(Mutex::new(AnimationScheduler::new()));
        let config = CarouselConfig {
            items_per_page: 2,
            peek: Peek::Constant(0.0),
            ..Default::default()
        };
        let mut physics = CarouselPhysics::with_scheduler(config, &scheduler);
        physics.set_item_count(7);
        physics.measure(300.0);

        physics.on_drag_start();
        physics.on_drag(-80.0);
        physics.on_drag_end(-80.0, -170.0);
        assert!(physics.is_animating());

        physics.on_drag_start();
        assert!(!physics.is_animating());
        assert_eq!(scheduler.lock().unwrap().spring_count(), 0);
    }

    #[test]
    fn test_report_counts_committed_transitions() {
        let mut physics = reference_physics();
        let binding = PageBinding::new();
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        binding.on_change(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        physics.bind(binding);

        physics.set_page(2);
        physics.set_page(2); // no change, no notification
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
