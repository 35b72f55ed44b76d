//! Paginated carousel widget
//!
//! A horizontally paginated row of items driven by drag gestures with
//! momentum-based page snapping. The widget owns the physics; the host
//! feeds it gesture and measurement events and renders the
//! [`RowFrame`] it produces each frame.
//!
//! # Example
//!
//! ```rust,ignore
//! use glide_carousel::prelude::*;
//!
//! let binding = PageBinding::new();
//! let mut cards = carousel(vec!["a", "b", "c", "d", "e"])
//!     .items_per_page(2)
//!     .spacing(8.0)
//!     .peek_px(16.0)
//!     .key_fn(|card| hash(card))
//!     .bind(&binding)
//!     .w(320.0);
//!
//! // Host event loop:
//! cards.handle_event(&Event::drag(-60.0));
//! cards.handle_event(&Event::drag_end(-60.0, -180.0));
//!
//! // Render:
//! let frame = cards.frame();
//! cards.render_items(|card, item| place_box(card, item.width));
//! row.translate_x(frame.offset_x);
//! ```
//!
//! Rendering, view-tree construction and platform event plumbing stay
//! host-side; the widget only deals in item keys, box widths, a row
//! offset, and an animation hint.

use std::sync::{Arc, Mutex};

use glide_animation::AnimationScheduler;
use glide_core::events::{event_types, Event, EventData, EventDispatcher};

use crate::binding::PageBinding;
use crate::config::{Motion, Peek};
use crate::layout::PageLayout;
use crate::physics::{CarouselPhysics, SharedCarouselPhysics};

// ============================================================================
// Render Output
// ============================================================================

/// Render output for one item: its stable key and rendered box width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemFrame {
    pub key: u64,
    pub width: f32,
}

/// Render output for one frame: fixed-width boxes laid out in a row, a
/// single horizontal offset for the whole row, and the settle hint
#[derive(Debug, Clone, PartialEq)]
pub struct RowFrame {
    /// Horizontal translation applied to the whole row
    pub offset_x: f32,
    /// Animation hint for offset changes due to settling; absent while
    /// tracking a live drag
    pub animate: Option<Motion>,
    /// Item slot width (spacing included)
    pub item_width: f32,
    pub items: Vec<ItemFrame>,
}

// ============================================================================
// Carousel Element
// ============================================================================

type KeyFn<T> = Box<dyn Fn(&T, usize) -> u64 + Send>;

/// A drag-driven, paginated carousel over an ordered item list
///
/// Items carry a stable identity via the key function; by default the
/// position is used, so callers whose lists reorder or filter upstream
/// should supply [`Carousel::key_fn`].
pub struct Carousel<T> {
    items: Vec<T>,
    key_fn: KeyFn<T>,
    physics: SharedCarouselPhysics,
    handlers: EventDispatcher,
}

impl<T> Carousel<T> {
    /// Create a carousel over the given items
    pub fn new(items: Vec<T>) -> Self {
        let mut physics = CarouselPhysics::default();
        physics.set_item_count(items.len());
        let physics = Arc::new(Mutex::new(physics));
        let handlers = Self::create_internal_handlers(Arc::clone(&physics));

        Self {
            items,
            key_fn: Box::new(|_, position| position as u64),
            physics,
            handlers,
        }
    }

    /// Create with external shared physics (for state persistence)
    pub fn with_physics(items: Vec<T>, physics: SharedCarouselPhysics) -> Self {
        physics.lock().unwrap().set_item_count(items.len());
        let handlers = Self::create_internal_handlers(Arc::clone(&physics));

        Self {
            items,
            key_fn: Box::new(|_, position| position as u64),
            physics,
            handlers,
        }
    }

    /// Create internal event handlers that update physics state
    fn create_internal_handlers(physics: SharedCarouselPhysics) -> EventDispatcher {
        let mut handlers = EventDispatcher::new();

        handlers.on(event_types::DRAG_START, {
            let physics = Arc::clone(&physics);
            move |_| physics.lock().unwrap().on_drag_start()
        });

        handlers.on(event_types::DRAG, {
            let physics = Arc::clone(&physics);
            move |event| {
                if let EventData::Drag { translation_x } = event.data {
                    physics.lock().unwrap().on_drag(translation_x);
                }
            }
        });

        handlers.on(event_types::DRAG_END, {
            let physics = Arc::clone(&physics);
            move |event| {
                if let EventData::DragEnd {
                    translation_x,
                    predicted_translation_x,
                } = event.data
                {
                    physics
                        .lock()
                        .unwrap()
                        .on_drag_end(translation_x, predicted_translation_x);
                }
            }
        });

        handlers.on(event_types::DRAG_CANCEL, {
            let physics = Arc::clone(&physics);
            move |_| physics.lock().unwrap().on_drag_cancel()
        });

        handlers.on(event_types::RESIZE, {
            let physics = Arc::clone(&physics);
            move |event| {
                if let EventData::Resize { width } = event.data {
                    physics.lock().unwrap().measure(width);
                }
            }
        });

        handlers
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Items shown per page (default 1; floored at 1, clamped against the
    /// item count at layout time)
    pub fn items_per_page(self, n: usize) -> Self {
        {
            let mut physics = self.physics.lock().unwrap();
            let mut config = physics.config;
            config.items_per_page = n.max(1);
            physics.set_config(config);
        }
        self
    }

    /// Inter-item and edge padding in pixels (default 0; negative floors to 0)
    pub fn spacing(self, px: f32) -> Self {
        {
            let mut physics = self.physics.lock().unwrap();
            let mut config = physics.config;
            config.spacing = px.max(0.0);
            physics.set_config(config);
        }
        self
    }

    /// Upcoming-page reveal amount (default 10px)
    pub fn peek(self, peek: Peek) -> Self {
        {
            let mut physics = self.physics.lock().unwrap();
            let mut config = physics.config;
            config.peek = peek;
            physics.set_config(config);
        }
        self
    }

    /// Fixed-pixel peek
    pub fn peek_px(self, px: f32) -> Self {
        self.peek(Peek::Constant(px))
    }

    /// Peek as a fraction of the usable row width
    pub fn peek_percent(self, fraction: f32) -> Self {
        self.peek(Peek::Percent(fraction))
    }

    /// Settle animation hint
    pub fn settle(self, motion: Motion) -> Self {
        {
            let mut physics = self.physics.lock().unwrap();
            let mut config = physics.config;
            config.settle = motion;
            physics.set_config(config);
        }
        self
    }

    /// Supply a stable identity for each item, independent of position
    pub fn key_fn<F>(mut self, key_fn: F) -> Self
    where
        F: Fn(&T) -> u64 + Send + 'static,
    {
        self.key_fn = Box::new(move |item, _| key_fn(item));
        self
    }

    /// Attach a bidirectional page-index binding.
    ///
    /// The binding's seeded value becomes the initial page; afterwards the
    /// carousel mirrors every committed and optimistic index change into
    /// it, and host writes are applied on the next frame.
    pub fn bind(self, binding: &PageBinding) -> Self {
        self.physics.lock().unwrap().bind(binding.clone());
        self
    }

    /// Attach an animation scheduler for spring-driven settling
    pub fn scheduler(self, scheduler: &Arc<Mutex<AnimationScheduler>>) -> Self {
        self.physics.lock().unwrap().set_scheduler(scheduler);
        self
    }

    /// Set the measured container width
    pub fn w(self, px: f32) -> Self {
        self.physics.lock().unwrap().measure(px);
        self
    }

    // =========================================================================
    // State access
    // =========================================================================

    /// Get the shared physics handle
    pub fn physics(&self) -> SharedCarouselPhysics {
        Arc::clone(&self.physics)
    }

    /// Committed page index
    pub fn page(&self) -> usize {
        self.physics.lock().unwrap().page()
    }

    /// Current derived layout
    pub fn layout(&self) -> PageLayout {
        self.physics.lock().unwrap().layout()
    }

    /// The items in render order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Replace the item list (reordering/filtering happens upstream)
    pub fn set_items(&mut self, items: Vec<T>) {
        self.physics.lock().unwrap().set_item_count(items.len());
        self.items = items;
    }

    // =========================================================================
    // Event input
    // =========================================================================

    /// Route a host event to the internal handlers
    pub fn handle_event(&mut self, event: &Event) {
        self.handlers.dispatch(event);
    }

    /// Called when a drag gesture begins
    pub fn on_drag_start(&self) {
        self.physics.lock().unwrap().on_drag_start();
    }

    /// Called for each drag update with the live translation
    pub fn on_drag(&self, translation_x: f32) {
        self.physics.lock().unwrap().on_drag(translation_x);
    }

    /// Called on release with the final and momentum-adjusted translations
    pub fn on_drag_end(&self, translation_x: f32, predicted_translation_x: f32) {
        self.physics
            .lock()
            .unwrap()
            .on_drag_end(translation_x, predicted_translation_x);
    }

    /// Called when the host abandons the drag
    pub fn on_drag_cancel(&self) {
        self.physics.lock().unwrap().on_drag_cancel();
    }

    /// Record a container measurement
    pub fn measure(&self, width: f32) {
        self.physics.lock().unwrap().measure(width);
    }

    /// Advance the settle animation (returns true if still animating)
    pub fn tick(&self) -> bool {
        self.physics.lock().unwrap().tick()
    }

    // =========================================================================
    // Render output
    // =========================================================================

    /// Produce the frame to render: box widths, row offset, settle hint.
    ///
    /// Pending host writes on the binding are applied first.
    pub fn frame(&self) -> RowFrame {
        let mut physics = self.physics.lock().unwrap();
        physics.apply_binding_writes();

        let layout = physics.layout();
        let width = layout.item_box_width();
        let animate = (!physics.state.is_active()).then_some(physics.config.settle);

        RowFrame {
            offset_x: physics.offset_x(),
            animate,
            item_width: layout.item_width,
            items: self
                .items
                .iter()
                .enumerate()
                .map(|(position, item)| ItemFrame {
                    key: (self.key_fn)(item, position),
                    width,
                })
                .collect(),
        }
    }

    /// Invoke an opaque per-item render callback with each item and its
    /// frame; the carousel never interprets the rendered content
    pub fn render_items<F>(&self, mut render: F)
    where
        F: FnMut(&T, &ItemFrame),
    {
        let layout = self.physics.lock().unwrap().layout();
        let width = layout.item_box_width();
        for (position, item) in self.items.iter().enumerate() {
            let frame = ItemFrame {
                key: (self.key_fn)(item, position),
                width,
            };
            render(item, &frame);
        }
    }
}

/// Create a new carousel over the given items
///
/// # Example
///
/// ```rust,ignore
/// use glide_carousel::prelude::*;
///
/// let cards = carousel(albums)
///     .items_per_page(3)
///     .spacing(12.0)
///     .peek_percent(0.08)
///     .w(480.0);
/// ```
pub fn carousel<T>(items: Vec<T>) -> Carousel<T> {
    Carousel::new(items)
}
