//! Glide Carousel
//!
//! A horizontally paginated carousel widget: a configurable number of
//! items per page, a "peek" of the upcoming page's leading edge, and
//! drag gestures with momentum-based page snapping.
//!
//! The widget core is deliberately small and numeric. The host owns
//! rendering and gesture recognition and exchanges three things with the
//! carousel:
//!
//! - **gesture events**: drag start / update / end (with a
//!   momentum-adjusted predicted end translation) / cancel
//! - **measurement**: the container width
//! - **frames**: a list of fixed-width boxes, one horizontal row
//!   offset, and a settle animation hint
//!
//! # Example
//!
//! ```rust
//! use glide_carousel::prelude::*;
//!
//! let mut cards = carousel(vec!["a", "b", "c", "d", "e", "f", "g"])
//!     .items_per_page(2)
//!     .peek_px(0.0)
//!     .w(300.0);
//!
//! cards.handle_event(&Event::drag_start());
//! cards.handle_event(&Event::drag(-80.0));
//! cards.handle_event(&Event::drag_end(-80.0, -170.0));
//!
//! assert_eq!(cards.page(), 1);
//! assert_eq!(cards.frame().offset_x, -150.0);
//! ```

pub mod binding;
pub mod carousel;
pub mod config;
pub mod layout;
pub mod physics;

pub use binding::PageBinding;
pub use carousel::{carousel, Carousel, ItemFrame, RowFrame};
pub use config::{CarouselConfig, Motion, Peek};
pub use layout::PageLayout;
pub use physics::{CarouselPhysics, SharedCarouselPhysics};

/// Commonly used types for hosts embedding a carousel
pub mod prelude {
    pub use crate::binding::PageBinding;
    pub use crate::carousel::{carousel, Carousel, ItemFrame, RowFrame};
    pub use crate::config::{CarouselConfig, Motion, Peek};
    pub use crate::layout::PageLayout;
    pub use glide_animation::{AnimationScheduler, Easing, SpringConfig};
    pub use glide_core::events::{Event, EventData};
}
