//! Carousel configuration

use glide_animation::{Easing, SpringConfig};

/// Peek amount: how much of the upcoming page's leading item to reveal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Peek {
    /// Fixed reveal in pixels
    Constant(f32),
    /// Fraction of the usable row width (container width minus spacing)
    Percent(f32),
}

impl Peek {
    /// Resolve to pixels against the usable row width.
    ///
    /// Negative pixel amounts floor to 0; fractions clamp to [0, 1].
    pub fn resolve(&self, base_width: f32) -> f32 {
        match *self {
            Peek::Constant(px) => px.max(0.0),
            Peek::Percent(fraction) => base_width.max(0.0) * fraction.clamp(0.0, 1.0),
        }
    }
}

impl Default for Peek {
    fn default() -> Self {
        Peek::Constant(10.0)
    }
}

/// Animation hint the renderer applies when the row offset settles
///
/// Presentation-layer only: page resolution never depends on it. The
/// hint is omitted from frames produced during live drag tracking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Spring-driven settle; also drives the built-in settle animation
    /// when an `AnimationScheduler` is attached
    Spring(SpringConfig),
    /// Fixed-duration eased settle, applied entirely by the renderer
    Eased { easing: Easing, duration_ms: u32 },
}

impl Default for Motion {
    fn default() -> Self {
        Motion::Spring(SpringConfig::snappy())
    }
}

/// Configuration for carousel layout and settling
///
/// Immutable once a layout pass begins; replacing it between renders
/// triggers re-derivation of the page layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselConfig {
    /// Items shown per page (at least 1; clamped against the item count
    /// at layout time)
    pub items_per_page: usize,
    /// Inter-item and edge padding in pixels
    pub spacing: f32,
    /// Upcoming-page reveal amount
    pub peek: Peek,
    /// Settle animation hint
    pub settle: Motion,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            items_per_page: 1,
            spacing: 0.0,
            peek: Peek::default(),
            settle: Motion::default(),
        }
    }
}

impl CarouselConfig {
    /// Create config with peek disabled
    pub fn no_peek() -> Self {
        Self {
            peek: Peek::Constant(0.0),
            ..Default::default()
        }
    }

    /// Create config showing `n` items per page
    pub fn paged(n: usize) -> Self {
        Self {
            items_per_page: n.max(1),
            ..Default::default()
        }
    }
}
