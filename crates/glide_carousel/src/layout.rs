//! Page layout derivation
//!
//! Pure geometry: converts configuration and the measured container width
//! into per-item widths, resolved peek pixels, and the reachable page
//! range. Degenerate inputs (no items, zero width, over-large page size)
//! clamp to zeros rather than producing NaN or dividing by zero.

use crate::config::CarouselConfig;

/// Derived layout parameters
///
/// Recomputed on every measurement or configuration change; carries no
/// state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageLayout {
    /// Measured container width
    pub container_width: f32,
    /// Width of one item slot (spacing included)
    pub item_width: f32,
    /// Resolved peek reveal in pixels
    pub peek_px: f32,
    /// Items per page after clamping against the item count
    pub items_per_page: usize,
    /// Number of items in the row
    pub item_count: usize,
    /// Highest reachable page index
    pub max_page: usize,
    /// Edge padding carried from the config
    pub spacing: f32,
}

impl PageLayout {
    /// Derive layout from configuration and measurement.
    ///
    /// `items_per_page` is clamped into `[0, item_count)`: an over-large
    /// request shows `item_count - 1` items, and an empty row clamps to 0.
    /// The peek resolves to 0 when there is at most one page, since there
    /// is nothing further to reveal.
    pub fn derive(config: &CarouselConfig, container_width: f32, item_count: usize) -> Self {
        let container_width = container_width.max(0.0);
        let spacing = config.spacing.max(0.0);
        let items_per_page = config.items_per_page.min(item_count.saturating_sub(1));

        let base_width = container_width - spacing;
        let max_page = item_count - items_per_page;
        let peek_px = if max_page <= 1 {
            0.0
        } else {
            config.peek.resolve(base_width)
        };
        let item_width = if items_per_page == 0 {
            0.0
        } else {
            ((base_width - peek_px) / items_per_page as f32).max(0.0)
        };

        Self {
            container_width,
            item_width,
            peek_px,
            items_per_page,
            item_count,
            max_page,
            spacing,
        }
    }

    /// Horizontal row offset for a committed page plus live drag translation.
    ///
    /// On the last page the trailing peek mirrors to the leading edge, so
    /// the final page never shows trailing empty space. The translation is
    /// added raw and unclamped; the row tracks the pointer continuously.
    pub fn offset(&self, page: usize, translation_x: f32) -> f32 {
        let page = page.min(self.max_page);
        let mut x = self.spacing - page as f32 * self.item_width;
        if page == self.max_page {
            x += self.peek_px;
        }
        x + translation_x
    }

    /// Rendered box width for one item (slot width minus spacing)
    pub fn item_box_width(&self) -> f32 {
        (self.item_width - self.spacing).max(0.0)
    }

    /// Map a drag translation onto the nearest destination page.
    ///
    /// The candidate is clamped to `[0, max_page]` and then to one page
    /// width of items around the current page, so a single gesture never
    /// jumps more than `items_per_page` indices. A zero item width
    /// short-circuits to the unchanged index.
    pub fn resolve_page(&self, page: usize, translation_x: f32) -> usize {
        let page = page.min(self.max_page);
        if self.item_width <= 0.0 {
            return page;
        }

        let raw_delta = (-translation_x / self.item_width).round() as i64;
        let span = self.items_per_page as i64;
        let candidate = (page as i64 + raw_delta)
            .clamp(0, self.max_page as i64)
            .clamp(page as i64 - span, page as i64 + span);
        candidate as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Peek;

    fn config(items_per_page: usize, spacing: f32, peek: Peek) -> CarouselConfig {
        CarouselConfig {
            items_per_page,
            spacing,
            peek,
            ..Default::default()
        }
    }

    #[test]
    fn test_derive_is_deterministic() {
        let config = config(2, 8.0, Peek::Percent(0.1));
        let a = PageLayout::derive(&config, 320.0, 7);
        let b = PageLayout::derive(&config, 320.0, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn test_reference_geometry() {
        // 7 items, 2 per page, no spacing, no peek, 300px wide
        let layout = PageLayout::derive(&config(2, 0.0, Peek::Constant(0.0)), 300.0, 7);
        assert_eq!(layout.max_page, 5);
        assert_eq!(layout.item_width, 150.0);
        assert_eq!(layout.peek_px, 0.0);
    }

    #[test]
    fn test_items_per_page_clamps_below_item_count() {
        let layout = PageLayout::derive(&config(5, 0.0, Peek::Constant(0.0)), 300.0, 3);
        assert_eq!(layout.items_per_page, 2);
        assert_eq!(layout.max_page, 1);
    }

    #[test]
    fn test_degenerate_inputs_produce_zero_geometry() {
        let layout = PageLayout::derive(&config(2, 0.0, Peek::Constant(10.0)), 300.0, 0);
        assert_eq!(layout.items_per_page, 0);
        assert_eq!(layout.item_width, 0.0);
        assert_eq!(layout.max_page, 0);

        let layout = PageLayout::derive(&config(2, 0.0, Peek::Constant(10.0)), 0.0, 7);
        assert_eq!(layout.item_width, 0.0);
        assert!(layout.item_width.is_finite());
    }

    #[test]
    fn test_negative_item_width_floors_to_zero() {
        // Peek wider than the container
        let layout = PageLayout::derive(&config(2, 0.0, Peek::Constant(500.0)), 300.0, 7);
        assert_eq!(layout.item_width, 0.0);
    }

    #[test]
    fn test_peek_zero_when_single_page() {
        // 3 items, 2 per page -> max_page == 1, nothing to reveal
        let layout = PageLayout::derive(&config(2, 0.0, Peek::Constant(40.0)), 300.0, 3);
        assert_eq!(layout.peek_px, 0.0);

        let layout = PageLayout::derive(&config(2, 0.0, Peek::Percent(0.3)), 300.0, 3);
        assert_eq!(layout.peek_px, 0.0);
    }

    #[test]
    fn test_peek_resolution_against_base_width() {
        let layout = PageLayout::derive(&config(2, 20.0, Peek::Percent(0.1)), 320.0, 7);
        assert_eq!(layout.peek_px, 30.0);

        let layout = PageLayout::derive(&config(2, 20.0, Peek::Constant(24.0)), 320.0, 7);
        assert_eq!(layout.peek_px, 24.0);
    }

    #[test]
    fn test_offset_steps_by_item_width() {
        let layout = PageLayout::derive(&config(2, 0.0, Peek::Constant(0.0)), 300.0, 7);
        assert_eq!(layout.offset(0, 0.0), 0.0);
        assert_eq!(layout.offset(1, 0.0), -150.0);
        assert_eq!(layout.offset(3, -42.0), -492.0);
    }

    #[test]
    fn test_offset_includes_spacing_lead() {
        let layout = PageLayout::derive(&config(2, 10.0, Peek::Constant(0.0)), 310.0, 7);
        assert_eq!(layout.offset(0, 0.0), 10.0);
    }

    #[test]
    fn test_last_page_mirrors_peek_to_leading_edge() {
        let layout = PageLayout::derive(&config(2, 0.0, Peek::Constant(30.0)), 300.0, 7);
        let last = layout.max_page;
        let without_peek = layout.spacing - last as f32 * layout.item_width;
        assert_eq!(layout.offset(last, 0.0), without_peek + 30.0);
        // Earlier pages carry no peek compensation
        assert_eq!(
            layout.offset(last - 1, 0.0),
            layout.spacing - (last - 1) as f32 * layout.item_width
        );
    }

    #[test]
    fn test_resolve_page_rounds_to_nearest() {
        let layout = PageLayout::derive(&config(2, 0.0, Peek::Constant(0.0)), 300.0, 7);
        // Slightly more than one item width leftward
        assert_eq!(layout.resolve_page(2, -170.0), 3);
        // Less than half an item width: stays put
        assert_eq!(layout.resolve_page(2, -70.0), 2);
        // Rightward drag moves back
        assert_eq!(layout.resolve_page(2, 170.0), 1);
    }

    #[test]
    fn test_resolve_page_clamps_to_page_range() {
        let layout = PageLayout::derive(&config(2, 0.0, Peek::Constant(0.0)), 300.0, 7);
        assert_eq!(layout.resolve_page(0, 10_000.0), 0);
        assert_eq!(layout.resolve_page(5, -10_000.0), 5);
    }

    #[test]
    fn test_resolve_page_limits_single_gesture_jump() {
        let layout = PageLayout::derive(&config(2, 0.0, Peek::Constant(0.0)), 300.0, 7);
        // An extreme fling resolves at most items_per_page indices away
        assert_eq!(layout.resolve_page(0, -10_000.0), 2);
        assert_eq!(layout.resolve_page(5, 10_000.0), 3);
    }

    #[test]
    fn test_resolve_page_with_zero_item_width_is_identity() {
        let layout = PageLayout::derive(&config(2, 0.0, Peek::Constant(0.0)), 0.0, 7);
        assert_eq!(layout.item_width, 0.0);
        assert_eq!(layout.resolve_page(3, -500.0), 3);
    }

    #[test]
    fn test_item_box_width_subtracts_spacing() {
        let layout = PageLayout::derive(&config(2, 10.0, Peek::Constant(0.0)), 310.0, 7);
        assert_eq!(layout.item_box_width(), layout.item_width - 10.0);

        let degenerate = PageLayout::derive(&config(2, 50.0, Peek::Constant(0.0)), 40.0, 7);
        assert_eq!(degenerate.item_box_width(), 0.0);
    }
}
