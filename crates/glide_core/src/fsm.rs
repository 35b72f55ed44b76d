//! Widget interaction state machines
//!
//! Lightweight enum-based FSMs: a state type implements
//! [`StateTransitions`] to map incoming events onto transitions, and the
//! widget drives it by feeding events as they arrive:
//!
//! ```rust
//! use glide_core::events::event_types;
//! use glide_core::fsm::{DragPhase, StateTransitions};
//!
//! let mut phase = DragPhase::Idle;
//! if let Some(next) = phase.on_event(event_types::DRAG_START) {
//!     phase = next;
//! }
//! assert_eq!(phase, DragPhase::Dragging);
//! ```

use std::hash::Hash;

use crate::events::EventType;

/// Trait for state types that handle event-driven transitions
///
/// Return `Some(next)` to transition, `None` to stay in the current state.
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// Drag gesture phases for pointer-driven widgets
///
/// The machine cycles between the two states for the widget's entire
/// lifetime; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragPhase {
    /// No active drag
    #[default]
    Idle,
    /// Gesture in progress
    Dragging,
}

impl DragPhase {
    /// Check if a gesture is in progress
    pub fn is_active(&self) -> bool {
        matches!(self, DragPhase::Dragging)
    }
}

impl StateTransitions for DragPhase {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use crate::events::event_types::*;
        match (self, event) {
            (DragPhase::Idle, DRAG_START) => Some(DragPhase::Dragging),
            // A drag update with no preceding start still opens a session
            (DragPhase::Idle, DRAG) => Some(DragPhase::Dragging),
            (DragPhase::Dragging, DRAG_END) => Some(DragPhase::Idle),
            (DragPhase::Dragging, DRAG_CANCEL) => Some(DragPhase::Idle),
            _ => None,
        }
    }
}
