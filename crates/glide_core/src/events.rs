//! Event dispatch system
//!
//! Gesture and measurement events, delivered synchronously by the host
//! event loop. Translation values are horizontal pixel deltas from the
//! drag origin; the predicted end translation is the release translation
//! adjusted for velocity/momentum by the host's gesture recognizer.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    /// Drag started (pointer down plus movement past the slop threshold)
    pub const DRAG_START: EventType = 6;
    /// Drag update (live translation from the drag origin)
    pub const DRAG: EventType = 7;
    /// Drag ended (pointer released after a drag)
    pub const DRAG_END: EventType = 8;
    /// Drag abandoned by the host (gesture interruption)
    pub const DRAG_CANCEL: EventType = 9;
    /// Container was measured or re-measured
    pub const RESIZE: EventType = 40;
}

/// A UI event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
    },
    /// Live drag translation
    Drag {
        translation_x: f32,
    },
    /// Drag release; `predicted_translation_x` accounts for release velocity
    DragEnd {
        translation_x: f32,
        predicted_translation_x: f32,
    },
    Resize {
        width: f32,
    },
    None,
}

impl Event {
    pub fn new(event_type: EventType, data: EventData) -> Self {
        Self { event_type, data }
    }

    /// A drag-start event
    pub fn drag_start() -> Self {
        Self::new(event_types::DRAG_START, EventData::None)
    }

    /// A drag update carrying the live translation
    pub fn drag(translation_x: f32) -> Self {
        Self::new(event_types::DRAG, EventData::Drag { translation_x })
    }

    /// A drag release carrying the final and momentum-adjusted translations
    pub fn drag_end(translation_x: f32, predicted_translation_x: f32) -> Self {
        Self::new(
            event_types::DRAG_END,
            EventData::DragEnd {
                translation_x,
                predicted_translation_x,
            },
        )
    }

    /// A drag abandoned by the host
    pub fn drag_cancel() -> Self {
        Self::new(event_types::DRAG_CANCEL, EventData::None)
    }

    /// A container measurement
    pub fn resize(width: f32) -> Self {
        Self::new(event_types::RESIZE, EventData::Resize { width })
    }
}

/// Handler invoked for a dispatched event
pub type EventHandler = Box<dyn FnMut(&Event) + Send>;

/// Dispatches events to handlers registered per event type
///
/// Handlers run synchronously, in registration order, on the caller's
/// event-loop turn.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: FxHashMap<EventType, SmallVec<[EventHandler; 2]>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an event type
    pub fn on<F>(&mut self, event_type: EventType, handler: F)
    where
        F: FnMut(&Event) + Send + 'static,
    {
        self.handlers
            .entry(event_type)
            .or_default()
            .push(Box::new(handler));
    }

    /// Dispatch an event to all handlers registered for its type.
    ///
    /// Returns the number of handlers that ran.
    pub fn dispatch(&mut self, event: &Event) -> usize {
        let Some(handlers) = self.handlers.get_mut(&event.event_type) else {
            tracing::trace!("no handlers for event type {}", event.event_type);
            return 0;
        };
        for handler in handlers.iter_mut() {
            handler(event);
        }
        handlers.len()
    }

    /// Number of handlers registered for an event type
    pub fn handler_count(&self, event_type: EventType) -> usize {
        self.handlers.get(&event_type).map_or(0, |h| h.len())
    }
}
