//! Glide Core Runtime
//!
//! Foundational primitives for the glide widget library:
//!
//! - **Event Dispatch**: gesture and measurement events delivered by the
//!   host event loop
//! - **State Machines**: lightweight enum-based FSMs for widget
//!   interaction states
//!
//! # Example
//!
//! ```rust
//! use glide_core::events::{event_types, Event, EventData, EventDispatcher};
//!
//! let mut dispatcher = EventDispatcher::new();
//! dispatcher.on(event_types::DRAG, |event| {
//!     if let EventData::Drag { translation_x } = event.data {
//!         println!("dragging: {translation_x}");
//!     }
//! });
//!
//! dispatcher.dispatch(&Event::drag(-24.0));
//! ```

pub mod events;
pub mod fsm;

pub use events::{Event, EventData, EventDispatcher, EventType};
pub use fsm::{DragPhase, StateTransitions};
