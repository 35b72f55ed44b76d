//! Glide Animation System
//!
//! Spring physics and easing curves for widget settle animations.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Easing**: the standard cubic family plus CSS-style cubic bezier
//! - **Interruptible**: springs inherit velocity when retargeted

pub mod easing;
pub mod scheduler;
pub mod spring;

pub use easing::Easing;
pub use scheduler::{AnimationScheduler, SpringId};
pub use spring::{Spring, SpringConfig};
