//! Damped spring physics
//!
//! Springs drive settle animations: set a target, step each frame, read
//! the value. Retargeting a live spring keeps its current velocity so
//! interrupted animations stay smooth.

/// Spring parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    /// Restoring force per unit of displacement
    pub stiffness: f32,
    /// Velocity damping coefficient
    pub damping: f32,
    /// Mass of the animated value
    pub mass: f32,
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness: stiffness.max(0.0),
            damping: damping.max(0.0),
            // Zero mass would make acceleration undefined
            mass: mass.max(1e-3),
        }
    }

    /// Fast settle with no visible rebound (slightly overdamped)
    pub fn stiff() -> Self {
        Self::new(3000.0, 110.0, 1.0)
    }

    /// Quick but smooth; the default for page settling
    pub fn snappy() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Soft, slightly wobbly settle
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::snappy()
    }
}

/// Position tolerance below which a spring counts as settled
const REST_DELTA: f32 = 0.1;
/// Velocity tolerance below which a spring counts as settled (units/second)
const REST_SPEED: f32 = 0.5;
/// Integration substep; frames longer than this are split
const MAX_STEP: f32 = 1.0 / 120.0;

/// A damped spring animating a single scalar value
#[derive(Debug, Clone, Copy)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring at rest at `value`
    pub fn new(config: SpringConfig, value: f32) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: value,
        }
    }

    /// Retarget the spring, keeping its current velocity
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Start the spring with an initial velocity (units/second)
    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Whether the spring has come to rest at its target
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED
    }

    /// Advance the spring by `dt` seconds.
    ///
    /// Integrates with RK4, splitting long frames into substeps so a
    /// stalled event loop cannot destabilize a stiff spring.
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 || self.is_settled() {
            return;
        }

        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP);
            self.rk4_step(h);
            remaining -= h;
        }

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    fn acceleration(&self, value: f32, velocity: f32) -> f32 {
        let displacement = value - self.target;
        (-self.config.stiffness * displacement - self.config.damping * velocity) / self.config.mass
    }

    fn rk4_step(&mut self, h: f32) {
        let (x, v) = (self.value, self.velocity);

        let k1_x = v;
        let k1_v = self.acceleration(x, v);

        let k2_x = v + 0.5 * h * k1_v;
        let k2_v = self.acceleration(x + 0.5 * h * k1_x, v + 0.5 * h * k1_v);

        let k3_x = v + 0.5 * h * k2_v;
        let k3_v = self.acceleration(x + 0.5 * h * k2_x, v + 0.5 * h * k2_v);

        let k4_x = v + h * k3_v;
        let k4_v = self.acceleration(x + h * k3_x, v + h * k3_v);

        self.value = x + (h / 6.0) * (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x);
        self.velocity = v + (h / 6.0) * (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v);
    }
}
