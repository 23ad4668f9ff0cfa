use crate::core::{clamp_abs, sign};

const POSITION_LIMIT: f64 = 2.2;
const VELOCITY_LIMIT: f64 = 10000.0;

/// Second-order plant with kinetic friction, integrated with a
/// Verlet-style scheme.
pub struct SimpleMotor {
    // Physical parameters
    friction: f64, // coefficient, >= 0
    mass: f64,     // > 0, caller contract

    // State variables
    position: f64,
    velocity: f64,
    acceleration: f64,
}

impl SimpleMotor {
    pub fn new(friction: f64, mass: f64) -> Self {
        Self {
            friction,
            mass,
            position: 0.0,
            velocity: 0.0,
            acceleration: 0.0,
        }
    }

    /// Advances the plant one tick under the applied `force`.
    pub fn step(&mut self, force: f64, dt: f64) {
        // Friction always opposes motion; a resting body feels none.
        let frictional_acceleration = -self.friction * sign(self.velocity) / self.mass;
        let applied_acceleration = force / self.mass;

        // Verlet position update, using the previous tick's acceleration.
        let new_position =
            self.position + self.velocity * dt + 0.5 * self.acceleration * dt * dt;

        let new_velocity_with_friction = self.velocity
            + (self.acceleration + applied_acceleration + frictional_acceleration) / 2.0
                / self.mass
                * dt;
        let new_velocity_without_friction =
            self.velocity + (self.acceleration + applied_acceleration) / 2.0 * dt;

        // Stiction: friction can arrest motion but never propel it
        // backwards. If friction alone would flip the sign, stop dead.
        let new_velocity =
            if new_velocity_with_friction * new_velocity_without_friction < 0.0 {
                0.0
            } else {
                new_velocity_with_friction
            };

        // Clamp to prevent overflow; these bounds also contain non-finite
        // fallout from degenerate dt/mass inputs.
        self.position = clamp_abs(new_position, POSITION_LIMIT);
        self.velocity = clamp_abs(new_velocity, VELOCITY_LIMIT);
        // The raw force is stored as-is, without friction or mass
        // normalization. The source model does this; keep it.
        self.acceleration = force;
    }

    pub fn get_position(&self) -> f64 {
        self.position
    }

    pub fn get_velocity(&self) -> f64 {
        self.velocity
    }

    pub fn get_acceleration(&self) -> f64 {
        self.acceleration
    }
}
