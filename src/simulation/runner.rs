use log::debug;

use crate::control::PIDController;
use crate::core::TraceHistory;
use crate::simulation::SimpleMotor;

/// One closed control loop: a controller, the plant it drives, and the
/// trace history of what happened. Owned by whoever drives the ticks;
/// nothing here is shared or global.
pub struct Simulation {
    pid: PIDController,
    motor: SimpleMotor,
    history: TraceHistory,
    last_force: f64,
}

impl Simulation {
    pub fn new(pid: PIDController, motor: SimpleMotor) -> Self {
        Self {
            pid,
            motor,
            history: TraceHistory::new(),
            last_force: 0.0,
        }
    }

    /// Advances the loop one tick. Correctness depends only on `dt`, not
    /// on when the caller invokes this.
    pub fn tick(&mut self, dt: f64) {
        // Control loop - decide how hard to push -> outputs 'force'
        let force = self.pid.update(self.motor.get_position(), dt);

        // Physics loop - decide what happened -> outputs 'position'
        self.motor.step(force, dt);

        // The new position feeds back as the next tick's measurement.
        self.last_force = force;
        self.history
            .record(self.motor.get_position(), self.pid.get_setpoint());
    }

    pub fn set_gains(&mut self, kp: f64, ki: f64, kd: f64) {
        if self.pid.get_gains() != (kp, ki, kd) {
            debug!("retune: kp={} ki={} kd={}", kp, ki, kd);
        }
        self.pid.set_kp(kp);
        self.pid.set_ki(ki);
        self.pid.set_kd(kd);
    }

    pub fn set_setpoint(&mut self, setpoint: f64) {
        if self.pid.get_setpoint() != setpoint {
            debug!("setpoint -> {}", setpoint);
        }
        self.pid.set_setpoint(setpoint);
    }

    pub fn get_pid(&self) -> &PIDController {
        &self.pid
    }

    pub fn get_motor(&self) -> &SimpleMotor {
        &self.motor
    }

    pub fn get_history(&self) -> &TraceHistory {
        &self.history
    }

    pub fn get_last_force(&self) -> f64 {
        self.last_force
    }
}
