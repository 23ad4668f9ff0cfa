use crate::core::clamp_abs;

// Derivative term limit, to avoid spikes from step changes in the
// setpoint or measurement.
const DERIVATIVE_LIMIT: f64 = 100.0;

pub struct PIDController {
    kp: f64,
    ki: f64,
    kd: f64,
    setpoint: f64,
    previous_error: f64,
    accumulated_error: f64,
}

impl PIDController {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self {
            kp,
            ki,
            kd,
            setpoint: 0.0,
            previous_error: 0.0,
            accumulated_error: 0.0,
        }
    }

    // Gains and setpoint may be reassigned at any point between updates.
    // Retuning keeps previous_error/accumulated_error so a mid-run gain
    // change does not kick the output.
    pub fn set_kp(&mut self, kp: f64) {
        self.kp = kp;
    }

    pub fn set_ki(&mut self, ki: f64) {
        self.ki = ki;
    }

    pub fn set_kd(&mut self, kd: f64) {
        self.kd = kd;
    }

    pub fn set_setpoint(&mut self, setpoint: f64) {
        self.setpoint = setpoint;
    }

    pub fn get_setpoint(&self) -> f64 {
        self.setpoint
    }

    pub fn get_gains(&self) -> (f64, f64, f64) {
        (self.kp, self.ki, self.kd)
    }

    pub fn get_accumulated_error(&self) -> f64 {
        self.accumulated_error
    }

    /// One controller tick: consumes the measured value, produces the
    /// control force. `dt` must be nonzero; `dt == 0` yields non-finite
    /// output per float division semantics and is not checked here.
    pub fn update(&mut self, measured: f64, dt: f64) -> f64 {
        let error_p = self.setpoint - measured;

        // Integral term uses the error accumulated through the previous
        // tick; this tick's error is folded in afterwards.
        let error_i = self.accumulated_error;
        let error_d = clamp_abs((error_p - self.previous_error) / dt, DERIVATIVE_LIMIT);

        let output = self.kp * error_p + self.kd * error_d + self.ki * error_i;

        self.previous_error = error_p;

        if self.ki != 0.0 && !self.ki.is_nan() {
            // Anti-windup: the accumulator never leaves [-1/ki, 1/ki].
            self.accumulated_error = clamp_abs(self.accumulated_error + error_p, 1.0 / self.ki);
        } else {
            // No integral memory while ki is zero (or NaN, which has no
            // usable clamp range), so a stale accumulator from a
            // previously nonzero ki cannot leak back in.
            self.accumulated_error = 0.0;
        }

        output
    }
}
