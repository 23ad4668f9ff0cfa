use std::collections::VecDeque;

pub const TRACE_CAPACITY: usize = 500;

/// Fixed-size rolling sample window. Starts zero-filled; every push
/// evicts the oldest sample, so the length never changes.
pub struct TraceBuffer {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl TraceBuffer {
    pub fn new(capacity: usize) -> Self {
        let mut samples = VecDeque::with_capacity(capacity);
        samples.resize(capacity, 0.0);
        Self { samples, capacity }
    }

    pub fn push(&mut self, sample: f64) {
        self.samples.pop_front();
        if self.samples.len() < self.capacity {
            self.samples.push_back(sample);
        }
    }

    pub fn latest(&self) -> f64 {
        *self.samples.back().unwrap_or(&0.0)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn mean_squared(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().map(|s| s * s).sum::<f64>() / self.samples.len() as f64
    }
}

/// The three per-tick traces the plot overlays.
pub struct TraceHistory {
    pub position: TraceBuffer,
    pub setpoint: TraceBuffer,
    pub error: TraceBuffer,
}

impl Default for TraceHistory {
    fn default() -> Self {
        TraceHistory::new()
    }
}

impl TraceHistory {
    pub fn new() -> Self {
        Self::with_capacity(TRACE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            position: TraceBuffer::new(capacity),
            setpoint: TraceBuffer::new(capacity),
            error: TraceBuffer::new(capacity),
        }
    }

    pub fn record(&mut self, position: f64, setpoint: f64) {
        self.position.push(position);
        self.setpoint.push(setpoint);
        self.error.push(position - setpoint);
    }

    pub fn mean_squared_error(&self) -> f64 {
        self.error.mean_squared()
    }
}
