use crate::sink::RenderSink;
use log::{debug, info};

// Gauge driver error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeError {
    AlreadyRunning,
    SinkUnavailable,
}

impl std::fmt::Display for GaugeError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            GaugeError::AlreadyRunning => write!(f, "gauge driver already running"),
            GaugeError::SinkUnavailable => write!(f, "rendering sink unavailable"),
        }
    }
}

impl std::error::Error for GaugeError {}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Driver is not armed; nothing happened.
    Inactive,
    /// Counter advanced to the contained value.
    Advanced(u32),
    /// Counter hit the bound; the driver has halted itself.
    BoundReached(u32),
}

/// Advances a bounded counter one step per tick and reports each value to
/// the rendering sink. The owner supplies the cadence; the driver only
/// tracks the value, the bound, and whether it is armed.
///
/// Activity is an explicit flag rather than a sentinel timer id, so "no
/// timer" can never collide with a valid handle.
pub struct GaugeDriver {
    active: bool,
    value: u32,
    bound: u32,
    step: u32,
}

impl GaugeDriver {
    pub fn new(step: u32) -> Self {
        Self {
            active: false,
            value: 0,
            bound: 0,
            step,
        }
    }

    /// Arm the driver at `initial`, advancing toward `bound`. Rejects a
    /// re-entrant begin and a sink with no readable extent; neither arms
    /// the driver.
    pub fn begin(
        &mut self,
        initial: u32,
        sink: &dyn RenderSink,
        bound: u32,
    ) -> Result<(), GaugeError> {
        if self.active {
            return Err(GaugeError::AlreadyRunning);
        }
        if sink.extent().is_none() {
            return Err(GaugeError::SinkUnavailable);
        }

        self.value = initial.min(bound);
        self.bound = bound;
        self.active = true;
        info!("Gauge armed at {} (bound {})", self.value, self.bound);
        Ok(())
    }

    /// Cancel the driver. Unconditional and idempotent; safe from any
    /// trigger point.
    pub fn halt(&mut self) {
        if self.active {
            debug!("Gauge halted at {}", self.value);
        }
        self.active = false;
    }

    /// Advance one step and push the new value to the sink. Reaching the
    /// bound halts the driver before returning, so the owner sees
    /// `BoundReached` exactly once.
    pub fn tick(&mut self, sink: &mut dyn RenderSink) -> TickOutcome {
        if !self.active {
            return TickOutcome::Inactive;
        }

        self.value = (self.value + self.step).min(self.bound);
        sink.set_height(self.value);

        if self.value >= self.bound {
            info!("Gauge reached bound {}", self.bound);
            self.halt();
            TickOutcome::BoundReached(self.value)
        } else {
            TickOutcome::Advanced(self.value)
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn value(&self) -> u32 {
        self.value
    }
}
