use crate::gauge::{GaugeDriver, GaugeError, TickOutcome};
use crate::sink::RenderSink;
use crate::types::{
    now_ms, Entry, PourResult, WatchConfig, WatchPhase, WobbleWatch, BEER_COUNT_UNSET,
};
use log::{debug, error, info};

// Session error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    AlreadyRunning,
    ConfigurationMissing,
    SinkUnavailable,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SessionError::AlreadyRunning => write!(f, "measurement already running"),
            SessionError::ConfigurationMissing => write!(f, "beer count not set"),
            SessionError::SinkUnavailable => write!(f, "rendering sink unavailable"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<GaugeError> for SessionError {
    fn from(error: GaugeError) -> Self {
        match error {
            GaugeError::AlreadyRunning => SessionError::AlreadyRunning,
            GaugeError::SinkUnavailable => SessionError::SinkUnavailable,
        }
    }
}

// The entry currently being measured. Its timestamp log lives in the
// session's raw `times` buffer until the cycle closes.
#[derive(Debug, Clone)]
struct OpenEntry {
    created: i64,
    errors: u32,
    beers: u32,
}

/// Owner of the start/stop state machine, the timestamp log, and the
/// accumulated entries and results.
///
/// One instance owns the whole measurement lifecycle; it is created once
/// and never torn down. Exactly one entry may be open at a time, so no two
/// sessions can hold the rendering sink simultaneously.
pub struct MeasurementSession {
    config: WatchConfig,
    running: bool,
    beer_count: i32,
    gauge_value: u32,
    driver: GaugeDriver,
    times: Vec<i64>,
    open: Option<OpenEntry>,
    entries: Vec<Entry>,
    results: Vec<PourResult>,
    errors: u32,
    begin: i64,
    last_error: Option<SessionError>,
}

impl MeasurementSession {
    pub fn new(config: WatchConfig) -> Self {
        let driver = GaugeDriver::new(config.gauge_step);
        Self {
            config,
            running: false,
            beer_count: BEER_COUNT_UNSET,
            gauge_value: 0,
            driver,
            times: Vec::new(),
            open: None,
            entries: Vec::new(),
            results: Vec::new(),
            errors: 0,
            begin: now_ms(),
            last_error: None,
        }
    }

    /// Required before `start()` succeeds.
    pub fn set_beer_count(&mut self, count: u32) {
        info!("Beer count set to {}", count);
        self.beer_count = count as i32;
    }

    /// Open a new measurement cycle. Fails without state change when a
    /// cycle is already running, the beer count is unset, or the sink has
    /// no readable extent.
    pub fn start(&mut self, sink: &mut dyn RenderSink) -> Result<(), SessionError> {
        if self.running {
            error!("Start rejected: already running");
            return Err(self.record_failure(SessionError::AlreadyRunning));
        }

        if self.beer_count == BEER_COUNT_UNSET {
            error!("Start rejected: beer count not set");
            return Err(self.record_failure(SessionError::ConfigurationMissing));
        }

        let Some(extent) = sink.extent() else {
            error!("Start rejected: rendering sink unavailable");
            // The sink went away underneath us; make sure we are not left
            // half-open.
            self.running = false;
            return Err(self.record_failure(SessionError::SinkUnavailable));
        };

        self.gauge_value = extent;
        debug!("Initial gauge value {}", self.gauge_value);

        if let Err(e) = self
            .driver
            .begin(self.gauge_value, sink, self.config.gauge_bound)
        {
            return Err(self.record_failure(e.into()));
        }

        let created = now_ms();
        self.times.clear();
        self.open = Some(OpenEntry {
            created,
            errors: 0,
            beers: self.beer_count as u32,
        });
        self.running = true;
        self.last_error = None;
        self.times.push(created);

        info!("Measurement started ({} beers)", self.beer_count);
        Ok(())
    }

    /// Append a timestamp to the open cycle's log. Not gated; callers
    /// sequence it, matching the minimal-guard style of start/stop.
    pub fn register_time(&mut self) {
        self.times.push(now_ms());
    }

    /// Drive the gauge one step. A `BoundReached` outcome performs the
    /// automatic stop before returning.
    pub fn on_tick(&mut self, sink: &mut dyn RenderSink) -> TickOutcome {
        if !self.running {
            return TickOutcome::Inactive;
        }

        let outcome = self.driver.tick(sink);
        match outcome {
            TickOutcome::Advanced(value) => {
                self.gauge_value = value;
                debug!("Gauge value {}", value);
            }
            TickOutcome::BoundReached(value) => {
                self.gauge_value = value;
                info!("Gauge bound reached, stopping measurement");
                self.stop();
            }
            TickOutcome::Inactive => {}
        }
        outcome
    }

    /// Close the current cycle. Total and idempotent: a stop while idle
    /// halts any driver, logs a timestamp, and records nothing, so every
    /// trigger point (user action, bound reached) can call it without
    /// coordination.
    pub fn stop(&mut self) {
        self.driver.halt();
        self.register_time();
        self.running = false;
        self.last_error = None;

        if let Some(open) = self.open.take() {
            let times = std::mem::take(&mut self.times);
            let entry = Entry {
                created: open.created,
                errors: open.errors,
                beers: open.beers,
                times,
            };
            let result = derive_result(&entry);
            info!(
                "Measurement stopped: {} samples, avg {:.1}ms, {} beers",
                entry.times.len(),
                result.avg,
                entry.beers
            );
            self.entries.push(entry);
            self.results.push(result);
        } else {
            debug!("Stop while idle (re-stop), no entry recorded");
        }
    }

    /// Aggregate view for the UI layer.
    pub fn snapshot(&self) -> WobbleWatch {
        WobbleWatch {
            state: self.phase(),
            times: self.times.clone(),
            begin: self.begin,
            errors: self.errors,
            ingested: self.results.iter().map(|r| r.ingested).sum(),
            results: self.results.clone(),
        }
    }

    fn phase(&self) -> WatchPhase {
        if self.running {
            WatchPhase::Waiting
        } else if self.last_error.is_some() {
            WatchPhase::Error
        } else if !self.entries.is_empty() {
            WatchPhase::Stopped
        } else if self.beer_count != BEER_COUNT_UNSET {
            WatchPhase::Countdown
        } else {
            WatchPhase::Initial
        }
    }

    fn record_failure(&mut self, error: SessionError) -> SessionError {
        self.errors += 1;
        if let Some(open) = self.open.as_mut() {
            open.errors += 1;
        }
        self.last_error = Some(error);
        error
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn gauge_value(&self) -> u32 {
        self.gauge_value
    }

    pub fn beer_count(&self) -> i32 {
        self.beer_count
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn results(&self) -> &[PourResult] {
        &self.results
    }

    pub fn errors(&self) -> u32 {
        self.errors
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }
}

/// Derive the reporting view of a closed entry.
fn derive_result(entry: &Entry) -> PourResult {
    PourResult {
        created: entry.created,
        times: entry.times.clone(),
        avg: mean_delta(&entry.times),
        errors: entry.errors,
        ingested: entry.beers,
    }
}

/// Mean of consecutive deltas. Zero or one sample has no delta to average.
pub(crate) fn mean_delta(times: &[i64]) -> f64 {
    if times.len() < 2 {
        return 0.0;
    }
    let total: i64 = times.windows(2).map(|w| w[1] - w[0]).sum();
    total as f64 / (times.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    fn session() -> MeasurementSession {
        MeasurementSession::new(WatchConfig::default())
    }

    #[test]
    fn test_basic_cycle() {
        // beerCount = 2; start; 5 ticks; stop.
        let mut sink = MemorySink::new(0);
        let mut s = session();
        s.set_beer_count(2);

        assert!(s.start(&mut sink).is_ok());
        assert!(s.is_running());

        for _ in 0..5 {
            s.on_tick(&mut sink);
        }
        assert_eq!(s.gauge_value(), 5);

        s.stop();
        assert!(!s.is_running());
        assert_eq!(s.entries().len(), 1);
        assert_eq!(s.entries()[0].times.len(), 2);
        assert_eq!(s.entries()[0].beers, 2);
        assert_eq!(s.results().len(), 1);
        assert_eq!(s.results()[0].ingested, 2);
    }

    #[test]
    fn test_start_without_beer_count() {
        let mut sink = MemorySink::new(0);
        let mut s = session();

        assert_eq!(s.start(&mut sink), Err(SessionError::ConfigurationMissing));
        assert!(!s.is_running());
        assert!(s.entries().is_empty());
        assert_eq!(s.errors(), 1);
        assert_eq!(s.snapshot().state, WatchPhase::Error);
    }

    #[test]
    fn test_reentrant_start_leaves_state_unchanged() {
        let mut sink = MemorySink::new(0);
        let mut s = session();
        s.set_beer_count(1);
        s.start(&mut sink).unwrap();

        let times_before = s.snapshot().times.len();
        assert_eq!(s.start(&mut sink), Err(SessionError::AlreadyRunning));
        assert!(s.is_running());
        assert_eq!(s.snapshot().times.len(), times_before);

        // The failed attempt is charged to the open entry.
        s.stop();
        assert_eq!(s.entries()[0].errors, 1);
    }

    #[test]
    fn test_start_with_missing_sink() {
        let mut sink = MemorySink::detached();
        let mut s = session();
        s.set_beer_count(1);

        assert_eq!(s.start(&mut sink), Err(SessionError::SinkUnavailable));
        assert!(!s.is_running());
        assert!(s.entries().is_empty());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut sink = MemorySink::new(0);
        let mut s = session();
        s.set_beer_count(1);
        s.start(&mut sink).unwrap();

        s.stop();
        s.stop();
        assert!(!s.is_running());
        assert_eq!(s.entries().len(), 1);
        assert_eq!(s.results().len(), 1);
    }

    #[test]
    fn test_stop_while_idle_records_nothing() {
        let mut s = session();
        s.stop();
        assert!(!s.is_running());
        assert!(s.entries().is_empty());
    }

    #[test]
    fn test_bound_triggers_automatic_stop() {
        let mut sink = MemorySink::new(0);
        let mut s = session();
        s.set_beer_count(3);
        s.start(&mut sink).unwrap();

        let bound = s.config().gauge_bound;
        let mut last = TickOutcome::Inactive;
        for _ in 0..bound {
            last = s.on_tick(&mut sink);
        }

        assert_eq!(last, TickOutcome::BoundReached(bound));
        assert!(!s.is_running());
        assert_eq!(s.entries().len(), 1);
        assert_eq!(s.gauge_value(), bound);
        // Further ticks are no-ops.
        assert_eq!(s.on_tick(&mut sink), TickOutcome::Inactive);
        assert_eq!(s.entries().len(), 1);
    }

    #[test]
    fn test_entry_times_are_non_decreasing() {
        let mut sink = MemorySink::new(0);
        let mut s = session();
        s.set_beer_count(1);
        s.start(&mut sink).unwrap();
        s.register_time();
        s.register_time();
        s.stop();

        let entry = &s.entries()[0];
        assert_eq!(entry.times.len(), 4);
        assert!(entry.times.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(entry.created, entry.times[0]);
    }

    #[test]
    fn test_phase_mapping() {
        let mut sink = MemorySink::new(0);
        let mut s = session();
        assert_eq!(s.snapshot().state, WatchPhase::Initial);

        s.set_beer_count(1);
        assert_eq!(s.snapshot().state, WatchPhase::Countdown);

        s.start(&mut sink).unwrap();
        assert_eq!(s.snapshot().state, WatchPhase::Waiting);

        s.stop();
        assert_eq!(s.snapshot().state, WatchPhase::Stopped);
    }

    #[test]
    fn test_running_iff_between_start_and_stop() {
        let mut sink = MemorySink::new(0);
        let mut s = session();
        s.set_beer_count(1);

        assert!(!s.is_running());
        s.start(&mut sink).unwrap();
        assert!(s.is_running());
        assert!(s.start(&mut sink).is_err());
        assert!(s.is_running());
        s.stop();
        assert!(!s.is_running());

        s.start(&mut sink).unwrap();
        assert!(s.is_running());
        s.stop();
        assert!(!s.is_running());
        assert_eq!(s.entries().len(), 2);
    }

    #[test]
    fn test_mean_delta() {
        assert_eq!(mean_delta(&[]), 0.0);
        assert_eq!(mean_delta(&[1_000]), 0.0);
        assert_eq!(mean_delta(&[0, 10]), 10.0);
        assert_eq!(mean_delta(&[0, 10, 30]), 15.0);
    }

    #[test]
    fn test_snapshot_aggregates_ingested() {
        let mut sink = MemorySink::new(0);
        let mut s = session();
        s.set_beer_count(2);
        s.start(&mut sink).unwrap();
        s.stop();
        s.set_beer_count(3);
        s.start(&mut sink).unwrap();
        s.stop();

        let snap = s.snapshot();
        assert_eq!(snap.results.len(), 2);
        assert_eq!(snap.ingested, 5);
    }
}
