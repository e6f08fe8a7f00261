use serde::{Deserialize, Serialize};

/// Aggregate-view phase exposed to the UI layer. `Waiting` holds exactly
/// while the session is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchPhase {
    Initial,
    Countdown,
    Waiting,
    Stopped,
    Error,
}

/// Raw record of one completed start->stop cycle. Immutable once closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub created: i64,
    pub errors: u32,
    pub beers: u32,
    pub times: Vec<i64>,
}

/// Derived reporting view of an `Entry`. `avg` is the mean of consecutive
/// deltas in `times`; zero or one sample yields 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PourResult {
    pub created: i64,
    pub times: Vec<i64>,
    pub avg: f64,
    pub errors: u32,
    pub ingested: u32,
}

/// Aggregate snapshot of the whole watch, serialized for the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WobbleWatch {
    pub state: WatchPhase,
    pub times: Vec<i64>,
    pub begin: i64,
    pub errors: u32,
    pub ingested: u32,
    pub results: Vec<PourResult>,
}

impl Default for WobbleWatch {
    fn default() -> Self {
        Self {
            state: WatchPhase::Initial,
            times: Vec::new(),
            begin: now_ms(),
            errors: 0,
            ingested: 0,
            results: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    pub gauge_bound: u32,
    pub gauge_step: u32,
    pub tick_interval_ms: u64,
    pub fast_avg_ms: f64,
    pub slow_avg_ms: f64,
    pub max_rounds: usize,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            gauge_bound: GAUGE_UPPER_BOUND,
            gauge_step: GAUGE_STEP,
            tick_interval_ms: GAUGE_TICK_INTERVAL_MS,
            fast_avg_ms: FAST_POUR_AVG_MS,
            slow_avg_ms: SLOW_POUR_AVG_MS,
            max_rounds: MAX_ROUNDS,
        }
    }
}

/// Envelope for snapshot/advice messages handed to the UI layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchMessage {
    pub message_type: String,
    pub data: serde_json::Value,
}

/// Current wall-clock time in milliseconds since the epoch. All session
/// timestamps come from this single source, so per-entry logs stay
/// non-decreasing.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub const GAUGE_UPPER_BOUND: u32 = 300;
pub const GAUGE_STEP: u32 = 1;
pub const GAUGE_TICK_INTERVAL_MS: u64 = 10;
pub const FAST_POUR_AVG_MS: f64 = 3_000.0; // at or below: still pouring with confidence
pub const SLOW_POUR_AVG_MS: f64 = 7_000.0; // above: time to stop
pub const MAX_ROUNDS: usize = 6; // completed rounds after which the answer is always "stop"
pub const BEER_COUNT_UNSET: i32 = -1;
