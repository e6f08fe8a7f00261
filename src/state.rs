use crate::types::{WatchPhase, WobbleWatch};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, mutex::Mutex};
use log::info;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

const LOG_RING_SIZE: usize = 100;

/// Everything the UI layer can read: the latest aggregate snapshot, the
/// last surfaced error, and a bounded message log.
#[derive(Debug, Clone)]
pub struct SharedWatchState {
    pub watch: WobbleWatch,
    pub last_error: Option<String>,
    pub log_messages: heapless::Vec<String, LOG_RING_SIZE>,
}

impl Default for SharedWatchState {
    fn default() -> Self {
        Self {
            watch: WobbleWatch::default(),
            last_error: None,
            log_messages: heapless::Vec::new(),
        }
    }
}

/// Snapshot store shared between the controller and the UI layer. The
/// session stays authoritative; the controller publishes into this after
/// every mutation.
pub struct StateManager {
    state: Arc<Mutex<CriticalSectionRawMutex, SharedWatchState>>,
    log_counter: AtomicU32,
}

impl StateManager {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SharedWatchState::default())),
            log_counter: AtomicU32::new(0),
        }
    }

    pub fn get_state_handle(&self) -> Arc<Mutex<CriticalSectionRawMutex, SharedWatchState>> {
        Arc::clone(&self.state)
    }

    pub async fn publish_watch(&self, watch: WobbleWatch) {
        let mut state = self.state.lock().await;
        if state.watch.state != watch.state {
            info!(
                "Watch phase changed: {:?} -> {:?}",
                state.watch.state, watch.state
            );
            self.add_log_message(&mut state, format!("Phase: {:?}", watch.state));
        }
        state.watch = watch;
    }

    pub async fn set_error(&self, error: Option<String>) {
        let mut state = self.state.lock().await;
        state.last_error = error.clone();
        if let Some(err) = error {
            self.add_log_message(&mut state, format!("ERROR: {}", err));
        }
    }

    pub async fn add_log(&self, message: String) {
        let mut state = self.state.lock().await;
        self.add_log_message(&mut state, message);
    }

    fn add_log_message(&self, state: &mut SharedWatchState, message: String) {
        let count = self.log_counter.fetch_add(1, Ordering::Relaxed) + 1;
        let log_entry = format!("[{}] {}", count, message);

        if state.log_messages.len() >= LOG_RING_SIZE {
            state.log_messages.remove(0);
        }

        let _ = state.log_messages.push(log_entry);
    }

    pub async fn get_watch(&self) -> WobbleWatch {
        let state = self.state.lock().await;
        state.watch.clone()
    }

    pub async fn get_phase(&self) -> WatchPhase {
        let state = self.state.lock().await;
        state.watch.state
    }

    pub async fn get_full_state(&self) -> SharedWatchState {
        let state = self.state.lock().await;
        state.clone()
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}
