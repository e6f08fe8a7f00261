use crate::advisor::{Advice, PaceAdvisor};
use crate::gauge::TickOutcome;
use crate::session::MeasurementSession;
use crate::sink::RenderSink;
use crate::state::{SharedWatchState, StateManager};
use crate::types::WatchConfig;
use embassy_futures::select::{select, Either};
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel, mutex::Mutex,
};
use embassy_time::{Duration, Timer};
use log::{debug, error, info, warn};
use std::sync::Arc;

// Commands from the UI layer / trigger points
#[derive(Debug, Clone)]
pub enum WatchCommand {
    SetBeerCount(u32),
    Start,
    Stop,
    RegisterTime,
    Advise,
}

pub type WatchCommandChannel = Channel<CriticalSectionRawMutex, WatchCommand, 5>;
pub type AdviceChannel = Channel<CriticalSectionRawMutex, Advice, 2>;

/// Async glue around the session: serializes commands and the tick cadence
/// on one select loop, publishes snapshots for the UI layer, and emits
/// advice when a cycle closes.
///
/// The session and the sink are owned here, so command handling and gauge
/// ticks can never run concurrently.
pub struct WatchController<S: RenderSink> {
    session: MeasurementSession,
    advisor: PaceAdvisor,
    state_manager: StateManager,
    sink: S,
    tick_interval: Duration,
    command_channel: Arc<WatchCommandChannel>,
    advice_channel: Arc<AdviceChannel>,
}

impl<S: RenderSink> WatchController<S> {
    pub fn new(
        config: WatchConfig,
        sink: S,
        command_channel: Arc<WatchCommandChannel>,
        advice_channel: Arc<AdviceChannel>,
    ) -> Self {
        let advisor = PaceAdvisor::new(&config);
        let tick_interval = Duration::from_millis(config.tick_interval_ms);
        Self {
            session: MeasurementSession::new(config),
            advisor,
            state_manager: StateManager::new(),
            sink,
            tick_interval,
            command_channel,
            advice_channel,
        }
    }

    pub fn state_handle(&self) -> Arc<Mutex<CriticalSectionRawMutex, SharedWatchState>> {
        self.state_manager.get_state_handle()
    }

    /// Main loop. While a measurement is running, race the command channel
    /// against the tick timer; while idle, only commands can wake us.
    pub async fn run(&mut self) {
        info!("Starting watch controller loop");
        self.publish().await;

        loop {
            if self.session.is_running() {
                let command_fut = self.command_channel.receive();
                let tick_timer = Timer::after(self.tick_interval);

                match select(command_fut, tick_timer).await {
                    Either::First(command) => {
                        self.handle_command(command).await;
                    }
                    Either::Second(()) => {
                        self.handle_tick().await;
                    }
                }
            } else {
                let command = self.command_channel.receive().await;
                self.handle_command(command).await;
            }
        }
    }

    async fn handle_tick(&mut self) {
        if let TickOutcome::BoundReached(value) = self.session.on_tick(&mut self.sink) {
            info!("Gauge bound reached at {} - cycle auto-stopped", value);
            self.publish().await;
            self.emit_advice().await;
        }
    }

    async fn handle_command(&mut self, command: WatchCommand) {
        debug!("Received command: {:?}", command);

        match command {
            WatchCommand::SetBeerCount(count) => {
                self.session.set_beer_count(count);
                self.state_manager
                    .add_log(format!("Beer count: {}", count))
                    .await;
                self.publish().await;
            }

            WatchCommand::Start => {
                match self.session.start(&mut self.sink) {
                    Ok(()) => {
                        self.state_manager.set_error(None).await;
                        self.state_manager
                            .add_log("Measurement started".to_string())
                            .await;
                    }
                    Err(e) => {
                        error!("Start failed: {}", e);
                        self.state_manager.set_error(Some(e.to_string())).await;
                    }
                }
                self.publish().await;
            }

            WatchCommand::Stop => {
                self.session.stop();
                self.state_manager
                    .add_log("Measurement stopped".to_string())
                    .await;
                self.publish().await;
                self.emit_advice().await;
            }

            WatchCommand::RegisterTime => {
                self.session.register_time();
                self.publish().await;
            }

            WatchCommand::Advise => {
                self.emit_advice().await;
            }
        }
    }

    async fn publish(&self) {
        self.state_manager
            .publish_watch(self.session.snapshot())
            .await;
    }

    async fn emit_advice(&self) {
        let advice = self.advisor.advise(self.session.results());
        self.state_manager
            .add_log(format!("Advice ({:?})", advice.tier))
            .await;
        if self.advice_channel.try_send(advice).is_err() {
            warn!("Failed to deliver advice - channel full");
        }
    }
}
