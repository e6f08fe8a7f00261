use anyhow::Context;
use embassy_executor::Spawner;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Timer};
use log::{info, warn};
use std::sync::Arc;
use wobble_watch::controller::{WatchCommand, WatchController};
use wobble_watch::sink::MemorySink;
use wobble_watch::types::{WatchConfig, WatchMessage};

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    env_logger::init();

    info!("Starting WobbleWatch");

    let beers = match beer_count_from_env() {
        Ok(beers) => beers,
        Err(e) => {
            warn!("{:?} - defaulting to 1", e);
            1
        }
    };

    let command_channel = Arc::new(Channel::new());
    let advice_channel = Arc::new(Channel::new());

    let controller = WatchController::new(
        WatchConfig::default(),
        MemorySink::new(0),
        Arc::clone(&command_channel),
        Arc::clone(&advice_channel),
    );
    let state_handle = controller.state_handle();

    spawner.spawn(controller_task(controller)).unwrap();

    // Scripted demo pour: configure, start, let the gauge grow for a bit,
    // then stop and ask for advice.
    command_channel.send(WatchCommand::SetBeerCount(beers)).await;
    command_channel.send(WatchCommand::Start).await;
    Timer::after(Duration::from_millis(120)).await;
    command_channel.send(WatchCommand::Stop).await;

    let advice = advice_channel.receive().await;
    info!("{:?}: {}", advice.tier, advice.text);

    let state = state_handle.lock().await;
    let message = WatchMessage {
        message_type: "snapshot".to_string(),
        data: serde_json::to_value(&state.watch).unwrap(),
    };
    println!("{}", serde_json::to_string_pretty(&message).unwrap());

    std::process::exit(0);
}

#[embassy_executor::task]
async fn controller_task(mut controller: WatchController<MemorySink>) {
    info!("Watch controller task started");
    controller.run().await;
}

fn beer_count_from_env() -> anyhow::Result<u32> {
    match std::env::var("WOBBLE_BEERS") {
        Ok(value) => value
            .trim()
            .parse::<u32>()
            .context("WOBBLE_BEERS must be a non-negative integer"),
        Err(_) => Ok(1),
    }
}
