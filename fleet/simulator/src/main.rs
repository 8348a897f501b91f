use rand::Rng;
use railwatch::{config::build_config, domain::TrainPosition};
use railwatch_kafka::{
    config::PublishConfig,
    producer::Publisher,
    shutdown,
    topic::{TopicSpec, ensure_topics},
};
use std::path::PathBuf;
use tokio::time::{Duration, interval};
use tracing::{info, warn};
use tracing_appender::non_blocking;
use tracing_subscriber::fmt;

const TOPIC: &str = "train-locations";

/// Roster of simulated trains.
const TRAINS: [&str; 3] = ["T-81A", "T-45B", "T-99C"];

#[tokio::main]
async fn main() {
    let (non_blocking, _guard) = non_blocking(std::io::stdout());
    fmt()
        .with_writer(non_blocking)
        .with_target(false)
        .pretty()
        .init();

    let config =
        build_config(PathBuf::from(env!("CARGO_MANIFEST_DIR"))).expect("configuration failed");
    let cadence = config.get("interval").unwrap_or(100u64);
    let cfg = PublishConfig::load(&config);
    ensure_topics(&cfg.bootstrap, &[TopicSpec {
        name: TOPIC,
        partitions: 3,
    }])
    .await
    .expect("topic creation failed");
    let publisher = Publisher::new(&cfg).expect("producer creation failed");
    let mut shutdown = shutdown::signal();
    let mut ticker = interval(Duration::from_millis(cadence));

    info!("position simulator started, publishing every {cadence} ms");

    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed(), if *shutdown.borrow() => {
                info!("received shutdown signal, stopping simulator");
                break;
            }
            _ = ticker.tick() => {
                let position = next_position();
                let train = position.train_id.clone().unwrap_or_default();
                match publisher.send(TOPIC, &train, &position).await {
                    Ok(()) => info!("sent position update for train {train}: {position:?}"),
                    Err(e) => warn!("publishing position for train {train} failed: {e}"),
                }
            }
        }
    }
}

fn next_position() -> TrainPosition {
    let mut rng = rand::rng();
    let train = TRAINS[rng.random_range(0..TRAINS.len())];
    TrainPosition {
        train_id: Some(train.to_owned()),
        speed_kph: rng.random_range(30..150) as f64,
        latitude: Some(48.85 + rng.random_range(0.0..0.1)),
        longitude: Some(2.35 + rng.random_range(0.0..0.1)),
    }
}
