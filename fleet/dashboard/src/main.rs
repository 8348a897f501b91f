use railwatch::{config::build_config, domain::TrainPosition};
use railwatch_kafka::{config::SubscribeConfig, consumer::Subscriber, shutdown};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_appender::non_blocking;
use tracing_subscriber::fmt;

const TOPIC: &str = "train-locations";
const GROUP: &str = "dashboard-group";

// Deliberately a different group than the alerter: the dashboard receives
// its own independent copy of the stream.
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
    let cfg = SubscribeConfig::load(&config, GROUP, TOPIC);
    let subscriber: Subscriber<TrainPosition> =
        Subscriber::new(&cfg).expect("consumer creation failed");
    let mut shutdown = shutdown::signal();

    info!("dashboard feed started");

    while let Some(delivery) = subscriber.next(&mut shutdown).await {
        match delivery {
            Ok(delivered) => {
                let key = delivered.key.as_deref().unwrap_or("unknown");
                info!(
                    "[partition {}] received position for train {key}: speed {} kph",
                    delivered.partition, delivered.value.speed_kph
                );
            }
            Err(e) => warn!("{e}"),
        }
    }

    info!("dashboard feed stopped");
}
