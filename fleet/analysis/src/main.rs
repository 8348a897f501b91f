mod window;

use railwatch::{config::build_config, domain::TrainPosition, errors::ConfigError};
use railwatch_kafka::{
    config::{PublishConfig, SubscribeConfig},
    consumer::Subscriber,
    producer::Publisher,
    shutdown,
    topic::{TopicSpec, ensure_topics},
};
use serde::Deserialize;
use std::path::PathBuf;
use tokio::time::{Duration, interval};
use tracing::{debug, info, warn};
use tracing_appender::non_blocking;
use tracing_subscriber::fmt;
use validator::Validate;
use window::SpeedWindow;

const TOPIC: &str = "train-locations";
const GROUP: &str = "analysis-group";

/// Windowing settings of the `analysis` section.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
struct AnalysisConfig {
    /// Tumbling window length in seconds.
    #[validate(range(min = 1))]
    window: u64,
    /// Topic the averages are published to.
    #[validate(length(min = 1))]
    output: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window: 10,
            output: "train-speed-averages".to_string(),
        }
    }
}

impl AnalysisConfig {
    fn load(config: &config::Config) -> Result<Self, ConfigError> {
        let cfg = config.get("analysis").unwrap_or_else(|_| Self::default());
        cfg.validate().map_err(|e| ConfigError::Validation {
            section: "analysis".to_string(),
            message: e.to_string(),
        })?;
        Ok(cfg)
    }
}

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
    let analysis = AnalysisConfig::load(&config).expect("analysis configuration failed");
    let sub_cfg = SubscribeConfig::load(&config, GROUP, TOPIC);
    let pub_cfg = PublishConfig::load(&config);

    ensure_topics(&pub_cfg.bootstrap, &[TopicSpec {
        name: &analysis.output,
        partitions: 3,
    }])
    .await
    .expect("topic creation failed");

    let subscriber: Subscriber<TrainPosition> =
        Subscriber::new(&sub_cfg).expect("consumer creation failed");
    let publisher = Publisher::new(&pub_cfg).expect("producer creation failed");
    let mut shutdown = shutdown::signal();

    let mut speeds = SpeedWindow::new();
    let mut ticker = interval(Duration::from_secs(analysis.window));

    info!(
        "speed analysis started, {}-second windows into {}",
        analysis.window, analysis.output
    );

    loop {
        tokio::select! {
            delivery = subscriber.next(&mut shutdown) => match delivery {
                None => break,
                Some(Ok(delivered)) => {
                    let train = delivered
                        .key
                        .or_else(|| delivered.value.train_id.clone());
                    match train {
                        Some(train) => speeds.add(&train, delivered.value.speed_kph),
                        None => debug!("skipping position without a train id"),
                    }
                }
                Some(Err(e)) => warn!("{e}"),
            },
            _ = ticker.tick() => {
                publish_window(&publisher, &analysis.output, &mut speeds).await;
            }
        }
    }

    // Close the in-flight window before exiting.
    if !speeds.is_empty() {
        info!("publishing final window before shutdown");
        publish_window(&publisher, &analysis.output, &mut speeds).await;
    }

    info!("speed analysis stopped");
}

async fn publish_window(publisher: &Publisher, output: &str, speeds: &mut SpeedWindow) {
    if speeds.is_empty() {
        return;
    }
    let averages = speeds.drain();
    info!("window closed, publishing {} averages", averages.len());
    for average in averages {
        if let Err(e) = publisher.send(output, &average.train_id, &average).await {
            warn!(
                "publishing average for train {} failed: {e}",
                average.train_id
            );
        }
    }
}
