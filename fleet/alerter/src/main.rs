use railwatch::{
    config::build_config,
    domain::{self, TrainPosition},
    errors::ConfigError,
};
use railwatch_kafka::{config::SubscribeConfig, consumer::Subscriber, shutdown};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_appender::non_blocking;
use tracing_subscriber::fmt;
use validator::Validate;

const TOPIC: &str = "train-locations";
const GROUP: &str = "maintenance-group";

/// Alerting rule settings of the `alert` section.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
struct AlertConfig {
    #[validate(range(min = 0.0))]
    threshold: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            threshold: domain::SLOW_SPEED_KPH,
        }
    }
}

impl AlertConfig {
    fn load(config: &config::Config) -> Result<Self, ConfigError> {
        let cfg = config.get("alert").unwrap_or_else(|_| Self::default());
        cfg.validate().map_err(|e| ConfigError::Validation {
            section: "alert".to_string(),
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
    let rule = AlertConfig::load(&config).expect("alert configuration failed");
    let cfg = SubscribeConfig::load(&config, GROUP, TOPIC);
    let subscriber: Subscriber<TrainPosition> =
        Subscriber::new(&cfg).expect("consumer creation failed");
    let mut shutdown = shutdown::signal();

    info!("maintenance alerter started, listening for slowing trains");

    while let Some(delivery) = subscriber.next(&mut shutdown).await {
        match delivery {
            Ok(delivered) => {
                if let Some(alert) = domain::evaluate_below(&delivered.value, rule.threshold) {
                    warn!("[MAINTENANCE ALERT] {alert}");
                }
            }
            Err(e) => error!("{e}"),
        }
    }

    info!("maintenance alerter stopped");
}
