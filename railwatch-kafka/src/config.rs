//! Kafka client configuration sections

use config::Config;
use railwatch::config::load_bootstrap;
use std::collections::HashMap;
use tokio::time::Duration;

/// Settings for one consumer-group subscription.
///
/// The group and topic are fixed per service; configuration contributes the
/// broker address and the pass-through client settings of the `consumer`
/// section.
#[derive(Debug, Clone)]
pub struct SubscribeConfig {
    /// Broker bootstrap address.
    pub bootstrap: String,
    /// Consumer group identity.
    pub group: String,
    /// Topic to subscribe to.
    pub topic: String,
    /// Extra client settings passed through to rdkafka.
    pub settings: HashMap<String, String>,
}

impl SubscribeConfig {
    /// Reads the subscription settings for a service with its fixed group
    /// and topic.
    pub fn load(config: &Config, group: &str, topic: &str) -> Self {
        Self {
            bootstrap: load_bootstrap(config),
            group: group.to_owned(),
            topic: topic.to_owned(),
            settings: load_settings(config, "consumer"),
        }
    }
}

/// Settings for one producer connection.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Broker bootstrap address.
    pub bootstrap: String,
    /// Delivery timeout.
    pub timeout: Duration,
    /// Extra client settings passed through to rdkafka.
    pub settings: HashMap<String, String>,
}

impl PublishConfig {
    /// Reads the producer settings; `timeout` is in seconds, default 5.
    pub fn load(config: &Config) -> Self {
        let timeout = match config.get("timeout") {
            Ok(t) => Duration::from_secs(t),
            Err(_) => Duration::from_secs(5),
        };
        Self {
            bootstrap: load_bootstrap(config),
            timeout,
            settings: load_settings(config, "producer"),
        }
    }
}

fn load_settings(config: &Config, section: &str) -> HashMap<String, String> {
    config
        .get::<HashMap<String, String>>(section)
        .unwrap_or_default()
}
