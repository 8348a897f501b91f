use railwatch::config::build_config;
use railwatch_kafka::config::{PublishConfig, SubscribeConfig};
use std::path::PathBuf;
use tokio::time::Duration;

#[test]
fn subscribe_defaults() {
    let config = build_config(PathBuf::from(env!("CARGO_MANIFEST_DIR"))).unwrap();
    let cfg = SubscribeConfig::load(&config, "maintenance-group", "train-locations");
    assert_eq!(cfg.bootstrap, "localhost:9092");
    assert_eq!(cfg.group, "maintenance-group");
    assert_eq!(cfg.topic, "train-locations");
    assert_eq!(cfg.settings.get("auto.offset.reset").unwrap(), "earliest");
    assert_eq!(cfg.settings.get("enable.auto.commit").unwrap(), "true");
}

#[test]
fn publish_defaults() {
    let config = build_config(PathBuf::from(env!("CARGO_MANIFEST_DIR"))).unwrap();
    let cfg = PublishConfig::load(&config);
    assert_eq!(cfg.bootstrap, "localhost:9092");
    assert_eq!(cfg.timeout, Duration::from_secs(5));
    assert_eq!(cfg.settings.get("message.timeout.ms").unwrap(), "5000");
}
