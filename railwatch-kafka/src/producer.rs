//! Topic publisher

use crate::{config::PublishConfig, errors::PublishError};
use rdkafka::{
    ClientConfig,
    producer::{FutureProducer, FutureRecord, future_producer::Delivery},
};
use serde::Serialize;
use tokio::time::Duration;
use tracing::debug;

/// Owns one producer connection.
pub struct Publisher {
    producer: FutureProducer,
    timeout: Duration,
}

impl Publisher {
    /// Creates the producer.
    pub fn new(cfg: &PublishConfig) -> Result<Self, PublishError> {
        let mut config = ClientConfig::new();
        for (key, value) in &cfg.settings {
            config.set(key, value);
        }
        config.set("bootstrap.servers", &cfg.bootstrap);
        let producer = config.create()?;
        Ok(Self {
            producer,
            timeout: cfg.timeout,
        })
    }

    /// Serializes `value` as JSON and awaits delivery.
    ///
    /// The key routes all records of one train to the same partition, which
    /// keeps that train's events ordered.
    pub async fn send<T: Serialize>(
        &self,
        topic: &str,
        key: &str,
        value: &T,
    ) -> Result<(), PublishError> {
        let payload = serde_json::to_vec(value)?;
        let record = FutureRecord::to(topic).payload(&payload).key(key);
        self.producer
            .send(record, self.timeout)
            .await
            .map_err(|(e, _)| PublishError::Kafka(e))
            .map(
                |Delivery {
                     partition,
                     offset,
                     timestamp: _,
                 }| {
                    debug!("{topic}: key {key} delivered to partition {partition} offset {offset}")
                },
            )
    }
}
