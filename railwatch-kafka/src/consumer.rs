//! Topic subscriber

use crate::{config::SubscribeConfig, errors::ConsumeError};
use rdkafka::{
    ClientConfig, Message,
    consumer::{Consumer, StreamConsumer},
    message::BorrowedMessage,
};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use tokio::sync::watch;
use tracing::{debug, info};

/// One decoded delivery from the broker.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivered<T> {
    /// Message key, if the producer set one.
    pub key: Option<String>,
    /// Partition the message arrived on.
    pub partition: i32,
    /// Offset of the message within its partition.
    pub offset: i64,
    /// The decoded record.
    pub value: T,
}

/// Owns one consumer-group subscription on one topic.
///
/// Constructed explicitly and passed into the service loop; there is no
/// process-wide client state. Offset commits are left to the client
/// (`enable.auto.commit` in the consumer settings).
pub struct Subscriber<T> {
    consumer: StreamConsumer,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> Subscriber<T> {
    /// Creates the consumer and subscribes it.
    pub fn new(cfg: &SubscribeConfig) -> Result<Self, ConsumeError> {
        let mut config = ClientConfig::new();
        for (key, value) in &cfg.settings {
            config.set(key, value);
        }
        config.set("bootstrap.servers", &cfg.bootstrap);
        config.set("group.id", &cfg.group);
        let consumer: StreamConsumer = config.create()?;
        consumer.subscribe(&[&cfg.topic])?;
        info!("group {} subscribed to {}", cfg.group, cfg.topic);
        Ok(Self {
            consumer,
            _marker: PhantomData,
        })
    }

    /// One cancellable poll.
    ///
    /// Suspends until the broker delivers a message or `shutdown` flips.
    /// Returns `None` once shutdown is observed; broker errors and malformed
    /// payloads are isolated to the record they arrived with, so the caller
    /// keeps looping.
    pub async fn next(
        &self,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Option<Result<Delivered<T>, ConsumeError>> {
        if *shutdown.borrow() {
            return None;
        }
        tokio::select! {
            biased;
            _ = shutdown.changed() => {
                info!("received shutdown signal, leaving consume loop");
                None
            }
            msg = self.consumer.recv() => match msg {
                Ok(msg) => Some(Self::decode(&msg)),
                Err(e) => Some(Err(e.into())),
            }
        }
    }

    fn decode(msg: &BorrowedMessage<'_>) -> Result<Delivered<T>, ConsumeError> {
        let value = decode_value(msg.payload())?;
        let key = msg.key().map(|k| String::from_utf8_lossy(k).into_owned());
        debug!(
            "delivery on {}|{} offset {}",
            msg.topic(),
            msg.partition(),
            msg.offset()
        );
        Ok(Delivered {
            key,
            partition: msg.partition(),
            offset: msg.offset(),
            value,
        })
    }
}

fn decode_value<T: DeserializeOwned>(payload: Option<&[u8]>) -> Result<T, ConsumeError> {
    let payload = payload.ok_or("empty message payload")?;
    Ok(serde_json::from_slice(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use railwatch::domain::TrainPosition;

    #[test]
    fn payload_decodes_camel_case_record() {
        let payload: &[u8] = br#"{"trainId":"T1","speedKph":45.0,"latitude":52.1,"longitude":4.3}"#;
        let position: TrainPosition = decode_value(Some(payload)).unwrap();
        assert_eq!(position.train_id.as_deref(), Some("T1"));
        assert_eq!(position.speed_kph, 45.0);
    }

    #[test]
    fn missing_payload_is_a_processing_error() {
        let err = decode_value::<TrainPosition>(None).unwrap_err();
        assert!(matches!(err, ConsumeError::Processing(_)));
    }

    #[test]
    fn garbage_payload_is_a_decode_error() {
        let err = decode_value::<TrainPosition>(Some(b"not json".as_slice())).unwrap_err();
        assert!(matches!(err, ConsumeError::Decode(_)));
    }

    #[test]
    fn record_without_speed_is_a_decode_error() {
        let err = decode_value::<TrainPosition>(Some(br#"{"trainId":"T1"}"#.as_slice())).unwrap_err();
        assert!(err.to_string().contains("speedKph"));
    }
}
