//! Kafka error definitions

use thiserror::Error;

/// Errors raised while consuming a topic.
#[derive(Debug, Error)]
pub enum ConsumeError {
    /// Client or broker failure.
    #[error("kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),
    /// Payload bytes were not a valid record.
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
    /// Message-level contract violation.
    #[error("processing error: {0}")]
    Processing(String),
}

impl From<&str> for ConsumeError {
    fn from(s: &str) -> Self {
        ConsumeError::Processing(s.to_string())
    }
}

/// Errors raised while publishing to a topic.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Client or broker failure.
    #[error("kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),
    /// The record could not be serialized.
    #[error("payload encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}
