//! Topic administration

use rdkafka::{
    ClientConfig,
    admin::{AdminClient, AdminOptions, NewTopic, TopicReplication},
    client::DefaultClientContext,
    error::KafkaError,
    types::RDKafkaErrorCode,
};
use tokio::time::Duration;
use tracing::{debug, warn};

/// Desired shape of a topic.
pub struct TopicSpec<'a> {
    /// Topic name.
    pub name: &'a str,
    /// Partition count on creation.
    pub partitions: i32,
}

/// Creates the given topics if they do not exist yet.
///
/// Producing services call this on startup; an already-existing topic is
/// not an error.
pub async fn ensure_topics(bootstrap: &str, specs: &[TopicSpec<'_>]) -> Result<(), KafkaError> {
    let admin: AdminClient<DefaultClientContext> = ClientConfig::new()
        .set("bootstrap.servers", bootstrap)
        .create()?;
    let opts = AdminOptions::new()
        .operation_timeout(Some(Duration::from_secs(3)))
        .request_timeout(Some(Duration::from_secs(5)));

    let topics: Vec<NewTopic<'_>> = specs
        .iter()
        .map(|spec| NewTopic::new(spec.name, spec.partitions, TopicReplication::Fixed(1)))
        .collect();

    for result in admin.create_topics(&topics, &opts).await? {
        match result {
            Ok(topic) => debug!("created topic {topic}"),
            Err((topic, RDKafkaErrorCode::TopicAlreadyExists)) => {
                debug!("topic {topic} already exists")
            }
            Err((topic, code)) => warn!("creating topic {topic} failed: {code}"),
        }
    }
    Ok(())
}
