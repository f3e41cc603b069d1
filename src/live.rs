use chrono::Utc;
use redis::AsyncCommands;
use serde::Serialize;
use uuid::Uuid;

/// Channels clients subscribe to for "something changed, refetch" hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveTopic {
    FeatureRequests,
    Workspace(Uuid),
    User(Uuid),
}

impl LiveTopic {
    pub fn channel(&self) -> String {
        match self {
            LiveTopic::FeatureRequests => "live:feature_requests".to_string(),
            LiveTopic::Workspace(id) => format!("live:workspace:{}", id),
            LiveTopic::User(id) => format!("live:user:{}", id),
        }
    }
}

#[derive(Serialize)]
struct LiveEvent<'a> {
    topic: &'a str,
    at: String,
}

/// Best-effort publisher; a missing or unreachable Redis never fails a request.
#[derive(Clone, Default)]
pub struct LivePublisher {
    client: Option<redis::Client>,
}

impl LivePublisher {
    pub fn new(client: Option<redis::Client>) -> Self {
        Self { client }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    pub async fn publish(&self, topic: LiveTopic) {
        let Some(client) = &self.client else {
            return;
        };

        let channel = topic.channel();
        let payload = match serde_json::to_string(&LiveEvent {
            topic: &channel,
            at: Utc::now().to_rfc3339(),
        }) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(channel = %channel, "Failed to encode live event: {}", e);
                return;
            }
        };

        let mut conn = match client.get_multiplexed_async_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!(
                    channel = %channel,
                    "Live publish skipped, redis unavailable: {}",
                    e
                );
                return;
            }
        };

        let sent: redis::RedisResult<i64> = conn.publish(&channel, payload).await;
        match sent {
            Ok(receivers) => tracing::debug!(channel = %channel, receivers, "Live event published"),
            Err(e) => tracing::warn!(channel = %channel, "Live publish failed: {}", e),
        }
    }

    pub async fn publish_all(&self, topics: &[LiveTopic]) {
        for topic in topics {
            self.publish(*topic).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_names() {
        let id = Uuid::nil();
        assert_eq!(LiveTopic::FeatureRequests.channel(), "live:feature_requests");
        assert_eq!(
            LiveTopic::Workspace(id).channel(),
            "live:workspace:00000000-0000-0000-0000-000000000000"
        );
        assert!(LiveTopic::User(id).channel().starts_with("live:user:"));
    }

    #[test]
    fn disabled_publisher_is_a_no_op() {
        let publisher = LivePublisher::disabled();
        assert!(!publisher.is_enabled());
        tokio_test::block_on(publisher.publish(LiveTopic::FeatureRequests));
    }
}
