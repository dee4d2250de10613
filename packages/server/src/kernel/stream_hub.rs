//! In-process pub/sub hub feeding the SSE endpoint.
//!
//! Topics are plain strings. Producers publish JSON values; each subscriber
//! gets its own broadcast receiver.
//!
//!   hub.publish("views", json!({"type": "invalidate", "paths": ["/jobs"]})).await;
//!   let rx = hub.subscribe("views").await;

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{broadcast, RwLock};

/// Cloneable handle; all clones share the same topics.
#[derive(Clone)]
pub struct StreamHub {
    topics: Arc<RwLock<HashMap<String, broadcast::Sender<Value>>>>,
    capacity: usize,
}

impl StreamHub {
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            topics: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }

    /// Publish to a topic. Returns how many subscribers received it.
    pub async fn publish(&self, topic: &str, value: Value) -> usize {
        let topics = self.topics.read().await;
        match topics.get(topic) {
            Some(tx) => tx.send(value).unwrap_or(0),
            None => 0,
        }
    }

    pub async fn subscribe(&self, topic: &str) -> broadcast::Receiver<Value> {
        let mut topics = self.topics.write().await;
        topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// Drop topics nobody listens to.
    pub async fn prune(&self) -> usize {
        let mut topics = self.topics.write().await;
        let before = topics.len();
        topics.retain(|_, tx| tx.receiver_count() > 0);
        before - topics.len()
    }

    pub async fn topic_count(&self) -> usize {
        self.topics.read().await.len()
    }
}

impl Default for StreamHub {
    fn default() -> Self {
        Self::new()
    }
}
