//! Push notification plumbing.
//!
//! The mobile client registers its APNs device token with a fire-and-forget
//! `GET /register?deviceToken=<hex>`. Tokens land in the registry here, and
//! every sent poke is published as a typed [`PokeEvent`] on a broadcast
//! channel. The dispatcher renders the wire payload for each registered
//! device and stops at a structured log line; actual delivery transport is
//! out of scope.

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::errors::AppError;

/// A poke announced to the notification pipeline.
#[derive(Debug, Clone)]
pub struct PokeEvent {
    pub from_display_name: String,
    pub to_user_id: Uuid,
}

/// Wire payload for a poke push notification.
///
/// This is the documented contract with the client: a `type` discriminator,
/// and for `type == "poke"` a nested sender carrying the display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub from_user: PushSender,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushSender {
    pub display_name: String,
}

impl PushPayload {
    pub fn poke(from_display_name: &str) -> Self {
        Self {
            kind: "poke".to_string(),
            from_user: PushSender {
                display_name: from_display_name.to_string(),
            },
        }
    }
}

/// Device-token registry plus the poke event channel.
pub struct Notifier {
    tokens: RwLock<Vec<String>>,
    events: broadcast::Sender<PokeEvent>,
}

impl Notifier {
    pub fn new(buffer: usize) -> Self {
        let (events, _) = broadcast::channel(buffer);
        Self {
            tokens: RwLock::new(Vec::new()),
            events,
        }
    }

    /// Register a hex-encoded device token.
    ///
    /// The token is validated and normalized to lowercase; registering the
    /// same token again is a no-op. Returns whether the token was new.
    pub async fn register_device(&self, token: &str) -> Result<bool, AppError> {
        let normalized = normalize_token(token)?;

        let mut tokens = self.tokens.write().await;
        if tokens.contains(&normalized) {
            return Ok(false);
        }
        tokens.push(normalized);
        Ok(true)
    }

    pub async fn device_count(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Publish a poke event. Returns the number of live subscribers; zero
    /// subscribers is fine, the event is simply dropped.
    pub fn publish(&self, event: PokeEvent) -> usize {
        self.events.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PokeEvent> {
        self.events.subscribe()
    }

    /// Consume poke events and log the payload that would be pushed to each
    /// registered device. Runs until the channel closes.
    pub async fn run_dispatcher(&self) {
        let mut events = self.subscribe();
        loop {
            match events.recv().await {
                Ok(event) => {
                    let payload = PushPayload::poke(&event.from_display_name);
                    let body = serde_json::to_string(&payload)
                        .unwrap_or_else(|_| "{}".to_string());
                    let devices = self.device_count().await;
                    tracing::info!(
                        to_user_id = %event.to_user_id,
                        devices,
                        payload = %body,
                        "poke notification ready for dispatch"
                    );
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "notification dispatcher lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}

/// Validate and lowercase a hex device token.
fn normalize_token(token: &str) -> Result<String, AppError> {
    if token.is_empty() {
        return Err(AppError::Validation("Device token is required".to_string()));
    }
    hex::decode(token).map_err(|_| {
        AppError::Validation("Device token must be hex-encoded".to_string())
    })?;
    Ok(token.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_device_normalizes_and_dedupes() {
        let notifier = Notifier::new(8);

        assert!(notifier.register_device("A1B2C3").await.unwrap());
        assert!(!notifier.register_device("a1b2c3").await.unwrap());
        assert_eq!(notifier.device_count().await, 1);
    }

    #[tokio::test]
    async fn test_register_device_rejects_bad_tokens() {
        let notifier = Notifier::new(8);

        assert!(notifier.register_device("").await.is_err());
        assert!(notifier.register_device("zznothex").await.is_err());
        // Odd-length hex cannot decode to bytes.
        assert!(notifier.register_device("abc").await.is_err());
        assert_eq!(notifier.device_count().await, 0);
    }

    #[tokio::test]
    async fn test_publish_reaches_subscribers() {
        let notifier = Notifier::new(8);
        let mut events = notifier.subscribe();

        let delivered = notifier.publish(PokeEvent {
            from_display_name: "Alice Johnson".to_string(),
            to_user_id: Uuid::new_v4(),
        });
        assert_eq!(delivered, 1);

        let event = events.recv().await.unwrap();
        assert_eq!(event.from_display_name, "Alice Johnson");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_dropped() {
        let notifier = Notifier::new(8);
        let delivered = notifier.publish(PokeEvent {
            from_display_name: "Bob Smith".to_string(),
            to_user_id: Uuid::new_v4(),
        });
        assert_eq!(delivered, 0);
    }

    #[test]
    fn test_push_payload_wire_format() {
        let payload = PushPayload::poke("Alice Johnson");
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["type"], "poke");
        assert_eq!(json["fromUser"]["displayName"], "Alice Johnson");
    }
}
