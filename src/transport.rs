//! Response delivery boundary.
//!
//! The transport owns the connection back to whoever sent the request. The
//! pipeline calls `set_response` exactly once per request, after the
//! response phase, and only when the gate passed.

use crate::error::{Result, VoxflowError};
use serde_json::Value;
use std::io::Write;
use std::sync::Mutex;

/// Receives the final response payload of a request.
#[async_trait::async_trait]
pub trait ResponseTransport: Send + Sync {
    /// Delivers the response. `None` means the response phase set no
    /// payload; the transport decides what that means on its wire.
    async fn set_response(&self, response: Option<Value>) -> Result<()>;

    /// Name for logging/debugging.
    fn name(&self) -> &'static str {
        "transport"
    }
}

/// Transport that accumulates responses in memory.
///
/// Used by tests and by daemons that forward responses on their own
/// schedule.
#[derive(Debug, Default)]
pub struct CollectorTransport {
    responses: Mutex<Vec<Option<Value>>>,
}

impl CollectorTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Responses delivered so far, in delivery order.
    pub fn responses(&self) -> Vec<Option<Value>> {
        self.responses.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Number of deliveries so far.
    pub fn delivery_count(&self) -> usize {
        self.responses.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl ResponseTransport for CollectorTransport {
    async fn set_response(&self, response: Option<Value>) -> Result<()> {
        self.responses
            .lock()
            .map_err(|_| VoxflowError::Transport {
                message: "collector poisoned".to_string(),
            })?
            .push(response);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "collector"
    }
}

/// Transport that writes each response as a JSON line to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutTransport;

#[async_trait::async_trait]
impl ResponseTransport for StdoutTransport {
    async fn set_response(&self, response: Option<Value>) -> Result<()> {
        let payload = response.unwrap_or(Value::Null);
        let line = serde_json::to_string(&payload)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", line).map_err(|e| VoxflowError::Transport {
            message: format!("stdout write failed: {}", e),
        })?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "stdout"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn collector_accumulates_in_delivery_order() {
        let transport = CollectorTransport::new();

        transport.set_response(Some(json!({"n": 1}))).await.unwrap();
        transport.set_response(None).await.unwrap();
        transport.set_response(Some(json!({"n": 3}))).await.unwrap();

        assert_eq!(
            transport.responses(),
            vec![Some(json!({"n": 1})), None, Some(json!({"n": 3}))]
        );
        assert_eq!(transport.delivery_count(), 3);
    }

    #[tokio::test]
    async fn collector_starts_empty() {
        let transport = CollectorTransport::new();
        assert!(transport.responses().is_empty());
        assert_eq!(transport.delivery_count(), 0);
    }

    #[tokio::test]
    async fn stdout_transport_accepts_missing_payload() {
        let transport = StdoutTransport;
        transport.set_response(None).await.unwrap();
    }

    #[test]
    fn transports_have_names() {
        assert_eq!(CollectorTransport::new().name(), "collector");
        assert_eq!(StdoutTransport.name(), "stdout");
    }
}
