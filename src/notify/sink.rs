//! Alert delivery seam.

use async_trait::async_trait;
use std::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub symbol: Option<String>,
    pub message: String,
}

impl Alert {
    pub fn for_symbol(symbol: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            message: message.into(),
        }
    }

    pub fn report(message: impl Into<String>) -> Self {
        Self {
            symbol: None,
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait AlertSink {
    async fn send(&self, alert: Alert) -> std::io::Result<()>;
}

/// Prints alerts to stdout.
pub struct StdoutSink;

#[async_trait]
impl AlertSink for StdoutSink {
    async fn send(&self, alert: Alert) -> std::io::Result<()> {
        use tokio::io::AsyncWriteExt;

        let mut stdout = tokio::io::stdout();
        stdout.write_all(alert.message.as_bytes()).await?;
        stdout.write_all(b"\n\n").await?;
        stdout.flush().await?;
        info!(symbol = ?alert.symbol, "alert delivered to stdout");
        Ok(())
    }
}

/// Keeps alerts in memory.
#[derive(Default)]
pub struct MemorySink {
    alerts: Mutex<Vec<Alert>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl AlertSink for MemorySink {
    async fn send(&self, alert: Alert) -> std::io::Result<()> {
        self.alerts
            .lock()
            .map_err(|e| std::io::Error::other(e.to_string()))?
            .push(alert);
        Ok(())
    }
}
