//! Cross-context message shapes and the health sink seam.
//!
//! The engine is embedded logic: it accepts a small inbound signal
//! vocabulary, answers with typed replies, and emits one outbound health
//! report per completed pass. Wire tags mirror the host channel's
//! SCREAMING_SNAKE_CASE message types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::{Error, Result};
use crate::health::{HealthReport, SelectorHealth};
use crate::stats::PassStats;

/// Inbound signals from the host's messaging channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Inbound {
    /// Configuration changed; reload it and re-run a pass.
    SettingsChanged,

    /// Return the last health sample without starting a new pass.
    GetHealthStatus,

    /// Return the last pass's aggregate counts.
    GetFilterStats,

    /// Liveness probe.
    Ping,
}

/// Outbound signals to the host's messaging channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outbound {
    /// Per-pass health report, fire-and-forget.
    HealthCheck { data: HealthReport },
}

/// Typed reply to one inbound signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reply {
    /// Signal handled.
    Ack,

    /// Liveness answer; `ready` is true only while the engine is active.
    Pong { ready: bool },

    /// Last health sample; `None` before the first pass.
    Health { data: Option<SelectorHealth> },

    /// Last pass's aggregate counts.
    Stats { data: PassStats },

    /// The engine is stopped and no longer processes signals.
    Ignored,
}

/// Outbound transport for health reports.
///
/// Submission is best-effort: the engine logs a failure and moves on, and
/// the next pass naturally retries. Implementations must not block the
/// pass for long.
#[async_trait]
pub trait HealthSink: Send + Sync {
    /// Deliver one report to the host.
    async fn publish(&self, report: HealthReport) -> Result<()>;
}

#[async_trait]
impl<T: HealthSink + ?Sized> HealthSink for std::sync::Arc<T> {
    async fn publish(&self, report: HealthReport) -> Result<()> {
        (**self).publish(report).await
    }
}

/// Sink that discards every report. Useful when no host channel exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

#[async_trait]
impl HealthSink for NullSink {
    async fn publish(&self, _report: HealthReport) -> Result<()> {
        Ok(())
    }
}

/// Sink that forwards each report over a channel as an [`Outbound`]
/// message, for hosts that bridge the engine to a real messaging channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl ChannelSink {
    /// Build a sink and the receiving end the host drains.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl HealthSink for ChannelSink {
    async fn publish(&self, report: HealthReport) -> Result<()> {
        self.tx
            .send(Outbound::HealthCheck { data: report })
            .map_err(|_| Error::ChannelClosed)
    }
}
