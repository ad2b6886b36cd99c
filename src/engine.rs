//! Engine orchestration.
//!
//! Owns the pass lifecycle: discover cards, sample health, classify and
//! reconcile each card, aggregate counts, report. One engine instance per
//! observed document, with an explicit lifecycle instead of an implicit
//! global. All work runs on one logical thread; the driver loop multiplexes
//! the debounce deadline, the host's change feed, and inbound signals.

use std::time::Duration;

use dom_query::Document;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::dom;
use crate::extract;
use crate::health::{HealthMonitor, HealthReport, DEFAULT_SAMPLE_SIZE};
use crate::marks;
use crate::messages::{HealthSink, Inbound, Reply};
use crate::rules::{self, RuleConfig};
use crate::scheduler::{ChangeKind, Debouncer, DEFAULT_DEBOUNCE_WINDOW};
use crate::selector::{self, SelectorConfig};
use crate::settings::SettingsProvider;
use crate::stats::PassStats;

/// Engine lifecycle. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Initializing,
    Active,
    Stopped,
}

/// Tuning knobs for one engine instance.
///
/// The sample size and debounce window are policy constants with sensible
/// defaults, not invariants; hosts may adjust them.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Selector chains and flag markers.
    pub selectors: SelectorConfig,

    /// Cards sampled per pass for health diagnostics.
    pub health_sample_size: usize,

    /// Quiescence window before a mutation-scheduled pass fires.
    pub debounce_window: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            selectors: SelectorConfig::default(),
            health_sample_size: DEFAULT_SAMPLE_SIZE,
            debounce_window: DEFAULT_DEBOUNCE_WINDOW,
        }
    }
}

/// An inbound signal paired with its reply slot.
pub type SignalRequest = (Inbound, oneshot::Sender<Reply>);

/// Top-level filtering engine for one observed document.
///
/// Construction is cheap and side-effect free; [`FilterEngine::start`]
/// loads configuration and runs the initial pass, and
/// [`FilterEngine::run`] drives re-evaluation until the host goes away.
pub struct FilterEngine<S, K> {
    doc: Document,
    selectors: SelectorConfig,
    config: RuleConfig,
    monitor: HealthMonitor,
    debouncer: Debouncer,
    settings: S,
    sink: K,
    state: EngineState,
    last_report: Option<HealthReport>,
}

impl<S, K> FilterEngine<S, K>
where
    S: SettingsProvider,
    K: HealthSink,
{
    /// Build an engine over an already-parsed document.
    #[must_use]
    pub fn new(doc: Document, options: EngineOptions, settings: S, sink: K) -> Self {
        Self {
            doc,
            selectors: options.selectors,
            config: RuleConfig::default(),
            monitor: HealthMonitor::new(options.health_sample_size),
            debouncer: Debouncer::new(options.debounce_window),
            settings,
            sink,
            state: EngineState::Uninitialized,
            last_report: None,
        }
    }

    /// Build an engine with default options from an HTML string.
    #[must_use]
    pub fn from_html(html: &str, settings: S, sink: K) -> Self {
        Self::new(dom::parse(html), EngineOptions::default(), settings, sink)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The observed document, for host-side inspection.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// The report produced by the most recent pass, if any.
    #[must_use]
    pub fn last_report(&self) -> Option<&HealthReport> {
        self.last_report.as_ref()
    }

    /// Load configuration and run the initial pass.
    ///
    /// Never fails the host: a settings outage substitutes the
    /// all-disabled default, so the engine still runs and simply filters
    /// nothing. Calling `start` in any state but `Uninitialized` is a
    /// logged no-op.
    pub async fn start(&mut self) {
        if self.state != EngineState::Uninitialized {
            warn!(state = ?self.state, "start ignored");
            return;
        }
        self.state = EngineState::Initializing;
        self.load_config().await;
        self.state = EngineState::Active;
        info!("engine active");
        self.run_pass().await;
    }

    /// Record a document change reported by the host's watcher.
    ///
    /// Qualifying changes restart the debounce window; everything else is
    /// dropped. Ignored unless the engine is active.
    pub fn observe_change(&mut self, kind: ChangeKind) {
        if self.state != EngineState::Active || !kind.qualifies() {
            return;
        }
        self.debouncer.touch();
        debug!(?kind, "re-evaluation scheduled");
    }

    /// Handle one inbound signal. A stopped engine answers `Ignored` and
    /// does nothing else.
    pub async fn handle_signal(&mut self, signal: Inbound) -> Reply {
        if self.state == EngineState::Stopped {
            return Reply::Ignored;
        }
        match signal {
            Inbound::Ping => Reply::Pong {
                ready: self.state == EngineState::Active,
            },
            Inbound::SettingsChanged => {
                if self.state == EngineState::Active {
                    self.load_config().await;
                    self.run_pass().await;
                }
                Reply::Ack
            }
            Inbound::GetHealthStatus => Reply::Health {
                data: self.last_report.as_ref().map(|r| r.health.clone()),
            },
            Inbound::GetFilterStats => Reply::Stats {
                data: self
                    .last_report
                    .as_ref()
                    .map(|r| r.stats.clone())
                    .unwrap_or_default(),
            },
        }
    }

    /// Run one full pass and report it to the health sink.
    pub async fn run_pass(&mut self) {
        if self.state != EngineState::Active {
            debug!(state = ?self.state, "pass skipped");
            return;
        }
        let report = self.execute_pass();
        self.last_report = Some(report.clone());
        if let Err(err) = self.sink.publish(report).await {
            // Diagnostics are non-critical; the next pass retries.
            warn!(%err, "health report dropped");
        }
    }

    /// Drive the engine until the host context goes away.
    ///
    /// Starts the engine if needed, then multiplexes the debounce
    /// deadline, the change feed, and inbound signals. Either channel
    /// closing means the surrounding context is gone; the engine stops
    /// and the loop returns.
    pub async fn run(
        &mut self,
        mut changes: mpsc::UnboundedReceiver<ChangeKind>,
        mut signals: mpsc::UnboundedReceiver<SignalRequest>,
    ) {
        if self.state == EngineState::Uninitialized {
            self.start().await;
        }

        while self.state == EngineState::Active {
            let deadline = self.debouncer.deadline();
            tokio::select! {
                () = wait_for(deadline) => {
                    if self.debouncer.begin_fire() {
                        self.run_pass().await;
                    }
                    self.debouncer.finish_fire();
                }
                change = changes.recv() => match change {
                    Some(kind) => self.observe_change(kind),
                    None => break,
                },
                request = signals.recv() => match request {
                    Some((signal, reply_tx)) => {
                        let reply = self.handle_signal(signal).await;
                        // The requester may have given up; that is fine.
                        let _ = reply_tx.send(reply);
                    }
                    None => break,
                },
            }
        }

        info!("host channel closed");
        self.stop();
    }

    /// Cancel pending work and transition to the terminal state.
    pub fn stop(&mut self) {
        if self.state == EngineState::Stopped {
            return;
        }
        self.debouncer.cancel();
        self.state = EngineState::Stopped;
        info!("engine stopped");
    }

    async fn load_config(&mut self) {
        match self.settings.get_config().await {
            Ok(config) => self.config = config,
            Err(err) => {
                warn!(%err, "settings unavailable, filtering disabled");
                self.config = RuleConfig::default();
            }
        }
    }

    /// One discover → sample → classify → apply → aggregate cycle.
    ///
    /// Mutates nothing but the two presentation markers; dispositions and
    /// health are derived fresh from the current document and config.
    fn execute_pass(&self) -> HealthReport {
        let discovery = selector::resolve_cards(&self.doc, &self.selectors.cards);
        if discovery.via_fallback {
            debug!("card discovery required a fallback selector");
        }

        let health = self.monitor.sample(&discovery.cards, &self.selectors);
        if !health.broken_selectors.is_empty() {
            warn!(broken = ?health.broken_selectors, "broken selectors detected");
        }

        let mut stats = PassStats::default();
        for card in &discovery.cards {
            let fields = extract::extract(card, &self.selectors);
            let verdict = rules::classify(&fields, &self.config);
            marks::apply(card, &verdict.disposition);
            stats.record(&verdict);
        }

        info!(
            cards = stats.cards_seen,
            hidden = stats.hidden,
            highlighted = stats.highlighted,
            "pass complete"
        );

        HealthReport { health, stats }
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}
