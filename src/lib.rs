//! # cardsieve
//!
//! Resilient card extraction and rule-driven filtering for volatile
//! single-page-app markup.
//!
//! The observed application renders a list of "cards" and reshuffles its
//! markup without notice. This crate extracts a small set of semantic
//! fields from each card through selector fallback chains, decides per
//! card whether to suppress it, emphasize it, or leave it alone under an
//! externally supplied rule set, and re-runs the whole pipeline with
//! debouncing whenever the document changes. Extraction degradation is
//! detected by bounded health sampling and reported out-of-band; no
//! failure in this crate ever crashes the host page.
//!
//! ## Quick Start
//!
//! ```rust
//! use cardsieve::{FilterEngine, FiltersEnabled, MemorySettings, NullSink, RuleConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let html = r##"
//!     <ul><li><div data-card-id="1">
//!         <div class="entity-lockup__title"><a href="#">Senior Engineer</a></div>
//!         <div class="entity-lockup__subtitle"><span>Acme Corp</span></div>
//!     </div></li></ul>
//! "##;
//!
//! let config = RuleConfig {
//!     company_blacklist: vec!["acme".to_string()],
//!     filters_enabled: FiltersEnabled {
//!         company_blacklist: true,
//!         ..FiltersEnabled::default()
//!     },
//!     ..RuleConfig::default()
//! };
//!
//! let mut engine = FilterEngine::from_html(html, MemorySettings::new(config), NullSink);
//! engine.start().await;
//!
//! let report = engine.last_report().expect("initial pass reports");
//! assert_eq!(report.stats.hidden, 1);
//! # }
//! ```
//!
//! ## Design
//!
//! - **Fallback chains**: every field resolves through an ordered selector
//!   chain, primary first, short-circuit on the first hit; absence is a
//!   normal outcome, not an error.
//! - **Markers, not removal**: dispositions toggle two class markers so a
//!   later pass can reverse any of them when configuration changes.
//! - **Diagnostic health**: a bounded sample per pass detects silent
//!   extraction breakage without ever influencing dispositions.
//! - **Debounced re-evaluation**: mutation bursts collapse into a single
//!   trailing pass; passes are strictly sequential.

mod error;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Engine orchestration and lifecycle.
pub mod engine;

/// Per-card field extraction and normalization.
pub mod extract;

/// Extraction health sampling.
pub mod health;

/// Presentation marker reconciliation.
pub mod marks;

/// Cross-context message shapes and the health sink seam.
pub mod messages;

/// Built-in selector chains and text-cleaning patterns.
pub mod patterns;

/// Rule configuration and disposition classification.
pub mod rules;

/// Debounced change-driven re-scheduling.
pub mod scheduler;

/// Selector chain resolution and card discovery.
pub mod selector;

/// Settings provider seam.
pub mod settings;

/// Aggregate pass statistics.
pub mod stats;

// Public API - re-exports
pub use engine::{EngineOptions, EngineState, FilterEngine, SignalRequest};
pub use error::{Error, Result};
pub use extract::CardFields;
pub use health::{FieldKind, HealthMonitor, HealthReport, SelectorHealth};
pub use messages::{ChannelSink, HealthSink, Inbound, NullSink, Outbound, Reply};
pub use rules::{Disposition, FiltersEnabled, HideReason, RuleConfig, Verdict};
pub use scheduler::{ChangeKind, Debouncer};
pub use selector::{SelectorChain, SelectorConfig};
pub use settings::{MemorySettings, SettingsProvider};
pub use stats::PassStats;
