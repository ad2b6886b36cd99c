//! Extraction health sampling.
//!
//! The observed application changes markup without notice, which breaks
//! extraction silently: cards still render, rules still run, but every
//! field comes back absent. The monitor samples a bounded handful of cards
//! per pass to catch that drift cheaply. Health is diagnostic only - it
//! never blocks or alters dispositions.

use chrono::{DateTime, Utc};
use dom_query::Selection;
use serde::{Deserialize, Serialize};

use crate::extract;
use crate::selector::SelectorConfig;
use crate::stats::PassStats;

/// Default number of cards sampled per pass.
pub const DEFAULT_SAMPLE_SIZE: usize = 3;

/// Field kinds tracked by health sampling.
///
/// Flags are deliberately excluded: a missing badge is indistinguishable
/// from a card that simply is not promoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Cards,
    Company,
    Location,
    Title,
}

/// Whether field extraction currently succeeds, per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorHealth {
    /// Cards discovered this pass.
    pub cards_found: usize,

    /// True iff no tracked field kind is broken.
    pub selectors_working: bool,

    /// Field kinds with no successful extraction across the sample.
    pub broken_selectors: Vec<FieldKind>,

    /// Field kinds with at least one successful extraction.
    pub working_selectors: Vec<FieldKind>,

    /// When this sample was taken.
    pub last_update: DateTime<Utc>,
}

/// Per-pass summary emitted to the health sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Extraction health sample.
    pub health: SelectorHealth,

    /// Aggregate disposition counts.
    pub stats: PassStats,
}

/// Samples a bounded subset of cards to judge extraction health.
///
/// Cost is O(sample size) per pass regardless of how many cards the page
/// holds; completeness is traded away on purpose.
#[derive(Debug, Clone)]
pub struct HealthMonitor {
    sample_size: usize,
}

impl Default for HealthMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_SIZE)
    }
}

impl HealthMonitor {
    /// Build a monitor sampling up to `sample_size` cards per pass.
    #[must_use]
    pub fn new(sample_size: usize) -> Self {
        Self {
            sample_size: sample_size.max(1),
        }
    }

    /// Judge extraction health from the first `min(sample_size, N)` cards.
    ///
    /// Zero cards is itself the broken state: nothing can be sampled, so
    /// the card discovery chain is reported broken and nothing else is
    /// judged. Otherwise a field kind is working iff at least one sampled
    /// card yields non-empty text for it.
    #[must_use]
    pub fn sample(&self, cards: &[Selection], config: &SelectorConfig) -> SelectorHealth {
        if cards.is_empty() {
            return SelectorHealth {
                cards_found: 0,
                selectors_working: false,
                broken_selectors: vec![FieldKind::Cards],
                working_selectors: Vec::new(),
                last_update: Utc::now(),
            };
        }

        let sample = &cards[..self.sample_size.min(cards.len())];
        let kinds = [
            (FieldKind::Company, &config.company),
            (FieldKind::Location, &config.location),
            (FieldKind::Title, &config.title),
        ];

        let mut working = Vec::new();
        let mut broken = Vec::new();

        for (kind, chain) in kinds {
            let alive = sample
                .iter()
                .any(|card| extract::field_text(card, chain).is_some_and(|t| !t.is_empty()));
            if alive {
                working.push(kind);
            } else {
                broken.push(kind);
            }
        }

        SelectorHealth {
            cards_found: cards.len(),
            selectors_working: broken.is_empty(),
            broken_selectors: broken,
            working_selectors: working,
            last_update: Utc::now(),
        }
    }
}
