//! Rule evaluation.
//!
//! Decides one disposition per card per pass from the extracted fields and
//! the externally supplied configuration. Hide checks run in a fixed
//! precedence order, first match wins; the whitelist is consulted only when
//! nothing hides the card.

use serde::{Deserialize, Serialize};

use crate::extract::CardFields;

/// Why a card was hidden. Exactly one reason applies per card per pass.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum HideReason {
    Promoted,
    Viewed,
    CompanyBlacklist,
    LocationBlacklist,
    KeywordBlacklist,
}

/// Outcome for one card in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Suppress the card, for the given reason.
    Hide(HideReason),

    /// Emphasize the card.
    Highlight,

    /// Leave the card untouched (and clear stale markers).
    None,
}

/// A disposition plus every blacklist entry that matched.
///
/// When a blacklist category hides the card, `matched_terms` carries all of
/// that category's matching entries verbatim as configured. Several may
/// apply at once and each feeds the per-term statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub disposition: Disposition,
    pub matched_terms: Vec<String>,
}

impl Verdict {
    fn hide(reason: HideReason, matched_terms: Vec<String>) -> Self {
        Self {
            disposition: Disposition::Hide(reason),
            matched_terms,
        }
    }

    fn plain(disposition: Disposition) -> Self {
        Self {
            disposition,
            matched_terms: Vec::new(),
        }
    }
}

/// Per-category enablement flags, each independently toggleable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct FiltersEnabled {
    pub company_blacklist: bool,
    pub location_blacklist: bool,
    pub keyword_blacklist: bool,
    pub keyword_whitelist: bool,
    pub hide_promoted: bool,
    pub hide_viewed: bool,
}

/// Externally supplied rule configuration.
///
/// Read-only within one pass; a change takes effect on the next pass.
/// `Default` is the safe fallback: every category disabled and empty, so a
/// configuration outage degrades to "filter nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleConfig {
    pub company_blacklist: Vec<String>,
    pub location_blacklist: Vec<String>,
    pub keyword_blacklist: Vec<String>,
    pub keyword_whitelist: Vec<String>,
    pub filters_enabled: FiltersEnabled,
}

/// Classify one card.
///
/// Precedence, top to bottom, first hide wins: promoted, viewed, company
/// blacklist, location blacklist, keyword blacklist over title+company.
/// Then the whitelist may highlight; otherwise the card is left alone.
#[must_use]
pub fn classify(fields: &CardFields, config: &RuleConfig) -> Verdict {
    let enabled = &config.filters_enabled;

    if fields.promoted && enabled.hide_promoted {
        return Verdict::hide(HideReason::Promoted, Vec::new());
    }

    if fields.viewed && enabled.hide_viewed {
        return Verdict::hide(HideReason::Viewed, Vec::new());
    }

    if enabled.company_blacklist {
        if let Some(company) = &fields.company {
            let matched = matching_entries(company, &config.company_blacklist);
            if !matched.is_empty() {
                return Verdict::hide(HideReason::CompanyBlacklist, matched);
            }
        }
    }

    if enabled.location_blacklist {
        if let Some(location) = &fields.location {
            let matched = matching_entries(location, &config.location_blacklist);
            if !matched.is_empty() {
                return Verdict::hide(HideReason::LocationBlacklist, matched);
            }
        }
    }

    let keyword_text = fields.keyword_text();

    if enabled.keyword_blacklist {
        let matched = matching_entries(&keyword_text, &config.keyword_blacklist);
        if !matched.is_empty() {
            return Verdict::hide(HideReason::KeywordBlacklist, matched);
        }
    }

    if enabled.keyword_whitelist
        && !matching_entries(&keyword_text, &config.keyword_whitelist).is_empty()
    {
        return Verdict::plain(Disposition::Highlight);
    }

    Verdict::plain(Disposition::None)
}

/// All entries contained in `text`, verbatim as configured.
///
/// Matching is raw case-insensitive substring containment, not tokenized:
/// a short entry can match inside a longer unrelated word. That imprecision
/// is the documented contract of the rule set; do not "fix" it to
/// whole-word matching without flagging the behavior change.
fn matching_entries(text: &str, entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .filter(|entry| !entry.is_empty() && text.contains(entry.to_lowercase().as_str()))
        .cloned()
        .collect()
}
