//! Aggregate disposition counts for one pass.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rules::{Disposition, HideReason, Verdict};

/// Counters derived fresh from one pass; never carried across passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PassStats {
    /// Cards discovered this pass.
    pub cards_seen: usize,

    /// Cards hidden this pass.
    pub hidden: usize,

    /// Cards highlighted this pass.
    pub highlighted: usize,

    /// Hidden count per reason.
    pub hidden_by_reason: BTreeMap<HideReason, usize>,

    /// Match count per company-blacklist entry, keyed as configured.
    pub company_matches: BTreeMap<String, usize>,

    /// Match count per location-blacklist entry, keyed as configured.
    pub location_matches: BTreeMap<String, usize>,

    /// Match count per keyword-blacklist entry, keyed as configured.
    pub keyword_matches: BTreeMap<String, usize>,
}

impl PassStats {
    /// Fold one card's verdict into the counters.
    ///
    /// Every matched blacklist entry is counted, not just the first - one
    /// card can increment several entries of the winning category at once.
    pub fn record(&mut self, verdict: &Verdict) {
        self.cards_seen += 1;

        match &verdict.disposition {
            Disposition::Hide(reason) => {
                self.hidden += 1;
                *self.hidden_by_reason.entry(*reason).or_insert(0) += 1;

                let per_term = match reason {
                    HideReason::CompanyBlacklist => Some(&mut self.company_matches),
                    HideReason::LocationBlacklist => Some(&mut self.location_matches),
                    HideReason::KeywordBlacklist => Some(&mut self.keyword_matches),
                    HideReason::Promoted | HideReason::Viewed => None,
                };
                if let Some(map) = per_term {
                    for term in &verdict.matched_terms {
                        *map.entry(term.clone()).or_insert(0) += 1;
                    }
                }
            }
            Disposition::Highlight => self.highlighted += 1,
            Disposition::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hide(reason: HideReason, terms: &[&str]) -> Verdict {
        Verdict {
            disposition: Disposition::Hide(reason),
            matched_terms: terms.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    #[test]
    fn test_record_counts_every_matched_term() {
        let mut stats = PassStats::default();
        stats.record(&hide(HideReason::KeywordBlacklist, &["rust", "senior"]));
        stats.record(&hide(HideReason::KeywordBlacklist, &["rust"]));

        assert_eq!(stats.cards_seen, 2);
        assert_eq!(stats.hidden, 2);
        assert_eq!(stats.keyword_matches.get("rust"), Some(&2));
        assert_eq!(stats.keyword_matches.get("senior"), Some(&1));
        assert_eq!(
            stats.hidden_by_reason.get(&HideReason::KeywordBlacklist),
            Some(&2)
        );
    }

    #[test]
    fn test_flag_reasons_produce_no_term_counts() {
        let mut stats = PassStats::default();
        stats.record(&hide(HideReason::Promoted, &[]));

        assert_eq!(stats.hidden, 1);
        assert!(stats.company_matches.is_empty());
        assert!(stats.location_matches.is_empty());
        assert!(stats.keyword_matches.is_empty());
    }

    #[test]
    fn test_highlight_and_none_counting() {
        let mut stats = PassStats::default();
        stats.record(&Verdict {
            disposition: Disposition::Highlight,
            matched_terms: Vec::new(),
        });
        stats.record(&Verdict {
            disposition: Disposition::None,
            matched_terms: Vec::new(),
        });

        assert_eq!(stats.cards_seen, 2);
        assert_eq!(stats.hidden, 0);
        assert_eq!(stats.highlighted, 1);
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let mut stats = PassStats::default();
        stats.record(&hide(HideReason::CompanyBlacklist, &["Acme"]));

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["cardsSeen"], 1);
        assert_eq!(json["hiddenByReason"]["companyBlacklist"], 1);
        assert_eq!(json["companyMatches"]["Acme"], 1);
    }
}
