//! Per-card field extraction.
//!
//! Pulls the semantic fields out of one card through the selector chains
//! and normalizes them exactly once (trimmed, whitespace-collapsed,
//! lowercased), so every downstream comparison is a plain substring check.
//! Extraction is unconditional: whether a flag or field is acted upon is
//! the rule engine's concern.

use dom_query::Selection;

use crate::dom;
use crate::patterns;
use crate::selector::{self, SelectorChain, SelectorConfig};

/// Semantic fields of one card, rebuilt on every pass.
///
/// `None` means no selector in the field's chain matched; an empty string
/// means the matched element carried no text. Both are harmless downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFields {
    /// Card title, normalized.
    pub title: Option<String>,

    /// Company line, normalized.
    pub company: Option<String>,

    /// Location line, normalized.
    pub location: Option<String>,

    /// True when any promotion marker is present.
    pub promoted: bool,

    /// True when any viewed marker is present.
    pub viewed: bool,
}

impl CardFields {
    /// Title and company joined for keyword matching, absent parts skipped.
    #[must_use]
    pub fn keyword_text(&self) -> String {
        let mut parts = Vec::new();
        if let Some(title) = &self.title {
            parts.push(title.as_str());
        }
        if let Some(company) = &self.company {
            parts.push(company.as_str());
        }
        parts.join(" ")
    }
}

/// Extract all semantic fields from one card.
#[must_use]
pub fn extract(card: &Selection, config: &SelectorConfig) -> CardFields {
    CardFields {
        title: field_text(card, &config.title),
        company: field_text(card, &config.company),
        location: field_text(card, &config.location),
        promoted: flag_present(card, &config.promoted_markers, patterns::PROMOTED_ATTR),
        viewed: flag_present(card, &config.viewed_markers, patterns::VIEWED_ATTR),
    }
}

/// Resolve one text field and normalize it.
///
/// Returns `None` when no chain member matches. Normalization happens here
/// and nowhere else.
#[must_use]
pub fn field_text(card: &Selection, chain: &SelectorChain) -> Option<String> {
    selector::resolve(card, chain).map(|resolved| normalize(&dom::text_content(&resolved.selection)))
}

/// Check a boolean flag against its structural markers.
///
/// Any subtree marker hit sets the flag, as does the marker attribute on
/// the card element itself or any ancestor. Markers are independent of the
/// enablement of the rule that consumes them.
fn flag_present(card: &Selection, markers: &[String], marker_attr: &str) -> bool {
    if markers.iter().any(|m| card.select_single(m).exists()) {
        return true;
    }
    dom::self_or_ancestor_has_attribute(card, marker_attr)
}

fn normalize(text: &str) -> String {
    patterns::WHITESPACE_NORMALIZE
        .replace_all(text.trim(), " ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: &str = r##"
        <div data-card-id="42">
            <div class="entity-lockup__title"><a href="#">  Senior
                Rust   Engineer </a></div>
            <div class="entity-lockup__subtitle"><span dir="ltr">Acme Corp</span></div>
            <div class="card-container__metadata-wrapper">
                <li><span dir="ltr">Berlin, Germany</span></li>
            </div>
        </div>
    "##;

    fn card_in(html: &str) -> (dom_query::Document, &'static str) {
        (dom::parse(html), "[data-card-id]")
    }

    #[test]
    fn test_extracts_and_normalizes_text_fields() {
        let (doc, sel) = card_in(CARD);
        let card = doc.select(sel);

        let fields = extract(&card, &SelectorConfig::default());
        assert_eq!(fields.title.as_deref(), Some("senior rust engineer"));
        assert_eq!(fields.company.as_deref(), Some("acme corp"));
        assert_eq!(fields.location.as_deref(), Some("berlin, germany"));
        assert!(!fields.promoted);
        assert!(!fields.viewed);
    }

    #[test]
    fn test_missing_field_is_absent_not_empty() {
        let (doc, sel) = card_in(r#"<div data-card-id="1"><p>bare card</p></div>"#);
        let card = doc.select(sel);

        let fields = extract(&card, &SelectorConfig::default());
        assert_eq!(fields.title, None);
        assert_eq!(fields.company, None);
        assert_eq!(fields.location, None);
    }

    #[test]
    fn test_field_resolves_through_fallback_chain() {
        let html = r#"
            <div data-card-id="1">
                <div class="card-container__company-name">Globex</div>
            </div>
        "#;
        let (doc, sel) = card_in(html);
        let card = doc.select(sel);

        let fields = extract(&card, &SelectorConfig::default());
        assert_eq!(fields.company.as_deref(), Some("globex"));
    }

    #[test]
    fn test_promoted_flag_from_footer_badge() {
        let html = r#"
            <div data-card-id="1">
                <footer><span class="card-footer__badge--promoted">Promoted</span></footer>
            </div>
        "#;
        let (doc, sel) = card_in(html);
        let card = doc.select(sel);

        let fields = extract(&card, &SelectorConfig::default());
        assert!(fields.promoted);
        assert!(!fields.viewed);
    }

    #[test]
    fn test_viewed_flag_from_title_link_marker() {
        let html = r##"
            <div data-card-id="1">
                <a class="card-title-link--viewed" href="#">Seen before</a>
            </div>
        "##;
        let (doc, sel) = card_in(html);
        let card = doc.select(sel);

        let fields = extract(&card, &SelectorConfig::default());
        assert!(fields.viewed);
    }

    #[test]
    fn test_flag_from_ancestor_attribute() {
        let html = r#"
            <li data-promoted="true">
                <div data-card-id="1"><p>x</p></div>
            </li>
        "#;
        let (doc, sel) = card_in(html);
        let card = doc.select(sel);

        let fields = extract(&card, &SelectorConfig::default());
        assert!(fields.promoted);
    }

    #[test]
    fn test_flags_are_independent() {
        let html = r#"
            <div data-card-id="1" data-viewed="true">
                <footer><span class="card-footer__badge--promoted">Promoted</span></footer>
            </div>
        "#;
        let (doc, sel) = card_in(html);
        let card = doc.select(sel);

        let fields = extract(&card, &SelectorConfig::default());
        assert!(fields.promoted);
        assert!(fields.viewed);
    }

    #[test]
    fn test_keyword_text_skips_absent_parts() {
        let fields = CardFields {
            title: Some("senior rust engineer".to_string()),
            company: None,
            ..CardFields::default()
        };
        assert_eq!(fields.keyword_text(), "senior rust engineer");

        let empty = CardFields::default();
        assert_eq!(empty.keyword_text(), "");
    }
}
