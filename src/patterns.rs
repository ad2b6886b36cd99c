//! Built-in selector chains and text-cleaning patterns.
//!
//! The observed application reshuffles its markup frequently, so every
//! logical field gets one primary selector plus ordered fallbacks that
//! cover the markup variants seen in the wild. The chains live here in one
//! place so they can be revised without touching the resolution logic.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Card discovery
// =============================================================================

/// Primary selector for card elements, tried document-wide.
pub const CARDS_PRIMARY: &str = "[data-card-id]";

/// Fallback selectors for card elements, in preference order.
pub const CARDS_FALLBACKS: &[&str] = &[
    "[data-occludable-card-id]",
    ".card-container",
    ".results-list__item",
    ".card-list__entry",
];

// =============================================================================
// Per-card field selectors
// =============================================================================

/// Title link inside one card.
pub const TITLE_PRIMARY: &str = ".entity-lockup__title a";

pub const TITLE_FALLBACKS: &[&str] = &[
    ".card-list__title--link",
    ".card-container__link",
    ".card-container__title",
    "h3[aria-label]",
    ".entity-lockup__title",
];

/// Company line inside one card.
pub const COMPANY_PRIMARY: &str = r#".entity-lockup__subtitle span[dir="ltr"]"#;

pub const COMPANY_FALLBACKS: &[&str] = &[
    ".entity-lockup__subtitle span",
    ".entity-lockup__subtitle",
    ".card-container__company-name",
    r#"[data-entity-urn*="company"]"#,
    r#"[aria-label*="company"]"#,
];

/// Location line inside one card.
pub const LOCATION_PRIMARY: &str = r#".card-container__metadata-wrapper li span[dir="ltr"]"#;

pub const LOCATION_FALLBACKS: &[&str] = &[
    r#".entity-lockup__caption li span[dir="ltr"]"#,
    ".entity-lockup__caption li span",
    ".card-container__metadata-wrapper li",
    ".entity-lockup__caption li",
    ".card-container__location",
    r#"[aria-label*="location"]"#,
];

// =============================================================================
// Boolean flag markers
// =============================================================================

/// Markers inside a card's subtree that identify it as a promotion.
pub const PROMOTED_MARKERS: &[&str] = &[
    ".card-footer__badge--promoted",
    ".entity-lockup__badge--promoted",
    r#"[data-promoted="true"]"#,
];

/// Attribute checked on the card element and its ancestors for promotions.
pub const PROMOTED_ATTR: &str = "data-promoted";

/// Markers inside a card's subtree that identify it as already viewed.
pub const VIEWED_MARKERS: &[&str] = &[
    ".card-footer__status--viewed",
    ".card-title-link--viewed",
    r#"[data-viewed="true"]"#,
];

/// Attribute checked on the card element and its ancestors for viewed state.
pub const VIEWED_ATTR: &str = "data-viewed";

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches runs of whitespace for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));
