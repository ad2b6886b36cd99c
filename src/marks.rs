//! Presentation markers.
//!
//! Dispositions are applied as two class markers, never as structural
//! removal, so the next pass can reverse any of them when configuration
//! changes. Clearing touches exactly these two markers and nothing else on
//! the element.

use dom_query::Selection;

use crate::dom;
use crate::rules::Disposition;

/// Marker class for suppressed cards.
pub const HIDDEN_MARK: &str = "cardsieve-hidden";

/// Marker class for emphasized cards.
pub const HIGHLIGHT_MARK: &str = "cardsieve-highlighted";

/// The element that receives the suppression marker.
///
/// The observed application wraps each card in a list item that owns its
/// layout box; marking the card element alone would leave an empty row
/// behind. Falls back to the card element when no list-item ancestor
/// exists.
#[must_use]
pub fn suppression_target<'a>(card: &Selection<'a>) -> Selection<'a> {
    dom::nearest_ancestor(card, "li").unwrap_or_else(|| card.clone())
}

/// Reconcile one card's markers with its disposition.
///
/// Idempotent: applying the same disposition twice leaves identical marker
/// state, and switching dispositions clears the marker the previous pass
/// set.
pub fn apply(card: &Selection, disposition: &Disposition) {
    let target = suppression_target(card);
    match disposition {
        Disposition::Hide(_) => {
            dom::add_class(&target, HIDDEN_MARK);
            dom::remove_class(card, HIGHLIGHT_MARK);
        }
        Disposition::Highlight => {
            dom::remove_class(&target, HIDDEN_MARK);
            dom::add_class(card, HIGHLIGHT_MARK);
        }
        Disposition::None => {
            dom::remove_class(&target, HIDDEN_MARK);
            dom::remove_class(card, HIGHLIGHT_MARK);
        }
    }
}

/// Whether the card is currently suppressed.
#[must_use]
pub fn is_hidden(card: &Selection) -> bool {
    dom::has_class(&suppression_target(card), HIDDEN_MARK)
}

/// Whether the card is currently emphasized.
#[must_use]
pub fn is_highlighted(card: &Selection) -> bool {
    dom::has_class(card, HIGHLIGHT_MARK)
}
