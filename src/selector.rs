//! Selector Infrastructure
//!
//! Resolution of logical field names against unstable markup. Each field
//! carries a `SelectorChain`: one primary selector plus ordered fallbacks,
//! tried short-circuit until one yields a non-empty selection. Not finding
//! anything is a normal outcome, never an error; downstream layers treat
//! the field as absent.

use dom_query::{Document, Selection};

use crate::patterns;

/// One primary selector plus a non-empty ordered list of fallbacks.
///
/// The primary is always tried first; the first chain member that yields a
/// non-empty selection wins, regardless of whether later members would also
/// match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorChain {
    /// Preferred selector for the current markup generation.
    pub primary: String,

    /// Ordered fallbacks covering older or regional markup variants.
    pub fallbacks: Vec<String>,
}

impl SelectorChain {
    /// Build a chain from a primary selector and fallback slice.
    #[must_use]
    pub fn new(primary: &str, fallbacks: &[&str]) -> Self {
        Self {
            primary: primary.to_string(),
            fallbacks: fallbacks.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// A successful resolution: the matched element and whether a fallback was
/// required to find it. The flag feeds maintenance diagnostics only.
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    /// First element matched by the winning selector.
    pub selection: Selection<'a>,

    /// True when the primary selector missed and a fallback matched.
    pub via_fallback: bool,
}

/// All cards discovered in one pass, with the fallback flag for the
/// document-wide card chain.
#[derive(Debug, Clone)]
pub struct CardSet<'a> {
    /// Discovered card elements in document order.
    pub cards: Vec<Selection<'a>>,

    /// True when card discovery needed a fallback selector.
    pub via_fallback: bool,
}

/// Resolve a field chain inside one container.
///
/// Tries the primary selector, then each fallback in declared order, and
/// returns the first element found. Pure with respect to the document; no
/// side effects.
#[must_use]
pub fn resolve<'a>(scope: &Selection<'a>, chain: &SelectorChain) -> Option<Resolved<'a>> {
    let found = scope.select_single(&chain.primary);
    if found.exists() {
        return Some(Resolved {
            selection: found,
            via_fallback: false,
        });
    }

    for fallback in &chain.fallbacks {
        let found = scope.select_single(fallback);
        if found.exists() {
            return Some(Resolved {
                selection: found,
                via_fallback: true,
            });
        }
    }

    None
}

/// Discover all cards in the document.
///
/// Same short-circuit policy as [`resolve`], applied document-wide: the
/// first chain member that yields any cards supplies the whole list, so a
/// fallback never pads out a primary that already matched.
#[must_use]
pub fn resolve_cards<'a>(doc: &'a Document, chain: &SelectorChain) -> CardSet<'a> {
    let cards = select_all(doc, &chain.primary);
    if !cards.is_empty() {
        return CardSet {
            cards,
            via_fallback: false,
        };
    }

    for fallback in &chain.fallbacks {
        let cards = select_all(doc, fallback);
        if !cards.is_empty() {
            return CardSet {
                cards,
                via_fallback: true,
            };
        }
    }

    CardSet {
        cards: Vec::new(),
        via_fallback: false,
    }
}

fn select_all<'a>(doc: &'a Document, selector: &str) -> Vec<Selection<'a>> {
    doc.select(selector)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

/// Selector chains and flag markers for every logical field.
///
/// `Default` supplies the built-in chains from [`crate::patterns`]; hosts
/// tracking a markup shift can swap in revised chains without code changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Document-wide card discovery chain.
    pub cards: SelectorChain,

    /// Title field chain, resolved per card.
    pub title: SelectorChain,

    /// Company field chain, resolved per card.
    pub company: SelectorChain,

    /// Location field chain, resolved per card.
    pub location: SelectorChain,

    /// Subtree markers that flag a card as promoted.
    pub promoted_markers: Vec<String>,

    /// Subtree markers that flag a card as viewed.
    pub viewed_markers: Vec<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            cards: SelectorChain::new(patterns::CARDS_PRIMARY, patterns::CARDS_FALLBACKS),
            title: SelectorChain::new(patterns::TITLE_PRIMARY, patterns::TITLE_FALLBACKS),
            company: SelectorChain::new(patterns::COMPANY_PRIMARY, patterns::COMPANY_FALLBACKS),
            location: SelectorChain::new(patterns::LOCATION_PRIMARY, patterns::LOCATION_FALLBACKS),
            promoted_markers: patterns::PROMOTED_MARKERS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            viewed_markers: patterns::VIEWED_MARKERS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}
