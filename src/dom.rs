//! DOM Operations Adapter
//!
//! Thin adapter over the `dom_query` crate. Keeps the rest of the engine
//! decoupled from the DOM library's API surface and adds the class-token
//! helpers the marker layer needs.

// Re-export core types for external use
pub use dom_query::{Document, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Set an attribute value
#[inline]
pub fn set_attribute(sel: &Selection, name: &str, value: &str) {
    sel.set_attr(name, value);
}

/// Check if attribute exists
#[inline]
#[must_use]
pub fn has_attribute(sel: &Selection, name: &str) -> bool {
    sel.has_attr(name)
}

/// Remove an attribute
#[inline]
pub fn remove_attribute(sel: &Selection, name: &str) {
    sel.remove_attr(name);
}

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

// === Class Token Helpers ===

/// Check whether the class attribute contains `token` as a whole
/// whitespace-separated word.
#[must_use]
pub fn has_class(sel: &Selection, token: &str) -> bool {
    class_name(sel)
        .map(|classes| classes.split_whitespace().any(|c| c == token))
        .unwrap_or(false)
}

/// Add a class token if not already present.
pub fn add_class(sel: &Selection, token: &str) {
    if has_class(sel, token) {
        return;
    }
    let classes = class_name(sel).unwrap_or_default();
    let updated = if classes.trim().is_empty() {
        token.to_string()
    } else {
        format!("{} {token}", classes.trim())
    };
    set_attribute(sel, "class", &updated);
}

/// Remove a class token, leaving all other tokens untouched.
///
/// Drops the class attribute entirely when the last token goes.
pub fn remove_class(sel: &Selection, token: &str) {
    let Some(classes) = class_name(sel) else {
        return;
    };
    let remaining: Vec<&str> = classes
        .split_whitespace()
        .filter(|c| *c != token)
        .collect();
    if remaining.is_empty() {
        remove_attribute(sel, "class");
    } else {
        set_attribute(sel, "class", &remaining.join(" "));
    }
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

// === Tree Navigation ===

/// Get parent element
#[inline]
#[must_use]
pub fn parent<'a>(sel: &Selection<'a>) -> Selection<'a> {
    sel.parent()
}

/// Get the nearest ancestor with the given tag name, if any.
///
/// Walks parents from nearest to furthest and stops at the first hit.
#[must_use]
pub fn nearest_ancestor<'a>(sel: &Selection<'a>, ancestor_tag: &str) -> Option<Selection<'a>> {
    let mut current = parent(sel);
    while current.exists() {
        if tag_name(&current).as_deref() == Some(ancestor_tag) {
            return Some(current);
        }
        current = parent(&current);
    }
    None
}

/// Check whether the element itself or any ancestor carries the attribute.
#[must_use]
pub fn self_or_ancestor_has_attribute(sel: &Selection, name: &str) -> bool {
    if has_attribute(sel, name) {
        return true;
    }
    let mut current = parent(sel);
    while current.exists() {
        if has_attribute(&current, name) {
            return true;
        }
        current = parent(&current);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_select() {
        let doc = parse(r#"<div id="main" class="container">content</div>"#);
        let div = doc.select("div");

        assert_eq!(get_attribute(&div, "id"), Some("main".to_string()));
        assert_eq!(class_name(&div), Some("container".to_string()));
    }

    #[test]
    fn test_has_class_matches_whole_tokens_only() {
        let doc = parse(r#"<div class="card card-container">x</div>"#);
        let div = doc.select("div");

        assert!(has_class(&div, "card"));
        assert!(has_class(&div, "card-container"));
        assert!(!has_class(&div, "container"));
    }

    #[test]
    fn test_add_class_is_idempotent() {
        let doc = parse(r#"<div class="card">x</div>"#);
        let div = doc.select("div");

        add_class(&div, "marked");
        add_class(&div, "marked");

        assert_eq!(class_name(&div), Some("card marked".to_string()));
    }

    #[test]
    fn test_add_class_on_element_without_class_attribute() {
        let doc = parse("<div>x</div>");
        let div = doc.select("div");

        add_class(&div, "marked");
        assert_eq!(class_name(&div), Some("marked".to_string()));
    }

    #[test]
    fn test_remove_class_leaves_other_tokens() {
        let doc = parse(r#"<div class="card marked special">x</div>"#);
        let div = doc.select("div");

        remove_class(&div, "marked");
        assert_eq!(class_name(&div), Some("card special".to_string()));
    }

    #[test]
    fn test_remove_last_class_drops_attribute() {
        let doc = parse(r#"<div class="marked">x</div>"#);
        let div = doc.select("div");

        remove_class(&div, "marked");
        assert_eq!(class_name(&div), None);
    }

    #[test]
    fn test_nearest_ancestor_finds_closest_match() {
        let doc = parse(
            r#"
            <ul>
                <li id="outer"><div><span id="target">x</span></div></li>
            </ul>
        "#,
        );
        let target = doc.select("#target");

        let li = nearest_ancestor(&target, "li");
        assert!(li.is_some());
        assert_eq!(
            li.and_then(|s| get_attribute(&s, "id")),
            Some("outer".to_string())
        );
        assert!(nearest_ancestor(&target, "table").is_none());
    }

    #[test]
    fn test_self_or_ancestor_has_attribute() {
        let doc = parse(r#"<div data-flag="1"><p><em id="deep">x</em></p></div>"#);
        let deep = doc.select("#deep");

        assert!(self_or_ancestor_has_attribute(&deep, "data-flag"));
        assert!(!self_or_ancestor_has_attribute(&deep, "data-other"));
    }
}
