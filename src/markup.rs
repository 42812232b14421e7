//! Markup tree access used by the message parsers.
//!
//! Parsing logic never touches the HTML library directly. It goes through
//! [`MarkupNode`], a small capability interface: find descendants matching a
//! CSS selector, read attributes, read text, read inner markup. The only
//! implementation is for [`scraper::ElementRef`].
//!
//! # Example
//!
//! ```rust
//! use chatpage::markup::{MarkupNode, parse_document};
//!
//! let html = parse_document(r#"<div class="message"><div class="text"> Hi there </div></div>"#);
//! let root = html.root_element();
//! let text = root.find("div.text").map(|n| n.text_content()).unwrap_or_default();
//! assert_eq!(text, "Hi there");
//! ```

use scraper::{ElementRef, Html, Selector};

/// Read-only view over an element of a parsed markup document.
pub trait MarkupNode: Sized {
    /// First descendant matching `selector`, in document order.
    fn find(&self, selector: &str) -> Option<Self>;

    /// All descendants matching `selector`, in document order.
    fn find_all(&self, selector: &str) -> Vec<Self>;

    /// First descendant matching `selector` that is not nested inside a
    /// descendant matching `boundary`.
    fn find_outside(&self, selector: &str, boundary: &str) -> Option<Self>;

    /// Raw attribute value.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Returns `true` if the element's class list contains `class`.
    fn has_class(&self, class: &str) -> bool;

    /// Descendant text fragments, each trimmed, empty ones dropped, joined by
    /// a single space.
    fn text_content(&self) -> String;

    /// Serialized markup of the element's children.
    fn inner_markup(&self) -> String;
}

/// Parses a complete HTML document.
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

fn selector(selector: &str) -> Option<Selector> {
    // Selectors are crate-internal literals; an unparsable one matches nothing.
    Selector::parse(selector).ok()
}

impl MarkupNode for ElementRef<'_> {
    fn find(&self, sel: &str) -> Option<Self> {
        let sel = selector(sel)?;
        self.select(&sel).find(|el| el != self)
    }

    fn find_all(&self, sel: &str) -> Vec<Self> {
        match selector(sel) {
            Some(sel) => self.select(&sel).filter(|el| el != self).collect(),
            None => Vec::new(),
        }
    }

    fn find_outside(&self, sel: &str, boundary: &str) -> Option<Self> {
        let sel = selector(sel)?;
        let boundary = selector(boundary);
        self.select(&sel).find(|el| {
            el != self
                && boundary.as_ref().is_none_or(|b| {
                    !el.ancestors()
                        .filter_map(ElementRef::wrap)
                        .take_while(|a| a != self)
                        .any(|a| b.matches(&a))
                })
        })
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn has_class(&self, class: &str) -> bool {
        self.value().classes().any(|c| c == class)
    }

    fn text_content(&self) -> String {
        self.text()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn inner_markup(&self) -> String {
        self.inner_html()
    }
}

/// Selects all elements in `html` matching `selector`.
pub fn select_all<'a>(html: &'a Html, sel: &str) -> Vec<ElementRef<'a>> {
    match selector(sel) {
        Some(sel) => html.select(&sel).collect(),
        None => Vec::new(),
    }
}
