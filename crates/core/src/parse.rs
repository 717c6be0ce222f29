//! HTML parsing and node navigation.
//!
//! This module provides the [`Document`] and [`Element`] types used by every
//! extractor, and [`ContentNode`], the tagged view of an element's direct
//! children that the tag classifier dispatches on.
//!
//! # Example
//!
//! ```rust
//! use tiebafetch_core::parse::{ContentNode, Document};
//!
//! let html = r#"<div class="i">1楼. Hello<br/>world</div>"#;
//! let doc = Document::parse(html).unwrap();
//! let item = doc.select_first("div.i").unwrap().unwrap();
//! let children = item.children();
//!
//! assert!(matches!(children[1], ContentNode::LineBreak));
//! ```

use std::borrow::Cow;

use scraper::{ElementRef, Html, Node, Selector};

use crate::{Result, TiebaError};

/// Represents a parsed HTML document.
///
/// # Example
///
/// ```rust
/// use tiebafetch_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html).unwrap();
/// assert_eq!(doc.title(), Some("Test".to_string()));
/// ```
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Parsing is lenient, so any input produces a document; the `Result`
    /// keeps the signature uniform with the other constructors in the crate.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Selects elements using a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`TiebaError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tiebafetch_core::parse::Document;
    ///
    /// let html = r#"<div class="i">First</div><div class="i">Second</div>"#;
    /// let doc = Document::parse(html).unwrap();
    /// let items = doc.select("div.i").unwrap();
    /// assert_eq!(items.len(), 2);
    /// ```
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).map(Element::from).collect())
    }

    /// Selects the first element matching a CSS selector.
    pub fn select_first(&self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).next().map(Element::from))
    }

    /// Gets the content of the `<title>` element if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }
}

/// A wrapper around scraper's ElementRef.
///
/// Selections made through an `Element` borrow from the owning [`Document`],
/// not from the `Element` itself, so results can outlive the wrapper.
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> From<ElementRef<'a>> for Element<'a> {
    fn from(element: ElementRef<'a>) -> Self {
        Self { element }
    }
}

impl<'a> Element<'a> {
    /// Gets the text content of this element (all descendant text nodes).
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Selects descendant elements (never the element itself).
    ///
    /// # Errors
    ///
    /// Returns [`TiebaError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = compile(selector)?;
        Ok(self.element.select(&sel).map(Element::from).collect())
    }

    /// Selects the first matching descendant element.
    pub fn select_first(&self, selector: &str) -> Result<Option<Element<'a>>> {
        let sel = compile(selector)?;
        Ok(self.element.select(&sel).next().map(Element::from))
    }

    /// Whether any descendant text node is exactly `needle`.
    pub fn has_text_node(&self, needle: &str) -> bool {
        self.element
            .descendants()
            .filter_map(|node| node.value().as_text())
            .any(|text| &**text == needle)
    }

    /// The direct children of this element, in document order.
    pub fn children(&self) -> Vec<ContentNode<'a>> {
        self.element
            .children()
            .map(|node| match node.value() {
                Node::Text(text) => ContentNode::Text(Cow::Borrowed(&**text)),
                Node::Element(el) if el.name().eq_ignore_ascii_case("br") => ContentNode::LineBreak,
                Node::Element(_) => ElementRef::wrap(node).map_or(ContentNode::Other, |el| ContentNode::Element(el.into())),
                _ => ContentNode::Other,
            })
            .collect()
    }
}

/// One child of an item node, tagged by kind.
///
/// Text nodes carry a `Cow` so the floor normalizer can substitute an owned
/// remainder for the first node without touching the parsed tree.
#[derive(Clone, Debug)]
pub enum ContentNode<'a> {
    /// A text node.
    Text(Cow<'a, str>),
    /// A `<br>` element.
    LineBreak,
    /// Any other element.
    Element(Element<'a>),
    /// Comments, doctypes and processing instructions.
    Other,
}

impl ContentNode<'_> {
    /// The node's string: literal text for text nodes, collected text for
    /// elements, `None` for everything else.
    pub fn string(&self) -> Option<Cow<'_, str>> {
        match self {
            ContentNode::Text(text) => Some(Cow::Borrowed(text.as_ref())),
            ContentNode::Element(el) => Some(Cow::Owned(el.text())),
            ContentNode::LineBreak | ContentNode::Other => None,
        }
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| TiebaError::HtmlParseError(format!("Invalid selector: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html>
        <head><title>Thread Title</title></head>
        <body>
            <div class="i">1楼. First<br/>line <a href="i?un=alice">alice</a><!-- note --></div>
            <div class="i">2楼. Second <span>精</span></div>
            <input type="hidden" name="pnum" value="3"/>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_document() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        assert_eq!(doc.title(), Some("Thread Title".to_string()));
    }

    #[test]
    fn test_select_elements() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let items = doc.select("div.i").unwrap();

        assert_eq!(items.len(), 2);
        assert!(items[0].text().starts_with("1楼. First"));
        assert_eq!(items[1].tag_name(), "div");
    }

    #[test]
    fn test_select_first_attribute() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let input = doc.select_first(r#"input[name="pnum"]"#).unwrap().unwrap();
        assert_eq!(input.attr("value"), Some("3"));
        assert!(doc.select_first("table").unwrap().is_none());
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let result = doc.select("[[invalid");

        assert!(matches!(result, Err(TiebaError::HtmlParseError(_))));
    }

    #[test]
    fn test_children_are_tagged() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let item = doc.select_first("div.i").unwrap().unwrap();
        let children = item.children();

        assert_eq!(children.len(), 5);
        assert!(matches!(&children[0], ContentNode::Text(t) if t == "1楼. First"));
        assert!(matches!(children[1], ContentNode::LineBreak));
        assert!(matches!(&children[2], ContentNode::Text(t) if t == "line "));
        assert!(matches!(&children[3], ContentNode::Element(el) if el.attr("href") == Some("i?un=alice")));
        assert!(matches!(children[4], ContentNode::Other));
    }

    #[test]
    fn test_node_string() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let item = doc.select_first("div.i").unwrap().unwrap();
        let children = item.children();

        assert_eq!(children[0].string().as_deref(), Some("1楼. First"));
        assert_eq!(children[3].string().as_deref(), Some("alice"));
        assert_eq!(children[1].string(), None);
    }

    #[test]
    fn test_has_text_node_is_exact() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let items = doc.select("div.i").unwrap();

        assert!(items[1].has_text_node("精"));
        assert!(!items[0].has_text_node("精"));
        assert!(!items[1].has_text_node("Second"));
    }

    #[test]
    fn test_element_select_skips_self() {
        let doc = Document::parse(r#"<div class="i"><div class="i">inner</div></div>"#).unwrap();
        let outer = doc.select_first("div.i").unwrap().unwrap();
        let nested = outer.select("div.i").unwrap();
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].text(), "inner");
    }
}
