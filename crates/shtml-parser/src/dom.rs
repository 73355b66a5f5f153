//! Output tree.
//!
//! Plain data holders produced by the parser: a [`Document`] owning one root
//! [`Element`] plus any comments, elements owning attributes and children.
//! The tree is built once and handed to the caller; there is no mutation API
//! beyond what construction needs.
//!
//! `Display` renders a tree back to the dialect it was parsed from.

use serde::{Serialize, Serializer};
use shtml_lexer::is_void_element;
use std::collections::BTreeMap;
use std::fmt;

/// A parsed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Doctype identifier, always `html` for a parsed document.
    pub doctype: String,
    /// Comments and exactly one element, in the order they were seen.
    pub children: Vec<Node>,
}

/// A node in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    /// Decoded character data.
    Text(String),
    /// Raw comment payload.
    Comment(String),
}

/// An element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    /// Tag name as written in the source.
    pub tag: String,
    pub attributes: BTreeMap<String, AttributeValue>,
    pub children: Vec<Node>,
}

/// The value of one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// Written without `=`, e.g. `<input disabled>`.
    Flag,
    String(String),
}

impl AttributeValue {
    /// The string value, or `None` for a flag.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Flag => None,
            AttributeValue::String(s) => Some(s),
        }
    }
}

/// Flags serialize as `true`, values as strings.
impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AttributeValue::Flag => serializer.serialize_bool(true),
            AttributeValue::String(s) => serializer.serialize_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// Construction and queries
// ---------------------------------------------------------------------------

impl Document {
    pub fn new(doctype: impl Into<String>) -> Self {
        Self {
            doctype: doctype.into(),
            children: Vec::new(),
        }
    }

    pub fn append_child(&mut self, node: Node) {
        self.children.push(node);
    }

    /// The root element, if one has been attached.
    pub fn root(&self) -> Option<&Element> {
        self.children.iter().find_map(Node::as_element)
    }

    /// Document-level comment payloads in order.
    pub fn comments(&self) -> impl Iterator<Item = &str> {
        self.children.iter().filter_map(|node| match node {
            Node::Comment(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing any earlier value under the same name.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: AttributeValue) {
        self.attributes.insert(name.into(), value);
    }

    pub fn append_child(&mut self, node: Node) {
        self.children.push(node);
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Whether this is a void element (compared case-insensitively).
    pub fn is_void(&self) -> bool {
        is_void_element(&self.tag)
    }

    /// Child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text of all descendants, in document order.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) => el.collect_text(out),
                Node::Comment(_) => {}
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<!DOCTYPE {}>", self.doctype)?;
        for child in &self.children {
            write!(f, "{child}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(el) => write!(f, "{el}"),
            Node::Text(text) => f.write_str(&escape_text(text)),
            Node::Comment(text) => write!(f, "<!--{text}-->"),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attributes {
            match value {
                AttributeValue::Flag => write!(f, " {name}")?,
                // Values are stored undecoded, so they are written back raw.
                AttributeValue::String(v) if v.contains('"') => write!(f, " {name}='{v}'")?,
                AttributeValue::String(v) => write!(f, " {name}=\"{v}\"")?,
            }
        }
        f.write_str(">")?;

        if self.is_void() {
            return Ok(());
        }
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.tag)
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Document {
        let mut img = Element::new("img");
        img.set_attribute("src", AttributeValue::String("a.png".into()));

        let mut div = Element::new("div");
        div.set_attribute("hidden", AttributeValue::Flag);
        div.append_child(Node::Text("a < b".into()));
        div.append_child(Node::Element(img));

        let mut doc = Document::new("html");
        doc.append_child(Node::Comment(" note ".into()));
        doc.append_child(Node::Element(div));
        doc
    }

    #[test]
    fn test_root_and_comments() {
        let doc = sample();
        assert_eq!(doc.root().unwrap().tag, "div");
        assert_eq!(doc.comments().collect::<Vec<_>>(), vec![" note "]);
    }

    #[test]
    fn test_set_attribute_overwrites() {
        let mut el = Element::new("a");
        el.set_attribute("href", AttributeValue::String("/one".into()));
        el.set_attribute("href", AttributeValue::String("/two".into()));
        assert_eq!(el.attributes.len(), 1);
        assert_eq!(el.attribute("href").and_then(AttributeValue::as_str), Some("/two"));
    }

    #[test]
    fn test_text_collects_descendants() {
        let mut inner = Element::new("b");
        inner.append_child(Node::Text("bold".into()));
        let mut outer = Element::new("p");
        outer.append_child(Node::Text("a ".into()));
        outer.append_child(Node::Element(inner));
        outer.append_child(Node::Text("!".into()));
        assert_eq!(outer.text(), "a bold!");
        assert_eq!(outer.elements().count(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample().to_string(),
            "<!DOCTYPE html><!-- note --><div hidden>a &lt; b<img src=\"a.png\"></div>"
        );
    }

    #[test]
    fn test_display_single_quotes_when_needed() {
        let mut el = Element::new("p");
        el.set_attribute("title", AttributeValue::String("say \"hi\"".into()));
        assert_eq!(el.to_string(), "<p title='say \"hi\"'></p>");
    }

    #[test]
    fn test_serialize_json() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["doctype"], "html");
        assert_eq!(json["children"][0]["comment"], " note ");
        let div = &json["children"][1]["element"];
        assert_eq!(div["tag"], "div");
        assert_eq!(div["attributes"]["hidden"], true);
        assert_eq!(div["children"][0]["text"], "a < b");
        assert_eq!(div["children"][1]["element"]["attributes"]["src"], "a.png");
    }
}
