//! Platform-independent description of the DOM the widget renders.
//!
//! The model builds a [`ViewNode`] tree; the wasm shell materializes it as real
//! elements, the CLI prints it as static HTML, and tests inspect it directly.

use std::fmt::Write;

use serde::Serialize;

use crate::theme::StyleBag;

const VOID_ELEMENTS: [&str; 2] = ["input", "br"];

/// One element of the view tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ViewNode {
    pub tag: &'static str,
    pub classes: Vec<&'static str>,
    pub attrs: Vec<(String, String)>,
    pub style: StyleBag,
    /// Plain text content, escaped when serialized.
    pub text: Option<String>,
    /// Trusted markup (loader SVGs, panel content), inserted verbatim.
    pub html: Option<String>,
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    #[must_use]
    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: impl ToString) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn set_attr(&mut self, name: &str, value: impl ToString) {
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    #[must_use]
    pub fn style(mut self, property: &str, value: impl ToString) -> Self {
        self.style.set(property, value);
        self
    }

    #[must_use]
    pub fn styles(mut self, bag: &StyleBag) -> Self {
        self.style.merge(bag);
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    #[must_use]
    pub fn child(mut self, child: ViewNode) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = ViewNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Depth-first search for every node carrying `class`, self included.
    pub fn find_all(&self, class: &str) -> Vec<&ViewNode> {
        let mut found = Vec::new();
        self.collect(&|n| n.has_class(class), &mut found);
        found
    }

    /// Every node with element name `tag`, self included.
    pub fn find_tags(&self, tag: &str) -> Vec<&ViewNode> {
        let mut found = Vec::new();
        self.collect(&|n| n.tag == tag, &mut found);
        found
    }

    fn collect<'a>(&'a self, pred: &dyn Fn(&ViewNode) -> bool, found: &mut Vec<&'a ViewNode>) {
        if pred(self) {
            found.push(self);
        }
        for child in &self.children {
            child.collect(pred, found);
        }
    }

    pub fn find(&self, class: &str) -> Option<&ViewNode> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(class))
    }

    pub fn count(&self, class: &str) -> usize {
        self.find_all(class).len()
    }

    /// Direct children carrying `class`.
    pub fn children_with(&self, class: &str) -> impl Iterator<Item = &ViewNode> + '_ {
        let class = class.to_string();
        self.children.iter().filter(move |c| c.has_class(&class))
    }

    /// Concatenated text of this subtree (markup content excluded).
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.push_text(out);
        }
    }

    /// Serialize the subtree as HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", self.classes.join(" "));
        }
        for (k, v) in &self.attrs {
            let _ = write!(out, " {k}=\"{}\"", escape(v));
        }
        if !self.style.is_empty() {
            let _ = write!(out, " style=\"{}\"", escape(&self.style.to_css()));
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&self.tag) {
            return;
        }
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        if let Some(html) = &self.html {
            out.push_str(html);
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Escape text for HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> ViewNode {
        ViewNode::div()
            .class("root")
            .child(ViewNode::div().class("item").attr("data-row", 1).text("a<b"))
            .child(ViewNode::div().class("item").attr("data-row", 2).text("c"))
    }

    #[test]
    fn find_and_count() {
        let tree = sample();
        assert_eq!(tree.count("item"), 2);
        assert_eq!(tree.find("item").unwrap().attr_value("data-row"), Some("1"));
        assert_eq!(tree.text_content(), "a<bc");
    }

    #[test]
    fn html_escapes_text() {
        let html = ViewNode::div().style("color", "red").text("x & y").to_html();
        assert_eq!(html, r#"<div style="color: red;">x &amp; y</div>"#);
        assert!(sample().to_html().contains("a&lt;b"));
    }

    #[test]
    fn set_attr_replaces() {
        let mut node = ViewNode::div().attr("title", "a");
        node.set_attr("title", "b");
        assert_eq!(node.attrs.len(), 1);
        assert_eq!(node.attr_value("title"), Some("b"));
    }
}
