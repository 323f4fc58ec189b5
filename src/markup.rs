//! Typed view nodes.
//!
//! Renderers build a small element tree instead of HTML strings. In the browser
//! the tree is mounted with `createElement`/`createTextNode`, so user and server
//! text never passes through an HTML parser; `to_html` exists for logging and
//! snapshot-style tests and escapes everything it emits.

use std::fmt::Write as _;

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

/// Start building an element.
pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

// Elements without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input"];

impl Element {
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, classes: &str) -> Self {
        self.attr("class", classes)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, content: impl Into<String>) -> Self {
        self.child(Node::Text(content.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&escape(t)),
            Node::Element(e) => {
                let _ = write!(out, "<{}", e.tag);
                for (name, value) in &e.attrs {
                    let _ = write!(out, " {}=\"{}\"", name, escape(value));
                }
                out.push('>');
                if VOID_TAGS.contains(&e.tag) {
                    return;
                }
                for c in &e.children {
                    c.write_html(out);
                }
                let _ = write!(out, "</{}>", e.tag);
            }
        }
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.clone(),
            Node::Element(e) => e.children.iter().map(Node::text_content).collect(),
        }
    }

    /// Depth-first list of descendant elements (including self) matching `pred`.
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect(pred, &mut found);
        found
    }

    fn collect<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        if let Node::Element(e) = self {
            if pred(e) {
                found.push(e);
            }
            for c in &e.children {
                c.collect(pred, found);
            }
        }
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_elements() {
        let node: Node = el("div")
            .class("card")
            .child(el("strong").text("cat"))
            .text(" and dog")
            .into();
        assert_eq!(
            node.to_html(),
            r#"<div class="card"><strong>cat</strong> and dog</div>"#
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let node: Node = el("input").attr("type", "text").attr("name", "question_0").into();
        assert_eq!(node.to_html(), r#"<input type="text" name="question_0">"#);
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let node: Node = el("p")
            .attr("title", "\"quoted\" & 'single'")
            .text("<script>alert(1)</script>")
            .into();
        let html = node.to_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("&quot;quoted&quot; &amp; &#39;single&#39;"));
    }

    #[test]
    fn find_all_walks_depth_first() {
        let node: Node = el("div")
            .child(el("input").attr("name", "a"))
            .child(el("label").child(el("input").attr("name", "b")))
            .into();
        let names: Vec<_> = node
            .find_all(&|e| e.tag == "input")
            .iter()
            .filter_map(|e| e.get_attr("name"))
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(node.text_content(), "");
    }
}
