// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Minimal HTML builder for the configuration console

use std::fmt::Write as _;

/// Escape text for use in element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

#[derive(Debug, Clone)]
enum Content {
    Tag(Tag),
    Text(String),
}

/// An HTML element
#[derive(Debug, Clone)]
pub struct Tag {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Content>,
    /// Void element, rendered without a closing tag
    void: bool,
}

impl Tag {
    /// Element with content, e.g. `div`
    pub fn block(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
            void: false,
        }
    }

    /// Void element, e.g. `input`
    pub fn empty(name: &str) -> Self {
        Self {
            void: true,
            ..Self::block(name)
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.push((name.to_string(), value.into()));
        self
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn css(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Content::Text(text.into()));
        self
    }

    pub fn child(mut self, tag: Tag) -> Self {
        self.children.push(Content::Tag(tag));
        self
    }

    pub fn children(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.children.extend(tags.into_iter().map(Content::Tag));
        self
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        let indent = "\t".repeat(depth);
        let _ = write!(out, "{}<{}", indent, self.name);
        for (name, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        out.push('>');

        if self.void {
            out.push('\n');
            return;
        }

        let inline = self
            .children
            .iter()
            .all(|c| !matches!(c, Content::Tag(_)));

        if inline {
            for child in &self.children {
                match child {
                    Content::Text(text) => out.push_str(&escape(text)),
                    Content::Tag(_) => {}
                }
            }
        } else {
            out.push('\n');
            for child in &self.children {
                match child {
                    Content::Tag(tag) => tag.render_into(out, depth + 1),
                    Content::Text(text) => {
                        let _ = writeln!(out, "{}\t{}", indent, escape(text));
                    }
                }
            }
            out.push_str(&indent);
        }

        let _ = writeln!(out, "</{}>", self.name);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }
}

/// A complete HTML page
#[derive(Debug, Clone)]
pub struct Document {
    head: Tag,
    body: Tag,
}

impl Document {
    pub fn new(head: Tag, body: Tag) -> Self {
        Self { head, body }
    }

    pub fn render(&self) -> String {
        let html = Tag::block("html")
            .child(self.head.clone())
            .child(self.body.clone());
        format!("<!DOCTYPE html>\n{}", html.render())
    }
}
