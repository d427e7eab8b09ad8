//! Markup
//!
//! A small structured fragment tree so decorators never assemble HTML by string
//! concatenation. Text and attribute values are escaped when rendered; host
//! markup (formatted prices, sanitized fragments) is embedded verbatim.

use std::fmt::{self, Write};

use smallvec::SmallVec;

pub mod sanitize;

pub use sanitize::{AllowList, sanitize};

/// A piece of markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// An element with attributes and children.
    Element(Element),

    /// Plain text, escaped on render.
    Text(String),

    /// Markup inserted verbatim (already formatted or sanitized).
    Html(String),

    /// Consecutive fragments without a wrapping element.
    Group(Vec<Fragment>),
}

impl Fragment {
    /// Plain text.
    pub fn text(text: impl Into<String>) -> Self {
        Fragment::Text(text.into())
    }

    /// Verbatim markup.
    pub fn html(html: impl Into<String>) -> Self {
        Fragment::Html(html.into())
    }

    /// Render to an HTML string.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn write_to(&self, out: &mut impl Write) -> fmt::Result {
        match self {
            Fragment::Element(element) => element.write_to(out),
            Fragment::Text(text) => out.write_str(&html_escape::encode_text(text)),
            Fragment::Html(html) => out.write_str(html),
            Fragment::Group(children) => children.iter().try_for_each(|child| child.write_to(out)),
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

impl From<Element> for Fragment {
    fn from(element: Element) -> Self {
        Fragment::Element(element)
    }
}

/// An HTML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attributes: SmallVec<[(&'static str, String); 2]>,
    children: Vec<Fragment>,
}

impl Element {
    /// An empty element.
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attributes: SmallVec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: impl Into<Fragment>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a child when present.
    #[must_use]
    pub fn maybe_child(mut self, child: Option<impl Into<Fragment>>) -> Self {
        if let Some(child) = child {
            self.children.push(child.into());
        }

        self
    }

    /// Tag name.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Value of the named attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr, _)| *attr == name)
            .map(|(_, value)| value.as_str())
    }

    fn write_to(&self, out: &mut impl Write) -> fmt::Result {
        write!(out, "<{}", self.tag)?;

        for (name, value) in &self.attributes {
            write!(
                out,
                " {name}=\"{}\"",
                html_escape::encode_double_quoted_attribute(value)
            )?;
        }

        out.write_char('>')?;

        for child in &self.children {
            child.write_to(out)?;
        }

        write!(out, "</{}>", self.tag)
    }
}

/// `<del>{regular}</del> {current}`: a struck-through price followed by the price charged.
pub fn struck_through(regular: impl Into<String>, current: impl Into<String>) -> Fragment {
    Fragment::Group(vec![
        Element::new("del").child(Fragment::html(regular)).into(),
        Fragment::text(" "),
        Fragment::html(current),
    ])
}
