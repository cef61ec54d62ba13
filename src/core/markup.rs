// LogTriage - core/markup.rs
//
// Escape-on-write HTML fragment builder.
//
// Tag, class and attribute names are `&'static str` and therefore fixed at
// compile time. Every dynamic value enters through `text` or an attribute
// value, both of which escape. There is no way to append an unescaped
// runtime string, so no call site can skip escaping.

use std::fmt;

/// Replace the five reserved markup characters with their entities.
///
/// All other characters pass through unchanged.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    push_escaped(&mut out, input);
    out
}

fn push_escaped(out: &mut String, input: &str) {
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
}

/// An HTML fragment assembled from static structure and escaped values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    buf: String,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all content (the equivalent of emptying a container).
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    /// Open `<tag>`.
    pub fn open(&mut self, tag: &'static str) -> &mut Self {
        self.open_with(tag, &[])
    }

    /// Open `<tag class="...">`.
    pub fn open_class(&mut self, tag: &'static str, class: &'static str) -> &mut Self {
        self.open_with(tag, &[("class", class)])
    }

    /// Open a tag with attributes; attribute values are escaped.
    pub fn open_with(&mut self, tag: &'static str, attrs: &[(&'static str, &str)]) -> &mut Self {
        self.buf.push('<');
        self.buf.push_str(tag);
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            push_escaped(&mut self.buf, value);
            self.buf.push('"');
        }
        self.buf.push('>');
        self
    }

    /// Emit a void element such as `<meta charset="utf-8">`.
    pub fn void(&mut self, tag: &'static str, attrs: &[(&'static str, &str)]) -> &mut Self {
        self.open_with(tag, attrs)
    }

    /// Close `</tag>`.
    pub fn close(&mut self, tag: &'static str) -> &mut Self {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
        self
    }

    /// Append escaped text.
    pub fn text(&mut self, value: &str) -> &mut Self {
        push_escaped(&mut self.buf, value);
        self
    }

    /// `<tag>escaped value</tag>`.
    pub fn element(&mut self, tag: &'static str, value: &str) -> &mut Self {
        self.open(tag).text(value).close(tag)
    }

    /// `<tag class="...">escaped value</tag>`.
    pub fn element_class(&mut self, tag: &'static str, class: &'static str, value: &str) -> &mut Self {
        self.open_class(tag, class).text(value).close(tag)
    }

    /// Append a finished fragment. Its content was escaped when it was built.
    pub fn append(&mut self, other: &Markup) -> &mut Self {
        self.buf.push_str(&other.buf);
        self
    }

    /// Append a static snippet (fixed stylesheet, doctype). Only `'static`
    /// strings are accepted so no runtime value can pass through here.
    pub fn static_raw(&mut self, snippet: &'static str) -> &mut Self {
        self.buf.push_str(snippet);
        self
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buf)
    }
}
