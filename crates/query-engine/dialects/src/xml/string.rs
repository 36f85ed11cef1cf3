//! A low-level, indenting XML text writer.

const INDENT: &str = "  ";

/// XML text under construction. Lines are separated by `\n`, with no trailing newline.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Xml {
    pub text: String,
    depth: usize,
}

impl Xml {
    pub fn new() -> Xml {
        Xml {
            text: String::new(),
            depth: 0,
        }
    }

    /// `<name a="v">` on its own line, increasing the indentation.
    pub fn open_element(&mut self, name: &str, attributes: &[(&str, &str)]) {
        self.start_line();
        self.append_tag(name, attributes);
        self.text.push('>');
        self.depth += 1;
    }

    /// `</name>` on its own line, decreasing the indentation.
    pub fn close_element(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.start_line();
        self.text.push_str("</");
        self.text.push_str(name);
        self.text.push('>');
    }

    /// `<name a="v" />`
    pub fn empty_element(&mut self, name: &str, attributes: &[(&str, &str)]) {
        self.start_line();
        self.append_tag(name, attributes);
        self.text.push_str(" />");
    }

    /// `<name>text</name>`
    pub fn text_element(&mut self, name: &str, text: &str) {
        self.start_line();
        self.text.push('<');
        self.text.push_str(name);
        self.text.push('>');
        self.text.push_str(&escape(text));
        self.text.push_str("</");
        self.text.push_str(name);
        self.text.push('>');
    }

    fn append_tag(&mut self, name: &str, attributes: &[(&str, &str)]) {
        self.text.push('<');
        self.text.push_str(name);
        for (attribute, value) in attributes {
            self.text.push(' ');
            self.text.push_str(attribute);
            self.text.push_str("=\"");
            self.text.push_str(&escape(value));
            self.text.push('"');
        }
    }

    fn start_line(&mut self) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        for _ in 0..self.depth {
            self.text.push_str(INDENT);
        }
    }
}

/// Escape text for use in an attribute value or a text node.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
