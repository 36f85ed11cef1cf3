//! Type definitions of a low-level REST filter string representation.

/// A filter string under construction.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Filter {
    pub text: String,
}

impl Filter {
    pub fn new() -> Filter {
        Filter {
            text: String::new(),
        }
    }
    pub fn append_syntax(&mut self, syntax: &str) {
        self.text.push_str(syntax);
    }
    pub fn append_identifier(&mut self, identifier: &str) {
        self.text.push_str(identifier);
    }
    /// Append a single-quoted literal, doubling any embedded single quote.
    pub fn append_string_literal(&mut self, literal: &str) {
        self.text.push('\'');
        self.text.push_str(&literal.replace('\'', "''"));
        self.text.push('\'');
    }
}
