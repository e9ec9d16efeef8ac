//! Sentinel-bounded block assembly

/// Build one generated block line by line
///
/// Every line gets the anchor's indentation; blank lines stay empty. The
/// finished block has no trailing newline, since it takes the place of a
/// single template line.
pub struct BlockBuilder<'a> {
    indent: &'a str,
    banner: &'a str,
    lines: Vec<String>,
}

impl<'a> BlockBuilder<'a> {
    /// Start a block and write its opening sentinel
    pub fn new(indent: &'a str, banner: &'a str) -> Self {
        let mut builder = Self {
            indent,
            banner,
            lines: Vec::new(),
        };
        builder.line(format!("// Generated by {banner}"));
        builder
    }

    /// Add an indented line
    pub fn line(&mut self, text: impl AsRef<str>) {
        self.lines.push(format!("{}{}", self.indent, text.as_ref()));
    }

    /// Add an empty line
    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Write the closing sentinel and join the block
    pub fn finish(mut self) -> String {
        let banner = self.banner;
        self.line(format!("// End generated by {banner}"));
        self.lines.join("\n")
    }
}

/// Escape text for use inside a C++ double-quoted string literal
pub fn cpp_string_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}
