//! Artifact emitters
//!
//! Each emitter is a pure function from the schema and an anchor's
//! indentation to one block of C++ bounded by a begin/end sentinel comment
//! pair. All four walk the schema in registration order and take the type and
//! symbol of a parameter from the same definition, so the declaration and
//! definition of a symbol cannot disagree.

mod block;
mod cpp;

pub use block::BlockBuilder;
pub use cpp::{declare, define, output, parse};

use crate::schema::ParameterSchema;
use crate::template::AnchorKind;

/// Options shared by all emitters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Name written into the sentinel comments
    pub banner: String,

    /// Namespace qualifying symbols in the source artifact
    pub qualifier: Option<String>,

    /// Stream expression the Output block writes to
    pub sink: String,

    /// Text between a key and its value in Output lines
    pub output_separator: String,

    /// Append each description as a trailing comment on Declare lines
    pub doc_comments: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            banner: "paramgen".to_string(),
            qualifier: Some("params".to_string()),
            sink: "progress_file".to_string(),
            output_separator: " ".to_string(),
            doc_comments: false,
        }
    }
}

impl EmitOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sentinel banner
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }

    /// Set the symbol qualifier
    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    /// Emit unqualified symbols
    pub fn without_qualifier(mut self) -> Self {
        self.qualifier = None;
        self
    }

    /// Set the diagnostics sink expression
    pub fn with_sink(mut self, sink: impl Into<String>) -> Self {
        self.sink = sink.into();
        self
    }

    /// Set the key/value separator of Output lines
    pub fn with_output_separator(mut self, separator: impl Into<String>) -> Self {
        self.output_separator = separator.into();
        self
    }

    /// Enable or disable description comments on Declare lines
    pub fn with_doc_comments(mut self, enabled: bool) -> Self {
        self.doc_comments = enabled;
        self
    }

    /// A symbol as referenced from the source artifact
    pub fn qualified(&self, symbol: &str) -> String {
        match &self.qualifier {
            Some(q) if !q.is_empty() => format!("{q}::{symbol}"),
            _ => symbol.to_string(),
        }
    }
}

/// Run the emitter bound to `kind`
pub fn emit(
    kind: AnchorKind,
    schema: &ParameterSchema,
    indent: &str,
    options: &EmitOptions,
) -> String {
    match kind {
        AnchorKind::Declare => declare(schema, indent, options),
        AnchorKind::Define => define(schema, indent, options),
        AnchorKind::Parse => parse(schema, indent, options),
        AnchorKind::Output => output(schema, indent, options),
    }
}
