//! Template loading and anchor detection
//!
//! A template is ordinary source text in which some lines carry a marker
//! token. Each marker binds to one [`AnchorKind`]; the generator replaces the
//! whole marker line with that kind's emitted block and copies every other line
//! unchanged.
//!
//! ```text
//! namespace params
//! {
//!     PYTHON_GEN_PARAMS_HERE
//! }
//! ```

mod loader;
mod markers;

use std::path::PathBuf;

use thiserror::Error;

pub use loader::{read_template, Template, TemplateLine};
pub use markers::{
    AnchorKind, MarkerSet, GEN_PARAMS_MARKER, OUTPUT_PARAMS_MARKER, PARSE_PARAMS_MARKER,
};

/// Errors that can occur while loading or classifying a template
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template file absent or unreadable
    #[error("template file not found or unreadable: {path}: {source}")]
    Missing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line carries markers for more than one anchor kind
    #[error("line {line} contains more than one anchor marker: {}", tokens.join(", "))]
    AmbiguousAnchor { line: usize, tokens: Vec<String> },

    /// A token was bound to two different anchor kinds
    #[error("marker '{token}' is already bound to {existing}, cannot bind it to {requested}")]
    ConflictingMarker {
        token: String,
        existing: AnchorKind,
        requested: AnchorKind,
    },

    /// Empty tokens would match every line
    #[error("marker tokens must not be empty")]
    EmptyMarker,
}
