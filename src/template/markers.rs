//! Anchor kinds and the marker tokens that select them

use std::fmt;

use super::TemplateError;

/// Which emitter an anchor line is replaced by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    /// Forward declarations for the header artifact
    Declare,
    /// Initialized definitions
    Define,
    /// Runtime config dispatch
    Parse,
    /// Runtime diagnostic output
    Output,
}

impl fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorKind::Declare => write!(f, "declare"),
            AnchorKind::Define => write!(f, "define"),
            AnchorKind::Parse => write!(f, "parse"),
            AnchorKind::Output => write!(f, "output"),
        }
    }
}

/// Token used for declarations in the header and definitions in the source
pub const GEN_PARAMS_MARKER: &str = "PYTHON_GEN_PARAMS_HERE";
pub const PARSE_PARAMS_MARKER: &str = "PYTHON_PARSE_PARAMS_HERE";
pub const OUTPUT_PARAMS_MARKER: &str = "PYTHON_OUTPUT_PARAMS_HERE";

/// Marker tokens recognized in one template, each bound to one anchor kind
///
/// Tokens are matched case-sensitively anywhere in a line. The same token may
/// mean different kinds in different templates, which is why each artifact
/// carries its own set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerSet {
    markers: Vec<(String, AnchorKind)>,
}

impl MarkerSet {
    /// Create an empty marker set
    pub fn new() -> Self {
        Self::default()
    }

    /// Markers for the declaration (header) template
    pub fn header() -> Self {
        Self {
            markers: vec![(GEN_PARAMS_MARKER.to_string(), AnchorKind::Declare)],
        }
    }

    /// Markers for the implementation (source) template
    pub fn source() -> Self {
        Self {
            markers: vec![
                (GEN_PARAMS_MARKER.to_string(), AnchorKind::Define),
                (PARSE_PARAMS_MARKER.to_string(), AnchorKind::Parse),
                (OUTPUT_PARAMS_MARKER.to_string(), AnchorKind::Output),
            ],
        }
    }

    /// Bind a token to an anchor kind
    ///
    /// Re-binding a token to the kind it already has is a no-op; binding it to
    /// a different kind is an error.
    pub fn insert(
        &mut self,
        token: impl Into<String>,
        kind: AnchorKind,
    ) -> Result<(), TemplateError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(TemplateError::EmptyMarker);
        }
        match self.kind_of(&token) {
            Some(existing) if existing == kind => Ok(()),
            Some(existing) => Err(TemplateError::ConflictingMarker {
                token,
                existing,
                requested: kind,
            }),
            None => {
                self.markers.push((token, kind));
                Ok(())
            }
        }
    }

    /// Builder form of [`MarkerSet::insert`]
    pub fn with_marker(
        mut self,
        token: impl Into<String>,
        kind: AnchorKind,
    ) -> Result<Self, TemplateError> {
        self.insert(token, kind)?;
        Ok(self)
    }

    /// The anchor kind bound to an exact token
    pub fn kind_of(&self, token: &str) -> Option<AnchorKind> {
        self.markers
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, kind)| *kind)
    }

    /// Iterate (token, kind) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, AnchorKind)> {
        self.markers.iter().map(|(t, k)| (t.as_str(), *k))
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
