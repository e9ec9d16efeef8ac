//! Configuration for a generation run
//!
//! Defaults reproduce the fixed layout the simulation's build expects:
//! templates in the working directory, generated files one level up.
//! A `paramgen.toml` file can override any part of it:
//!
//! ```toml
//! schema = "params.toml"
//!
//! [emit]
//! banner = "gen_params.py"
//! output_separator = ""
//!
//! [source]
//! output = "../src/params.cpp"
//!
//! [source.markers]
//! PYTHON_GEN_PARAMS_HERE = "define"
//! PYTHON_PARSE_PARAMS_HERE = "parse"
//! PYTHON_OUTPUT_PARAMS_HERE = "output"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::emit::EmitOptions;
use crate::template::{AnchorKind, MarkerSet, TemplateError};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "paramgen.toml";

/// Errors that can occur when loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid marker configuration: {0}")]
    Marker(#[from] TemplateError),
}

/// One template -> output expansion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactConfig {
    /// Short name used in logs and reports
    pub name: String,
    pub template: PathBuf,
    pub output: PathBuf,
    pub markers: MarkerSet,
}

impl ArtifactConfig {
    /// Declaration artifact: `params_template.h` -> `../params.h`
    pub fn header() -> Self {
        Self {
            name: "header".to_string(),
            template: PathBuf::from("params_template.h"),
            output: PathBuf::from("../params.h"),
            markers: MarkerSet::header(),
        }
    }

    /// Implementation artifact: `params_template.cpp` -> `../params.cpp`
    pub fn source() -> Self {
        Self {
            name: "source".to_string(),
            template: PathBuf::from("params_template.cpp"),
            output: PathBuf::from("../params.cpp"),
            markers: MarkerSet::source(),
        }
    }

    /// Set the template path
    pub fn with_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template = path.into();
        self
    }

    /// Set the output path
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    /// Replace the marker set
    pub fn with_markers(mut self, markers: MarkerSet) -> Self {
        self.markers = markers;
        self
    }

    /// Resolve relative template and output paths against `base`
    pub fn relative_to(mut self, base: &Path) -> Self {
        if self.template.is_relative() {
            self.template = base.join(&self.template);
        }
        if self.output.is_relative() {
            self.output = base.join(&self.output);
        }
        self
    }
}

/// Configuration for the complete generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub header: ArtifactConfig,
    pub source: ArtifactConfig,
    pub emit: EmitOptions,
    /// TOML schema to use instead of the built-in table
    pub schema: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            header: ArtifactConfig::header(),
            source: ArtifactConfig::source(),
            emit: EmitOptions::default(),
            schema: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    schema: Option<PathBuf>,
    emit: Option<TomlEmit>,
    header: Option<TomlArtifact>,
    source: Option<TomlArtifact>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlEmit {
    banner: Option<String>,
    qualifier: Option<String>,
    sink: Option<String>,
    output_separator: Option<String>,
    doc_comments: Option<bool>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlArtifact {
    template: Option<PathBuf>,
    output: Option<PathBuf>,
    markers: Option<BTreeMap<String, TomlAnchorKind>>,
}

#[derive(Deserialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum TomlAnchorKind {
    Declare,
    Define,
    Parse,
    Output,
}

impl From<TomlAnchorKind> for AnchorKind {
    fn from(kind: TomlAnchorKind) -> Self {
        match kind {
            TomlAnchorKind::Declare => AnchorKind::Declare,
            TomlAnchorKind::Define => AnchorKind::Define,
            TomlAnchorKind::Parse => AnchorKind::Parse,
            TomlAnchorKind::Output => AnchorKind::Output,
        }
    }
}

impl TomlArtifact {
    fn apply(self, mut artifact: ArtifactConfig) -> Result<ArtifactConfig, ConfigError> {
        if let Some(template) = self.template {
            artifact.template = template;
        }
        if let Some(output) = self.output {
            artifact.output = output;
        }
        if let Some(markers) = self.markers {
            let mut set = MarkerSet::new();
            for (token, kind) in markers {
                set.insert(token, kind.into())?;
            }
            artifact.markers = set;
        }
        Ok(artifact)
    }
}

impl GeneratorConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a config file, resolving its relative paths against the file's
    /// own directory rather than the working directory
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let base = path.parent().unwrap_or(Path::new(""));
        Ok(Self::from_file(path)?.relative_to(base))
    }

    /// Load configuration from a TOML string; omitted fields keep defaults
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let mut config = Self::default();

        config.schema = parsed.schema;
        if let Some(emit) = parsed.emit {
            if let Some(banner) = emit.banner {
                config.emit.banner = banner;
            }
            if let Some(qualifier) = emit.qualifier {
                config.emit.qualifier = Some(qualifier);
            }
            if let Some(sink) = emit.sink {
                config.emit.sink = sink;
            }
            if let Some(separator) = emit.output_separator {
                config.emit.output_separator = separator;
            }
            if let Some(doc_comments) = emit.doc_comments {
                config.emit.doc_comments = doc_comments;
            }
        }
        if let Some(header) = parsed.header {
            config.header = header.apply(config.header)?;
        }
        if let Some(source) = parsed.source {
            config.source = source.apply(config.source)?;
        }
        Ok(config)
    }

    /// Set the header artifact
    pub fn with_header(mut self, header: ArtifactConfig) -> Self {
        self.header = header;
        self
    }

    /// Set the source artifact
    pub fn with_source(mut self, source: ArtifactConfig) -> Self {
        self.source = source;
        self
    }

    /// Set the emitter options
    pub fn with_emit(mut self, emit: EmitOptions) -> Self {
        self.emit = emit;
        self
    }

    /// Use a TOML schema file
    pub fn with_schema(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema = Some(path.into());
        self
    }

    /// Resolve every relative path against `base`
    pub fn relative_to(mut self, base: &Path) -> Self {
        self.header = self.header.relative_to(base);
        self.source = self.source.relative_to(base);
        self.schema = self.schema.map(|p| if p.is_relative() { base.join(p) } else { p });
        self
    }

    /// Both artifacts, header first
    pub fn artifacts(&self) -> [&ArtifactConfig; 2] {
        [&self.header, &self.source]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::GEN_PARAMS_MARKER;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.header.template, PathBuf::from("params_template.h"));
        assert_eq!(config.header.output, PathBuf::from("../params.h"));
        assert_eq!(config.source.template, PathBuf::from("params_template.cpp"));
        assert_eq!(config.source.output, PathBuf::from("../params.cpp"));
        assert_eq!(config.schema, None);
        assert_eq!(config.emit, EmitOptions::default());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GeneratorConfig::new()
            .with_header(ArtifactConfig::header().with_output("out/params.h"))
            .with_emit(EmitOptions::new().with_banner("gen_params.py"))
            .with_schema("params.toml");

        assert_eq!(config.header.output, PathBuf::from("out/params.h"));
        assert_eq!(config.emit.banner, "gen_params.py");
        assert_eq!(config.schema, Some(PathBuf::from("params.toml")));
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_str = r#"
schema = "params.toml"

[emit]
banner = "gen_params.py"
output_separator = ""

[source]
output = "generated/params.cpp"
"#;
        let config = GeneratorConfig::from_str(toml_str).expect("Should parse");
        assert_eq!(config.schema, Some(PathBuf::from("params.toml")));
        assert_eq!(config.emit.banner, "gen_params.py");
        assert_eq!(config.emit.output_separator, "");
        assert_eq!(config.emit.sink, "progress_file");
        assert_eq!(config.source.output, PathBuf::from("generated/params.cpp"));
        assert_eq!(config.source.template, PathBuf::from("params_template.cpp"));
        assert_eq!(config.source.markers, MarkerSet::source());
    }

    #[test]
    fn test_parse_custom_markers() {
        let toml_str = r#"
[header.markers]
"@@DECLARE@@" = "declare"
"#;
        let config = GeneratorConfig::from_str(toml_str).expect("Should parse");
        assert_eq!(
            config.header.markers.kind_of("@@DECLARE@@"),
            Some(AnchorKind::Declare)
        );
        assert_eq!(config.header.markers.kind_of(GEN_PARAMS_MARKER), None);
    }

    #[test]
    fn test_unknown_anchor_kind_error() {
        let toml_str = r#"
[header.markers]
X = "expand"
"#;
        assert!(matches!(
            GeneratorConfig::from_str(toml_str),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_empty_marker_error() {
        let toml_str = r#"
[header.markers]
"" = "declare"
"#;
        assert!(matches!(
            GeneratorConfig::from_str(toml_str),
            Err(ConfigError::Marker(TemplateError::EmptyMarker))
        ));
    }

    #[test]
    fn test_relative_to_base() {
        let config = GeneratorConfig::new()
            .with_schema("/abs/params.toml")
            .relative_to(Path::new("/work"));
        assert_eq!(config.header.template, PathBuf::from("/work/params_template.h"));
        assert_eq!(config.source.output, PathBuf::from("/work/../params.cpp"));
        assert_eq!(config.schema, Some(PathBuf::from("/abs/params.toml")));
    }

    #[test]
    fn test_load_resolves_against_config_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let build = dir.path().join("build");
        std::fs::create_dir(&build).unwrap();
        let path = build.join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            "schema = \"params.toml\"\n[source]\noutput = \"/abs/params.cpp\"\n",
        )
        .unwrap();

        let config = GeneratorConfig::load(&path).unwrap();
        assert_eq!(config.schema, Some(build.join("params.toml")));
        assert_eq!(config.header.template, build.join("params_template.h"));
        assert_eq!(config.header.output, build.join("../params.h"));
        assert_eq!(config.source.output, PathBuf::from("/abs/params.cpp"));
    }

    #[test]
    fn test_load_bare_file_name_keeps_relative_paths() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "").unwrap();
        let from_dir = GeneratorConfig::load(&path).unwrap();
        assert_eq!(from_dir.header.template, dir.path().join("params_template.h"));

        assert_eq!(
            GeneratorConfig::default().relative_to(Path::new("")),
            GeneratorConfig::default()
        );
    }

    #[test]
    fn test_invalid_toml_error() {
        assert!(GeneratorConfig::from_str("this is not valid toml {{{{").is_err());
    }
}
