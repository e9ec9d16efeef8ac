//! Template expansion and artifact writing
//!
//! [`expand`] is the pure core: it walks a classified template once, copies
//! plain lines and replaces each anchor line with its emitter's block.
//! [`Generator`] wraps it with file IO for the two artifacts of a run.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::{ArtifactConfig, GeneratorConfig};
use crate::emit::{self, EmitOptions};
use crate::error::GenerateError;
use crate::schema::ParameterSchema;
use crate::template::{
    read_template, AnchorKind, MarkerSet, Template, TemplateError, TemplateLine,
};

/// Result of expanding one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// The assembled artifact text
    pub text: String,
    /// Anchor kinds expanded, in template order
    pub anchors: Vec<AnchorKind>,
}

/// Expand every anchor line of `text`
///
/// Plain lines are copied unchanged, so a template without anchors comes back
/// byte-for-byte identical.
pub fn expand(
    text: &str,
    markers: &MarkerSet,
    schema: &ParameterSchema,
    options: &EmitOptions,
) -> Result<Expansion, TemplateError> {
    let template = Template::parse(text, markers)?;

    let mut out = Vec::with_capacity(template.lines.len());
    let mut anchors = Vec::new();
    for line in &template.lines {
        match *line {
            TemplateLine::Plain(text) => out.push(text.to_string()),
            TemplateLine::Anchor { kind, indent, crlf } => {
                debug!(%kind, parameters = schema.len(), "expanding anchor");
                let block = emit::emit(kind, schema, indent, options);
                if crlf {
                    // Lines are rejoined with `\n`, so each needs its own `\r`
                    out.push(format!("{}\r", block.replace('\n', "\r\n")));
                } else {
                    out.push(block);
                }
                anchors.push(kind);
            }
        }
    }

    Ok(Expansion {
        text: out.join("\n"),
        anchors,
    })
}

/// Something worth telling the user that does not stop the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateWarning {
    /// Template passed through unchanged
    NoAnchors { template: PathBuf },
    /// One anchor kind appears more than once in a template
    RepeatedAnchor { template: PathBuf, kind: AnchorKind },
}

impl fmt::Display for GenerateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateWarning::NoAnchors { template } => write!(
                f,
                "{} contains no anchor markers; it was copied unchanged",
                template.display()
            ),
            GenerateWarning::RepeatedAnchor { template, kind } => write!(
                f,
                "{} contains more than one {} anchor",
                template.display(),
                kind
            ),
        }
    }
}

/// Outcome for one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReport {
    pub name: String,
    pub output: PathBuf,
    pub anchors: Vec<AnchorKind>,
    pub warnings: Vec<GenerateWarning>,
    /// Whether the file on disk differed from (or lacked) the generated text
    pub stale: bool,
}

/// Outcome of a generation run or check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub artifacts: Vec<ArtifactReport>,
}

impl GenerationReport {
    /// All warnings across artifacts
    pub fn warnings(&self) -> impl Iterator<Item = &GenerateWarning> {
        self.artifacts.iter().flat_map(|a| a.warnings.iter())
    }

    /// Artifacts whose output was out of date
    pub fn stale(&self) -> impl Iterator<Item = &ArtifactReport> {
        self.artifacts.iter().filter(|a| a.stale)
    }
}

/// Drives the header and source expansions of one run
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    schema: ParameterSchema,
}

impl Generator {
    /// Create a generator with an explicit schema
    pub fn new(config: GeneratorConfig, schema: ParameterSchema) -> Self {
        Self { config, schema }
    }

    /// Create a generator, loading the schema named by the config or
    /// falling back to the built-in table
    pub fn from_config(config: GeneratorConfig) -> Result<Self, GenerateError> {
        let schema = match &config.schema {
            Some(path) => {
                info!(path = %path.display(), "loading schema");
                ParameterSchema::from_file(path)?
            }
            None => ParameterSchema::builtin(),
        };
        Ok(Self::new(config, schema))
    }

    pub fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Expand one artifact's template in memory
    pub fn render(
        &self,
        artifact: &ArtifactConfig,
    ) -> Result<(Expansion, Vec<GenerateWarning>), GenerateError> {
        let text = read_template(&artifact.template)?;
        let expansion = expand(&text, &artifact.markers, &self.schema, &self.config.emit)?;
        let warnings = collect_warnings(artifact, &expansion);
        for warning in &warnings {
            warn!(artifact = %artifact.name, "{warning}");
        }
        Ok((expansion, warnings))
    }

    /// Expand both templates and overwrite both outputs
    pub fn run(&self) -> Result<GenerationReport, GenerateError> {
        let mut report = GenerationReport::default();
        for artifact in self.config.artifacts() {
            let (expansion, warnings) = self.render(artifact)?;
            let stale = is_stale(artifact, &expansion.text);

            std::fs::write(&artifact.output, &expansion.text)
                .map_err(|e| GenerateError::write(&artifact.output, e))?;
            info!(
                artifact = %artifact.name,
                output = %artifact.output.display(),
                anchors = expansion.anchors.len(),
                changed = stale,
                "wrote artifact"
            );

            report.artifacts.push(ArtifactReport {
                name: artifact.name.clone(),
                output: artifact.output.clone(),
                anchors: expansion.anchors,
                warnings,
                stale,
            });
        }
        Ok(report)
    }

    /// Expand both templates and compare against the outputs on disk
    /// without writing anything
    pub fn check(&self) -> Result<GenerationReport, GenerateError> {
        let mut report = GenerationReport::default();
        for artifact in self.config.artifacts() {
            let (expansion, warnings) = self.render(artifact)?;
            let stale = is_stale(artifact, &expansion.text);
            if stale {
                info!(output = %artifact.output.display(), "artifact is out of date");
            }
            report.artifacts.push(ArtifactReport {
                name: artifact.name.clone(),
                output: artifact.output.clone(),
                anchors: expansion.anchors,
                warnings,
                stale,
            });
        }
        Ok(report)
    }
}

fn is_stale(artifact: &ArtifactConfig, text: &str) -> bool {
    match std::fs::read_to_string(&artifact.output) {
        Ok(existing) => existing != text,
        Err(_) => true,
    }
}

fn collect_warnings(artifact: &ArtifactConfig, expansion: &Expansion) -> Vec<GenerateWarning> {
    let mut warnings = Vec::new();
    if expansion.anchors.is_empty() {
        warnings.push(GenerateWarning::NoAnchors {
            template: artifact.template.clone(),
        });
    }

    let mut seen: Vec<AnchorKind> = Vec::new();
    for &kind in &expansion.anchors {
        if seen.contains(&kind) {
            let warning = GenerateWarning::RepeatedAnchor {
                template: artifact.template.clone(),
                kind,
            };
            if !warnings.contains(&warning) {
                warnings.push(warning);
            }
        } else {
            seen.push(kind);
        }
    }
    warnings
}
