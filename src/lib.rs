//! paramgen - keeps C++ parameter artifacts in sync with one parameter table
//!
//! A schema of typed, defaulted parameters is the single source of truth.
//! Marker lines in a header and a source template are expanded into
//! declarations, definitions, config-parsing dispatch and diagnostic output.
//!
//! # Example
//!
//! ```rust
//! use paramgen::{expand, EmitOptions, MarkerSet, ParameterSchema};
//!
//! let schema = ParameterSchema::builtin();
//! let header = expand(
//!     "namespace params\n{\n    PYTHON_GEN_PARAMS_HERE\n}\n",
//!     &MarkerSet::header(),
//!     &schema,
//!     &EmitOptions::default(),
//! )
//! .unwrap();
//!
//! assert!(header.text.contains("    extern int target_population;"));
//! ```

pub mod config;
pub mod emit;
pub mod error;
pub mod generator;
pub mod schema;
pub mod template;
pub mod values;

pub use config::{ArtifactConfig, ConfigError, GeneratorConfig};
pub use emit::EmitOptions;
pub use error::GenerateError;
pub use generator::{expand, Expansion, GenerateWarning, GenerationReport, Generator};
pub use schema::{ParameterDefinition, ParameterSchema, SchemaError, ValueType};
pub use template::{AnchorKind, MarkerSet, TemplateError};
pub use values::{ParameterValues, Value, ValueError};

/// Run generation with the given configuration
///
/// Loads the schema the config names (or the built-in table), expands both
/// templates and overwrites both outputs.
///
/// # Example
///
/// ```rust,no_run
/// use paramgen::{generate, GeneratorConfig};
///
/// let report = generate(GeneratorConfig::default()).unwrap();
/// for warning in report.warnings() {
///     eprintln!("warning: {warning}");
/// }
/// ```
pub fn generate(config: GeneratorConfig) -> Result<GenerationReport, GenerateError> {
    Generator::from_config(config)?.run()
}
