//! Loading a schema from a TOML file
//!
//! ```toml
//! [[parameter]]
//! key = "walkers"
//! type = "int"
//! symbol = "target_population"
//! default = "1000"
//! description = "The target population of DMC walkers."
//! ```
//!
//! Array order is registration order.

use std::path::Path;

use serde::Deserialize;

use super::{ParameterDefinition, ParameterSchema, SchemaError};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlSchema {
    #[serde(default, rename = "parameter")]
    parameters: Vec<TomlParameter>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlParameter {
    key: String,
    #[serde(rename = "type")]
    value_type: String,
    /// Defaults to the key
    symbol: Option<String>,
    default: String,
    #[serde(default)]
    description: String,
}

impl ParameterSchema {
    /// Load a schema from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load a schema from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, SchemaError> {
        let parsed: TomlSchema = toml::from_str(content)?;

        let mut schema = Self::new();
        for param in parsed.parameters {
            let value_type = param.value_type.parse()?;
            let symbol = param.symbol.unwrap_or_else(|| param.key.clone());
            schema.register(ParameterDefinition::new(
                param.key,
                value_type,
                symbol,
                param.default,
                param.description,
            ))?;
        }
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ValueType;

    #[test]
    fn test_parse_schema_toml() {
        let toml_str = r#"
[[parameter]]
key = "walkers"
type = "int"
symbol = "target_population"
default = "1000"
description = "Target population"

[[parameter]]
key = "cancel_scheme"
type = "text"
default = '"voronoi"'
"#;
        let schema = ParameterSchema::from_toml_str(toml_str).expect("Should parse");
        assert_eq!(schema.len(), 2);

        let walkers = schema.get("walkers").unwrap();
        assert_eq!(walkers.symbol_name, "target_population");
        assert_eq!(walkers.description, "Target population");

        let scheme = schema.get("cancel_scheme").unwrap();
        assert_eq!(scheme.value_type, ValueType::Text);
        assert_eq!(scheme.symbol_name, "cancel_scheme");
        assert_eq!(scheme.default_literal, "\"voronoi\"");
    }

    #[test]
    fn test_schema_toml_duplicate_key() {
        let toml_str = r#"
[[parameter]]
key = "tau"
type = "double"
default = "0.01"

[[parameter]]
key = "tau"
type = "double"
symbol = "tau2"
default = "0.02"
"#;
        let err = ParameterSchema::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateKey { .. }));
    }

    #[test]
    fn test_schema_toml_unknown_type() {
        let toml_str = r#"
[[parameter]]
key = "tau"
type = "float"
default = "0.01"
"#;
        let err = ParameterSchema::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownType { .. }));
    }

    #[test]
    fn test_schema_toml_invalid() {
        assert!(matches!(
            ParameterSchema::from_toml_str("[[parameter]]\nkey = 3"),
            Err(SchemaError::Toml(_))
        ));
    }

    #[test]
    fn test_empty_schema_toml() {
        let schema = ParameterSchema::from_toml_str("").unwrap();
        assert!(schema.is_empty());
    }
}
