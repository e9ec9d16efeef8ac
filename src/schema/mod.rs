//! Parameter schema: the single source of truth for generated artifacts
//!
//! A schema is an ordered list of [`ParameterDefinition`]s. Order is
//! registration order and every emitter walks it the same way, so the
//! declaration and definition blocks always list symbols in the same sequence.

mod builtin;
mod definition;
mod registry;
mod source;

use std::path::PathBuf;

use thiserror::Error;

pub use definition::{ParameterDefinition, ValueType};
pub use registry::ParameterSchema;

/// Errors that can occur while building or loading a schema
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A parameter with this key is already registered
    #[error("duplicate parameter key: {key}")]
    DuplicateKey { key: String },

    /// Another parameter already exposes this symbol
    #[error("duplicate symbol '{symbol}' (parameter '{key}' clashes with '{existing}')")]
    DuplicateSymbol {
        symbol: String,
        key: String,
        existing: String,
    },

    /// Key is empty or contains whitespace
    #[error("invalid parameter key '{key}': keys must be non-empty and contain no whitespace")]
    InvalidKey { key: String },

    /// Symbol is not a C++ identifier
    #[error("invalid symbol '{symbol}' for parameter '{key}'")]
    InvalidSymbol { key: String, symbol: String },

    /// Default literal does not fit the declared type
    #[error("default literal '{literal}' for parameter '{key}' is not a valid {value_type}")]
    LiteralMismatch {
        key: String,
        literal: String,
        value_type: ValueType,
    },

    /// Type name not recognized
    #[error("unknown parameter type '{name}'")]
    UnknownType { name: String },

    /// Schema file could not be read
    #[error("failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Schema file is not valid TOML
    #[error("failed to parse schema TOML: {0}")]
    Toml(#[from] toml::de::Error),
}
