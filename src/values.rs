//! Live parameter values
//!
//! [`ParameterValues`] is the explicit "current values" record a consumer
//! passes around instead of free-standing globals. It applies runtime config
//! lines and writes diagnostics with the same semantics as the generated Parse
//! and Output blocks: field 0 selects a parameter by key, field 1 is parsed as
//! that parameter's type, and only that parameter changes.

use std::fmt;
use std::io::{self, Write};

use thiserror::Error;

use crate::schema::{ParameterDefinition, ParameterSchema, ValueType};

/// Errors that can occur while applying runtime configuration
#[derive(Debug, Error)]
pub enum ValueError {
    /// Raw value does not parse as the parameter's type
    #[error("invalid value '{raw}' for parameter '{key}': expected {expected}")]
    Parse {
        key: String,
        raw: String,
        expected: ValueType,
    },

    /// Error on a specific config line
    #[error("config line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<ValueError>,
    },
}

/// A typed parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// C++ `int`
    Integer(i32),
    Real(f64),
    Boolean(bool),
    Text(String),
}

impl Value {
    /// Parse raw config text as `value_type`
    ///
    /// Integers, reals and booleans take one token; text is taken verbatim.
    /// Integers must fit a C++ `int` and reals must be finite, since
    /// `std::stringstream` fails on anything else.
    pub fn parse(value_type: ValueType, raw: &str) -> Option<Self> {
        match value_type {
            ValueType::Integer => raw.parse().ok().map(Value::Integer),
            ValueType::Real => raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Value::Real),
            ValueType::Boolean => match raw {
                "true" => Some(Value::Boolean(true)),
                "false" => Some(Value::Boolean(false)),
                _ => None,
            },
            ValueType::Text => Some(Value::Text(raw.to_string())),
        }
    }

    /// Value of a C++ default literal
    fn from_literal(def: &ParameterDefinition) -> Option<Self> {
        match def.value_type {
            ValueType::Text => {
                let inner = def
                    .default_literal
                    .strip_prefix('"')?
                    .strip_suffix('"')?;
                Some(Value::Text(unescape(inner)))
            }
            other => Value::parse(other, &def.default_literal),
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Integer(_) => ValueType::Integer,
            Value::Real(_) => ValueType::Real,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Text(_) => ValueType::Text,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{v}"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "{v}"),
        }
    }
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Current values of every parameter in a schema
#[derive(Debug, Clone)]
pub struct ParameterValues<'s> {
    schema: &'s ParameterSchema,
    /// Parallel to the schema's registration order
    values: Vec<Value>,
}

impl<'s> ParameterValues<'s> {
    /// Start from the schema's defaults
    pub fn from_schema(schema: &'s ParameterSchema) -> Self {
        let values = schema
            .iter()
            .map(|def| {
                Value::from_literal(def)
                    .expect("registration only accepts literals that parse as their type")
            })
            .collect();
        Self { schema, values }
    }

    pub fn schema(&self) -> &ParameterSchema {
        self.schema
    }

    /// Value of the parameter with this key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.schema.position(key).map(|i| &self.values[i])
    }

    /// Value of the parameter exposed as this symbol
    pub fn get_by_symbol(&self, symbol: &str) -> Option<&Value> {
        let key = &self.schema.get_by_symbol(symbol)?.key;
        self.get(key)
    }

    /// Set the parameter whose key is `tag` from raw text
    ///
    /// Returns `Ok(false)` when no parameter has that key.
    pub fn apply(&mut self, tag: &str, raw: &str) -> Result<bool, ValueError> {
        let Some(index) = self.schema.position(tag) else {
            return Ok(false);
        };
        let value_type = self.values[index].value_type();
        let value = Value::parse(value_type, raw).ok_or_else(|| ValueError::Parse {
            key: tag.to_string(),
            raw: raw.to_string(),
            expected: value_type,
        })?;
        self.values[index] = value;
        Ok(true)
    }

    /// Apply one whitespace-split config line
    ///
    /// Lines with fewer than two fields, and comment lines starting with `#`,
    /// are ignored. Fields past the second are ignored.
    pub fn apply_line(&mut self, line: &str) -> Result<bool, ValueError> {
        let mut fields = line.split_whitespace();
        let (Some(tag), Some(raw)) = (fields.next(), fields.next()) else {
            return Ok(false);
        };
        if tag.starts_with('#') {
            return Ok(false);
        }
        self.apply(tag, raw)
    }

    /// Apply every line of a config file's text, stopping at the first error
    ///
    /// Returns the number of lines that set a parameter.
    pub fn load(&mut self, text: &str) -> Result<usize, ValueError> {
        let mut applied = 0;
        for (index, line) in text.lines().enumerate() {
            let matched = self.apply_line(line).map_err(|e| ValueError::Line {
                line: index + 1,
                source: Box::new(e),
            })?;
            if matched {
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// Write one `    <key><separator><value>` line per parameter
    pub fn write_diagnostics<W: Write>(&self, out: &mut W, separator: &str) -> io::Result<()> {
        for (def, value) in self.schema.iter().zip(&self.values) {
            writeln!(out, "    {}{}{}", def.key, separator, value)?;
        }
        Ok(())
    }
}
