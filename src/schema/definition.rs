//! Parameter definitions and their value types

use std::fmt;
use std::str::FromStr;

use super::SchemaError;

/// The closed set of types a parameter can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Integer,
    Real,
    Boolean,
    Text,
}

impl ValueType {
    /// Spelling of this type in the generated C++ artifacts
    pub fn cpp_type(self) -> &'static str {
        match self {
            ValueType::Integer => "int",
            ValueType::Real => "double",
            ValueType::Boolean => "bool",
            ValueType::Text => "std::string",
        }
    }

    /// Lowercase name used in schema files and diagnostics
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Integer => "integer",
            ValueType::Real => "real",
            ValueType::Boolean => "boolean",
            ValueType::Text => "text",
        }
    }

    /// Check that `literal` is a valid C++ initializer for this type
    pub fn accepts_literal(self, literal: &str) -> bool {
        match self {
            ValueType::Integer => is_integer_literal(literal),
            ValueType::Real => is_real_literal(literal),
            ValueType::Boolean => literal == "true" || literal == "false",
            ValueType::Text => is_string_literal(literal),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ValueType {
    type Err = SchemaError;

    /// Accepts either the C++ spelling (`int`, `double`, `bool`, `std::string`)
    /// or the lowercase type name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" | "integer" => Ok(ValueType::Integer),
            "double" | "real" => Ok(ValueType::Real),
            "bool" | "boolean" => Ok(ValueType::Boolean),
            "std::string" | "text" => Ok(ValueType::Text),
            other => Err(SchemaError::UnknownType {
                name: other.to_string(),
            }),
        }
    }
}

/// One named, typed, defaulted parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDefinition {
    /// Token matched against field 0 of runtime config lines
    pub key: String,
    pub value_type: ValueType,
    /// C++ identifier the consuming program sees
    pub symbol_name: String,
    /// Initializer written verbatim into the Define block
    pub default_literal: String,
    pub description: String,
}

impl ParameterDefinition {
    /// Create a new definition
    pub fn new(
        key: impl Into<String>,
        value_type: ValueType,
        symbol_name: impl Into<String>,
        default_literal: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            value_type,
            symbol_name: symbol_name.into(),
            default_literal: default_literal.into(),
            description: description.into(),
        }
    }

    /// Check the definition on its own, without regard to the rest of a schema
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.key.is_empty() || self.key.chars().any(char::is_whitespace) {
            return Err(SchemaError::InvalidKey {
                key: self.key.clone(),
            });
        }
        if !is_identifier(&self.symbol_name) {
            return Err(SchemaError::InvalidSymbol {
                key: self.key.clone(),
                symbol: self.symbol_name.clone(),
            });
        }
        if !self.value_type.accepts_literal(&self.default_literal) {
            return Err(SchemaError::LiteralMismatch {
                key: self.key.clone(),
                literal: self.default_literal.clone(),
                value_type: self.value_type,
            });
        }
        Ok(())
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Decimal literal that fits a C++ `int`; a leading zero would make it octal
fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    let decimal = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'));
    decimal && s.parse::<i32>().is_ok()
}

fn is_real_literal(s: &str) -> bool {
    // Rust's f64 parser also takes "inf" and "NaN", which are not C++ literals
    let body = s.strip_prefix(['-', '+']).unwrap_or(s);
    let starts_numeric = body.starts_with(|c: char| c.is_ascii_digit() || c == '.');
    starts_numeric && body.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

fn is_string_literal(s: &str) -> bool {
    let Some(inner) = s
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return false;
    };

    let mut escaped = false;
    for c in inner.chars() {
        match (escaped, c) {
            (_, '\n') => return false,
            (true, '"' | '\\') => escaped = false,
            (true, _) => return false,
            (false, '\\') => escaped = true,
            (false, '"') => return false,
            (false, _) => {}
        }
    }
    !escaped
}
