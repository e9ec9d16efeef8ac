//! Ordered registry of parameter definitions

use std::collections::HashMap;

use super::{ParameterDefinition, SchemaError};

/// An ordered, duplicate-free collection of parameter definitions
///
/// Definitions are kept in a `Vec` so iteration is registration order on
/// every run; the maps only index into it.
#[derive(Debug, Default, Clone)]
pub struct ParameterSchema {
    definitions: Vec<ParameterDefinition>,
    by_key: HashMap<String, usize>,
    by_symbol: HashMap<String, usize>,
}

impl ParameterSchema {
    /// Create a new empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schema from definitions, registering them in order
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = ParameterDefinition>,
    ) -> Result<Self, SchemaError> {
        let mut schema = Self::new();
        for def in definitions {
            schema.register(def)?;
        }
        Ok(schema)
    }

    /// Append a definition
    ///
    /// Fails if the definition is malformed or if its key or symbol is
    /// already taken. The schema is unchanged on failure.
    pub fn register(&mut self, def: ParameterDefinition) -> Result<(), SchemaError> {
        def.validate()?;

        if self.by_key.contains_key(&def.key) {
            return Err(SchemaError::DuplicateKey { key: def.key });
        }
        if let Some(&index) = self.by_symbol.get(&def.symbol_name) {
            return Err(SchemaError::DuplicateSymbol {
                symbol: def.symbol_name,
                key: def.key,
                existing: self.definitions[index].key.clone(),
            });
        }

        let index = self.definitions.len();
        self.by_key.insert(def.key.clone(), index);
        self.by_symbol.insert(def.symbol_name.clone(), index);
        self.definitions.push(def);
        Ok(())
    }

    /// Iterate definitions in registration order
    pub fn iter(&self) -> std::slice::Iter<'_, ParameterDefinition> {
        self.definitions.iter()
    }

    /// Look up a definition by its config key
    pub fn get(&self, key: &str) -> Option<&ParameterDefinition> {
        self.by_key.get(key).map(|&i| &self.definitions[i])
    }

    /// Look up a definition by its generated symbol
    pub fn get_by_symbol(&self, symbol: &str) -> Option<&ParameterDefinition> {
        self.by_symbol.get(symbol).map(|&i| &self.definitions[i])
    }

    /// Position of a key in registration order
    pub fn position(&self, key: &str) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<'a> IntoIterator for &'a ParameterSchema {
    type Item = &'a ParameterDefinition;
    type IntoIter = std::slice::Iter<'a, ParameterDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
