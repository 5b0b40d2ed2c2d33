//! Tag-indexed catalog of generator kinds.
//!
//! A [`GeneratorRegistry`] maps a `type` tag to the function that decodes a
//! configuration record of that kind. Records look like
//! `{"type": "self", "fluid": "water", "priority": 0, ...}`. Build the registry
//! once, then share it by reference.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use tracing::warn;

use crate::catalog::GeneratorCatalog;
use crate::error::{FluidError, FluidResult};
use crate::generator::FluidGenerator;
use crate::kinds::{OtherFluidGenerator, SelfFluidGenerator};

/// Key holding the kind tag in a configuration record.
pub const TYPE_KEY: &str = "type";

/// Decodes one configuration record into a generator instance.
pub type DecodeFn = fn(&Value) -> FluidResult<Box<dyn FluidGenerator>>;

/// Registry entry for one generator kind.
#[derive(Clone)]
pub struct GeneratorType {
    name: String,
    summary: String,
    decode: DecodeFn,
}

impl GeneratorType {
    /// Describe a kind by tag, one-line summary, and decoder.
    pub fn new(name: impl Into<String>, summary: impl Into<String>, decode: DecodeFn) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            decode,
        }
    }

    /// The `type` tag.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line description for listings.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Decode a record of this kind.
    pub fn decode(&self, record: &Value) -> FluidResult<Box<dyn FluidGenerator>> {
        (self.decode)(record)
    }
}

impl fmt::Debug for GeneratorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorType")
            .field("name", &self.name)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

/// A record [`GeneratorRegistry::decode_all`] skipped.
#[derive(Debug)]
pub struct RejectedRecord {
    /// Position of the record in its list.
    pub index: usize,
    /// Why it could not be decoded.
    pub error: FluidError,
}

/// The set of known generator kinds.
#[derive(Debug, Clone, Default)]
pub struct GeneratorRegistry {
    types: BTreeMap<String, GeneratorType>,
}

impl GeneratorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in `self` and `other` kinds.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for descriptor in [
            SelfFluidGenerator::descriptor(),
            OtherFluidGenerator::descriptor(),
        ] {
            registry.types.insert(descriptor.name.clone(), descriptor);
        }
        registry
    }

    /// Add a kind. Fails if its tag is already taken.
    pub fn register(&mut self, descriptor: GeneratorType) -> FluidResult<()> {
        if self.types.contains_key(descriptor.name()) {
            return Err(FluidError::DuplicateType(descriptor.name));
        }
        self.types.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    /// Look up a kind by tag.
    pub fn resolve(&self, name: &str) -> Option<&GeneratorType> {
        self.types.get(name)
    }

    /// All registered kinds, ordered by tag.
    pub fn types(&self) -> impl Iterator<Item = &GeneratorType> {
        self.types.values()
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no kinds are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Decode one tagged record.
    pub fn decode(&self, record: &Value) -> FluidResult<Box<dyn FluidGenerator>> {
        let object = record.as_object().ok_or_else(|| {
            FluidError::InvalidConfig("generator record must be a JSON object".to_string())
        })?;
        let tag = object
            .get(TYPE_KEY)
            .ok_or_else(|| FluidError::InvalidConfig(format!("missing '{TYPE_KEY}' field")))?
            .as_str()
            .ok_or_else(|| FluidError::InvalidConfig(format!("'{TYPE_KEY}' must be a string")))?;
        let kind = self
            .resolve(tag)
            .ok_or_else(|| FluidError::UnknownType(tag.to_string()))?;
        kind.decode(record)
    }

    /// Encode a generator as a tagged record. Fails for kinds this registry
    /// cannot decode again.
    pub fn encode(&self, generator: &dyn FluidGenerator) -> FluidResult<Value> {
        let tag = generator.type_name();
        if self.resolve(tag).is_none() {
            return Err(FluidError::UnknownType(tag.to_string()));
        }
        let mut record = match generator.encode()? {
            Value::Object(map) => map,
            other => {
                return Err(FluidError::InvalidConfig(format!(
                    "{tag} encoded to {other}, expected an object"
                )));
            }
        };
        record.insert(TYPE_KEY.to_string(), Value::String(tag.to_string()));
        Ok(Value::Object(record))
    }

    /// Decode a JSON array of records into a catalog grouped by fluid.
    ///
    /// Text that is not a JSON array fails outright; bad records inside the
    /// array are skipped as in [`decode_all`](Self::decode_all).
    pub fn load_catalog(&self, json: &str) -> FluidResult<(GeneratorCatalog, Vec<RejectedRecord>)> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Array(records) = value else {
            return Err(FluidError::InvalidConfig(
                "generator list must be a JSON array".to_string(),
            ));
        };
        Ok(self.decode_all(&records))
    }

    /// Decode already-parsed records into a catalog grouped by fluid.
    ///
    /// A record that fails to decode is logged and left out; the rest still
    /// load. The skipped records come back with their list index.
    pub fn decode_all(&self, records: &[Value]) -> (GeneratorCatalog, Vec<RejectedRecord>) {
        let mut catalog = GeneratorCatalog::new();
        let mut rejected = Vec::new();
        for (index, record) in records.iter().enumerate() {
            match self.decode(record) {
                Ok(generator) => catalog.insert(generator),
                Err(error) => {
                    warn!(index, %error, "skipping generator record");
                    rejected.push(RejectedRecord { index, error });
                }
            }
        }
        (catalog, rejected)
    }

    /// Encode every generator of a catalog back into a JSON array.
    pub fn save_catalog(&self, catalog: &GeneratorCatalog) -> FluidResult<Value> {
        let records = catalog
            .iter()
            .map(|g| self.encode(g))
            .collect::<FluidResult<Vec<_>>>()?;
        Ok(Value::Array(records))
    }
}
