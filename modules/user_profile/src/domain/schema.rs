//! Field schema discovery, merging and caching

use crate::config::Config;
use crate::contract::{ProfileError, Schema};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Cache key under which the merged schema is memoized
pub const SCHEMA_CACHE_KEY: &str = "customProfileUserSchema";

/// Resolves a logical namespace to physical locations
///
/// Locations are returned highest priority first, the way a layered resource
/// locator reports them.
pub trait ResourceLocator: Send + Sync {
    fn find_resources(&self, namespace: &str, recursive: bool, include_files: bool) -> Vec<PathBuf>;
}

/// Storage for the merged schema between requests
pub trait SchemaCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Arc<Schema>>;
    fn put(&self, key: &str, schema: Arc<Schema>);
    fn forget(&self, key: &str);
}

/// Loads field-definition documents and merges them into one [`Schema`]
pub struct SchemaLoader {
    namespace: String,
    extensions: Vec<String>,
    cache_enabled: bool,
    locator: Arc<dyn ResourceLocator>,
    cache: Arc<dyn SchemaCache>,
}

impl SchemaLoader {
    pub fn new(
        config: &Config,
        locator: Arc<dyn ResourceLocator>,
        cache: Arc<dyn SchemaCache>,
    ) -> Self {
        Self {
            namespace: config.schema.namespace.clone(),
            extensions: config.schema.extensions.clone(),
            cache_enabled: config.custom_profile.cache,
            locator,
            cache,
        }
    }

    /// Merged schema; read through the cache when caching is enabled
    pub fn fields_schema(&self) -> Result<Arc<Schema>, ProfileError> {
        if !self.cache_enabled {
            return self.load().map(Arc::new);
        }

        if let Some(schema) = self.cache.get(SCHEMA_CACHE_KEY) {
            tracing::debug!(key = SCHEMA_CACHE_KEY, "profile schema cache hit");
            return Ok(schema);
        }

        tracing::debug!(key = SCHEMA_CACHE_KEY, "profile schema cache miss");
        let schema = Arc::new(self.load()?);
        self.cache.put(SCHEMA_CACHE_KEY, schema.clone());
        Ok(schema)
    }

    /// Forget the cached schema
    pub fn invalidate(&self) {
        self.cache.forget(SCHEMA_CACHE_KEY);
        tracing::info!(key = SCHEMA_CACHE_KEY, "profile schema cache invalidated");
    }

    /// Read every document from disk, bypassing the cache
    pub fn load(&self) -> Result<Schema, ProfileError> {
        let mut locations = self.locator.find_resources(&self.namespace, true, false);
        locations.reverse();

        let mut merged = Map::new();
        for location in &locations {
            let Some(files) = self.list_documents(location) else {
                continue;
            };
            for file in files {
                let document = read_document(&file)?;
                merge_into(&mut merged, document);
            }
        }

        serde_json::from_value(Value::Object(merged)).map_err(|e| ProfileError::SchemaParse {
            path: PathBuf::from(&self.namespace),
            reason: e.to_string(),
        })
    }

    /// Matching documents directly inside `location`, sorted by file name
    fn list_documents(&self, location: &Path) -> Option<Vec<PathBuf>> {
        let entries = match std::fs::read_dir(location) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(location = %location.display(), error = %e, "skipping schema location");
                return None;
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && self.has_schema_extension(path))
            .collect();
        files.sort();
        Some(files)
    }

    fn has_schema_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext))
    }
}

/// Parse one document; its top level must be an object of field definitions
fn read_document(path: &Path) -> Result<Map<String, Value>, ProfileError> {
    let parse_error = |reason: String| ProfileError::SchemaParse {
        path: path.to_path_buf(),
        reason,
    };

    let content = std::fs::read_to_string(path).map_err(|e| parse_error(e.to_string()))?;
    let value: Value = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?;
            yaml_to_json(yaml).map_err(parse_error)?
        }
        _ => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
    };

    let Value::Object(document) = value else {
        return Err(parse_error("top level must be an object of fields".to_string()));
    };

    // Every entry must already have the shape of a (possibly partial) definition
    serde_json::from_value::<Schema>(Value::Object(document.clone()))
        .map_err(|e| parse_error(e.to_string()))?;

    Ok(document)
}

/// YAML to JSON; scalar mapping keys such as `1:` or `true:` become strings
fn yaml_to_json(value: serde_yaml::Value) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| format!("unsupported number {n}"))?
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                let key = match key {
                    Yaml::String(s) => s,
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(true) => "1".to_string(),
                    Yaml::Bool(false) => "0".to_string(),
                    Yaml::Null => String::new(),
                    other => return Err(format!("unsupported mapping key {other:?}")),
                };
                map.insert(key, yaml_to_json(value)?);
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

/// Recursive replace: objects merge key by key, anything else is overwritten
pub(crate) fn merge_into(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_into(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
