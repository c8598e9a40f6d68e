//! Process-local schema cache

use crate::contract::Schema;
use crate::domain::SchemaCache;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Keeps schemas until explicitly forgotten
#[derive(Default)]
pub struct InMemorySchemaCache {
    entries: RwLock<HashMap<String, Arc<Schema>>>,
}

impl InMemorySchemaCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchemaCache for InMemorySchemaCache {
    fn get(&self, key: &str) -> Option<Arc<Schema>> {
        self.entries.read().get(key).cloned()
    }

    fn put(&self, key: &str, schema: Arc<Schema>) {
        self.entries.write().insert(key.to_string(), schema);
    }

    fn forget(&self, key: &str) {
        self.entries.write().remove(key);
    }
}
