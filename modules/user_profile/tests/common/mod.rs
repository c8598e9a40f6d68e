//! Common test utilities: in-memory repository, scripted authorizer, schema fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use user_profile::config::Config;
use user_profile::contract::{AccessContext, StoredFieldValue, UserRef};
use user_profile::domain::{Authorizer, ProfileFieldRepository, Service};
use user_profile::infra::{FsResourceLocator, InMemorySchemaCache};
use user_profile::UserProfileModule;
use uuid::Uuid;

pub fn print_test_header(test_name: &str, purpose: &str) {
    println!("\n🧪 TEST: {}", test_name);
    println!("📋 PURPOSE: {}", purpose);
}

// ===== Repository =====

type Key = (String, Uuid, String);

#[derive(Clone, Default)]
pub struct MockProfileFieldRepo {
    data: Arc<RwLock<HashMap<Key, StoredFieldValue>>>,
    upserts: Arc<AtomicUsize>,
    failing_slugs: Arc<RwLock<HashSet<String>>>,
}

impl MockProfileFieldRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of upsert calls that reached the repository
    pub fn upsert_count(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    /// Make upserts of `slug` fail with a storage error
    pub fn fail_on(&self, slug: &str) {
        self.failing_slugs.write().insert(slug.to_string());
    }

    pub fn stored(&self, user: &UserRef, slug: &str) -> Option<serde_json::Value> {
        self.data
            .read()
            .get(&("user".to_string(), user.id, slug.to_string()))
            .map(|v| v.value.clone())
    }

    pub fn count(&self) -> usize {
        self.data.read().len()
    }

    pub fn print_state(&self, context: &str) {
        let data = self.data.read();
        println!("\n========== ProfileFieldRepository State: {} ==========", context);
        println!("Total values: {}", data.len());
        for ((parent_type, parent_id, slug), value) in data.iter() {
            println!("  {}:{}:{} = {}", parent_type, parent_id, slug, value.value);
        }
    }
}

#[async_trait]
impl ProfileFieldRepository for MockProfileFieldRepo {
    async fn find_by_owner(
        &self,
        parent_type: &str,
        parent_id: Uuid,
    ) -> anyhow::Result<Vec<StoredFieldValue>> {
        Ok(self
            .data
            .read()
            .values()
            .filter(|v| v.parent_type == parent_type && v.parent_id == parent_id)
            .cloned()
            .collect())
    }

    async fn upsert(&self, value: &StoredFieldValue) -> anyhow::Result<StoredFieldValue> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        if self.failing_slugs.read().contains(&value.slug) {
            anyhow::bail!("constraint violation on {}", value.slug);
        }

        let key = (value.parent_type.clone(), value.parent_id, value.slug.clone());
        let mut data = self.data.write();
        let stored = match data.get(&key) {
            Some(existing) => StoredFieldValue {
                created_at: existing.created_at,
                ..value.clone()
            },
            None => value.clone(),
        };
        data.insert(key, stored.clone());
        Ok(stored)
    }
}

// ===== Authorizer =====

/// Grants the configured permissions and records every check
#[derive(Default)]
pub struct MockAuthorizer {
    granted: RwLock<HashSet<String>>,
    checks: RwLock<Vec<(Uuid, String, Uuid)>>,
}

impl MockAuthorizer {
    pub fn granting(permissions: &[&str]) -> Self {
        Self {
            granted: RwLock::new(permissions.iter().map(|p| p.to_string()).collect()),
            checks: RwLock::new(Vec::new()),
        }
    }

    /// (actor, permission, target) for every check performed
    pub fn checks(&self) -> Vec<(Uuid, String, Uuid)> {
        self.checks.read().clone()
    }
}

#[async_trait]
impl Authorizer for MockAuthorizer {
    async fn check_access(
        &self,
        actor: &UserRef,
        permission: &str,
        context: &AccessContext<'_>,
    ) -> anyhow::Result<bool> {
        self.checks
            .write()
            .push((actor.id, permission.to_string(), context.user.id));
        Ok(self.granted.read().contains(permission))
    }
}

// ===== Schema fixtures =====

/// Search root with `schema/userProfile/<name>` documents
pub struct SchemaRoot {
    pub dir: TempDir,
}

impl SchemaRoot {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::create_dir_all(dir.path().join("schema/userProfile"))
            .expect("Failed to create schema dir");
        Self { dir }
    }

    pub fn with_document(self, name: &str, content: serde_json::Value) -> Self {
        self.write(name, &content.to_string());
        self
    }

    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.dir.path().join("schema/userProfile").join(name), content)
            .expect("Failed to write schema document");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Fields used across the service tests
pub fn standard_schema() -> serde_json::Value {
    serde_json::json!({
        "nickname": {"form": {"type": "text", "default": "Anon"}},
        "gender": {
            "form": {
                "type": "select",
                "default": "u",
                "options": {"f": "Female", "m": "Male", "u": "Unspecified"}
            }
        },
        "bio": {"form": {"type": "textarea"}},
        "salary": {
            "form": {"type": "text", "default": "0"},
            "permission": {"view_own": false, "view": "view_salary", "edit_own": false, "edit": "edit_salary"}
        },
        "phone": {
            "form": {"type": "text"},
            "permission": {}
        }
    })
}

pub fn config_for(roots: &[&Path], cache: bool) -> Config {
    let mut config = Config::default();
    config.custom_profile.cache = cache;
    config.schema.search_paths = roots.iter().map(|p| p.to_path_buf()).collect();
    config
}

/// Service over the mock repository and the filesystem locator
pub fn create_test_service(
    root: &SchemaRoot,
    authorizer: Arc<MockAuthorizer>,
) -> (Arc<Service>, MockProfileFieldRepo) {
    let repo = MockProfileFieldRepo::new();
    let config = config_for(&[root.path()], false);
    let module = UserProfileModule::with_components(
        config.clone(),
        Arc::new(repo.clone()),
        Arc::new(FsResourceLocator::new(config.schema.search_paths.clone())),
        Arc::new(InMemorySchemaCache::new()),
        authorizer,
    );
    (module.service(), repo)
}

pub fn new_user() -> UserRef {
    UserRef::new(Uuid::new_v4())
}
