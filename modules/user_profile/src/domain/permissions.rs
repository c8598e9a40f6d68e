//! Field-level view/edit permission filtering
//!
//! The authorizer is supplied by the caller so the filter does not depend on a
//! particular authorization backend. Denied fields are removed silently.

use crate::contract::{AccessContext, AccessMode, ProfileError, ProfileView, Schema, UserRef};
use async_trait::async_trait;

/// Authorization backend consulted for fields owned by another user
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn check_access(
        &self,
        actor: &UserRef,
        permission: &str,
        context: &AccessContext<'_>,
    ) -> anyhow::Result<bool>;
}

/// Grants every permission
#[derive(Clone, Default)]
pub struct AllowAllAuthorizer;

#[async_trait]
impl Authorizer for AllowAllAuthorizer {
    async fn check_access(
        &self,
        _actor: &UserRef,
        _permission: &str,
        _context: &AccessContext<'_>,
    ) -> anyhow::Result<bool> {
        Ok(true)
    }
}

/// Denies every permission; users still see their own fields where allowed
#[derive(Clone, Default)]
pub struct DenyAllAuthorizer;

#[async_trait]
impl Authorizer for DenyAllAuthorizer {
    async fn check_access(
        &self,
        _actor: &UserRef,
        _permission: &str,
        _context: &AccessContext<'_>,
    ) -> anyhow::Result<bool> {
        Ok(false)
    }
}

/// Remove from `schema` and `profile` every field `actor` may not access on `target`
///
/// `target` defaults to the actor. Fields without a permission policy are kept.
pub async fn apply_permissions(
    mode: AccessMode,
    schema: &mut Schema,
    profile: &mut ProfileView,
    authorizer: &dyn Authorizer,
    actor: &UserRef,
    target: Option<&UserRef>,
) -> Result<(), ProfileError> {
    let target = target.unwrap_or(actor);
    let is_own = actor.id == target.id;
    let mut denied = Vec::new();

    for (slug, field) in schema.iter() {
        let Some(policy) = &field.permission else {
            continue;
        };
        if !profile.contains_key(slug) {
            continue;
        }

        let (own_allowed, permission) = policy.requirement(mode);
        let allowed = if is_own {
            own_allowed
        } else {
            authorizer
                .check_access(actor, permission, &AccessContext { user: target })
                .await
                .map_err(|e| {
                    tracing::error!(permission, error = %e, "authorizer failed");
                    ProfileError::Authorization(e.to_string())
                })?
        };

        if !allowed {
            denied.push(slug.clone());
        }
    }

    for slug in &denied {
        profile.shift_remove(slug);
        schema.shift_remove(slug);
    }

    if !denied.is_empty() {
        tracing::debug!(?mode, fields = ?denied, "profile fields filtered by permission");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::resolve_profile;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::collections::HashMap;
    use uuid::Uuid;

    /// Grants only the listed permissions and records every call
    #[derive(Default)]
    struct RecordingAuthorizer {
        granted: Vec<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Authorizer for RecordingAuthorizer {
        async fn check_access(
            &self,
            _actor: &UserRef,
            permission: &str,
            _context: &AccessContext<'_>,
        ) -> anyhow::Result<bool> {
            self.calls.lock().push(permission.to_string());
            Ok(self.granted.iter().any(|granted| *granted == permission))
        }
    }

    struct FailingAuthorizer;

    #[async_trait]
    impl Authorizer for FailingAuthorizer {
        async fn check_access(
            &self,
            _actor: &UserRef,
            _permission: &str,
            _context: &AccessContext<'_>,
        ) -> anyhow::Result<bool> {
            anyhow::bail!("role store unavailable")
        }
    }

    fn fixture() -> (Schema, ProfileView) {
        let schema: Schema = serde_json::from_value(json!({
            "nickname": {"form": {"type": "text"}},
            "salary": {
                "form": {"type": "text"},
                "permission": {"view_own": false, "view": "view_salary", "edit_own": false}
            },
            "phone": {
                "form": {"type": "text"},
                "permission": {}
            }
        }))
        .unwrap();
        let profile = resolve_profile(&schema, &HashMap::new(), false);
        (schema, profile)
    }

    fn user() -> UserRef {
        UserRef::new(Uuid::new_v4())
    }

    #[tokio::test]
    async fn own_flag_false_hides_field_from_owner() {
        let (mut schema, mut profile) = fixture();
        let me = user();
        let authorizer = RecordingAuthorizer::default();

        apply_permissions(AccessMode::View, &mut schema, &mut profile, &authorizer, &me, None)
            .await
            .unwrap();

        assert!(!schema.contains_key("salary"));
        assert!(!profile.contains_key("salary"));
        assert!(profile.contains_key("phone"));
        assert!(profile.contains_key("nickname"));
        assert!(authorizer.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn other_user_needs_named_permission() {
        let (mut schema, mut profile) = fixture();
        let authorizer = RecordingAuthorizer {
            granted: vec!["view_salary"],
            ..Default::default()
        };

        apply_permissions(
            AccessMode::View,
            &mut schema,
            &mut profile,
            &authorizer,
            &user(),
            Some(&user()),
        )
        .await
        .unwrap();

        let keys: Vec<_> = profile.keys().cloned().collect();
        assert_eq!(keys, vec!["nickname", "salary"]);
        assert_eq!(schema.len(), 2);

        let mut calls = authorizer.calls.lock().clone();
        calls.sort();
        assert_eq!(calls, vec!["view_salary", "view_user_field"]);
    }

    #[tokio::test]
    async fn edit_mode_uses_edit_half_of_policy() {
        let (mut schema, mut profile) = fixture();
        let authorizer = RecordingAuthorizer {
            granted: vec!["update_user_field"],
            ..Default::default()
        };

        apply_permissions(
            AccessMode::Edit,
            &mut schema,
            &mut profile,
            &authorizer,
            &user(),
            Some(&user()),
        )
        .await
        .unwrap();

        // salary has no explicit edit permission, so the default applies
        let keys: Vec<_> = profile.keys().cloned().collect();
        assert_eq!(keys, vec!["nickname", "salary", "phone"]);
    }

    #[tokio::test]
    async fn fields_without_policy_are_never_removed() {
        let (mut schema, mut profile) = fixture();
        apply_permissions(
            AccessMode::Edit,
            &mut schema,
            &mut profile,
            &DenyAllAuthorizer,
            &user(),
            Some(&user()),
        )
        .await
        .unwrap();

        let keys: Vec<_> = schema.keys().cloned().collect();
        assert_eq!(keys, vec!["nickname"]);
        assert_eq!(profile.len(), 1);
    }

    #[tokio::test]
    async fn authorizer_failure_is_surfaced() {
        let (mut schema, mut profile) = fixture();
        let err = apply_permissions(
            AccessMode::View,
            &mut schema,
            &mut profile,
            &FailingAuthorizer,
            &user(),
            Some(&user()),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ProfileError::Authorization(msg) if msg.contains("unavailable")));
    }

    #[tokio::test]
    async fn fields_absent_from_profile_stay_in_schema() {
        let (mut schema, mut profile) = fixture();
        profile.shift_remove("salary");
        let me = user();

        apply_permissions(AccessMode::View, &mut schema, &mut profile, &AllowAllAuthorizer, &me, Some(&me))
            .await
            .unwrap();

        assert!(schema.contains_key("salary"));
    }
}
