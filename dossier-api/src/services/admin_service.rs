//! Admin Service
//!
//! Oversight operations gated by the admin capability. The capability is
//! evaluated fresh from the profile store on every call; it is never
//! carried in a token, so revocation takes effect on the next request.

use crate::error::{ApiError, ApiResult};
use crate::types::UpdateUserRequest;
use crate::validation::HasUpdates;
use dossier_core::{AuditLog, Profile, ResourceKind, UserRole};
use dossier_storage::{ProfileUpdate, StorageTrait};
use uuid::Uuid;

/// Resolve the caller's profile and require the admin capability.
///
/// An unknown, non-admin, or suspended caller is rejected with 403; the
/// response does not distinguish the three.
pub fn require_admin(storage: &dyn StorageTrait, actor_id: Uuid) -> ApiResult<Profile> {
    let profile = storage
        .profile_get(actor_id)?
        .ok_or_else(|| ApiError::forbidden("Admin access required"))?;
    if !profile.is_active_admin() {
        return Err(ApiError::forbidden("Admin access required"));
    }
    Ok(profile)
}

/// List all user profiles. Admin only.
pub fn list_users(storage: &dyn StorageTrait, actor_id: Uuid) -> ApiResult<Vec<Profile>> {
    require_admin(storage, actor_id)?;
    Ok(storage.profile_list()?)
}

/// Get one user profile. Admin only.
pub fn get_user(storage: &dyn StorageTrait, actor_id: Uuid, target_id: Uuid) -> ApiResult<Profile> {
    require_admin(storage, actor_id)?;
    storage
        .profile_get(target_id)?
        .ok_or_else(|| ApiError::entity_not_found("profile", target_id))
}

/// Change a user's role or suspension flag. Admin only.
///
/// An admin may not suspend themselves or strip their own role; both would
/// otherwise allow the last admin to lock everyone out.
pub fn update_user(
    storage: &dyn StorageTrait,
    actor_id: Uuid,
    target_id: Uuid,
    request: UpdateUserRequest,
) -> ApiResult<Profile> {
    require_admin(storage, actor_id)?;
    request.require_updates()?;

    if actor_id == target_id {
        let self_suspend = request.is_suspended == Some(true);
        let self_demote = matches!(request.role, Some(role) if role != UserRole::Admin);
        if self_suspend || self_demote {
            return Err(ApiError::validation_failed(
                "Admins cannot suspend or demote themselves",
            ));
        }
    }

    storage
        .profile_get(target_id)?
        .ok_or_else(|| ApiError::entity_not_found("profile", target_id))?;

    let updated = storage.profile_update(
        target_id,
        ProfileUpdate {
            display_name: None,
            role: request.role,
            is_suspended: request.is_suspended,
        },
    )?;

    record_audit(storage, actor_id, target_id, &request);
    tracing::info!(
        actor_id = %actor_id,
        target_id = %target_id,
        "Admin updated user profile"
    );
    Ok(updated)
}

/// Delete a user profile. Admin only; self-deletion is refused.
pub fn delete_user(storage: &dyn StorageTrait, actor_id: Uuid, target_id: Uuid) -> ApiResult<()> {
    require_admin(storage, actor_id)?;
    if actor_id == target_id {
        return Err(ApiError::validation_failed(
            "Admins cannot delete their own profile",
        ));
    }
    storage
        .profile_get(target_id)?
        .ok_or_else(|| ApiError::entity_not_found("profile", target_id))?;
    storage.profile_delete(target_id)?;

    let entry = AuditLog::new(
        actor_id,
        "user.delete",
        ResourceKind::Profile,
        Some(target_id),
        serde_json::Value::Null,
    );
    if let Err(err) = storage.audit_append(&entry) {
        tracing::warn!(
            actor_id = %actor_id,
            error = %err,
            "Failed to append audit entry"
        );
    }
    tracing::info!(actor_id = %actor_id, target_id = %target_id, "Admin deleted user profile");
    Ok(())
}

/// Read an actor's audit trail, newest first. Admin only.
pub fn list_audit(
    storage: &dyn StorageTrait,
    actor_id: Uuid,
    subject_id: Uuid,
) -> ApiResult<Vec<AuditLog>> {
    require_admin(storage, actor_id)?;
    Ok(storage.audit_list_by_actor(subject_id)?)
}

/// Append audit entries for an admin mutation. Best-effort: a failed
/// append is logged and the mutation stands.
fn record_audit(
    storage: &dyn StorageTrait,
    actor_id: Uuid,
    target_id: Uuid,
    request: &UpdateUserRequest,
) {
    let mut actions: Vec<(&str, serde_json::Value)> = Vec::new();
    if let Some(role) = request.role {
        actions.push(("user.role_change", serde_json::json!({ "role": role })));
    }
    if let Some(is_suspended) = request.is_suspended {
        let action = if is_suspended {
            "user.suspend"
        } else {
            "user.unsuspend"
        };
        actions.push((action, serde_json::json!({ "is_suspended": is_suspended })));
    }

    for (action, metadata) in actions {
        let entry = AuditLog::new(
            actor_id,
            action,
            ResourceKind::Profile,
            Some(target_id),
            metadata,
        );
        if let Err(err) = storage.audit_append(&entry) {
            tracing::warn!(
                actor_id = %actor_id,
                action = action,
                error = %err,
                "Failed to append audit entry"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use dossier_core::new_entity_id;
    use dossier_storage::MemoryStorage;

    fn seed_profile(storage: &MemoryStorage, role: UserRole) -> Profile {
        let profile = Profile::new(new_entity_id(), "u@example.com", role);
        storage.profile_insert(&profile).unwrap();
        profile
    }

    #[test]
    fn test_plain_user_is_forbidden() {
        let storage = MemoryStorage::new();
        let user = seed_profile(&storage, UserRole::User);
        let err = list_users(&storage, user.user_id).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[test]
    fn test_unknown_caller_is_forbidden() {
        let storage = MemoryStorage::new();
        let err = list_users(&storage, new_entity_id()).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[test]
    fn test_suspended_admin_loses_capability() {
        let storage = MemoryStorage::new();
        let admin = seed_profile(&storage, UserRole::Admin);
        let other_admin = seed_profile(&storage, UserRole::Admin);

        // Suspension takes effect on the very next call.
        update_user(
            &storage,
            other_admin.user_id,
            admin.user_id,
            UpdateUserRequest {
                is_suspended: Some(true),
                ..Default::default()
            },
        )
        .unwrap();

        let err = list_users(&storage, admin.user_id).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[test]
    fn test_admin_cannot_suspend_self() {
        let storage = MemoryStorage::new();
        let admin = seed_profile(&storage, UserRole::Admin);

        let err = update_user(
            &storage,
            admin.user_id,
            admin.user_id,
            UpdateUserRequest {
                is_suspended: Some(true),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_admin_cannot_demote_self() {
        let storage = MemoryStorage::new();
        let admin = seed_profile(&storage, UserRole::Admin);

        let err = update_user(
            &storage,
            admin.user_id,
            admin.user_id,
            UpdateUserRequest {
                role: Some(UserRole::User),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        // Unsuspending yourself is a no-op but not an error.
        assert!(update_user(
            &storage,
            admin.user_id,
            admin.user_id,
            UpdateUserRequest {
                is_suspended: Some(false),
                ..Default::default()
            },
        )
        .is_ok());
    }

    #[test]
    fn test_update_writes_audit_trail() {
        let storage = MemoryStorage::new();
        let admin = seed_profile(&storage, UserRole::Admin);
        let target = seed_profile(&storage, UserRole::User);

        update_user(
            &storage,
            admin.user_id,
            target.user_id,
            UpdateUserRequest {
                role: Some(UserRole::Admin),
                is_suspended: Some(true),
            },
        )
        .unwrap();

        let trail = list_audit(&storage, admin.user_id, admin.user_id).unwrap();
        assert_eq!(trail.len(), 2);
        let actions: Vec<&str> = trail.iter().map(|e| e.action.as_str()).collect();
        assert!(actions.contains(&"user.role_change"));
        assert!(actions.contains(&"user.suspend"));
    }

    #[test]
    fn test_admin_cannot_delete_self() {
        let storage = MemoryStorage::new();
        let admin = seed_profile(&storage, UserRole::Admin);

        let err = delete_user(&storage, admin.user_id, admin.user_id).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        // Still present
        assert!(storage.profile_get(admin.user_id).unwrap().is_some());
    }

    #[test]
    fn test_delete_user_removes_profile_and_audits() {
        let storage = MemoryStorage::new();
        let admin = seed_profile(&storage, UserRole::Admin);
        let target = seed_profile(&storage, UserRole::User);

        delete_user(&storage, admin.user_id, target.user_id).unwrap();
        assert!(storage.profile_get(target.user_id).unwrap().is_none());

        let trail = list_audit(&storage, admin.user_id, admin.user_id).unwrap();
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].action, "user.delete");
    }

    #[test]
    fn test_unknown_target_is_not_found() {
        let storage = MemoryStorage::new();
        let admin = seed_profile(&storage, UserRole::Admin);

        let err = update_user(
            &storage,
            admin.user_id,
            new_entity_id(),
            UpdateUserRequest {
                is_suspended: Some(true),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::EntityNotFound);
    }
}
