use teamboard_backend::db::models::workspace_member::WorkspaceRole;
use teamboard_backend::error::AppError;
use teamboard_backend::services::AccessService;
use teamboard_backend::services::access::{ANY_MEMBER, MANAGERS};

#[test]
fn guests_are_members_but_not_managers() {
    assert!(AccessService::ensure_role(Some(WorkspaceRole::Guest), ANY_MEMBER).is_ok());
    assert!(matches!(
        AccessService::ensure_role(Some(WorkspaceRole::Guest), MANAGERS),
        Err(AppError::Forbidden { .. })
    ));
    assert!(AccessService::ensure_role(None, ANY_MEMBER).is_err());
}

#[test]
fn admins_cannot_mint_owners() {
    assert!(AccessService::ensure_can_grant(WorkspaceRole::Admin, WorkspaceRole::Admin).is_ok());
    assert!(AccessService::ensure_can_grant(WorkspaceRole::Admin, WorkspaceRole::Owner).is_err());
    assert!(AccessService::ensure_can_grant(WorkspaceRole::Owner, WorkspaceRole::Owner).is_ok());
}

#[test]
fn roles_parse_from_lowercase_json() {
    let role: WorkspaceRole = serde_json::from_str("\"admin\"").unwrap();
    assert_eq!(role, WorkspaceRole::Admin);
    assert!(serde_json::from_str::<WorkspaceRole>("\"superuser\"").is_err());
}
