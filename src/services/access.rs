use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::workspace_member::{WorkspaceMember, WorkspaceRole},
    db::repositories::WorkspaceMembersRepo,
    error::{AppError, AppResult},
};

/// Roles allowed to manage invitations and membership.
pub const MANAGERS: &[WorkspaceRole] = &[WorkspaceRole::Owner, WorkspaceRole::Admin];

pub const ANY_MEMBER: &[WorkspaceRole] = &[
    WorkspaceRole::Owner,
    WorkspaceRole::Admin,
    WorkspaceRole::Member,
    WorkspaceRole::Guest,
];

pub struct AccessService;

impl AccessService {
    /// The single workspace capability check every mutation goes through.
    pub fn require_role(
        conn: &mut PgConnection,
        workspace_id: Uuid,
        user_id: Uuid,
        allowed: &[WorkspaceRole],
    ) -> AppResult<WorkspaceMember> {
        let membership = WorkspaceMembersRepo::find(conn, workspace_id, user_id)?;
        Self::ensure_role(membership.as_ref().map(|m| m.role), allowed)?;
        membership.ok_or_else(|| AppError::forbidden("Not a member of this workspace"))
    }

    pub fn ensure_role(
        role: Option<WorkspaceRole>,
        allowed: &[WorkspaceRole],
    ) -> AppResult<WorkspaceRole> {
        match role {
            None => Err(AppError::forbidden("Not a member of this workspace")),
            Some(role) if allowed.contains(&role) => Ok(role),
            Some(role) => Err(AppError::forbidden(format!(
                "Role '{}' is not allowed to perform this action",
                role.as_str()
            ))),
        }
    }

    /// Only owners may hand out the owner role.
    pub fn ensure_can_grant(granter: WorkspaceRole, granted: WorkspaceRole) -> AppResult<()> {
        if granted == WorkspaceRole::Owner && granter != WorkspaceRole::Owner {
            return Err(AppError::forbidden("Only owners can invite new owners"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn managers_pass_and_members_are_forbidden() {
        assert_eq!(
            AccessService::ensure_role(Some(WorkspaceRole::Owner), MANAGERS).unwrap(),
            WorkspaceRole::Owner
        );
        assert!(AccessService::ensure_role(Some(WorkspaceRole::Admin), MANAGERS).is_ok());
        assert!(matches!(
            AccessService::ensure_role(Some(WorkspaceRole::Member), MANAGERS),
            Err(AppError::Forbidden { .. })
        ));
        assert!(matches!(
            AccessService::ensure_role(None, ANY_MEMBER),
            Err(AppError::Forbidden { .. })
        ));
        assert!(AccessService::ensure_role(Some(WorkspaceRole::Guest), ANY_MEMBER).is_ok());
    }

    #[test]
    fn admins_cannot_mint_owners() {
        use WorkspaceRole::{Admin, Owner};
        assert!(AccessService::ensure_can_grant(Admin, Owner).is_err());
        assert!(AccessService::ensure_can_grant(Owner, Owner).is_ok());
        assert!(AccessService::ensure_can_grant(Admin, Admin).is_ok());
    }
}
