use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::activity::{Activity, ActivityAction, NewActivity},
    db::models::workspace::{NewWorkspace, Workspace, WorkspaceWithRole},
    db::models::workspace_member::{NewWorkspaceMember, WorkspaceMemberInfo, WorkspaceRole},
    db::repositories::{ActivitiesRepo, WorkspaceMembersRepo, WorkspacesRepo},
    error::{AppError, AppResult},
    services::access::{ANY_MEMBER, AccessService},
};

pub const DEFAULT_ACTIVITY_LIMIT: i64 = 50;
const MAX_ACTIVITY_LIMIT: i64 = 100;

pub struct WorkspacesService;

impl WorkspacesService {
    /// Creates the workspace with its creator as the sole owner.
    pub fn create(conn: &mut PgConnection, creator_id: Uuid, name: &str) -> AppResult<Workspace> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Workspace name is required"));
        }

        conn.transaction::<_, AppError, _>(|conn| {
            let workspace = WorkspacesRepo::insert(
                conn,
                &NewWorkspace {
                    name: name.to_string(),
                },
            )?;
            WorkspaceMembersRepo::insert(
                conn,
                &NewWorkspaceMember {
                    workspace_id: workspace.id,
                    user_id: creator_id,
                    role: WorkspaceRole::Owner,
                },
            )?;
            ActivitiesRepo::insert(
                conn,
                &NewActivity::record(
                    workspace.id,
                    creator_id,
                    ActivityAction::WorkspaceCreated,
                    workspace.id,
                    Some(workspace.name.clone()),
                ),
            )?;
            tracing::info!(
                workspace_id = %workspace.id,
                owner_id = %creator_id,
                "Workspace created"
            );
            Ok(workspace)
        })
    }

    pub fn list_for_user(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> AppResult<Vec<WorkspaceWithRole>> {
        let rows = WorkspacesRepo::list_for_user(conn, user_id)?;
        Ok(rows
            .into_iter()
            .map(|(workspace, role)| WorkspaceWithRole {
                id: workspace.id,
                name: workspace.name,
                role,
                created_at: workspace.created_at,
            })
            .collect())
    }

    pub fn members(
        conn: &mut PgConnection,
        workspace_id: Uuid,
        caller_id: Uuid,
    ) -> AppResult<Vec<WorkspaceMemberInfo>> {
        AccessService::require_role(conn, workspace_id, caller_id, ANY_MEMBER)?;
        let rows = WorkspaceMembersRepo::list_with_users(conn, workspace_id)?;
        Ok(rows
            .into_iter()
            .map(|(member, user)| WorkspaceMemberInfo {
                user_id: member.user_id,
                workspace_id: member.workspace_id,
                name: user.name,
                email: user.email,
                avatar_url: user.avatar_url,
                role: member.role,
                joined_at: member.joined_at,
            })
            .collect())
    }

    pub fn activity(
        conn: &mut PgConnection,
        workspace_id: Uuid,
        caller_id: Uuid,
        limit: Option<i64>,
    ) -> AppResult<Vec<Activity>> {
        AccessService::require_role(conn, workspace_id, caller_id, ANY_MEMBER)?;
        let entries =
            ActivitiesRepo::list_by_workspace(conn, workspace_id, clamp_activity_limit(limit))?;
        Ok(entries)
    }
}

pub fn clamp_activity_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
        .clamp(1, MAX_ACTIVITY_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::clamp_activity_limit;

    #[test]
    fn activity_limit_is_bounded() {
        assert_eq!(clamp_activity_limit(None), 50);
        assert_eq!(clamp_activity_limit(Some(0)), 1);
        assert_eq!(clamp_activity_limit(Some(10)), 10);
        assert_eq!(clamp_activity_limit(Some(10_000)), 100);
    }
}
