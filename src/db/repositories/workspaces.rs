use diesel::prelude::*;

use crate::db::models::workspace::{NewWorkspace, Workspace};
use crate::db::models::workspace_member::WorkspaceRole;

pub struct WorkspacesRepo;

impl WorkspacesRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_ws: &NewWorkspace,
    ) -> Result<Workspace, diesel::result::Error> {
        diesel::insert_into(crate::schema::workspaces::table)
            .values(new_ws)
            .returning(Workspace::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        workspace_id: uuid::Uuid,
    ) -> Result<Option<Workspace>, diesel::result::Error> {
        use crate::schema::workspaces::dsl::*;
        workspaces
            .filter(id.eq(workspace_id))
            .select(Workspace::as_select())
            .first(conn)
            .optional()
    }

    pub fn list_for_user(
        conn: &mut PgConnection,
        user: uuid::Uuid,
    ) -> Result<Vec<(Workspace, WorkspaceRole)>, diesel::result::Error> {
        use crate::schema::{workspace_members, workspaces};
        workspace_members::table
            .inner_join(workspaces::table)
            .filter(workspace_members::user_id.eq(user))
            .order(workspaces::created_at.asc())
            .select((Workspace::as_select(), workspace_members::role))
            .load(conn)
    }
}
