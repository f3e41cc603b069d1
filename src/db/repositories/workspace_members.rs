use diesel::prelude::*;

use crate::db::models::user::User;
use crate::db::models::workspace_member::{NewWorkspaceMember, WorkspaceMember};

pub struct WorkspaceMembersRepo;

impl WorkspaceMembersRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_member: &NewWorkspaceMember,
    ) -> Result<WorkspaceMember, diesel::result::Error> {
        diesel::insert_into(crate::schema::workspace_members::table)
            .values(new_member)
            .returning(WorkspaceMember::as_returning())
            .get_result(conn)
    }

    pub fn find(
        conn: &mut PgConnection,
        ws_id: uuid::Uuid,
        user: uuid::Uuid,
    ) -> Result<Option<WorkspaceMember>, diesel::result::Error> {
        use crate::schema::workspace_members::dsl::*;
        workspace_members
            .filter(workspace_id.eq(ws_id))
            .filter(user_id.eq(user))
            .select(WorkspaceMember::as_select())
            .first(conn)
            .optional()
    }

    pub fn list_with_users(
        conn: &mut PgConnection,
        ws_id: uuid::Uuid,
    ) -> Result<Vec<(WorkspaceMember, User)>, diesel::result::Error> {
        use crate::schema::{users, workspace_members};
        workspace_members::table
            .inner_join(users::table)
            .filter(workspace_members::workspace_id.eq(ws_id))
            .order(workspace_members::joined_at.asc())
            .select((WorkspaceMember::as_select(), User::as_select()))
            .load(conn)
    }

    /// True when any account carrying `email_val` already belongs to the workspace.
    pub fn email_is_member(
        conn: &mut PgConnection,
        ws_id: uuid::Uuid,
        email_val: &str,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::{users, workspace_members};
        diesel::select(diesel::dsl::exists(
            workspace_members::table
                .inner_join(users::table)
                .filter(workspace_members::workspace_id.eq(ws_id))
                .filter(users::email.eq(email_val)),
        ))
        .get_result(conn)
    }
}
