use diesel::prelude::*;

use crate::db::models::invitation::{Invitation, InvitationStatus, NewInvitation};

pub struct InvitationsRepo;

impl InvitationsRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_inv: &NewInvitation,
    ) -> Result<Invitation, diesel::result::Error> {
        diesel::insert_into(crate::schema::invitations::table)
            .values(new_inv)
            .returning(Invitation::as_returning())
            .get_result(conn)
    }

    /// Any pending row counts, stale or not: expiry is never written back.
    pub fn pending_exists_for_email(
        conn: &mut PgConnection,
        ws_id: uuid::Uuid,
        email_val: &str,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::invitations::dsl as inv;
        diesel::select(diesel::dsl::exists(
            inv::invitations
                .filter(inv::workspace_id.eq(ws_id))
                .filter(inv::email.eq(email_val))
                .filter(inv::status.eq(InvitationStatus::Pending)),
        ))
        .get_result(conn)
    }

    pub fn update_status(
        conn: &mut PgConnection,
        inv_id: uuid::Uuid,
        status: InvitationStatus,
    ) -> Result<Invitation, diesel::result::Error> {
        use crate::schema::invitations::dsl as inv;
        diesel::update(inv::invitations.filter(inv::id.eq(inv_id)))
            .set((inv::status.eq(status), inv::updated_at.eq(chrono::Utc::now())))
            .returning(Invitation::as_returning())
            .get_result(conn)
    }

    pub fn list_by_workspace(
        conn: &mut PgConnection,
        ws: uuid::Uuid,
        status_filter: Option<InvitationStatus>,
    ) -> Result<Vec<Invitation>, diesel::result::Error> {
        use crate::schema::invitations::dsl as inv;
        let mut query = inv::invitations
            .filter(inv::workspace_id.eq(ws))
            .order(inv::created_at.desc())
            .select(Invitation::as_select())
            .into_boxed();
        if let Some(status) = status_filter {
            query = query.filter(inv::status.eq(status));
        }
        query.load(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        invitation_id: uuid::Uuid,
    ) -> Result<Option<Invitation>, diesel::result::Error> {
        use crate::schema::invitations::dsl::*;
        invitations
            .filter(id.eq(invitation_id))
            .select(Invitation::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_token_hash(
        conn: &mut PgConnection,
        hash: &str,
    ) -> Result<Option<Invitation>, diesel::result::Error> {
        use crate::schema::invitations::dsl::*;
        invitations
            .filter(token_hash.eq(hash))
            .select(Invitation::as_select())
            .first(conn)
            .optional()
    }

    /// Same lookup, holding a row lock until the surrounding transaction ends.
    pub fn lock_by_token_hash(
        conn: &mut PgConnection,
        hash: &str,
    ) -> Result<Option<Invitation>, diesel::result::Error> {
        use crate::schema::invitations::dsl::*;
        invitations
            .filter(token_hash.eq(hash))
            .select(Invitation::as_select())
            .for_update()
            .first(conn)
            .optional()
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        invitation_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::invitations::dsl::*;
        diesel::delete(invitations.filter(id.eq(invitation_id))).execute(conn)
    }
}
