use diesel::prelude::*;

use crate::db::models::user::{NewUser, User};

pub struct UsersRepo;

impl UsersRepo {
    pub fn find_by_id(
        conn: &mut PgConnection,
        user_id: uuid::Uuid,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(id.eq(user_id))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_subject(
        conn: &mut PgConnection,
        sub: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(subject.eq(sub))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    /// Emails are stored lowercased; the oldest account wins on duplicates.
    pub fn find_by_email(
        conn: &mut PgConnection,
        email_val: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(email.eq(email_val))
            .order(created_at.asc())
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn upsert_by_subject(
        conn: &mut PgConnection,
        new_user: &NewUser,
    ) -> Result<User, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::insert_into(users)
            .values(new_user)
            .on_conflict(subject)
            .do_update()
            .set((new_user, updated_at.eq(chrono::Utc::now())))
            .returning(User::as_returning())
            .get_result(conn)
    }
}
