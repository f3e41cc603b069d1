use diesel::prelude::*;

use crate::db::models::notification::{NewNotification, Notification};

pub struct NotificationsRepo;

impl NotificationsRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_notification: &NewNotification,
    ) -> Result<Notification, diesel::result::Error> {
        diesel::insert_into(crate::schema::notifications::table)
            .values(new_notification)
            .returning(Notification::as_returning())
            .get_result(conn)
    }

    pub fn list_for_user(
        conn: &mut PgConnection,
        owner: uuid::Uuid,
        unread_only: bool,
        max: i64,
    ) -> Result<Vec<Notification>, diesel::result::Error> {
        use crate::schema::notifications::dsl::*;
        let mut query = notifications
            .filter(user_id.eq(owner))
            .order(created_at.desc())
            .limit(max)
            .select(Notification::as_select())
            .into_boxed();
        if unread_only {
            query = query.filter(is_read.eq(false));
        }
        query.load(conn)
    }

    pub fn mark_read(
        conn: &mut PgConnection,
        notification_id: uuid::Uuid,
        owner: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::notifications::dsl::*;
        diesel::update(
            notifications
                .filter(id.eq(notification_id))
                .filter(user_id.eq(owner)),
        )
        .set(is_read.eq(true))
        .execute(conn)
    }

    pub fn mark_all_read(
        conn: &mut PgConnection,
        owner: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::notifications::dsl::*;
        diesel::update(
            notifications
                .filter(user_id.eq(owner))
                .filter(is_read.eq(false)),
        )
        .set(is_read.eq(true))
        .execute(conn)
    }
}
