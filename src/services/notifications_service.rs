use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::notification::Notification,
    db::repositories::NotificationsRepo,
    error::{AppError, AppResult},
};

const MAX_NOTIFICATIONS: i64 = 100;

pub struct NotificationsService;

impl NotificationsService {
    pub fn list(
        conn: &mut PgConnection,
        user_id: Uuid,
        unread_only: bool,
    ) -> AppResult<Vec<Notification>> {
        let list = NotificationsRepo::list_for_user(conn, user_id, unread_only, MAX_NOTIFICATIONS)?;
        Ok(list)
    }

    pub fn mark_read(
        conn: &mut PgConnection,
        notification_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<()> {
        // Someone else's notification looks exactly like a missing one.
        if NotificationsRepo::mark_read(conn, notification_id, user_id)? == 0 {
            return Err(AppError::not_found("notification"));
        }
        Ok(())
    }

    pub fn mark_all_read(conn: &mut PgConnection, user_id: Uuid) -> AppResult<usize> {
        let updated = NotificationsRepo::mark_all_read(conn, user_id)?;
        Ok(updated)
    }
}
