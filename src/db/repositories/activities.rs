use diesel::prelude::*;

use crate::db::models::activity::{Activity, NewActivity};

pub struct ActivitiesRepo;

impl ActivitiesRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_activity: &NewActivity,
    ) -> Result<usize, diesel::result::Error> {
        diesel::insert_into(crate::schema::activities::table)
            .values(new_activity)
            .execute(conn)
    }

    pub fn list_by_workspace(
        conn: &mut PgConnection,
        ws: uuid::Uuid,
        max: i64,
    ) -> Result<Vec<Activity>, diesel::result::Error> {
        use crate::schema::activities::dsl::*;
        activities
            .filter(workspace_id.eq(ws))
            .order(created_at.desc())
            .limit(max)
            .select(Activity::as_select())
            .load(conn)
    }
}
