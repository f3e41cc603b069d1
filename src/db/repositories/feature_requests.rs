use diesel::prelude::*;

use crate::db::enums::FeatureRequestStatus;
use crate::db::models::feature_request::{FeatureRequest, NewFeatureRequest, Tally};

pub struct FeatureRequestsRepo;

impl FeatureRequestsRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_request: &NewFeatureRequest,
    ) -> Result<FeatureRequest, diesel::result::Error> {
        diesel::insert_into(crate::schema::feature_requests::table)
            .values(new_request)
            .returning(FeatureRequest::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        request_id: uuid::Uuid,
    ) -> Result<Option<FeatureRequest>, diesel::result::Error> {
        use crate::schema::feature_requests::dsl::*;
        feature_requests
            .filter(id.eq(request_id))
            .select(FeatureRequest::as_select())
            .first(conn)
            .optional()
    }

    /// Locks the row so concurrent votes on one request serialize.
    pub fn lock_by_id(
        conn: &mut PgConnection,
        request_id: uuid::Uuid,
    ) -> Result<Option<FeatureRequest>, diesel::result::Error> {
        use crate::schema::feature_requests::dsl::*;
        feature_requests
            .filter(id.eq(request_id))
            .select(FeatureRequest::as_select())
            .for_update()
            .first(conn)
            .optional()
    }

    /// Most recent first.
    pub fn list(
        conn: &mut PgConnection,
        status_filter: Option<FeatureRequestStatus>,
    ) -> Result<Vec<FeatureRequest>, diesel::result::Error> {
        use crate::schema::feature_requests::dsl as fr;
        let mut query = fr::feature_requests
            .order(fr::created_at.desc())
            .select(FeatureRequest::as_select())
            .into_boxed();
        if let Some(status) = status_filter {
            query = query.filter(fr::status.eq(status));
        }
        query.load(conn)
    }

    pub fn set_tally(
        conn: &mut PgConnection,
        request_id: uuid::Uuid,
        tally: Tally,
    ) -> Result<FeatureRequest, diesel::result::Error> {
        use crate::schema::feature_requests::dsl as fr;
        diesel::update(fr::feature_requests.filter(fr::id.eq(request_id)))
            .set((fr::upvotes.eq(tally.upvotes), fr::downvotes.eq(tally.downvotes)))
            .returning(FeatureRequest::as_returning())
            .get_result(conn)
    }
}
