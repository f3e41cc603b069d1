use diesel::prelude::*;

use crate::db::enums::VoteType;
use crate::db::models::feature_request::{NewVote, Vote};

pub struct VotesRepo;

impl VotesRepo {
    pub fn find(
        conn: &mut PgConnection,
        request_id: uuid::Uuid,
        voter: uuid::Uuid,
    ) -> Result<Option<Vote>, diesel::result::Error> {
        use crate::schema::votes::dsl::*;
        votes
            .filter(feature_request_id.eq(request_id))
            .filter(user_id.eq(voter))
            .select(Vote::as_select())
            .first(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_vote: &NewVote,
    ) -> Result<usize, diesel::result::Error> {
        diesel::insert_into(crate::schema::votes::table)
            .values(new_vote)
            .execute(conn)
    }

    pub fn update_type(
        conn: &mut PgConnection,
        request_id: uuid::Uuid,
        voter: uuid::Uuid,
        new_type: VoteType,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::votes::dsl::*;
        diesel::update(
            votes
                .filter(feature_request_id.eq(request_id))
                .filter(user_id.eq(voter)),
        )
        .set(vote_type.eq(new_type))
        .execute(conn)
    }

    pub fn delete(
        conn: &mut PgConnection,
        request_id: uuid::Uuid,
        voter: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::votes::dsl::*;
        diesel::delete(
            votes
                .filter(feature_request_id.eq(request_id))
                .filter(user_id.eq(voter)),
        )
        .execute(conn)
    }

    pub fn count_by_type(
        conn: &mut PgConnection,
        request_id: uuid::Uuid,
        polarity: VoteType,
    ) -> Result<i64, diesel::result::Error> {
        use crate::schema::votes::dsl::*;
        votes
            .filter(feature_request_id.eq(request_id))
            .filter(vote_type.eq(polarity))
            .count()
            .get_result(conn)
    }
}
