use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::db::enums::{FeatureRequestStatus, VoteType};
use crate::schema::{feature_requests, votes};

#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = feature_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FeatureRequest {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: FeatureRequestStatus,
    pub upvotes: i32,
    pub downvotes: i32,
    pub creator_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl FeatureRequest {
    pub fn tally(&self) -> Tally {
        Tally {
            upvotes: self.upvotes,
            downvotes: self.downvotes,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = feature_requests)]
pub struct NewFeatureRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: FeatureRequestStatus,
    pub creator_id: Option<Uuid>,
}

/// Cached per-polarity vote counters of one feature request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Tally {
    pub upvotes: i32,
    pub downvotes: i32,
}

impl Tally {
    pub fn net(&self) -> i32 {
        self.upvotes - self.downvotes
    }

    pub fn incremented(self, vote: VoteType) -> Self {
        match vote {
            VoteType::Up => Tally {
                upvotes: self.upvotes.saturating_add(1),
                ..self
            },
            VoteType::Down => Tally {
                downvotes: self.downvotes.saturating_add(1),
                ..self
            },
        }
    }

    /// Decrement floored at zero.
    pub fn decremented(self, vote: VoteType) -> Self {
        match vote {
            VoteType::Up => Tally {
                upvotes: (self.upvotes - 1).max(0),
                ..self
            },
            VoteType::Down => Tally {
                downvotes: (self.downvotes - 1).max(0),
                ..self
            },
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct RankedFeatureRequest {
    #[serde(flatten)]
    pub request: FeatureRequest,
    pub net_votes: i32,
}

#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = votes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Vote {
    pub feature_request_id: Uuid,
    pub user_id: Uuid,
    pub vote_type: VoteType,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = votes)]
pub struct NewVote {
    pub feature_request_id: Uuid,
    pub user_id: Uuid,
    pub vote_type: VoteType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decrement_never_goes_negative() {
        let zero = Tally::default();
        assert_eq!(zero.decremented(VoteType::Up), zero);
        assert_eq!(zero.decremented(VoteType::Down), zero);

        let t = Tally {
            upvotes: 2,
            downvotes: 1,
        };
        assert_eq!(t.decremented(VoteType::Up).upvotes, 1);
        assert_eq!(t.decremented(VoteType::Down).downvotes, 0);
        assert_eq!(t.incremented(VoteType::Down).net(), 0);
    }
}
