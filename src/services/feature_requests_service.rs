use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::{FeatureRequestStatus, VoteType},
    db::models::feature_request::{
        FeatureRequest, NewFeatureRequest, NewVote, RankedFeatureRequest, Tally,
    },
    db::repositories::{FeatureRequestsRepo, VotesRepo},
    error::{AppError, AppResult},
};

/// Effect of one cast on a user's ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChange {
    /// No prior vote: a row is inserted.
    Cast(VoteType),
    /// Same polarity cast again: the row is removed.
    Retract(VoteType),
    /// Opposite polarity: the row flips in place.
    Switch { from: VoteType, to: VoteType },
}

impl VoteChange {
    pub fn plan(existing: Option<VoteType>, cast: VoteType) -> Self {
        match existing {
            None => VoteChange::Cast(cast),
            Some(current) if current == cast => VoteChange::Retract(current),
            Some(current) => VoteChange::Switch {
                from: current,
                to: cast,
            },
        }
    }

    pub fn apply(self, tally: Tally) -> Tally {
        match self {
            VoteChange::Cast(vote) => tally.incremented(vote),
            VoteChange::Retract(vote) => tally.decremented(vote),
            VoteChange::Switch { from, to } => tally.incremented(to).decremented(from),
        }
    }

    /// The user's vote once the change is applied.
    pub fn resulting_vote(self) -> Option<VoteType> {
        match self {
            VoteChange::Cast(vote) => Some(vote),
            VoteChange::Retract(_) => None,
            VoteChange::Switch { to, .. } => Some(to),
        }
    }
}

/// Stable sort by net votes, highest first; ties keep the incoming (recency) order.
pub fn rank_by_net_votes(requests: Vec<FeatureRequest>) -> Vec<RankedFeatureRequest> {
    let mut ranked: Vec<RankedFeatureRequest> = requests
        .into_iter()
        .map(|request| RankedFeatureRequest {
            net_votes: request.tally().net(),
            request,
        })
        .collect();
    ranked.sort_by(|a, b| b.net_votes.cmp(&a.net_votes));
    ranked
}

pub struct FeatureRequestsService;

impl FeatureRequestsService {
    pub fn submit(
        conn: &mut PgConnection,
        creator_id: Option<Uuid>,
        title: &str,
        description: &str,
        category: &str,
    ) -> AppResult<FeatureRequest> {
        let new_request = NewFeatureRequest {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            category: category.trim().to_string(),
            status: FeatureRequestStatus::Requested,
            creator_id,
        };
        let request = FeatureRequestsRepo::insert(conn, &new_request)?;
        tracing::info!(
            feature_request_id = %request.id,
            anonymous = creator_id.is_none(),
            "Feature request submitted"
        );
        Ok(request)
    }

    pub fn list_by_status(
        conn: &mut PgConnection,
        status: Option<FeatureRequestStatus>,
    ) -> AppResult<Vec<RankedFeatureRequest>> {
        let requests = FeatureRequestsRepo::list(conn, status)?;
        Ok(rank_by_net_votes(requests))
    }

    pub fn get_user_vote(
        conn: &mut PgConnection,
        request_id: Uuid,
        user_id: Option<Uuid>,
    ) -> AppResult<Option<VoteType>> {
        let Some(user_id) = user_id else {
            return Ok(None);
        };
        let vote = VotesRepo::find(conn, request_id, user_id)?;
        Ok(vote.map(|v| v.vote_type))
    }

    /// Applies one cast against the ledger and the cached counters in a single
    /// transaction holding the feature request's row lock.
    pub fn cast_vote(
        conn: &mut PgConnection,
        request_id: Uuid,
        user_id: Uuid,
        vote: VoteType,
    ) -> AppResult<()> {
        conn.transaction::<_, AppError, _>(|conn| {
            let request = FeatureRequestsRepo::lock_by_id(conn, request_id)?
                .ok_or_else(|| AppError::not_found("feature request"))?;

            let existing = VotesRepo::find(conn, request_id, user_id)?.map(|v| v.vote_type);
            let change = VoteChange::plan(existing, vote);

            match change {
                VoteChange::Cast(vote_type) => {
                    VotesRepo::insert(
                        conn,
                        &NewVote {
                            feature_request_id: request_id,
                            user_id,
                            vote_type,
                        },
                    )?;
                }
                VoteChange::Retract(_) => {
                    VotesRepo::delete(conn, request_id, user_id)?;
                }
                VoteChange::Switch { to, .. } => {
                    VotesRepo::update_type(conn, request_id, user_id, to)?;
                }
            }

            let tally = change.apply(request.tally());
            FeatureRequestsRepo::set_tally(conn, request_id, tally)?;

            tracing::info!(
                feature_request_id = %request_id,
                user_id = %user_id,
                change = ?change,
                upvotes = tally.upvotes,
                downvotes = tally.downvotes,
                "Vote applied"
            );
            Ok(())
        })
    }

    /// Re-derives both counters from live vote rows.
    pub fn recount(conn: &mut PgConnection, request_id: Uuid) -> AppResult<Tally> {
        conn.transaction::<_, AppError, _>(|conn| {
            let request = FeatureRequestsRepo::lock_by_id(conn, request_id)?
                .ok_or_else(|| AppError::not_found("feature request"))?;

            let upvotes = VotesRepo::count_by_type(conn, request_id, VoteType::Up)?;
            let downvotes = VotesRepo::count_by_type(conn, request_id, VoteType::Down)?;
            let tally = Tally {
                upvotes: i32::try_from(upvotes).unwrap_or(i32::MAX),
                downvotes: i32::try_from(downvotes).unwrap_or(i32::MAX),
            };

            if tally != request.tally() {
                tracing::warn!(
                    feature_request_id = %request_id,
                    cached = ?request.tally(),
                    live = ?tally,
                    "Vote counters drifted from ledger"
                );
            }
            FeatureRequestsRepo::set_tally(conn, request_id, tally)?;
            Ok(tally)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;

    fn request(upvotes: i32, downvotes: i32) -> FeatureRequest {
        FeatureRequest {
            id: Uuid::new_v4(),
            title: "Dark mode".to_string(),
            description: String::new(),
            category: "ui".to_string(),
            status: FeatureRequestStatus::Requested,
            upvotes,
            downvotes,
            creator_id: None,
            created_at: Utc::now(),
        }
    }

    /// Ledger + counters for one feature request, driven the same way the
    /// transactional path drives the tables.
    #[derive(Default)]
    struct Ledger {
        votes: HashMap<u32, VoteType>,
        tally: Tally,
    }

    impl Ledger {
        fn cast(&mut self, user: u32, vote: VoteType) {
            let change = VoteChange::plan(self.votes.get(&user).copied(), vote);
            match change.resulting_vote() {
                Some(v) => self.votes.insert(user, v),
                None => self.votes.remove(&user),
            };
            self.tally = change.apply(self.tally);
        }

        fn live(&self) -> Tally {
            let up = self.votes.values().filter(|v| **v == VoteType::Up).count() as i32;
            let down = self.votes.len() as i32 - up;
            Tally {
                upvotes: up,
                downvotes: down,
            }
        }
    }

    #[test]
    fn plan_covers_three_branches() {
        assert_eq!(VoteChange::plan(None, VoteType::Up), VoteChange::Cast(VoteType::Up));
        assert_eq!(
            VoteChange::plan(Some(VoteType::Up), VoteType::Up),
            VoteChange::Retract(VoteType::Up)
        );
        assert_eq!(
            VoteChange::plan(Some(VoteType::Up), VoteType::Down),
            VoteChange::Switch {
                from: VoteType::Up,
                to: VoteType::Down
            }
        );
    }

    #[test]
    fn upvote_twice_is_a_toggle() {
        let mut ledger = Ledger::default();
        ledger.cast(1, VoteType::Up);
        assert_eq!(ledger.tally.upvotes, 1);
        ledger.cast(1, VoteType::Up);
        assert_eq!(ledger.tally, Tally::default());
        assert!(ledger.votes.is_empty());
    }

    #[test]
    fn switching_moves_one_vote_between_counters() {
        let mut ledger = Ledger::default();
        ledger.cast(1, VoteType::Up);
        ledger.cast(1, VoteType::Down);
        assert_eq!(
            ledger.tally,
            Tally {
                upvotes: 0,
                downvotes: 1
            }
        );
        assert_eq!(ledger.votes.get(&1), Some(&VoteType::Down));
        assert_eq!(ledger.votes.len(), 1);
    }

    #[test]
    fn counters_track_ledger_over_mixed_sequences() {
        let mut ledger = Ledger::default();
        let script = [
            (1, VoteType::Up),
            (2, VoteType::Up),
            (3, VoteType::Down),
            (2, VoteType::Down),
            (1, VoteType::Up),
            (3, VoteType::Down),
            (4, VoteType::Down),
            (2, VoteType::Up),
        ];
        for (user, vote) in script {
            ledger.cast(user, vote);
            assert_eq!(ledger.tally, ledger.live());
            assert!(ledger.tally.upvotes >= 0 && ledger.tally.downvotes >= 0);
        }
    }

    #[test]
    fn drifted_counters_are_clamped_not_negative() {
        // A cached counter that already lost a vote must stay at zero.
        let drifted = Tally::default();
        let after = VoteChange::Switch {
            from: VoteType::Up,
            to: VoteType::Down,
        }
        .apply(drifted);
        assert_eq!(
            after,
            Tally {
                upvotes: 0,
                downvotes: 1
            }
        );
        assert_eq!(VoteChange::Retract(VoteType::Down).apply(drifted), drifted);
    }

    #[test]
    fn ranking_orders_by_net_votes_and_keeps_recency_for_ties() {
        let newest = request(1, 0);
        let middle = request(5, 1);
        let oldest = request(2, 1);
        let ids = (newest.id, middle.id, oldest.id);

        let ranked = rank_by_net_votes(vec![newest, middle, oldest]);
        let order: Vec<Uuid> = ranked.iter().map(|r| r.request.id).collect();
        assert_eq!(order, vec![ids.1, ids.0, ids.2]);
        assert_eq!(ranked[0].net_votes, 4);
    }
}
