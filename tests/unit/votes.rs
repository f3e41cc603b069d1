use teamboard_backend::db::enums::VoteType;
use teamboard_backend::db::models::feature_request::Tally;
use teamboard_backend::services::feature_requests_service::VoteChange;

#[test]
fn down_then_up_switches_polarity() {
    let start = Tally {
        upvotes: 3,
        downvotes: 2,
    };
    let change = VoteChange::plan(Some(VoteType::Down), VoteType::Up);
    assert_eq!(change.resulting_vote(), Some(VoteType::Up));

    let after = change.apply(start);
    assert_eq!(
        after,
        Tally {
            upvotes: 4,
            downvotes: 1
        }
    );
    // one vote moved, none created
    assert_eq!(
        after.upvotes + after.downvotes,
        start.upvotes + start.downvotes
    );
}

#[test]
fn retract_leaves_no_vote() {
    let change = VoteChange::plan(Some(VoteType::Down), VoteType::Down);
    assert_eq!(change.resulting_vote(), None);
    assert_eq!(
        change.apply(Tally {
            upvotes: 0,
            downvotes: 1
        }),
        Tally::default()
    );
}

#[test]
fn vote_type_wire_format() {
    let up: VoteType = serde_json::from_str("\"up\"").unwrap();
    assert_eq!(up, VoteType::Up);
    assert_eq!(serde_json::to_string(&VoteType::Down).unwrap(), "\"down\"");
}
