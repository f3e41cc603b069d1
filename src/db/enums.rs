use crate::schema::sql_types::{
    FeatureRequestStatus as FeatureRequestStatusType, VoteType as VoteTypeSql,
};
use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Polarity of a single vote on a feature request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = VoteTypeSql)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Up,
    Down,
}

impl VoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::Up => "up",
            VoteType::Down => "down",
        }
    }
}

impl FromSql<VoteTypeSql, Pg> for VoteType {
    fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "up" => Ok(VoteType::Up),
            "down" => Ok(VoteType::Down),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<VoteTypeSql, Pg> for VoteType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = FeatureRequestStatusType)]
#[serde(rename_all = "snake_case")]
pub enum FeatureRequestStatus {
    Requested,
    Planned,
    #[serde(rename = "in-progress")]
    InProgress,
    Done,
    Declined,
}

impl FeatureRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureRequestStatus::Requested => "requested",
            FeatureRequestStatus::Planned => "planned",
            FeatureRequestStatus::InProgress => "in-progress",
            FeatureRequestStatus::Done => "done",
            FeatureRequestStatus::Declined => "declined",
        }
    }
}

impl FromSql<FeatureRequestStatusType, Pg> for FeatureRequestStatus {
    fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "requested" => Ok(FeatureRequestStatus::Requested),
            "planned" => Ok(FeatureRequestStatus::Planned),
            "in-progress" => Ok(FeatureRequestStatus::InProgress),
            "done" => Ok(FeatureRequestStatus::Done),
            "declined" => Ok(FeatureRequestStatus::Declined),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<FeatureRequestStatusType, Pg> for FeatureRequestStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_database_labels() {
        assert_eq!(serde_json::to_string(&VoteType::Up).unwrap(), "\"up\"");
        assert_eq!(
            serde_json::to_string(&FeatureRequestStatus::InProgress).unwrap(),
            format!("\"{}\"", FeatureRequestStatus::InProgress.as_str())
        );
        assert_eq!(
            serde_json::to_string(&FeatureRequestStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        let parsed: FeatureRequestStatus = serde_json::from_str("\"declined\"").unwrap();
        assert_eq!(parsed, FeatureRequestStatus::Declined);
        assert!(serde_json::from_str::<VoteType>("\"sideways\"").is_err());
    }
}
