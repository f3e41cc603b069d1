use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::Write;
use uuid::Uuid;

use crate::db::models::workspace_member::WorkspaceRole;
use crate::error::{AppError, AppResult};
use crate::schema::invitations;

/// Stored status. Expiry is derived at read time and never written.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    diesel::FromSqlRow,
    diesel::AsExpression,
)]
#[diesel(sql_type = crate::schema::sql_types::InvitationStatus)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
    Cancelled,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Declined => "declined",
            InvitationStatus::Cancelled => "cancelled",
        }
    }
}

impl diesel::serialize::ToSql<crate::schema::sql_types::InvitationStatus, diesel::pg::Pg>
    for InvitationStatus
{
    fn to_sql<'b>(
        &'b self,
        out: &mut diesel::serialize::Output<'b, '_, diesel::pg::Pg>,
    ) -> diesel::serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(diesel::serialize::IsNull::No)
    }
}

impl diesel::deserialize::FromSql<crate::schema::sql_types::InvitationStatus, diesel::pg::Pg>
    for InvitationStatus
{
    fn from_sql(
        bytes: <diesel::pg::Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> diesel::deserialize::Result<Self> {
        let value = <String as diesel::deserialize::FromSql<
            diesel::sql_types::Text,
            diesel::pg::Pg,
        >>::from_sql(bytes)?;
        match value.as_str() {
            "pending" => Ok(InvitationStatus::Pending),
            "accepted" => Ok(InvitationStatus::Accepted),
            "declined" => Ok(InvitationStatus::Declined),
            "cancelled" => Ok(InvitationStatus::Cancelled),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

/// Status as seen by a reader at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationState {
    Pending,
    Accepted,
    Declined,
    Cancelled,
    Expired,
}

#[derive(Queryable, Selectable, Clone, Debug)]
#[diesel(table_name = invitations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Invitation {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub email: String,
    pub role: WorkspaceRole,
    pub status: InvitationStatus,
    pub invited_by: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invitation {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn state_at(&self, now: DateTime<Utc>) -> InvitationState {
        match self.status {
            InvitationStatus::Pending if self.is_expired_at(now) => InvitationState::Expired,
            InvitationStatus::Pending => InvitationState::Pending,
            InvitationStatus::Accepted => InvitationState::Accepted,
            InvitationStatus::Declined => InvitationState::Declined,
            InvitationStatus::Cancelled => InvitationState::Cancelled,
        }
    }

    /// Pending-only transitions (accept, decline) reject every other status.
    pub fn ensure_pending(&self) -> AppResult<()> {
        if self.status != InvitationStatus::Pending {
            return Err(AppError::invalid_state(format!(
                "Invitation is already {}",
                self.status.as_str()
            )));
        }
        Ok(())
    }

    pub fn ensure_acceptable(&self, now: DateTime<Utc>) -> AppResult<()> {
        self.ensure_pending()?;
        if self.is_expired_at(now) {
            return Err(AppError::Expired);
        }
        Ok(())
    }

    pub fn view_at(&self, now: DateTime<Utc>) -> InvitationView {
        InvitationView {
            id: self.id,
            workspace_id: self.workspace_id,
            email: self.email.clone(),
            role: self.role,
            status: self.status,
            state: self.state_at(now),
            invited_by: self.invited_by,
            expires_at: self.expires_at,
            created_at: self.created_at,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = invitations)]
pub struct NewInvitation {
    pub workspace_id: Uuid,
    pub email: String,
    pub role: WorkspaceRole,
    pub status: InvitationStatus,
    pub invited_by: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

/// Invitation as exposed over the API; the token hash never leaves the server.
#[derive(Serialize, Clone, Debug)]
pub struct InvitationView {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub email: String,
    pub role: WorkspaceRole,
    pub status: InvitationStatus,
    pub state: InvitationState,
    pub invited_by: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Clone, Debug)]
pub struct CreatedInvitation {
    pub id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Serialize, Clone, Debug)]
pub struct WorkspaceSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct InvitationLookup {
    #[serde(flatten)]
    pub invitation: InvitationView,
    pub expired: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<WorkspaceSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inviter_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn invitation(status: InvitationStatus, created: DateTime<Utc>) -> Invitation {
        Invitation {
            id: Uuid::new_v4(),
            workspace_id: Uuid::new_v4(),
            email: "bob@x.com".to_string(),
            role: WorkspaceRole::Member,
            status,
            invited_by: Uuid::new_v4(),
            token_hash: "00".repeat(32),
            expires_at: created + Duration::days(7),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn pending_turns_expired_only_after_deadline() {
        let t0 = Utc::now();
        let inv = invitation(InvitationStatus::Pending, t0);
        assert_eq!(inv.state_at(t0 + Duration::days(6)), InvitationState::Pending);
        assert_eq!(inv.state_at(inv.expires_at), InvitationState::Pending);
        assert_eq!(inv.state_at(t0 + Duration::days(8)), InvitationState::Expired);
        // the stored status is untouched by reading
        assert_eq!(inv.status, InvitationStatus::Pending);
    }

    #[test]
    fn terminal_statuses_never_report_expired() {
        let t0 = Utc::now();
        let later = t0 + Duration::days(30);
        assert_eq!(
            invitation(InvitationStatus::Accepted, t0).state_at(later),
            InvitationState::Accepted
        );
        assert_eq!(
            invitation(InvitationStatus::Declined, t0).state_at(later),
            InvitationState::Declined
        );
    }

    #[test]
    fn accept_checks_status_before_expiry() {
        let t0 = Utc::now();
        let late = t0 + Duration::days(8);

        let accepted = invitation(InvitationStatus::Accepted, t0);
        assert!(matches!(
            accepted.ensure_acceptable(late),
            Err(AppError::InvalidState { .. })
        ));

        let stale = invitation(InvitationStatus::Pending, t0);
        assert!(matches!(stale.ensure_acceptable(late), Err(AppError::Expired)));
        assert!(stale.ensure_pending().is_ok());
        assert!(stale.ensure_acceptable(t0 + Duration::hours(1)).is_ok());
    }

    #[test]
    fn lookup_serializes_flat_with_expired_flag() {
        let t0 = Utc::now();
        let inv = invitation(InvitationStatus::Pending, t0);
        let now = t0 + Duration::days(8);
        let lookup = InvitationLookup {
            invitation: inv.view_at(now),
            expired: inv.is_expired_at(now),
            workspace: None,
            inviter_name: None,
        };
        let json = serde_json::to_value(&lookup).unwrap();
        assert_eq!(json["expired"], true);
        assert_eq!(json["status"], "pending");
        assert_eq!(json["state"], "expired");
        assert!(json.get("workspace").is_none());
        assert!(json.get("token_hash").is_none());
    }
}
