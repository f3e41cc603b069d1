use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::schema::activities;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityAction {
    WorkspaceCreated,
    InvitationCreated,
    InvitationAccepted,
    InvitationCancelled,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::WorkspaceCreated => "workspace_created",
            ActivityAction::InvitationCreated => "invitation_created",
            ActivityAction::InvitationAccepted => "invitation_accepted",
            ActivityAction::InvitationCancelled => "invitation_cancelled",
        }
    }

    pub fn target_type(&self) -> &'static str {
        match self {
            ActivityAction::WorkspaceCreated => "workspace",
            _ => "invitation",
        }
    }
}

#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = activities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Activity {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub actor_id: Uuid,
    pub action: String,
    pub target_type: String,
    pub target_id: Option<Uuid>,
    pub details: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = activities)]
pub struct NewActivity {
    pub workspace_id: Uuid,
    pub actor_id: Uuid,
    pub action: String,
    pub target_type: String,
    pub target_id: Option<Uuid>,
    pub details: Option<String>,
}

impl NewActivity {
    pub fn record(
        workspace_id: Uuid,
        actor_id: Uuid,
        action: ActivityAction,
        target_id: Uuid,
        details: Option<String>,
    ) -> Self {
        Self {
            workspace_id,
            actor_id,
            action: action.as_str().to_string(),
            target_type: action.target_type().to_string(),
            target_id: Some(target_id),
            details,
        }
    }
}
