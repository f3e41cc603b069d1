use chrono::{DateTime, Duration, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use crate::{
    db::models::activity::{ActivityAction, NewActivity},
    db::models::invitation::{
        CreatedInvitation, InvitationLookup, InvitationStatus, InvitationView, NewInvitation,
        WorkspaceSummary,
    },
    db::models::notification::{NewNotification, NotificationKind},
    db::models::workspace_member::{NewWorkspaceMember, WorkspaceRole},
    db::repositories::{
        ActivitiesRepo, InvitationsRepo, NotificationsRepo, UsersRepo, WorkspaceMembersRepo,
        WorkspacesRepo,
    },
    error::{AppError, AppResult},
    services::access::{ANY_MEMBER, AccessService, MANAGERS},
    services::context::RequestContext,
    utils::{generate_invitation_token, hash_token},
    validation::invitation::normalize_invite_email,
};

pub struct InvitationsService;

impl InvitationsService {
    /// Issues a pending invitation. The raw token is returned once and only its
    /// digest is stored.
    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        email: &str,
        role: WorkspaceRole,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> AppResult<CreatedInvitation> {
        let email = normalize_invite_email(email)?;

        let result = conn.transaction::<_, AppError, _>(|conn| {
            let inviter_membership =
                AccessService::require_role(conn, ctx.workspace_id, ctx.user_id, MANAGERS)?;
            AccessService::ensure_can_grant(inviter_membership.role, role)?;

            if WorkspaceMembersRepo::email_is_member(conn, ctx.workspace_id, &email)? {
                return Err(AppError::AlreadyMember);
            }
            if InvitationsRepo::pending_exists_for_email(conn, ctx.workspace_id, &email)? {
                return Err(AppError::DuplicateInvite);
            }

            let token = generate_invitation_token();
            let invitation = InvitationsRepo::insert(
                conn,
                &NewInvitation {
                    workspace_id: ctx.workspace_id,
                    email: email.clone(),
                    role,
                    status: InvitationStatus::Pending,
                    invited_by: ctx.user_id,
                    token_hash: hash_token(&token),
                    expires_at: now + ttl,
                },
            )?;

            if let Some(invitee) = UsersRepo::find_by_email(conn, &email)? {
                let workspace = WorkspacesRepo::find_by_id(conn, ctx.workspace_id)?
                    .ok_or_else(|| AppError::not_found("workspace"))?;
                let inviter_name = UsersRepo::find_by_id(conn, ctx.user_id)?
                    .map(|u| u.name)
                    .unwrap_or_else(|| "Someone".to_string());
                let notification = NewNotification::new(
                    invitee.id,
                    NotificationKind::InvitationReceived,
                    "Workspace invitation".to_string(),
                    format!(
                        "{} invited you to join {} as {}",
                        inviter_name,
                        workspace.name,
                        role.as_str()
                    ),
                )
                .with_link(format!("/invite/{}", token));
                NotificationsRepo::insert(conn, &notification)?;
            }

            ActivitiesRepo::insert(
                conn,
                &NewActivity::record(
                    ctx.workspace_id,
                    ctx.user_id,
                    ActivityAction::InvitationCreated,
                    invitation.id,
                    Some(email.clone()),
                ),
            )?;

            Ok(CreatedInvitation {
                id: invitation.id,
                token,
                expires_at: invitation.expires_at,
            })
        });

        // A concurrent create can still trip the single-pending index.
        let created = result.map_err(|e| match e {
            AppError::Database(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                _,
            )) => AppError::DuplicateInvite,
            other => other,
        })?;

        tracing::info!(
            invitation_id = %created.id,
            workspace_id = %ctx.workspace_id,
            invited_by = %ctx.user_id,
            "Invitation created"
        );
        Ok(created)
    }

    pub fn list_for_workspace(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        status: Option<InvitationStatus>,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<InvitationView>> {
        AccessService::require_role(conn, ctx.workspace_id, ctx.user_id, ANY_MEMBER)?;
        let invitations = InvitationsRepo::list_by_workspace(conn, ctx.workspace_id, status)?;
        Ok(invitations.iter().map(|inv| inv.view_at(now)).collect())
    }

    /// Read-only lookup. Expiry is reported, never written.
    pub fn get_by_token(
        conn: &mut PgConnection,
        token: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<InvitationLookup>> {
        let Some(invitation) = InvitationsRepo::find_by_token_hash(conn, &hash_token(token))? else {
            return Ok(None);
        };

        let expired = invitation.is_expired_at(now);
        let (workspace, inviter_name) = if expired {
            (None, None)
        } else {
            let workspace = WorkspacesRepo::find_by_id(conn, invitation.workspace_id)?
                .map(|ws| WorkspaceSummary {
                    id: ws.id,
                    name: ws.name,
                });
            let inviter_name = UsersRepo::find_by_id(conn, invitation.invited_by)?.map(|u| u.name);
            (workspace, inviter_name)
        };

        Ok(Some(InvitationLookup {
            invitation: invitation.view_at(now),
            expired,
            workspace,
            inviter_name,
        }))
    }

    /// Returns the workspace the user just joined.
    pub fn accept(
        conn: &mut PgConnection,
        token: &str,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Uuid> {
        let token_hash = hash_token(token);

        let result = conn.transaction::<_, AppError, _>(|conn| {
            let invitation = InvitationsRepo::lock_by_token_hash(conn, &token_hash)?
                .ok_or_else(|| AppError::not_found("invitation"))?;
            invitation.ensure_acceptable(now)?;

            if WorkspaceMembersRepo::find(conn, invitation.workspace_id, user_id)?.is_some() {
                return Err(AppError::AlreadyMember);
            }

            WorkspaceMembersRepo::insert(
                conn,
                &NewWorkspaceMember {
                    workspace_id: invitation.workspace_id,
                    user_id,
                    role: invitation.role,
                },
            )?;
            InvitationsRepo::update_status(conn, invitation.id, InvitationStatus::Accepted)?;

            ActivitiesRepo::insert(
                conn,
                &NewActivity::record(
                    invitation.workspace_id,
                    user_id,
                    ActivityAction::InvitationAccepted,
                    invitation.id,
                    Some(invitation.role.as_str().to_string()),
                ),
            )?;

            let member_name = UsersRepo::find_by_id(conn, user_id)?
                .map(|u| u.name)
                .unwrap_or_else(|| invitation.email.clone());
            let workspace_name = WorkspacesRepo::find_by_id(conn, invitation.workspace_id)?
                .map(|ws| ws.name)
                .unwrap_or_else(|| "your workspace".to_string());
            NotificationsRepo::insert(
                conn,
                &NewNotification::new(
                    invitation.invited_by,
                    NotificationKind::InvitationAccepted,
                    "Invitation accepted".to_string(),
                    format!("{} joined {}", member_name, workspace_name),
                )
                .with_link(format!("/workspaces/{}", invitation.workspace_id)),
            )?;

            tracing::info!(
                invitation_id = %invitation.id,
                workspace_id = %invitation.workspace_id,
                user_id = %user_id,
                "Invitation accepted"
            );
            Ok(invitation.workspace_id)
        });

        result.map_err(|e| match e {
            AppError::Database(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                _,
            )) => AppError::AlreadyMember,
            other => other,
        })
    }

    /// Declining skips the expiry check: a stale invite can still be turned down.
    /// Returns the workspace the invitation belonged to.
    pub fn decline(conn: &mut PgConnection, token: &str) -> AppResult<Uuid> {
        let token_hash = hash_token(token);
        conn.transaction::<_, AppError, _>(|conn| {
            let invitation = InvitationsRepo::lock_by_token_hash(conn, &token_hash)?
                .ok_or_else(|| AppError::not_found("invitation"))?;
            invitation.ensure_pending()?;
            InvitationsRepo::update_status(conn, invitation.id, InvitationStatus::Declined)?;
            tracing::info!(invitation_id = %invitation.id, "Invitation declined");
            Ok(invitation.workspace_id)
        })
    }

    /// Hard delete; returns the workspace the invitation belonged to.
    pub fn cancel(
        conn: &mut PgConnection,
        invitation_id: Uuid,
        caller_id: Uuid,
    ) -> AppResult<Uuid> {
        conn.transaction::<_, AppError, _>(|conn| {
            let invitation = InvitationsRepo::find_by_id(conn, invitation_id)?
                .ok_or_else(|| AppError::not_found("invitation"))?;
            AccessService::require_role(conn, invitation.workspace_id, caller_id, MANAGERS)?;

            InvitationsRepo::delete_by_id(conn, invitation_id)?;
            ActivitiesRepo::insert(
                conn,
                &NewActivity::record(
                    invitation.workspace_id,
                    caller_id,
                    ActivityAction::InvitationCancelled,
                    invitation.id,
                    Some(invitation.email.clone()),
                ),
            )?;

            tracing::info!(
                invitation_id = %invitation_id,
                workspace_id = %invitation.workspace_id,
                cancelled_by = %caller_id,
                "Invitation cancelled"
            );
            Ok(invitation.workspace_id)
        })
    }
}
