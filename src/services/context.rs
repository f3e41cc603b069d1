use uuid::Uuid;

/// Caller acting inside one workspace.
#[derive(Clone, Copy, Debug)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub workspace_id: Uuid,
}
