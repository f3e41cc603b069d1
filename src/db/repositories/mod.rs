pub mod activities;
pub mod feature_requests;
pub mod invitations;
pub mod notifications;
pub mod users;
pub mod votes;
pub mod workspace_members;
pub mod workspaces;

pub use activities::ActivitiesRepo;
pub use feature_requests::FeatureRequestsRepo;
pub use invitations::InvitationsRepo;
pub use notifications::NotificationsRepo;
pub use users::UsersRepo;
pub use votes::VotesRepo;
pub use workspace_members::WorkspaceMembersRepo;
pub use workspaces::WorkspacesRepo;
