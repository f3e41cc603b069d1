pub mod access;
pub mod context;
pub mod feature_requests_service;
pub mod invitations_service;
pub mod notifications_service;
pub mod users_service;
pub mod workspaces_service;

pub use access::AccessService;
pub use feature_requests_service::FeatureRequestsService;
pub use invitations_service::InvitationsService;
pub use notifications_service::NotificationsService;
pub use users_service::UsersService;
pub use workspaces_service::WorkspacesService;
