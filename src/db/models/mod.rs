// Sub-modules organized by functional domain
pub mod activity;
pub mod api;
pub mod feature_request;
pub mod invitation;
pub mod notification;
pub mod user;
pub mod workspace;
pub mod workspace_member;

pub use activity::*;
pub use api::*;
pub use feature_request::*;
pub use invitation::*;
pub use notification::*;
pub use user::*;
pub use workspace::*;
pub use workspace_member::*;
