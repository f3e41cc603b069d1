pub mod token;

pub use token::{generate_invitation_token, hash_token};
