mod access;
mod auth;
mod invitation;
mod votes;
