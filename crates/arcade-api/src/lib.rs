pub mod admin;
pub mod auth;
pub mod error;
pub mod extract;
pub mod friends;
pub mod games;
pub mod profile;
