//! Identity domain - credential and directory collaborators.
//!
//! Provides the seams the greeting tool depends on: a credential provider
//! scoped to the directory audience and a client for the caller's profile.

mod client;
mod error;

pub use client::{
    AccessToken, DEFAULT_DIRECTORY_BASE_URL, DIRECTORY_DEFAULT_SCOPE, DirectoryClient,
    HttpDirectoryClient, StaticTokenProvider, TokenProvider, UserProfile,
};
pub use error::IdentityError;
