use crate::prelude::*;
use nix::unistd::{User, getuid};
use std::env;

/// Name of the user running this process
///
/// Looks up the passwd entry of the real uid, falling back to `$USER`.
pub fn current_username() -> Option<String> {
    match User::from_uid(getuid()) {
        Ok(Some(user)) => return Some(user.name),
        Ok(None) => debug!("No passwd entry for uid {}", getuid()),
        Err(e) => debug!("Failed to look up uid {}: {e}", getuid()),
    }

    env::var("USER").ok().filter(|user| !user.is_empty())
}
