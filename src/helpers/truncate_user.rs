/// Usernames longer than this are shortened unless full usernames are requested
pub const MAX_USER_LEN: usize = 10;
const KEPT_USER_CHARS: usize = 7;

pub fn truncate_user(user: &str, full_users: bool) -> String {
    if full_users || user.chars().count() <= MAX_USER_LEN {
        return user.to_string();
    }

    let kept: String = user.chars().take(KEPT_USER_CHARS).collect();
    format!("{kept}...")
}
