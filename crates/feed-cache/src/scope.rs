//! Cache scope keys.

use std::fmt;

/// Identifies one cached collection view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The global feed.
    Feed,
    /// All posts authored by one user.
    UserPosts(String),
    /// A single post with its comments.
    Post(String),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Feed => write!(f, "posts"),
            Scope::UserPosts(user_id) => write!(f, "posts:user:{}", user_id),
            Scope::Post(post_id) => write!(f, "post:{}", post_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_keys_are_distinct() {
        use std::collections::HashSet;

        let scopes = [
            Scope::Feed,
            Scope::UserPosts("u1".to_string()),
            Scope::UserPosts("u2".to_string()),
            Scope::Post("p1".to_string()),
        ];
        let unique: HashSet<_> = scopes.iter().collect();
        assert_eq!(unique.len(), scopes.len());
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(Scope::Feed.to_string(), "posts");
        assert_eq!(
            Scope::UserPosts("42".to_string()).to_string(),
            "posts:user:42"
        );
        assert_eq!(Scope::Post("p9".to_string()).to_string(), "post:p9");
    }
}
