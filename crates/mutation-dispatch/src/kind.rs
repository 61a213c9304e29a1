//! Mutation kinds and their declared effects.

/// What a successful mutation invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationTarget {
    /// Every cached post view: the feed, per-user lists, single posts.
    PostViews,
    /// The cached session identity.
    Identity,
}

/// The remote writes the client can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    CreatePost,
    UpdatePost,
    DeletePost,
    CreateComment,
    UpdateComment,
    DeleteComment,
    UpdatePhoto,
    ChangePassword,
}

impl MutationKind {
    /// The invalidation table: which cached views a successful mutation
    /// of this kind makes stale.
    ///
    /// Comments live embedded in their parent post, so comment writes
    /// invalidate the post views too.
    pub fn invalidates(&self) -> &'static [InvalidationTarget] {
        use MutationKind::*;
        match self {
            CreatePost | UpdatePost | DeletePost | CreateComment | UpdateComment
            | DeleteComment => &[InvalidationTarget::PostViews],
            UpdatePhoto => &[InvalidationTarget::Identity],
            ChangePassword => &[],
        }
    }

    /// Notification shown when the mutation succeeds.
    pub fn success_message(&self) -> &'static str {
        use MutationKind::*;
        match self {
            CreatePost => "Post created successfully",
            UpdatePost => "Post updated successfully",
            DeletePost => "Post deleted successfully",
            CreateComment => "Comment created successfully",
            UpdateComment => "Comment updated successfully",
            DeleteComment => "Comment deleted successfully",
            UpdatePhoto => "Profile photo updated",
            ChangePassword => "Password changed successfully",
        }
    }

    /// Notification shown when the mutation fails and the server sent
    /// no message of its own.
    pub fn fallback_error(&self) -> &'static str {
        use MutationKind::*;
        match self {
            CreatePost => "Failed to create post",
            UpdatePost => "Failed to update post",
            DeletePost => "Failed to delete post",
            CreateComment => "Failed to create comment",
            UpdateComment => "Failed to update comment",
            DeleteComment => "Failed to delete comment",
            UpdatePhoto => "Failed to update profile photo",
            ChangePassword => "Failed to change password",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use InvalidationTarget::*;
    use MutationKind::*;

    const ALL: [MutationKind; 8] = [
        CreatePost,
        UpdatePost,
        DeletePost,
        CreateComment,
        UpdateComment,
        DeleteComment,
        UpdatePhoto,
        ChangePassword,
    ];

    #[test]
    fn test_post_and_comment_writes_invalidate_post_views() {
        for kind in [
            CreatePost,
            UpdatePost,
            DeletePost,
            CreateComment,
            UpdateComment,
            DeleteComment,
        ] {
            assert_eq!(kind.invalidates(), &[PostViews], "{kind:?}");
        }
    }

    #[test]
    fn test_photo_update_invalidates_identity_only() {
        assert_eq!(UpdatePhoto.invalidates(), &[Identity]);
    }

    #[test]
    fn test_password_change_invalidates_nothing() {
        assert!(ChangePassword.invalidates().is_empty());
    }

    #[test]
    fn test_every_kind_has_messages() {
        for kind in ALL {
            assert!(!kind.success_message().is_empty());
            assert!(!kind.fallback_error().is_empty());
        }
    }
}
