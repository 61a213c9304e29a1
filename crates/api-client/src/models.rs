//! Wire models for the murmur REST API.
//!
//! The backend speaks Mongo-style documents: ids arrive as `_id`, a
//! comment's author as `commentCreator`, and collections inside
//! envelopes (`{"posts": [...]}`). The serde renames here keep those
//! quirks out of the rest of the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address the account was registered with.
    #[serde(default)]
    pub email: Option<String>,
    /// URL of the profile photo, when one was uploaded.
    #[serde(default)]
    pub photo: Option<String>,
}

impl User {
    /// Ownership predicate: does this user own content authored by
    /// `author_id`?
    pub fn owns(&self, author_id: &str) -> bool {
        self.id == author_id
    }
}

/// A post in the feed, with its comments embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Post text.
    pub body: String,
    /// URL of the attached image, if any.
    #[serde(default)]
    pub image: Option<String>,
    /// Author of the post.
    pub user: User,
    /// Creation time, server clock.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Comments in server order.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Comment text (1-30 characters).
    pub content: String,
    /// Author of the comment.
    #[serde(rename = "commentCreator")]
    pub author: User,
    /// Identifier of the parent post.
    pub post: String,
    /// Creation time, server clock.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Registration payload for a new account.
#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Password confirmation; must match `password`.
    #[serde(rename = "rePassword")]
    pub re_password: String,
    /// Date of birth, `MM-DD-YYYY` as the backend expects.
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: String,
    /// Either "male" or "female".
    pub gender: String,
}

/// An image attached to a post or profile, held in memory until upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Filename sent in the multipart part.
    pub file_name: String,
    /// MIME type of the image.
    pub mime: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Payload for creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Post text; must be non-empty.
    pub body: String,
    /// Optional attached image.
    pub image: Option<ImageUpload>,
}

/// Payload for updating a post.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    /// Replacement post text; must be non-empty.
    pub body: String,
    /// Replacement image, if the caller is changing it.
    pub image: Option<ImageUpload>,
}

/// Envelope around the posts collection.
#[derive(Debug, Deserialize)]
pub(crate) struct PostsEnvelope {
    pub posts: Vec<Post>,
}

/// Envelope around a single post.
#[derive(Debug, Deserialize)]
pub(crate) struct PostEnvelope {
    pub post: Post,
}

/// Envelope around the profile payload.
#[derive(Debug, Deserialize)]
pub(crate) struct ProfileEnvelope {
    pub user: User,
}

/// Sign-in response.
#[derive(Debug, Deserialize)]
pub(crate) struct SignInResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_deserializes_wire_shape() {
        let json = r#"{
            "_id": "664f1c",
            "body": "hello",
            "image": null,
            "user": {"_id": "u1", "name": "Dina", "photo": null},
            "createdAt": "2024-05-23T10:15:00.000Z",
            "comments": [
                {
                    "_id": "c1",
                    "content": "welcome",
                    "commentCreator": {"_id": "u2", "name": "Omar"},
                    "post": "664f1c",
                    "createdAt": "2024-05-23T10:20:00.000Z"
                }
            ]
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, "664f1c");
        assert_eq!(post.body, "hello");
        assert!(post.image.is_none());
        assert_eq!(post.user.name, "Dina");
        assert_eq!(post.comments.len(), 1);
        assert_eq!(post.comments[0].author.name, "Omar");
        assert_eq!(post.comments[0].post, "664f1c");
    }

    #[test]
    fn test_post_without_comments_field() {
        let json = r#"{
            "_id": "a",
            "body": "b",
            "user": {"_id": "u1", "name": "N"},
            "createdAt": "2024-01-01T00:00:00Z"
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.comments.is_empty());
        assert!(post.image.is_none());
    }

    #[test]
    fn test_new_account_serializes_backend_field_names() {
        let account = NewAccount {
            name: "Dina".to_string(),
            email: "dina@example.com".to_string(),
            password: "Str0ng!pass".to_string(),
            re_password: "Str0ng!pass".to_string(),
            date_of_birth: "10-02-1998".to_string(),
            gender: "female".to_string(),
        };

        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("rePassword").is_some());
        assert!(json.get("dateOfBirth").is_some());
        assert!(json.get("re_password").is_none());
    }

    #[test]
    fn test_ownership_predicate() {
        let user = User {
            id: "u1".to_string(),
            name: "Dina".to_string(),
            email: None,
            photo: None,
        };

        assert!(user.owns("u1"));
        assert!(!user.owns("u2"));
        assert!(!user.owns(""));
    }
}
